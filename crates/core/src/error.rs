//! Core Error Types
//!
//! Errors raised while constructing or decoding domain values.

use thiserror::Error;

/// Core error type for the Career Compass workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A domain value failed a field-level check
    #[error("Validation error: {0}")]
    Validation(String),

    /// A wire value could not be mapped onto a domain value
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
