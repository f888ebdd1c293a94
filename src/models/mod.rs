//! Data Models
//!
//! Contains the data structures used throughout the application.

pub mod companion;
pub mod session;
pub mod settings;

pub use companion::*;
pub use session::*;
pub use settings::*;
