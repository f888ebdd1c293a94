//! Storage Layer
//!
//! Configuration loading from files and the environment.

pub mod config;

pub use config::*;
