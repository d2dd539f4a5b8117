//! Tutor Common - Shared errors, configuration and constants
//!
//! This crate provides the error type, configuration structs and
//! well-known constants used across all tutor components.

pub mod config;
pub mod constants;
pub mod error;

// Re-export commonly used items
pub use config::{ProviderConfig, ServerConfig};
pub use constants::*;
pub use error::{Result, TutorError};
