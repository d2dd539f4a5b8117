//! Tutor Error Types
//!
//! Centralized error handling for all tutor components

use std::fmt;

/// Main error type for tutor operations
#[derive(Debug)]
pub enum TutorError {
    /// Generic error with message
    Generic(String),
    /// IO-related errors
    Io(std::io::Error),
    /// Configuration errors
    Config(String),
    /// Completion API errors (network, auth, quota, empty response)
    Completion(String),
}

impl fmt::Display for TutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TutorError::Generic(msg) => write!(f, "Tutor error: {}", msg),
            TutorError::Io(err) => write!(f, "IO error: {}", err),
            TutorError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TutorError::Completion(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TutorError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Convenience result type for tutor operations
pub type Result<T> = std::result::Result<T, TutorError>;

impl From<std::io::Error> for TutorError {
    fn from(err: std::io::Error) -> Self {
        TutorError::Io(err)
    }
}

impl From<anyhow::Error> for TutorError {
    fn from(err: anyhow::Error) -> Self {
        TutorError::Generic(err.to_string())
    }
}
