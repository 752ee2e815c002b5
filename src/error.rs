//! Error types for ttsprep

use std::io;
use thiserror::Error;

/// Main error type for ttsprep
#[derive(Error, Debug)]
pub enum TtsPrepError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Phonemizer engine error: {0}")]
    Engine(String),

    #[error("Audio check failed: {0}")]
    Audio(String),

    #[error("Reference data error: {0}")]
    Reference(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for ttsprep operations
pub type Result<T> = std::result::Result<T, TtsPrepError>;

impl From<String> for TtsPrepError {
    fn from(s: String) -> Self {
        TtsPrepError::Other(s)
    }
}

impl From<&str> for TtsPrepError {
    fn from(s: &str) -> Self {
        TtsPrepError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for TtsPrepError {
    fn from(e: serde_json::Error) -> Self {
        TtsPrepError::Reference(format!("JSON error: {}", e))
    }
}
