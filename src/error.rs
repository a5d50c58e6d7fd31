//! Error types for saycmd

use std::io;
use thiserror::Error;

/// Main error type for saycmd
///
/// Configuration errors are detected before compilation begins; ordering and
/// template errors abort a compilation in progress. All of them terminate
/// the run with a non-zero status.
#[derive(Error, Debug)]
pub enum SaycmdError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ordering error: {0}")]
    Ordering(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for saycmd operations
pub type Result<T> = std::result::Result<T, SaycmdError>;

impl From<String> for SaycmdError {
    fn from(s: String) -> Self {
        SaycmdError::Other(s)
    }
}

impl From<&str> for SaycmdError {
    fn from(s: &str) -> Self {
        SaycmdError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for SaycmdError {
    fn from(e: serde_json::Error) -> Self {
        // The only JSON this tool reads is the prompt template document.
        SaycmdError::Template(format!("invalid JSON: {}", e))
    }
}
