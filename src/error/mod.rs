//! Error types and handlers for release server operations

pub mod handlers;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PublishError>;

#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// Missing or invalid publisher configuration
    #[error("Configuration error: {0}")]
    Config(String),
    /// Login failures and unusable session tokens
    #[error("Authentication error: {0}")]
    Auth(String),
    /// Network related errors
    #[error("Network error: {0}")]
    Network(String),
    /// Release listing and creation errors
    #[error("Release error: {0}")]
    Release(String),
    /// Asset upload errors
    #[error("Upload error: {0}")]
    Upload(String),
    /// File IO errors
    #[error("IO error: {0}")]
    Io(String),
    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<std::io::Error> for PublishError {
    fn from(err: std::io::Error) -> Self {
        PublishError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        PublishError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        PublishError::Network(err.to_string())
    }
}

impl From<url::ParseError> for PublishError {
    fn from(err: url::ParseError) -> Self {
        PublishError::Config(err.to_string())
    }
}
