//! Error types for Patchwing

use thiserror::Error;

/// Result type alias for Patchwing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Patchwing operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
