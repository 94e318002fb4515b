//! Common error types for tunecast

use thiserror::Error;

/// Common result type for tunecast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by configuration loading, form validation and the
/// submission store
#[derive(Error, Debug)]
pub enum Error {
    /// Store connectivity, write or read failure (wraps sqlx::Error)
    #[error("Store error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O failure while reading configuration or credentials files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config file present but malformed
    #[error("Config file parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Submitted form rejected before anything was persisted
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),
}

impl Error {
    /// True for errors caused by the visitor's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidSubmission(_))
    }
}
