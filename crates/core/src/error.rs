//! Error types for oss-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for oss-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for oss-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or profile error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid batch input, raised before any I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid ignore pattern
    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error from the object store
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Validation(_) | Error::Pattern(_) | Error::Yaml(_) => 2, // UsageError
            Error::Network(_) => 3,                                           // NetworkError
            Error::Auth(_) => 4,                                              // AuthError
            Error::NotFound(_) => 5,                                          // NotFound
            _ => 1,                                                           // GeneralError
        }
    }
}
