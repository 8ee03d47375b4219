//! Error types for the motion comparison library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Window lengths or reference length do not fit together
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reference asset missing, unreadable or malformed
    #[error("Reference load error: {0}")]
    LoadError(String),

    /// Frame dispatch worker failed
    #[error("Dispatch error: {0}")]
    DispatchError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
