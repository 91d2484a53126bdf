//! Error types for the ordex-core library.

use thiserror::Error;

/// Main error type for the ordex library.
///
/// Extraction itself never fails: a rejected or empty email is signaled as
/// no-result, and unparsable fields degrade to their defaults. Errors only
/// arise from the configuration and I/O surfaces.
#[derive(Error, Debug)]
pub enum OrdexError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the ordex library.
pub type Result<T> = std::result::Result<T, OrdexError>;
