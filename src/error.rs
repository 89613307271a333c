use thiserror::Error;

/// Unified error type for mono-version operations
#[derive(Error, Debug)]
pub enum VersioningError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Revision error: {0}")]
    Revision(String),

    #[error("Store operation failed: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in mono-version
pub type Result<T> = std::result::Result<T, VersioningError>;

impl VersioningError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersioningError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        VersioningError::Version(msg.into())
    }

    /// Create a revision error with context
    pub fn revision(msg: impl Into<String>) -> Self {
        VersioningError::Revision(msg.into())
    }

    /// Create a store error with context
    pub fn store(msg: impl Into<String>) -> Self {
        VersioningError::Store(msg.into())
    }
}
