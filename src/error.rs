//! Error types for the index.

use thiserror::Error;

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that can occur in the index
///
/// Every failing operation leaves the tree exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Key is already present in the tree
    #[error("Duplicate key not allowed")]
    DuplicateKey,

    /// Key is not present in the tree (or the tree is empty)
    #[error("Key not found")]
    KeyNotFound,

    /// Minimum degree is too small to form a B-tree
    #[error("Invalid minimum degree: {degree} (min: {min})")]
    InvalidDegree { degree: usize, min: usize },

    /// Minimum degree is too large for node limits to fit in a usize
    #[error("Minimum degree too large: {degree} (max: {max})")]
    DegreeTooLarge { degree: usize, max: usize },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IndexError {
    /// Create an invalid configuration error with a message
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
