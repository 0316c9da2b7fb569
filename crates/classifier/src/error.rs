use thiserror::Error;

/// Result type for classification operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Errors raised when the input handed to the analyzer is unusable.
///
/// Classification itself cannot fail; only malformed input is rejected, and it
/// is rejected before any partial result exists.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Repository metadata is missing a required field or is malformed
    #[error("Invalid repository metadata: {0}")]
    InvalidMetadata(String),

    /// The repository listing contained no entries
    #[error("Empty file list")]
    EmptyFileList,

    /// A file descriptor carried an unusable path
    #[error("Invalid file path: {0:?}")]
    InvalidPath(String),

    /// The same path appeared more than once in the listing
    #[error("Duplicate file path: {0}")]
    DuplicatePath(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClassifierError {
    /// Create an invalid metadata error
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }
}
