/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key does not conform to the `<owner>^<file>` convention.
    #[error("malformed key {key:?}: {reason}")]
    MalformedKey { key: String, reason: String },

    /// The target file does not exist (read/delete).
    #[error("no file stored for key {key:?}")]
    NotFound { key: String },

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
