//! Document backend errors

use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors surfaced by the backing document store
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// A write collided with a unique index
    #[error("duplicate key {key} for unique index {index} on {collection}")]
    DuplicateKey {
        collection: String,
        index: String,
        key: String,
    },

    /// A store-level command could not be executed
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// Internal lock poisoned
    #[error("lock poisoned")]
    LockPoisoned,
}

impl BackendError {
    /// Returns true if this error is a unique-index violation
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, BackendError::DuplicateKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_display() {
        let err = BackendError::DuplicateKey {
            collection: "fs.chunks".to_string(),
            index: "file_id_n".to_string(),
            key: "[\"f1\",1]".to_string(),
        };

        let display = format!("{}", err);
        assert!(display.contains("fs.chunks"));
        assert!(display.contains("file_id_n"));
        assert!(err.is_duplicate_key());
    }

    #[test]
    fn test_command_failed_not_duplicate() {
        let err = BackendError::CommandFailed("unknown namespace".to_string());
        assert!(!err.is_duplicate_key());
    }
}
