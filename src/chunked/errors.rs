//! Chunked file store errors
//!
//! A lookup that finds nothing is `Ok(None)`, not an error. Backend failures
//! (duplicate keys, lock failures) pass through unmodified.

use thiserror::Error;

use crate::backend::BackendError;

/// Result type for chunked store operations
pub type ChunkStoreResult<T> = Result<T, ChunkStoreError>;

/// Chunked file store errors
#[derive(Debug, Error)]
pub enum ChunkStoreError {
    /// Acknowledged write whose stored content hashes to the wrong checksum
    #[error("invalid file {file_id}: stored checksum {actual} does not match declared checksum {expected}")]
    InvalidFile {
        file_id: String,
        expected: String,
        actual: String,
    },

    /// A chunk document failed its record checksum on read
    #[error("chunk {index} of file {file_id} failed its record checksum")]
    ChunkCorruption { file_id: String, index: u32 },

    /// A stored document could not be decoded
    #[error("malformed {kind} document: {reason}")]
    MalformedDocument { kind: &'static str, reason: String },

    /// Backing store failure, passed through unmodified
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ChunkStoreError {
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        ChunkStoreError::MalformedDocument {
            kind,
            reason: reason.into(),
        }
    }
}
