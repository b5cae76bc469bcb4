//! Chunked file store orchestration
//!
//! Persists a file as one metadata document plus a batch of chunk documents,
//! reads it back metadata-first with chunks sorted by ordinal, and removes
//! both together. The two writes target independent collections with no
//! cross-collection transaction: a failure between them leaves an orphaned
//! metadata record, and recovery is the caller's concern.

use std::sync::Arc;

use serde_json::Value;

use super::chunks::ChunkRecords;
use super::config::StoreConfig;
use super::errors::{ChunkStoreError, ChunkStoreResult};
use super::file::{ChunkedFile, FileMetadata};
use super::metadata::MetadataRecords;
use crate::backend::{Command, DocumentBackend};
use crate::observability::Logger;
use crate::query::Selector;

/// Chunked large-object store over a backing document store
pub struct ChunkedFileStore {
    backend: Arc<dyn DocumentBackend>,
    metadata: MetadataRecords,
    chunks: ChunkRecords,
    config: StoreConfig,
}

impl ChunkedFileStore {
    /// Opens a store over a backend.
    ///
    /// Establishes the unique (file_id, n) index on the chunks collection
    /// before returning; index creation is idempotent, so several stores may
    /// share one backend and namespace.
    pub fn new(backend: Arc<dyn DocumentBackend>, config: StoreConfig) -> ChunkStoreResult<Self> {
        let metadata = MetadataRecords::new(Arc::clone(&backend), config.files_collection());
        let chunks = ChunkRecords::new(Arc::clone(&backend), config.chunks_collection());

        chunks.ensure_index()?;
        Logger::info("CHUNK_INDEX_READY", &[("collection", chunks.collection())]);

        Ok(Self {
            backend,
            metadata,
            chunks,
            config,
        })
    }

    /// Configured namespace for the two physical collections
    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Looks up exactly one file matching the selector.
    ///
    /// Returns `Ok(None)` when no metadata record matches. When one does, the
    /// file's chunks are fetched sorted ascending by ordinal index and the
    /// file is assembled in that order. Completeness and content checksum are
    /// not re-validated here.
    pub fn find_one(&self, selector: &Selector) -> ChunkStoreResult<Option<ChunkedFile>> {
        let Some(metadata) = self.metadata.find_one(selector)? else {
            return Ok(None);
        };

        let chunks = self.chunks.find_ordered(&metadata.id)?;
        Ok(Some(ChunkedFile::from_parts(metadata, chunks)))
    }

    /// Persists a file: metadata record first, then all chunks as one batch.
    ///
    /// Under acknowledged writes the stored chunks are re-hashed server-side
    /// and compared with the file's declared checksum; a mismatch surfaces as
    /// `InvalidFile` and the written data is left in place for the caller to
    /// inspect or discard. Under unacknowledged writes the call returns right
    /// after the batch insert with no integrity check.
    pub fn insert_one(&self, file: &ChunkedFile) -> ChunkStoreResult<()> {
        self.metadata.insert(&file.metadata)?;
        self.chunks.insert_many(&file.chunks)?;

        if self.config.write_ack.is_acknowledged() {
            self.validate(&file.metadata)?;
        }

        let file_id = file.metadata.id.to_string();
        let chunk_count = file.chunks.len().to_string();
        Logger::info(
            "FILE_INSERT_COMPLETE",
            &[("chunks", &chunk_count), ("file_id", &file_id)],
        );
        Ok(())
    }

    /// Compares the server-recomputed checksum of a file's stored chunks with
    /// its declared checksum.
    ///
    /// The recomputation always targets the configured chunks collection, so
    /// a store under a non-default prefix validates its own namespace.
    pub fn validate(&self, metadata: &FileMetadata) -> ChunkStoreResult<()> {
        let reply = self.backend.run_command(Command::FileChecksum {
            collection: self.chunks.collection().to_string(),
            file_id: metadata.id.to_string(),
        })?;

        let actual = reply
            .get("checksum")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ChunkStoreError::malformed("checksum reply", "missing checksum field")
            })?;

        if actual != metadata.checksum {
            let file_id = metadata.id.to_string();
            Logger::error(
                "FILE_CHECKSUM_MISMATCH",
                &[
                    ("actual", actual),
                    ("expected", &metadata.checksum),
                    ("file_id", &file_id),
                ],
            );
            return Err(ChunkStoreError::InvalidFile {
                file_id,
                expected: metadata.checksum.clone(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Removes a file's metadata record and all of its chunks.
    ///
    /// Idempotent per sub-step: records already absent are a no-op.
    pub fn remove_one(&self, file: &ChunkedFile) -> ChunkStoreResult<()> {
        let metadata_removed = self.metadata.remove(&file.metadata.id)?;
        let chunks_removed = self.chunks.remove_for_file(&file.metadata.id)?;

        let file_id = file.metadata.id.to_string();
        let chunks_removed = chunks_removed.to_string();
        let metadata_removed = metadata_removed.to_string();
        Logger::info(
            "FILE_REMOVE_COMPLETE",
            &[
                ("chunks_removed", &chunks_removed),
                ("file_id", &file_id),
                ("metadata_removed", &metadata_removed),
            ],
        );
        Ok(())
    }
}
