//! Chunk record access
//!
//! Thin interface over the backing store's `<prefix>.chunks` collection. The
//! unique compound index on (file_id, n) must exist before any chunk insert;
//! `ensure_index` is idempotent.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::errors::ChunkStoreResult;
use super::file::{Chunk, FILE_ID_KEY, INDEX_KEY};
use crate::backend::DocumentBackend;
use crate::query::{Selector, SortSpec};

/// Chunk records of one namespace
pub struct ChunkRecords {
    backend: Arc<dyn DocumentBackend>,
    collection: String,
}

impl ChunkRecords {
    pub fn new(backend: Arc<dyn DocumentBackend>, collection: String) -> Self {
        Self {
            backend,
            collection,
        }
    }

    /// Establishes the unique compound index on (file_id, n)
    pub fn ensure_index(&self) -> ChunkStoreResult<()> {
        self.backend
            .ensure_unique_index(&self.collection, &[FILE_ID_KEY, INDEX_KEY])?;
        Ok(())
    }

    /// Inserts a file's chunks as a single batch
    pub fn insert_many(&self, chunks: &[Chunk]) -> ChunkStoreResult<()> {
        let documents: Vec<Value> = chunks.iter().map(Chunk::to_document).collect();
        self.backend.insert_many(&self.collection, documents)?;
        Ok(())
    }

    /// Fetches a file's chunks sorted ascending by ordinal index
    pub fn find_ordered(&self, file_id: &Uuid) -> ChunkStoreResult<Vec<Chunk>> {
        let selector = Selector::new().eq(FILE_ID_KEY, Value::String(file_id.to_string()));
        let documents =
            self.backend
                .find(&self.collection, &selector, Some(&SortSpec::asc(INDEX_KEY)))?;
        documents.iter().map(Chunk::from_document).collect()
    }

    /// Removes every chunk of a file, returning the count (zero or more)
    pub fn remove_for_file(&self, file_id: &Uuid) -> ChunkStoreResult<u64> {
        let selector = Selector::new().eq(FILE_ID_KEY, Value::String(file_id.to_string()));
        Ok(self.backend.remove_many(&self.collection, &selector)?)
    }

    /// Physical collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::chunked::errors::ChunkStoreError;

    fn records() -> ChunkRecords {
        let records = ChunkRecords::new(Arc::new(InMemoryBackend::new()), "fs.chunks".to_string());
        records.ensure_index().unwrap();
        records
    }

    #[test]
    fn test_find_ordered_sorts_by_ordinal() {
        let records = records();
        let file_id = Uuid::new_v4();

        // Inserted out of order on purpose
        records
            .insert_many(&[
                Chunk::new(file_id, 2, b"ghi".to_vec()),
                Chunk::new(file_id, 0, b"abc".to_vec()),
                Chunk::new(file_id, 1, b"def".to_vec()),
            ])
            .unwrap();

        let chunks = records.find_ordered(&file_id).unwrap();
        let payloads: Vec<&[u8]> = chunks.iter().map(|c| c.data.as_slice()).collect();
        assert_eq!(payloads, vec![b"abc".as_slice(), b"def", b"ghi"]);
    }

    #[test]
    fn test_duplicate_ordinal_rejected() {
        let records = records();
        let file_id = Uuid::new_v4();

        records
            .insert_many(&[Chunk::new(file_id, 0, b"abc".to_vec())])
            .unwrap();

        let err = records
            .insert_many(&[Chunk::new(file_id, 0, b"xyz".to_vec())])
            .unwrap_err();
        assert!(matches!(
            err,
            ChunkStoreError::Backend(e) if e.is_duplicate_key()
        ));
    }

    #[test]
    fn test_remove_for_file_scoped_to_one_file() {
        let records = records();
        let file_a = Uuid::new_v4();
        let file_b = Uuid::new_v4();

        records
            .insert_many(&[
                Chunk::new(file_a, 0, b"a".to_vec()),
                Chunk::new(file_a, 1, b"b".to_vec()),
                Chunk::new(file_b, 0, b"c".to_vec()),
            ])
            .unwrap();

        assert_eq!(records.remove_for_file(&file_a).unwrap(), 2);
        assert_eq!(records.remove_for_file(&file_a).unwrap(), 0);
        assert_eq!(records.find_ordered(&file_b).unwrap().len(), 1);
    }
}
