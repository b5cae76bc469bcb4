//! Metadata record access
//!
//! Thin interface over the backing store's `<prefix>.files` collection.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::errors::ChunkStoreResult;
use super::file::{FileMetadata, ID_KEY};
use crate::backend::DocumentBackend;
use crate::query::Selector;

/// File metadata records of one namespace
pub struct MetadataRecords {
    backend: Arc<dyn DocumentBackend>,
    collection: String,
}

impl MetadataRecords {
    pub fn new(backend: Arc<dyn DocumentBackend>, collection: String) -> Self {
        Self {
            backend,
            collection,
        }
    }

    /// Looks up at most one metadata record matching an arbitrary selector
    pub fn find_one(&self, selector: &Selector) -> ChunkStoreResult<Option<FileMetadata>> {
        match self.backend.find_one(&self.collection, selector)? {
            Some(document) => Ok(Some(FileMetadata::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Persists a metadata record
    pub fn insert(&self, metadata: &FileMetadata) -> ChunkStoreResult<()> {
        let document = metadata.to_document()?;
        self.backend.insert_one(&self.collection, document)?;
        Ok(())
    }

    /// Removes the metadata record for a file id, returning the count (0 or 1)
    pub fn remove(&self, id: &Uuid) -> ChunkStoreResult<u64> {
        let selector = Selector::new().eq(ID_KEY, Value::String(id.to_string()));
        Ok(self.backend.remove_one(&self.collection, &selector)?)
    }

    /// Physical collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }
}
