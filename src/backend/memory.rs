//! In-memory document backend
//!
//! Reference implementation of `DocumentBackend` used by tests. Collections
//! are plain vectors behind an `RwLock`; registered unique indexes are
//! enforced by scanning on every insert.

use std::collections::HashMap;
use std::sync::RwLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use super::errors::{BackendError, BackendResult};
use super::{Command, DocumentBackend};
use crate::chunked::file::{DATA_KEY, FILE_ID_KEY, INDEX_KEY};
use crate::query::{DocumentSorter, Selector, SelectorFilter, SortSpec};

/// In-memory backing store
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    collections: RwLock<HashMap<String, Vec<Value>>>,
    indexes: RwLock<HashMap<String, Vec<Vec<String>>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a field of every document matching the selector, returning
    /// the count. Out-of-band mutation outside the `DocumentBackend` surface;
    /// stored record checksums are left untouched.
    pub fn overwrite_field(
        &self,
        collection: &str,
        selector: &Selector,
        field: &str,
        value: Value,
    ) -> BackendResult<u64> {
        let mut collections = self.collections.write().map_err(|_| BackendError::LockPoisoned)?;
        let documents = collections.entry(collection.to_string()).or_default();

        let mut changed = 0;
        for document in documents.iter_mut() {
            if SelectorFilter::matches(document, selector) {
                if let Value::Object(map) = document {
                    map.insert(field.to_string(), value.clone());
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// Returns the number of documents in a collection
    pub fn count(&self, collection: &str) -> BackendResult<u64> {
        let collections = self.collections.read().map_err(|_| BackendError::LockPoisoned)?;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    fn indexes_for(&self, collection: &str) -> BackendResult<Vec<Vec<String>>> {
        let indexes = self.indexes.read().map_err(|_| BackendError::LockPoisoned)?;
        Ok(indexes.get(collection).cloned().unwrap_or_default())
    }

    /// Extracts the index key tuple; None if any indexed field is absent
    fn index_key(fields: &[String], document: &Value) -> Option<Vec<Value>> {
        fields
            .iter()
            .map(|field| document.get(field).cloned())
            .collect()
    }

    fn check_unique(
        collection: &str,
        existing: &[Value],
        indexes: &[Vec<String>],
        candidate: &Value,
    ) -> BackendResult<()> {
        for fields in indexes {
            let Some(key) = Self::index_key(fields, candidate) else {
                continue;
            };
            let collision = existing
                .iter()
                .any(|doc| Self::index_key(fields, doc).as_ref() == Some(&key));
            if collision {
                return Err(BackendError::DuplicateKey {
                    collection: collection.to_string(),
                    index: fields.join("_"),
                    key: Value::Array(key).to_string(),
                });
            }
        }
        Ok(())
    }
}

impl DocumentBackend for InMemoryBackend {
    fn find(
        &self,
        collection: &str,
        selector: &Selector,
        sort: Option<&SortSpec>,
    ) -> BackendResult<Vec<Value>> {
        let collections = self.collections.read().map_err(|_| BackendError::LockPoisoned)?;
        let mut matched: Vec<Value> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| SelectorFilter::matches(doc, selector))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(spec) = sort {
            DocumentSorter::sort(&mut matched, spec);
        }
        Ok(matched)
    }

    fn insert_one(&self, collection: &str, document: Value) -> BackendResult<()> {
        self.insert_many(collection, vec![document])
    }

    fn insert_many(&self, collection: &str, documents: Vec<Value>) -> BackendResult<()> {
        let indexes = self.indexes_for(collection)?;
        let mut collections = self.collections.write().map_err(|_| BackendError::LockPoisoned)?;
        let existing = collections.entry(collection.to_string()).or_default();

        for document in documents {
            Self::check_unique(collection, existing, &indexes, &document)?;
            existing.push(document);
        }
        Ok(())
    }

    fn remove_one(&self, collection: &str, selector: &Selector) -> BackendResult<u64> {
        let mut collections = self.collections.write().map_err(|_| BackendError::LockPoisoned)?;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match documents
            .iter()
            .position(|doc| SelectorFilter::matches(doc, selector))
        {
            Some(position) => {
                documents.remove(position);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn remove_many(&self, collection: &str, selector: &Selector) -> BackendResult<u64> {
        let mut collections = self.collections.write().map_err(|_| BackendError::LockPoisoned)?;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = documents.len();
        documents.retain(|doc| !SelectorFilter::matches(doc, selector));
        Ok((before - documents.len()) as u64)
    }

    fn ensure_unique_index(&self, collection: &str, fields: &[&str]) -> BackendResult<()> {
        let spec: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let mut indexes = self.indexes.write().map_err(|_| BackendError::LockPoisoned)?;
        let registered = indexes.entry(collection.to_string()).or_default();
        if !registered.contains(&spec) {
            registered.push(spec);
        }
        Ok(())
    }

    fn run_command(&self, command: Command) -> BackendResult<Value> {
        match command {
            Command::FileChecksum {
                collection,
                file_id,
            } => {
                let selector = Selector::new().eq(FILE_ID_KEY, Value::String(file_id));
                let chunks = self.find(&collection, &selector, Some(&SortSpec::asc(INDEX_KEY)))?;

                let mut hasher = Sha256::new();
                for chunk in &chunks {
                    let encoded = chunk.get(DATA_KEY).and_then(Value::as_str).ok_or_else(|| {
                        BackendError::CommandFailed(format!(
                            "chunk document missing string field {}",
                            DATA_KEY
                        ))
                    })?;
                    let payload = STANDARD.decode(encoded).map_err(|e| {
                        BackendError::CommandFailed(format!("chunk payload is not base64: {}", e))
                    })?;
                    hasher.update(&payload);
                }

                Ok(json!({ "checksum": format!("{:x}", hasher.finalize()) }))
            }
        }
    }
}
