//! Backing document store interface
//!
//! The store is an external collaborator reached through a narrow
//! query/insert/delete surface plus a command entry point. `InMemoryBackend`
//! is the in-process reference implementation used by the test suites.

pub mod errors;
pub mod memory;

pub use errors::{BackendError, BackendResult};
pub use memory::InMemoryBackend;

use serde_json::Value;

use crate::query::{Selector, SortSpec};

/// Store-level commands executed server-side
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Recompute the content checksum over the stored chunks of one file.
    /// Replies with `{"checksum": "<hex>"}`.
    FileChecksum {
        collection: String,
        file_id: String,
    },
}

/// Narrow interface over the backing document store.
///
/// One collection write is atomic; nothing spans collections. Implementations
/// must enforce unique indexes registered through `ensure_unique_index` on
/// every insert path.
pub trait DocumentBackend: Send + Sync {
    /// Finds all documents matching the selector, optionally sorted
    fn find(
        &self,
        collection: &str,
        selector: &Selector,
        sort: Option<&SortSpec>,
    ) -> BackendResult<Vec<Value>>;

    /// Finds the first document matching the selector
    fn find_one(&self, collection: &str, selector: &Selector) -> BackendResult<Option<Value>> {
        Ok(self.find(collection, selector, None)?.into_iter().next())
    }

    /// Inserts a single document
    fn insert_one(&self, collection: &str, document: Value) -> BackendResult<()>;

    /// Inserts a batch of documents in order, stopping at the first failure.
    /// Documents inserted before the failure remain in place.
    fn insert_many(&self, collection: &str, documents: Vec<Value>) -> BackendResult<()>;

    /// Removes the first document matching the selector, returning the count
    fn remove_one(&self, collection: &str, selector: &Selector) -> BackendResult<u64>;

    /// Removes every document matching the selector, returning the count
    fn remove_many(&self, collection: &str, selector: &Selector) -> BackendResult<u64>;

    /// Registers a unique compound index on the given fields. Idempotent.
    fn ensure_unique_index(&self, collection: &str, fields: &[&str]) -> BackendResult<()>;

    /// Executes a store-level command and returns its reply document
    fn run_command(&self, command: Command) -> BackendResult<Value>;
}
