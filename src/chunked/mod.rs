//! Chunked file storage over a backing document store
//!
//! A file lives in two collections per namespace: `<prefix>.files` holds one
//! metadata document per file, `<prefix>.chunks` holds its ordered payload
//! fragments under a unique (file_id, n) index.

pub mod chunks;
pub mod config;
pub mod errors;
pub mod file;
pub mod integrity;
pub mod metadata;
pub mod store;

pub use chunks::ChunkRecords;
pub use config::{StoreConfig, WriteAck};
pub use errors::{ChunkStoreError, ChunkStoreResult};
pub use file::{Chunk, ChunkedFile, FileMetadata};
pub use metadata::MetadataRecords;
pub use store::ChunkedFileStore;
