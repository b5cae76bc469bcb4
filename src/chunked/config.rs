//! Store configuration
//!
//! An explicit configuration struct passed at construction, so that several
//! independently namespaced stores can share one backend. The write
//! acknowledgement mode is resolved here, once, not queried per call.

use serde::{Deserialize, Serialize};

/// Write acknowledgement mode of the backing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteAck {
    /// Writes are confirmed durable before the call returns; inserts are
    /// followed by a server-side checksum verification
    Acknowledged,
    /// Fire-and-forget writes; no post-insert verification
    Unacknowledged,
}

impl Default for WriteAck {
    fn default() -> Self {
        WriteAck::Acknowledged
    }
}

impl WriteAck {
    /// Returns true if inserts must be verified after the batch write
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, WriteAck::Acknowledged)
    }
}

/// Configuration for a `ChunkedFileStore`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Namespace for the two physical collections
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Fixed chunk boundary in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Write acknowledgement mode
    #[serde(default)]
    pub write_ack: WriteAck,
}

fn default_prefix() -> String {
    "fs".to_string()
}

fn default_chunk_size() -> usize {
    256 * 1024
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            chunk_size: default_chunk_size(),
            write_ack: WriteAck::default(),
        }
    }
}

impl StoreConfig {
    /// Default configuration under a different namespace
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Physical name of the metadata collection
    pub fn files_collection(&self) -> String {
        format!("{}.files", self.prefix)
    }

    /// Physical name of the chunks collection
    pub fn chunks_collection(&self) -> String {
        format!("{}.chunks", self.prefix)
    }
}
