//! File and chunk data model
//!
//! A `ChunkedFile` is one metadata record plus chunk payloads covering
//! ordinal indices 0..N-1 contiguously. Chunk documents must carry the
//! file-id and ordinal fields under exactly the names the unique index is
//! declared on, or uniqueness enforcement silently fails to apply.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{ChunkStoreError, ChunkStoreResult};
use super::integrity;

/// Metadata document id field
pub const ID_KEY: &str = "_id";
/// Chunk document file reference field; part of the unique index
pub const FILE_ID_KEY: &str = "file_id";
/// Chunk document ordinal field; part of the unique index
pub const INDEX_KEY: &str = "n";
/// Chunk document payload field (base64)
pub const DATA_KEY: &str = "data";
/// Chunk document record checksum field
pub const CRC_KEY: &str = "crc";

/// A file's metadata record; immutable once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub filename: String,
    pub length: u64,
    /// Declared content checksum (lowercase hex SHA-256 of the file bytes)
    pub checksum: String,
    /// Arbitrary user metadata
    #[serde(default)]
    pub metadata: Value,
    pub uploaded_at: DateTime<Utc>,
}

impl FileMetadata {
    /// Creates a metadata record with a fresh id
    pub fn new(
        filename: impl Into<String>,
        length: u64,
        checksum: String,
        metadata: Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            length,
            checksum,
            metadata,
            uploaded_at: Utc::now(),
        }
    }

    /// Serializes to a backing-store document
    pub fn to_document(&self) -> ChunkStoreResult<Value> {
        serde_json::to_value(self).map_err(|e| ChunkStoreError::malformed("file", e.to_string()))
    }

    /// Deserializes from a backing-store document
    pub fn from_document(document: Value) -> ChunkStoreResult<Self> {
        serde_json::from_value(document)
            .map_err(|e| ChunkStoreError::malformed("file", e.to_string()))
    }
}

/// One ordinal-indexed fragment of a file's byte payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Owning file id; not store-enforced as a foreign key
    pub file_id: Uuid,
    /// 0-based ordinal within the file
    pub index: u32,
    /// Raw byte payload
    pub data: Vec<u8>,
    /// Record checksum of the payload, verified on every decode
    pub crc: u32,
}

impl Chunk {
    /// Creates a chunk, computing its record checksum
    pub fn new(file_id: Uuid, index: u32, data: Vec<u8>) -> Self {
        let crc = integrity::chunk_crc(&data);
        Self {
            file_id,
            index,
            data,
            crc,
        }
    }

    /// Serializes to a backing-store document.
    ///
    /// Field names match the unique index specification exactly.
    pub fn to_document(&self) -> Value {
        let mut document = Map::new();
        document.insert(FILE_ID_KEY.to_string(), Value::String(self.file_id.to_string()));
        document.insert(INDEX_KEY.to_string(), Value::from(self.index));
        document.insert(DATA_KEY.to_string(), Value::String(STANDARD.encode(&self.data)));
        document.insert(CRC_KEY.to_string(), Value::from(self.crc));
        Value::Object(document)
    }

    /// Deserializes from a backing-store document, verifying the record
    /// checksum against the decoded payload.
    pub fn from_document(document: &Value) -> ChunkStoreResult<Self> {
        let file_id = document
            .get(FILE_ID_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| ChunkStoreError::malformed("chunk", "missing file_id"))?;
        let file_id = Uuid::parse_str(file_id)
            .map_err(|e| ChunkStoreError::malformed("chunk", format!("bad file_id: {}", e)))?;

        let index = document
            .get(INDEX_KEY)
            .and_then(Value::as_u64)
            .ok_or_else(|| ChunkStoreError::malformed("chunk", "missing ordinal index"))?;
        let index = u32::try_from(index)
            .map_err(|_| ChunkStoreError::malformed("chunk", "ordinal index out of range"))?;

        let encoded = document
            .get(DATA_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| ChunkStoreError::malformed("chunk", "missing payload"))?;
        let data = STANDARD
            .decode(encoded)
            .map_err(|e| ChunkStoreError::malformed("chunk", format!("bad payload: {}", e)))?;

        let crc = document
            .get(CRC_KEY)
            .and_then(Value::as_u64)
            .ok_or_else(|| ChunkStoreError::malformed("chunk", "missing record checksum"))?;
        let crc = u32::try_from(crc)
            .map_err(|_| ChunkStoreError::malformed("chunk", "record checksum out of range"))?;

        if !integrity::verify_chunk_crc(&data, crc) {
            return Err(ChunkStoreError::ChunkCorruption {
                file_id: file_id.to_string(),
                index,
            });
        }

        Ok(Self {
            file_id,
            index,
            data,
            crc,
        })
    }
}

/// A file as callers manipulate it: metadata plus ordered chunk payloads
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkedFile {
    pub metadata: FileMetadata,
    pub chunks: Vec<Chunk>,
}

impl ChunkedFile {
    /// Splits raw bytes into chunks on fixed boundaries and derives the
    /// metadata record, including the declared content checksum.
    ///
    /// `chunk_size` must be non-zero.
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8], chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");

        let metadata = FileMetadata::new(
            filename,
            bytes.len() as u64,
            integrity::content_checksum(bytes),
            Value::Null,
        );
        let chunks = bytes
            .chunks(chunk_size)
            .enumerate()
            .map(|(index, block)| Chunk::new(metadata.id, index as u32, block.to_vec()))
            .collect();

        Self { metadata, chunks }
    }

    /// Attaches arbitrary user metadata
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata.metadata = metadata;
        self
    }

    /// Reassembles a file from a metadata record and its ordered chunks
    pub fn from_parts(metadata: FileMetadata, chunks: Vec<Chunk>) -> Self {
        Self { metadata, chunks }
    }

    /// Concatenates chunk payloads in stored order
    pub fn assemble(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.metadata.length as usize);
        for chunk in &self.chunks {
            bytes.extend_from_slice(&chunk.data);
        }
        bytes
    }

    /// Content checksum recomputed from the chunk payloads
    pub fn checksum(&self) -> String {
        integrity::content_checksum(&self.assemble())
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_bytes_splits_on_fixed_boundaries() {
        let file = ChunkedFile::from_bytes("a.txt", b"abcdefghi", 3);

        assert_eq!(file.chunk_count(), 3);
        assert_eq!(file.chunks[0].data, b"abc");
        assert_eq!(file.chunks[1].data, b"def");
        assert_eq!(file.chunks[2].data, b"ghi");

        let indices: Vec<u32> = file.chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(file.chunks.iter().all(|c| c.file_id == file.metadata.id));
    }

    #[test]
    fn test_trailing_partial_chunk() {
        let file = ChunkedFile::from_bytes("a.txt", b"abcdefgh", 3);
        assert_eq!(file.chunk_count(), 3);
        assert_eq!(file.chunks[2].data, b"gh");
        assert_eq!(file.metadata.length, 8);
    }

    #[test]
    fn test_empty_file_has_no_chunks() {
        let file = ChunkedFile::from_bytes("empty", b"", 3);
        assert_eq!(file.chunk_count(), 0);
        assert_eq!(file.metadata.length, 0);
        assert_eq!(file.assemble(), b"");
    }

    #[test]
    fn test_assemble_restores_original_bytes() {
        let original = b"the quick brown fox jumps over the lazy dog";
        let file = ChunkedFile::from_bytes("fox.txt", original, 7);

        assert_eq!(file.assemble(), original);
        assert_eq!(file.checksum(), file.metadata.checksum);
    }

    #[test]
    fn test_metadata_document_roundtrip() {
        let metadata = FileMetadata::new("a.txt", 9, "abc123".to_string(), json!({"tag": "x"}));

        let document = metadata.to_document().unwrap();
        assert_eq!(document[ID_KEY], json!(metadata.id.to_string()));
        assert_eq!(document["filename"], "a.txt");

        let decoded = FileMetadata::from_document(document).unwrap();
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_chunk_document_roundtrip() {
        let file_id = Uuid::new_v4();
        let chunk = Chunk::new(file_id, 1, b"def".to_vec());

        let document = chunk.to_document();
        assert_eq!(document[FILE_ID_KEY], json!(file_id.to_string()));
        assert_eq!(document[INDEX_KEY], 1);

        let decoded = Chunk::from_document(&document).unwrap();
        assert_eq!(decoded, chunk);
    }

    #[test]
    fn test_chunk_decode_detects_corrupted_payload() {
        let chunk = Chunk::new(Uuid::new_v4(), 0, b"abc".to_vec());
        let mut document = chunk.to_document();

        // Payload swapped out from under the stored record checksum
        document[DATA_KEY] = json!(STANDARD.encode(b"abX"));

        let err = Chunk::from_document(&document).unwrap_err();
        assert!(matches!(err, ChunkStoreError::ChunkCorruption { index: 0, .. }));
    }

    #[test]
    fn test_chunk_decode_rejects_malformed_document() {
        let err = Chunk::from_document(&json!({"n": 0})).unwrap_err();
        assert!(matches!(err, ChunkStoreError::MalformedDocument { kind: "chunk", .. }));

        let err = Chunk::from_document(&json!({
            "file_id": "not-a-uuid", "n": 0, "data": "YQ==", "crc": 0
        }))
        .unwrap_err();
        assert!(matches!(err, ChunkStoreError::MalformedDocument { .. }));
    }
}
