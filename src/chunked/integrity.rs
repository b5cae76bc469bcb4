//! Checksum computation for file content and chunk records
//!
//! Two layers: a SHA-256 content checksum over the whole file's bytes,
//! compared against the server-side recomputation after acknowledged writes,
//! and a CRC32 record checksum per chunk, verified whenever a chunk document
//! is decoded.

use sha2::{Digest, Sha256};

/// Computes the content checksum (lowercase hex SHA-256) over file bytes.
///
/// Deterministic: the same input always produces the same output.
pub fn content_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Computes the CRC32 record checksum of a chunk payload
pub fn chunk_crc(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Verifies a chunk payload against its stored record checksum
pub fn verify_chunk_crc(data: &[u8], expected: u32) -> bool {
    chunk_crc(data) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_checksum_deterministic() {
        let data = b"chunked large-object payload";
        assert_eq!(content_checksum(data), content_checksum(data));
        assert_eq!(content_checksum(data).len(), 64);
    }

    #[test]
    fn test_content_checksum_detects_change() {
        let original = content_checksum(b"abcdefghi");
        let altered = content_checksum(b"abcdefghj");
        assert_ne!(original, altered);
    }

    #[test]
    fn test_chunk_crc_detects_corruption() {
        let mut data = vec![0x00, 0x01, 0x02, 0x03, 0x04];
        let original = chunk_crc(&data);
        data[2] ^= 0x01;
        assert_ne!(original, chunk_crc(&data));
    }

    #[test]
    fn test_verify_chunk_crc() {
        let data = b"chunk payload";
        let crc = chunk_crc(data);
        assert!(verify_chunk_crc(data, crc));
        assert!(!verify_chunk_crc(data, crc ^ 1));
    }
}
