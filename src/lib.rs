//! chunkstore - a chunked large-object store over a document database
//!
//! A logical file is persisted as one metadata document plus an ordered run of
//! fixed-boundary chunk documents, and reassembled by reading the chunks back
//! sorted by ordinal index. Acknowledged writes are verified against a
//! server-recomputed content checksum.

pub mod backend;
pub mod chunked;
pub mod observability;
pub mod query;
