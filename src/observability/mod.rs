//! Observability for the chunked file store
//!
//! Structured JSON logging only: one log line per event, explicit severity,
//! deterministic key ordering, synchronous and unbuffered. Logging never
//! affects store execution and spawns no background work.

pub mod logger;

pub use logger::{Logger, Severity};
