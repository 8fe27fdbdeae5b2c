// src/sink/mod.rs
// =============================================================================
// This module persists matched pages.
//
// The crawler only knows about the RecordSink trait ("write this record
// somewhere durable"); the CSV-file implementation lives in csv.rs. Tests
// swap in an in-memory sink to count persistence calls without touching
// the filesystem.
// =============================================================================

mod csv;

// Re-export the public API
pub use csv::{CsvSink, PersistError, RecordSink};
