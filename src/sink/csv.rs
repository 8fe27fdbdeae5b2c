// src/sink/csv.rs
// =============================================================================
// This module writes matched pages to disk as CSV files.
//
// Format (one file per matched page):
//   URL,Content          <- header row
//   https://...,"text"   <- single data row
//
// The filename is derived from the page URL: scheme stripped, '/' and '.'
// replaced with '_', plus a .csv extension. That makes the mapping
// deterministic - crawling the same page twice (in different runs) lands
// on the same file.
//
// Rust concepts:
// - Traits: RecordSink is the seam between the crawler and storage,
//   so tests can swap in an in-memory implementation
// - thiserror + #[from]: wraps io::Error with zero boilerplate
// =============================================================================

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

// How persistence can fail
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying filesystem write failed
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

// Anything that can durably store one matched record
//
// Called exactly once per matched page. Implementations must be shareable
// across tasks (Send + Sync) because every crawl task may call persist
pub trait RecordSink: Send + Sync {
    fn persist(&self, url: &str, content: &str) -> Result<(), PersistError>;
}

// The real sink: one CSV file per record, under a configurable directory
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

impl RecordSink for CsvSink {
    fn persist(&self, url: &str, content: &str) -> Result<(), PersistError> {
        let path = self.output_dir.join(file_name_for_url(url));

        // Header row + one data row; fields quoted only when they need it
        let mut data = String::new();
        data.push_str("URL,Content\n");
        data.push_str(&csv_field(url));
        data.push(',');
        data.push_str(&csv_field(content));
        data.push('\n');

        fs::write(path, data)?;
        Ok(())
    }
}

// Generates a filename for a URL
//
// Examples:
//   "https://example.com/docs" -> "example_com_docs.csv"
//   "http://a.test/"           -> "a_test_.csv"
fn file_name_for_url(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let safe: String = stripped.replace(['/', '.'], "_");
    format!("{}.csv", safe)
}

// Quotes a single CSV field if it contains a comma, quote, or newline
//
// Embedded double quotes are doubled, per RFC 4180
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
