// src/fetcher/mod.rs
// =============================================================================
// This module performs the actual HTTP fetches.
//
// One call = one GET request. Failures are classified (network vs bad
// status) so the orchestrator can log them meaningfully, but they are
// never fatal - a dead link just ends that branch of the crawl.
// =============================================================================

mod http;

// Re-export the public API
pub use http::{build_client, fetch_page, FetchError};
