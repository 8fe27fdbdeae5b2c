// src/crawler/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Submodules:
// - engine: the orchestrator - spawns one task per discovered URL and
//   detects when the whole crawl has finished
// - limiter: caps how many fetches run concurrently
// - state: the visited set, result store, and outstanding-task counter
//   shared by every task
//
// The orchestrator is the only place in the program that spawns tasks;
// everything else (fetcher, page processor, sink) is called from it.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod engine;
mod limiter;
mod state;

// Re-export the public API
pub use engine::{CrawlConfig, Crawler};
pub use state::ScrapedRecord;
