// src/page/mod.rs
// =============================================================================
// This module turns a fetched HTML body into things the crawler can use:
//
// - The page's plain text (for keyword matching)
// - The set of outbound links (for recursive crawling)
//
// Parsing itself is delegated to the `scraper` crate - this module only
// decides WHAT to extract, not HOW to parse HTML.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod extract;

// Re-export the public API
// This lets users write `page::process_page()` instead of
// `page::extract::process_page()`
pub use extract::{process_page, PageContent};
