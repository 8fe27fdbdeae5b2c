// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// keyword-scout has exactly one job (crawl from a seed, hunt for a keyword),
// so unlike multi-purpose tools there are no subcommands here - just one
// struct with positional arguments and a few flags.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "keyword-scout",
    version = "0.1.0",
    about = "Crawl the web from a seed URL and save pages containing a keyword",
    long_about = "keyword-scout starts at a seed URL, follows every link it discovers, and \
                  records each page whose text contains the given keyword. Matched pages are \
                  saved as CSV files and listed when the crawl finishes."
)]
pub struct Cli {
    /// Seed URL to start crawling from (e.g., https://example.com)
    ///
    /// This is a positional argument (required, no flag needed)
    pub seed_url: String,

    /// Keyword to look for in page text (case-sensitive substring match)
    ///
    /// This is also positional: `keyword-scout https://example.com rust`
    pub keyword: String,

    /// Maximum number of pages fetched at the same time
    ///
    /// This caps in-flight HTTP requests, not the total number of pages.
    /// The crawl itself keeps going until no unvisited links remain.
    ///
    /// #[arg(long, default_value_t = 10)] creates --concurrency with a default
    #[arg(long, default_value_t = 10)]
    pub concurrency: usize,

    /// Directory where matched pages are written as CSV files
    ///
    /// One file per matched page, named after the page URL
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output results in JSON format instead of a table
    ///
    /// This is an optional flag: --json
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let cli = Cli::parse_from(["keyword-scout", "https://example.com", "rust"]);
        assert_eq!(cli.seed_url, "https://example.com");
        assert_eq!(cli.keyword, "rust");
        assert_eq!(cli.concurrency, 10);
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "keyword-scout",
            "https://example.com",
            "rust",
            "--concurrency",
            "3",
            "--output-dir",
            "/tmp/out",
            "--json",
        ]);
        assert_eq!(cli.concurrency, 3);
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
        assert!(cli.json);
    }
}
