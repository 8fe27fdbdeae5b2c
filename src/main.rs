// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing + RUST_LOG)
// 3. Run the crawl and collect matched records
// 4. Print the results and exit with a proper code
//    (0 = matches found, 1 = no matches, 2 = error)
//
// Rust concepts used:
// - async/await: Because the crawl makes many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Arc: The persistence sink is shared with every crawl task
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawler; // src/crawler/ - the crawl engine
mod fetcher; // src/fetcher/ - HTTP fetching
mod page; // src/page/ - text and link extraction
mod sink; // src/sink/ - CSV persistence

use std::sync::Arc;

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use crawler::{CrawlConfig, Crawler, ScrapedRecord};
use sink::CsvSink;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Send tracing output to stderr so it never mixes with --json on stdout
    // Verbosity is controlled with RUST_LOG (default: info for this crate)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keyword_scout=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl completed, matches found
//   Ok(1) = crawl completed, no matches
//   Err  = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    println!("🔍 Crawling from: {}", cli.seed_url);
    println!("🔑 Looking for keyword: {:?}", cli.keyword);

    // Fail early if the output directory isn't usable - better than
    // discovering it on the first matched page mid-crawl
    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("cannot create output dir {}", cli.output_dir.display()))?;

    // The sink is shared by every crawl task, hence the Arc
    let sink = Arc::new(CsvSink::new(cli.output_dir.clone()));

    let crawler = Crawler::new(
        CrawlConfig {
            keyword: cli.keyword.clone(),
            concurrency: cli.concurrency,
        },
        sink,
    );

    // This returns once every transitively discovered page has been handled
    let records = crawler.run(&cli.seed_url).await;

    // Print results and determine the exit code
    print_results(&records, cli.json)?;

    if records.is_empty() {
        Ok(1) // Exit code 1 = crawl finished but nothing matched
    } else {
        Ok(0) // Exit code 0 = matches found
    }
}

// Prints the results either as a table or JSON
fn print_results(records: &[ScrapedRecord], json: bool) -> Result<()> {
    if json {
        // Serialize records to JSON and print
        let json_output = serde_json::to_string_pretty(records)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(records);
    }
    Ok(())
}

// Prints matched records as a human-readable table in the terminal
fn print_table(records: &[ScrapedRecord]) {
    println!();
    println!("{:<60} {:>10}   {}", "URL", "BYTES", "PREVIEW");
    println!("{}", "=".repeat(105));

    for record in records {
        println!(
            "{:<60} {:>10}   {}",
            url_display(&record.url),
            record.content.len(),
            content_preview(&record.content)
        );
    }

    println!();

    // Print summary
    println!("📊 Summary:");
    println!("   ✅ Matched pages: {}", records.len());
}

// Truncates a URL for table display, capped at 57 chars
//
// Counted in chars, not bytes: the seed URL is raw user input and may
// contain multibyte characters, and slicing those on a byte index panics
fn url_display(url: &str) -> String {
    if url.chars().count() > 57 {
        let truncated: String = url.chars().take(57).collect();
        format!("{}...", truncated)
    } else {
        url.to_string()
    }
}

// First line-ish of the content, whitespace collapsed, capped at 30 chars
//
// Page text is full of newlines and indentation from the HTML - raw output
// would wreck the table
fn content_preview(content: &str) -> String {
    let collapsed: String = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview: String = collapsed.chars().take(30).collect();
    if collapsed.chars().count() > 30 {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_display_short_url_unchanged() {
        assert_eq!(url_display("https://a.test/"), "https://a.test/");
    }

    #[test]
    fn test_url_display_truncates_long_url() {
        let long = format!("https://example.com/{}", "x".repeat(100));
        let display = url_display(&long);
        assert_eq!(display.chars().count(), 60); // 57 chars + "..."
        assert!(display.ends_with("..."));
    }

    #[test]
    fn test_url_display_multibyte_url_does_not_panic() {
        // Two-byte chars guarantee a multibyte char spans the byte-57
        // offset that a naive byte slice would cut at
        let url = format!("https://{}", "é".repeat(60));
        let display = url_display(&url);
        assert!(display.ends_with("..."));
        assert_eq!(display.chars().count(), 60);
        // A short multibyte URL passes through untouched
        assert_eq!(url_display("https://tést.example/"), "https://tést.example/");
    }

    #[test]
    fn test_content_preview_collapses_whitespace() {
        assert_eq!(content_preview("  a\n\n  b\tc  "), "a b c");
    }

    #[test]
    fn test_content_preview_truncates() {
        let long = "x".repeat(100);
        let preview = content_preview(&long);
        assert_eq!(preview.chars().count(), 33); // 30 chars + "..."
        assert!(preview.ends_with("..."));
    }
}
