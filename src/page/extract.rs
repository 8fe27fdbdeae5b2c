// src/page/extract.rs
// =============================================================================
// This module extracts text and links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve relative URLs to absolute URLs (like a browser does)
// - Filter out schemes we can't crawl (mailto:, javascript:, etc.)
//
// Important design point: processing NEVER fails. html5ever parses even
// garbage input into some document (that's what browsers do), and if the
// page's own URL is unparsable we simply can't resolve relative links, so
// we return the text with an empty link set. A bad page should only ever
// end its own branch of the crawl, never crash it.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Everything the crawler needs to know about one fetched page
//
// text: all text nodes of the document, concatenated
// links: deduplicated absolute http/https URLs found in <a href="...">
#[derive(Debug)]
pub struct PageContent {
    pub text: String,
    pub links: HashSet<String>,
}

// Processes a fetched HTML body into text + outbound links
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   page_url: the URL this body was fetched from (for resolving relative links)
//
// Returns: PageContent (never an error - see module header)
//
// Example:
//   html = "<p>hello</p><a href='/docs'>Docs</a>"
//   page_url = "https://example.com"
//   result.text contains "hello"
//   result.links = {"https://example.com/docs"}
pub fn process_page(html: &str, page_url: &str) -> PageContent {
    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Collect every text node in the document into one string.
    // This includes <script> and <style> contents, matching what a
    // whole-document text dump gives you - good enough for substring search.
    let text: String = document.root_element().text().collect();

    // Create a CSS selector to find all <a> tags with an href
    // Selector::parse returns Result, so we use .unwrap() which panics on error
    // This is OK here because our selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    // Parse the page URL once - we need it to resolve relative links
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => {
            // Without a valid base we can't resolve anything, but the text
            // is still usable for keyword matching
            tracing::warn!(page_url, "invalid page URL, skipping link extraction");
            return PageContent {
                text,
                links: HashSet::new(),
            };
        }
    };

    // A HashSet dedups links within the page for free - a page that links
    // to /docs five times should only produce one crawl task
    let mut links = HashSet::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_url(&base, href) {
                links.insert(absolute_url);
            }
        }
    }

    PageContent { text, links }
}

// Resolves a possibly-relative href to an absolute, crawlable URL
//
// Parameters:
//   base: the URL of the current page
//   href: the href value (might be relative, might be absolute)
//
// Returns: Some(absolute_url) or None if the link can't/shouldn't be crawled
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "#section" -> None (same page)
//   href = "mailto:a@b.com" -> None (not HTTP)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    // Skip anchors and special protocols up front
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // Url::join handles both cases: if href already has a scheme it is
    // used as-is, otherwise it is resolved against base per the standard
    // relative-URL rules (RFC 3986)
    let mut url = base.join(href).ok()?;

    // Only http/https can be fetched
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    // Drop the #fragment: /page and /page#top are the same resource,
    // and keeping fragments would defeat visited-URL deduplication
    url.set_fragment(None);

    Some(url.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does process_page never return an error?
//    - html5ever is a browser-grade parser: it builds a DOM from ANY input,
//      recovering from broken markup the same way browsers do
//    - So "malformed HTML" just means "fewer links and weirder text",
//      never a failure we could propagate
//
// 2. What does .text() give us?
//    - An iterator over every text node under the element
//    - .collect::<String>() concatenates them into one owned String
//
// 3. What is url.join()?
//    - Resolves a reference against a base URL the way browsers do
//    - "https://example.com/a/b" + "../c" = "https://example.com/c"
//    - Absolute references just replace the base entirely
//
// 4. Why strip fragments?
//    - The fragment (#section) is handled client-side; the server returns
//      the same document either way
//    - Keeping them would make the crawler fetch the same page repeatedly
// -----------------------------------------------------------------------------
