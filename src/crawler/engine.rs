// src/crawler/engine.rs
// =============================================================================
// This module implements the crawl orchestrator.
//
// How a crawl works:
// 1. The seed URL is handed to spawn_task()
// 2. spawn_task() atomically marks the URL visited; if it was already
//    visited, nothing happens (this is what makes cyclic link graphs
//    terminate). A fresh URL gets its own tokio task.
// 3. The task waits for an admission slot, fetches the page, releases the
//    slot, extracts text + links, stores the record if the keyword
//    matches, and calls spawn_task() for every discovered link.
// 4. The caller waits on the task counter; when every transitively spawned
//    task has finished, the crawl is done and the results are returned.
//
// Two details are easy to get wrong:
// - The visited check happens BEFORE spawning (and therefore before
//   admission), so a duplicate URL never costs a task or a fetch slot
// - The task counter is incremented before tokio::spawn and decremented by
//   a drop guard, so the count can never be observed at zero while work
//   is still outstanding, even if a task panics
//
// Rust concepts:
// - Arc<Self> receivers: tasks share the orchestrator by reference count
// - BoxFuture: a task that spawns copies of itself has a recursive future
//   type; boxing it gives the compiler a finite size to work with
// =============================================================================

use crate::fetcher::{self, fetch_page};
use crate::page;
use crate::sink::RecordSink;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

use super::limiter::AdmissionLimiter;
use super::state::{ResultStore, ScrapedRecord, TaskCounter, VisitedSet};

// The knobs a crawl is constructed with
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Substring to search for in page text (case-sensitive)
    pub keyword: String,
    /// Maximum number of concurrent fetches (the admission cap K)
    pub concurrency: usize,
}

// The orchestrator: owns every piece of shared state for one crawl run
//
// Tasks hold it via Arc, so all fields are accessed through &self and the
// interior synchronization lives in the field types themselves
pub struct Crawler {
    client: Client,
    keyword: String,
    limiter: AdmissionLimiter,
    visited: VisitedSet,
    results: ResultStore,
    tasks: TaskCounter,
    sink: Arc<dyn RecordSink>,
}

impl Crawler {
    // Creates a crawler; the sink is injected so tests can use an
    // in-memory one instead of writing CSV files
    pub fn new(config: CrawlConfig, sink: Arc<dyn RecordSink>) -> Arc<Self> {
        Arc::new(Self {
            client: fetcher::build_client(),
            keyword: config.keyword,
            limiter: AdmissionLimiter::new(config.concurrency),
            visited: VisitedSet::new(),
            results: ResultStore::new(),
            tasks: TaskCounter::new(),
            sink,
        })
    }

    // Runs a full crawl from the seed and returns the matched records
    //
    // Returns only when every transitively spawned task has finished -
    // on a finite link graph this always happens, because the visited set
    // guarantees each URL spawns at most one task
    pub async fn run(self: Arc<Self>, seed_url: &str) -> Vec<ScrapedRecord> {
        tracing::info!(seed_url, keyword = %self.keyword, "starting crawl");

        // Discovered links all pass through Url and come out normalized
        // (e.g. "http://host" becomes "http://host/"). The seed is raw CLI
        // input, so it must be normalized the same way - otherwise a link
        // back to the seed would look like a different URL and the seed
        // resource would be fetched twice. An unparsable seed is passed
        // through as-is; the fetch will classify and report it.
        let seed = match Url::parse(seed_url) {
            Ok(url) => url.to_string(),
            Err(_) => seed_url.to_string(),
        };

        // The seed is counted inside spawn_task BEFORE its task starts, so
        // the wait below can't race past an apparently-zero counter
        Arc::clone(&self).spawn_task(seed);
        self.tasks.wait().await;

        let records = self.results.snapshot();
        tracing::info!(
            pages = self.visited.len(),
            matches = records.len(),
            "crawl finished"
        );
        records
    }

    // Decides whether a URL gets a task, and if so, spawns it
    //
    // The test-and-insert is atomic: if two pages discover the same link
    // at the same moment, exactly one of the two calls wins the insert and
    // spawns - the other returns without doing anything
    fn spawn_task(self: Arc<Self>, url: String) {
        if !self.visited.insert(&url) {
            return;
        }

        self.tasks.add(1);
        tokio::spawn(async move {
            // The guard decrements the counter when the task ends, on any
            // path - normal completion, early return, or panic unwind
            let _done = DoneGuard(Arc::clone(&self));
            self.process_url(url).await;
        });
    }

    // One task's whole lifecycle: admit -> fetch -> process -> record -> expand
    //
    // Returns a boxed future because process_url (indirectly, through
    // spawn_task) mentions its own future type
    fn process_url(self: Arc<Self>, url: String) -> BoxFuture<'static, ()> {
        async move {
            // Hold the admission slot across the fetch ONLY. Parsing and
            // link expansion are CPU work and shouldn't block the network
            // pipeline.
            let body = {
                let _permit = self.limiter.acquire().await;
                match fetch_page(&self.client, &url).await {
                    Ok(body) => body,
                    Err(e) => {
                        // Non-fatal: log it and end this branch of the crawl
                        tracing::warn!(url = %url, error = %e, "fetch failed");
                        return;
                    }
                }
            };

            let content = page::process_page(&body, &url);
            tracing::debug!(url = %url, links = content.links.len(), "processed page");

            if content.text.contains(&self.keyword) {
                self.results.push(ScrapedRecord {
                    url: url.clone(),
                    content: content.text.clone(),
                });
                // Persistence failures are logged, never fatal - the record
                // is still in the result store for the final listing
                if let Err(e) = self.sink.persist(&url, &content.text) {
                    tracing::error!(url = %url, error = %e, "failed to persist record");
                }
            }

            // Recurse: one task per discovered link. We don't wait for the
            // children here - global completion is the counter's job.
            for link in content.links {
                Arc::clone(&self).spawn_task(link);
            }
        }
        .boxed()
    }
}

// Decrements the outstanding-task counter when dropped
struct DoneGuard(Arc<Crawler>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        self.0.tasks.done();
    }
}
