// src/crawler/state.rs
// =============================================================================
// This module holds the state shared by every crawl task:
//
// - VisitedSet: which URLs we have already committed to crawling
// - ResultStore: the matched (url, text) records collected so far
// - TaskCounter: how many tasks are still outstanding (for termination)
//
// All three are owned by the orchestrator and shared via Arc. The mutexes
// here are std mutexes, not tokio ones, on purpose: every critical section
// is a single insert or push, and none of them is ever held across an
// .await - so blocking the thread for a few nanoseconds is cheaper than an
// async lock.
//
// Rust concepts:
// - Mutex: Mutual exclusion around the read-modify-write operations
// - AtomicUsize: Lock-free counter for outstanding tasks
// - tokio::sync::Notify: Wakes the waiter when the counter hits zero
// =============================================================================

use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

// One matched page: the URL plus the full extracted text
//
// Never mutated after creation; it lives until the crawl run ends.
// Serialize is derived for the --json output path
#[derive(Debug, Clone, Serialize)]
pub struct ScrapedRecord {
    pub url: String,
    pub content: String,
}

// The set of URLs this crawl has committed to fetching
//
// The ONLY operation is an atomic test-and-insert. That is deliberate:
// a separate contains() + insert() pair would let two tasks both decide
// to crawl the same URL between the two calls.
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashSet::new()),
        }
    }

    // Returns true if the URL was NOT seen before (i.e., the caller now
    // owns the right - and the duty - to crawl it)
    pub fn insert(&self, url: &str) -> bool {
        self.inner
            .lock()
            .expect("visited set lock poisoned")
            .insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("visited set lock poisoned").len()
    }
}

// Append-only store of matched records
//
// Records arrive in task-completion order, which is arbitrary - the crawl
// makes no ordering promises beyond "a page is stored at most once"
pub struct ResultStore {
    inner: Mutex<Vec<ScrapedRecord>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, record: ScrapedRecord) {
        self.inner
            .lock()
            .expect("result store lock poisoned")
            .push(record);
    }

    // Clones the records out; called once, after the crawl completes
    pub fn snapshot(&self) -> Vec<ScrapedRecord> {
        self.inner
            .lock()
            .expect("result store lock poisoned")
            .clone()
    }
}

// Counts outstanding tasks so the caller knows when the crawl is done
//
// Protocol:
// - add(1) BEFORE spawning a task (the seed is counted before any task
//   runs, so the counter can never be observed at zero prematurely)
// - done() when a task finishes, on every path - the orchestrator wraps
//   it in a drop guard so even a panicking task decrements
// - wait() blocks until spawned == finished
//
// An underflow (more done() than add()) means the bookkeeping itself is
// broken, and the only correct response to that is a panic.
pub struct TaskCounter {
    outstanding: AtomicUsize,
    zero: Notify,
}

impl TaskCounter {
    pub fn new() -> Self {
        Self {
            outstanding: AtomicUsize::new(0),
            zero: Notify::new(),
        }
    }

    pub fn add(&self, n: usize) {
        self.outstanding.fetch_add(n, Ordering::SeqCst);
    }

    pub fn done(&self) {
        let previous = self.outstanding.fetch_sub(1, Ordering::SeqCst);
        if previous == 0 {
            panic!("task counter underflow: done() called more times than add()");
        }
        if previous == 1 {
            // Last task out wakes the waiter
            self.zero.notify_waiters();
        }
    }

    pub async fn wait(&self) {
        loop {
            // Register interest BEFORE checking the counter, otherwise the
            // last done() could fire between our check and our await and
            // we'd sleep forever
            let notified = self.zero.notified();
            if self.outstanding.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_visited_insert_is_once_only() {
        let visited = VisitedSet::new();
        assert!(visited.insert("http://a.test/"));
        assert!(!visited.insert("http://a.test/"));
        assert!(visited.insert("http://b.test/"));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_visited_concurrent_insert_admits_exactly_one() {
        // Hammer the same URL from many threads; exactly one insert wins
        let visited = Arc::new(VisitedSet::new());
        let winners: Vec<bool> = std::thread::scope(|s| {
            (0..16)
                .map(|_| {
                    let visited = Arc::clone(&visited);
                    s.spawn(move || visited.insert("http://e.test/"))
                })
                .collect::<Vec<_>>()
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });
        assert_eq!(winners.iter().filter(|&&w| w).count(), 1);
    }

    #[test]
    fn test_result_store_appends() {
        let store = ResultStore::new();
        store.push(ScrapedRecord {
            url: "http://a.test/".to_string(),
            content: "text".to_string(),
        });
        let records = store.snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "http://a.test/");
    }

    #[tokio::test]
    async fn test_counter_wait_returns_when_all_done() {
        let counter = Arc::new(TaskCounter::new());
        counter.add(3);

        for _ in 0..3 {
            let counter = Arc::clone(&counter);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                counter.done();
            });
        }

        // Should complete well within the timeout
        tokio::time::timeout(Duration::from_secs(5), counter.wait())
            .await
            .expect("crawl counter never reached zero");
    }

    #[tokio::test]
    async fn test_counter_wait_on_zero_returns_immediately() {
        let counter = TaskCounter::new();
        counter.wait().await;
    }

    #[test]
    #[should_panic(expected = "task counter underflow")]
    fn test_counter_underflow_panics() {
        let counter = TaskCounter::new();
        counter.done();
    }
}
