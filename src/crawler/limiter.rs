// src/crawler/limiter.rs
// =============================================================================
// This module bounds how many fetches run at the same time.
//
// It is a thin wrapper around tokio's Semaphore with K permits:
// - acquire() suspends the task until a slot frees up
// - the returned permit is an RAII guard; dropping it returns the slot,
//   so release happens on EVERY exit path - early return, error, even a
//   panic unwinding through the task
//
// This is a pure concurrency cap, not a requests-per-second rate limit.
// tokio's semaphore is FIFO, so no task starves while others cut the line.
//
// Rust concepts:
// - RAII: resource release tied to a value going out of scope
// - Arc: the semaphore is shared by every task in the crawl
// =============================================================================

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

pub struct AdmissionLimiter {
    slots: Arc<Semaphore>,
}

impl AdmissionLimiter {
    // Creates a limiter allowing at most `limit` concurrent holders
    pub fn new(limit: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(limit)),
        }
    }

    // Waits for a free slot and claims it
    //
    // The permit is 'owned' (not borrowing the limiter) so tasks can hold
    // it without lifetime gymnastics. We never close the semaphore, so
    // acquire can only fail if there's a bug - hence the expect.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .expect("admission semaphore closed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // The admission invariant: with K slots, the number of tasks holding a
    // permit at any instant never exceeds K - measured under real load
    #[tokio::test]
    async fn test_at_most_k_permits_outstanding() {
        const K: usize = 4;
        const TASKS: usize = 40;

        let limiter = Arc::new(AdmissionLimiter::new(K));
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..TASKS {
            let limiter = Arc::clone(&limiter);
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                let _permit = limiter.acquire().await;
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                // Hold the slot long enough for other tasks to pile up
                tokio::time::sleep(Duration::from_millis(5)).await;
                active.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= K);
        // Sanity check that the test actually exercised concurrency
        assert!(peak.load(Ordering::SeqCst) >= 2);
    }

    // Dropping the permit mid-error still frees the slot
    #[tokio::test]
    async fn test_permit_released_on_drop() {
        let limiter = AdmissionLimiter::new(1);
        {
            let _permit = limiter.acquire().await;
        }
        // Would hang forever if the first permit leaked
        tokio::time::timeout(Duration::from_secs(1), limiter.acquire())
            .await
            .expect("slot was never released");
    }
}
