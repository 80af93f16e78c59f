//! Bounded worker pool for CPU-bound compile jobs.
//!
//! The request-accepting runtime never performs a compile itself: handlers
//! submit a closure and suspend until their own result comes back. A fair
//! semaphore bounds how many jobs run at once; waiting submissions queue
//! in FIFO order with no depth limit.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::{ServerError, ServerResult};

/// Fixed-size pool of compile slots.
///
/// Constructed once at startup and shared by reference into the router;
/// tests construct isolated instances with small slot counts.
#[derive(Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    /// Create a pool with `workers` concurrent slots (minimum one).
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Run `job` on a worker slot and return its result to this caller.
    ///
    /// Suspends while all slots are busy. Each submission observes exactly
    /// its own result, and a panicking job fails only its own submission.
    pub async fn submit<F, T>(&self, job: F) -> ServerResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let _slot = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ServerError::Worker("worker pool closed".to_string()))?;

        tokio::task::spawn_blocking(job)
            .await
            .map_err(|e| ServerError::Worker(e.to_string()))
    }
}
