//! Structured fan-out and join
//!
//! Provides scoped worker management:
//! - `ScopedHandle`: a single worker that is aborted if its handle is dropped
//! - `TaskGroup`: N workers joined together, fail-fast, optional deadline
//!
//! No worker outlives the call that spawned it. A group that returns early
//! (first error, deadline, or first success in a race) drops its `JoinSet`,
//! which aborts every sibling still running.

use crate::error::{Result, ShowcaseError};
use crate::types::{Latency, Summary};
use std::future::Future;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};

/// Handle to one spawned worker
///
/// Dropping the handle without joining aborts the worker.
#[derive(Debug)]
pub struct ScopedHandle<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> ScopedHandle<T> {
    /// Spawn a worker on the current runtime
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }
}

impl<T> ScopedHandle<T> {
    /// Wait for the worker to finish
    ///
    /// # Errors
    /// - `ShowcaseError::WorkerFailed` if the worker panicked or was aborted
    pub async fn join(mut self) -> Result<T> {
        (&mut self.handle).await.map_err(ShowcaseError::from)
    }
}

impl<T> Drop for ScopedHandle<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Group of homogeneous workers joined as a unit
#[derive(Debug)]
pub struct TaskGroup<T> {
    workers: JoinSet<(usize, Result<T>)>,
    spawned: usize,
    deadline: Option<Duration>,
}

impl<T: Send + 'static> TaskGroup<T> {
    /// Create an empty group with no deadline
    #[must_use]
    pub fn new() -> Self {
        Self {
            workers: JoinSet::new(),
            spawned: 0,
            deadline: None,
        }
    }

    /// Create an empty group that gives up after `deadline`
    #[must_use]
    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::new()
        }
    }

    /// Add a worker to the group
    pub fn spawn<F>(&mut self, worker: F)
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let index = self.spawned;
        self.spawned += 1;
        self.workers.spawn(async move { (index, worker.await) });
    }

    /// Number of workers spawned so far
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.spawned
    }

    /// Check for an empty group
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spawned == 0
    }

    /// Join every worker, returning results in spawn order
    ///
    /// # Errors
    /// - The first worker error; remaining workers are aborted
    /// - `ShowcaseError::WorkerFailed` if a worker panicked
    /// - `ShowcaseError::Timeout` if the deadline expires first
    pub async fn join_all(mut self) -> Result<Vec<T>> {
        let spawned = self.spawned;
        let deadline = self.deadline;
        let collect = collect_in_order(&mut self.workers, spawned);

        match deadline {
            Some(limit) => tokio::time::timeout(limit, collect)
                .await
                .map_err(|_| timeout_error(limit))?,
            None => collect.await,
        }
    }

    /// Return the first successful result and abort the rest
    ///
    /// # Errors
    /// - `ShowcaseError::AllSourcesFailed` if no worker succeeds
    /// - `ShowcaseError::Timeout` if the deadline expires first
    pub async fn first_success(mut self) -> Result<T> {
        let attempted = self.spawned;
        let deadline = self.deadline;
        let race = first_ok(&mut self.workers);

        let winner = match deadline {
            Some(limit) => tokio::time::timeout(limit, race)
                .await
                .map_err(|_| timeout_error(limit))?,
            None => race.await,
        };

        winner.ok_or(ShowcaseError::AllSourcesFailed { attempted })
    }
}

impl<T: Send + 'static> Default for TaskGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

async fn collect_in_order<T: 'static>(
    workers: &mut JoinSet<(usize, Result<T>)>,
    spawned: usize,
) -> Result<Vec<T>> {
    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(spawned).collect();

    while let Some(joined) = workers.join_next().await {
        let (index, result) = joined?;
        let value = result.map_err(|e| {
            tracing::warn!(worker = index, error = %e, "worker failed");
            e
        })?;
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(value);
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| ShowcaseError::WorkerFailed(format!("worker {index} produced no result")))
        })
        .collect()
}

async fn first_ok<T: 'static>(workers: &mut JoinSet<(usize, Result<T>)>) -> Option<T> {
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((index, Ok(value))) => {
                tracing::debug!(worker = index, "first successful worker");
                return Some(value);
            }
            Ok((index, Err(e))) => tracing::warn!(worker = index, error = %e, "source failed"),
            Err(e) => tracing::warn!(error = %e, "source panicked"),
        }
    }
    None
}

fn timeout_error(limit: Duration) -> ShowcaseError {
    ShowcaseError::Timeout {
        duration_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
    }
}

/// Produce `value` after a simulated delay
async fn simulated<T>(delay_ms: u64, value: T) -> Result<T> {
    Latency::wait(delay_ms).await;
    Ok(value)
}

/// Structured concurrency demo component
///
/// Every worker runs exactly once and its result flows straight into the
/// assembled output.
#[derive(Debug, Clone, Copy)]
pub struct StructuredConcurrencyDemo {
    latency: Latency,
    deadline: Duration,
}

impl StructuredConcurrencyDemo {
    /// Create with explicit latency profile and deadline
    #[inline]
    #[must_use]
    pub fn new(latency: Latency, deadline: Duration) -> Self {
        Self { latency, deadline }
    }

    /// Deadline used by `fetch_with_timeout`
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Fetch profile, orders and preferences in parallel
    ///
    /// # Errors
    /// - `ShowcaseError::WorkerFailed` if any worker fails
    pub async fn fetch_user_data(&self, user_id: &str) -> Result<String> {
        tracing::info!(user_id, "fetching user data");
        let mut group = TaskGroup::new();
        group.spawn(simulated(self.latency.profile_ms, format!("Profile-{user_id}")));
        group.spawn(simulated(self.latency.orders_ms, format!("Orders-{user_id}")));
        group.spawn(simulated(self.latency.preferences_ms, format!("Preferences-{user_id}")));

        match group.join_all().await?.as_slice() {
            [user, orders, preferences] => Ok(format!(
                "User: {user}, Orders: {orders}, Preferences: {preferences}"
            )),
            other => Err(ShowcaseError::WorkerFailed(format!(
                "expected 3 results, got {}",
                other.len()
            ))),
        }
    }

    /// Race database, cache and API; the first answer wins
    ///
    /// # Errors
    /// - `ShowcaseError::AllSourcesFailed` if every source fails
    pub async fn fetch_from_multiple_sources(&self, query: &str) -> Result<String> {
        tracing::info!(query, "racing sources");
        let mut group = TaskGroup::new();
        group.spawn(simulated(self.latency.database_ms, format!("DB-Result: {query}")));
        group.spawn(simulated(self.latency.cache_ms, format!("Cache-Result: {query}")));
        group.spawn(simulated(self.latency.api_ms, format!("API-Result: {query}")));
        group.first_success().await
    }

    /// Run two slow operations under the configured deadline
    ///
    /// # Errors
    /// - `ShowcaseError::Timeout` if the deadline expires
    pub async fn fetch_with_timeout(&self, user_id: &str) -> Result<String> {
        tracing::info!(user_id, deadline = ?self.deadline, "fetching with deadline");
        let mut group = TaskGroup::with_deadline(self.deadline);
        group.spawn(simulated(self.latency.slow_op1_ms, format!("SlowOp1-{user_id}")));
        group.spawn(simulated(self.latency.slow_op2_ms, format!("SlowOp2-{user_id}")));

        Ok(group.join_all().await?.join(" | "))
    }

    /// Process the same input on three workers
    ///
    /// # Errors
    /// - `ShowcaseError::WorkerFailed` if any worker fails
    pub async fn process_with_workers(&self, data: &str) -> Result<String> {
        tracing::info!(data, "processing on workers");
        let mut group = TaskGroup::new();
        for n in 1..=3 {
            let input = data.to_string();
            group.spawn(async move { Ok(format!("Processed{n}-{input}")) });
        }

        Ok(format!("Resultados: [{}]", group.join_all().await?.join(", ")))
    }

    /// Fetch four metrics concurrently and combine them
    ///
    /// # Errors
    /// - `ShowcaseError::WorkerFailed` if any metric worker fails
    pub async fn aggregate_data(&self, category: &str) -> Result<Summary> {
        tracing::info!(category, "aggregating metrics");
        let count = ScopedHandle::spawn(simulated(self.latency.count_ms, 42));
        let sum = ScopedHandle::spawn(simulated(self.latency.sum_ms, 1234.56));
        let average = ScopedHandle::spawn(simulated(self.latency.average_ms, 29.39));
        let max = ScopedHandle::spawn(simulated(self.latency.max_ms, 999));

        let (count, sum, average, max) =
            tokio::try_join!(count.join(), sum.join(), average.join(), max.join())?;

        Ok(Summary {
            count: count?,
            sum: sum?,
            average: average?,
            max: max?,
        })
    }
}

impl Default for StructuredConcurrencyDemo {
    fn default() -> Self {
        Self::new(Latency::default(), Duration::from_secs(5))
    }
}
