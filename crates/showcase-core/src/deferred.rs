//! Deferred, write-once values
//!
//! `StableValue` is a compute-or-join cell:
//! - Reads of a committed value take a lock-free fast path
//! - The first reader of an empty cell runs the producer while holding the
//!   init lock; concurrent readers wait on that lock
//! - Once committed, the value never changes and no producer runs again
//!
//! If the producing future is dropped before it finishes, the cell stays
//! empty and the next reader becomes the producer.

use crate::error::Result;
use crate::fanout::ScopedHandle;
use crate::types::{DatabaseConnection, ExpensiveResult, Latency};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Write-once cell with at-most-once initialization
pub struct StableValue<T> {
    value: OnceCell<T>,
    init: tokio::sync::Mutex<()>,
}

impl<T> StableValue<T> {
    /// Create an empty cell
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: OnceCell::new(),
            init: tokio::sync::Mutex::new(()),
        }
    }

    /// Committed value, if any
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Check whether a value has been committed
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.value.get().is_some()
    }

    /// Commit `value` if the cell is still empty
    ///
    /// Returns `false` when a value was already committed.
    pub fn try_set(&self, value: T) -> bool {
        self.value.set(value).is_ok()
    }

    /// Committed value, running `producer` first if the cell is empty
    pub async fn get_or_init<F, Fut>(&self, producer: F) -> &T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(value) = self.value.get() {
            return value;
        }

        let _guard = self.init.lock().await;
        if let Some(value) = self.value.get() {
            return value;
        }

        let produced = producer().await;
        self.value.get_or_init(move || produced)
    }

    /// Like `get_or_init`, for producers that can fail
    ///
    /// A failed producer leaves the cell empty.
    ///
    /// # Errors
    /// - Whatever `producer` returns
    pub async fn get_or_try_init<F, Fut, E>(&self, producer: F) -> std::result::Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self.init.lock().await;
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let produced = producer().await?;
        Ok(self.value.get_or_init(move || produced))
    }
}

impl<T> Default for StableValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for StableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => f.debug_tuple("StableValue").field(value).finish(),
            None => f.write_str("StableValue(<unset>)"),
        }
    }
}

/// Producer invocation counts per cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InitCounts {
    pub config: usize,
    pub connection: usize,
    pub expensive: usize,
}

/// Outcome of two workers racing to initialize one cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceReport {
    /// Value committed to the cell
    pub winner: String,
    /// Value each worker observed, in worker order
    pub observed: Vec<String>,
    /// How many producers actually ran
    pub producer_runs: usize,
}

#[derive(Debug, Default)]
struct Counters {
    config: AtomicUsize,
    connection: AtomicUsize,
    expensive: AtomicUsize,
}

/// Deferred value demo component
///
/// Holds three independent cells; each producer runs at most once per instance.
#[derive(Debug)]
pub struct StableValuesDemo {
    lazy_config: StableValue<String>,
    db_connection: StableValue<DatabaseConnection>,
    expensive: StableValue<ExpensiveResult>,
    counters: Counters,
    latency: Latency,
}

impl StableValuesDemo {
    /// Create with a latency profile
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self {
            lazy_config: StableValue::new(),
            db_connection: StableValue::new(),
            expensive: StableValue::new(),
            counters: Counters::default(),
            latency,
        }
    }

    /// Configuration string, loaded on first access
    pub async fn lazy_config(&self) -> String {
        self.lazy_config
            .get_or_init(|| async {
                tracing::info!("loading configuration");
                self.counters.config.fetch_add(1, Ordering::SeqCst);
                load_configuration(self.latency.config_load_ms).await
            })
            .await
            .clone()
    }

    /// Connection descriptor, built on first access
    pub async fn connection(&self) -> DatabaseConnection {
        self.db_connection
            .get_or_init(|| async {
                tracing::info!("establishing database connection");
                self.counters.connection.fetch_add(1, Ordering::SeqCst);
                DatabaseConnection::new("localhost", 5432)
            })
            .await
            .clone()
    }

    /// Expensive computation, run on first access
    pub async fn expensive_result(&self) -> ExpensiveResult {
        self.expensive
            .get_or_init(|| async {
                tracing::info!("running expensive computation");
                self.counters.expensive.fetch_add(1, Ordering::SeqCst);
                Latency::wait(self.latency.expensive_ms).await;
                ExpensiveResult::new("resultado-complejo", 42)
            })
            .await
            .clone()
    }

    /// Producer invocation counts so far
    #[must_use]
    pub fn init_counts(&self) -> InitCounts {
        InitCounts {
            config: self.counters.config.load(Ordering::SeqCst),
            connection: self.counters.connection.load(Ordering::SeqCst),
            expensive: self.counters.expensive.load(Ordering::SeqCst),
        }
    }

    /// Two workers race to initialize a fresh cell with different producers
    ///
    /// # Errors
    /// - `ShowcaseError::WorkerFailed` if a worker panics
    pub async fn race_initialization(&self) -> Result<RaceReport> {
        let cell: Arc<StableValue<String>> = Arc::new(StableValue::new());
        let runs = Arc::new(AtomicUsize::new(0));

        let workers: Vec<ScopedHandle<String>> = (1..=2)
            .map(|n| {
                let cell = Arc::clone(&cell);
                let runs = Arc::clone(&runs);
                let delay = self.latency.race_ms;
                ScopedHandle::spawn(async move {
                    cell.get_or_init(|| async move {
                        tracing::debug!(worker = n, "initializing shared cell");
                        runs.fetch_add(1, Ordering::SeqCst);
                        Latency::wait(delay).await;
                        format!("valor-thread-{n}")
                    })
                    .await
                    .clone()
                })
            })
            .collect();

        let mut observed = Vec::with_capacity(workers.len());
        for worker in workers {
            observed.push(worker.join().await?);
        }

        let winner = cell.get().cloned().unwrap_or_default();
        Ok(RaceReport {
            winner,
            observed,
            producer_runs: runs.load(Ordering::SeqCst),
        })
    }
}

impl Default for StableValuesDemo {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

async fn load_configuration(delay_ms: u64) -> String {
    Latency::wait(delay_ms).await;
    format!("config-loaded-{}", chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn lazy_config_is_stable() {
        let demo = StableValuesDemo::default();
        let first = demo.lazy_config().await;
        let second = demo.lazy_config().await;

        assert!(first.starts_with("config-loaded-"));
        let stamp = first.rsplit('-').next().unwrap();
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(first, second);
        assert_eq!(demo.init_counts().config, 1);
    }

    #[tokio::test]
    async fn connection_details() {
        let demo = StableValuesDemo::new(Latency::zero());
        let conn = demo.connection().await;

        assert_eq!(conn, DatabaseConnection::new("localhost", 5432));
        assert_eq!(demo.connection().await, conn);
        assert_eq!(demo.init_counts().connection, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expensive_result_computed_once() {
        let demo = StableValuesDemo::default();
        let first = demo.expensive_result().await;
        let second = demo.expensive_result().await;

        assert_eq!(first, ExpensiveResult::new("resultado-complejo", 42));
        assert_eq!(first, second);
        assert_eq!(demo.init_counts().expensive, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cells_are_independent() {
        let demo = StableValuesDemo::default();
        demo.lazy_config().await;

        assert_eq!(
            demo.init_counts(),
            InitCounts {
                config: 1,
                connection: 0,
                expensive: 0
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_reads_run_one_producer() {
        let demo = Arc::new(StableValuesDemo::new(Latency {
            expensive_ms: 20,
            ..Latency::zero()
        }));

        let readers: Vec<_> = (0..16)
            .map(|_| {
                let demo = Arc::clone(&demo);
                tokio::spawn(async move { demo.expensive_result().await })
            })
            .collect();

        for reader in readers {
            assert_eq!(
                reader.await.unwrap(),
                ExpensiveResult::new("resultado-complejo", 42)
            );
        }
        assert_eq!(demo.init_counts().expensive, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn race_has_single_winner() {
        let report = StableValuesDemo::default().race_initialization().await.unwrap();

        assert_eq!(report.producer_runs, 1);
        assert_eq!(report.observed.len(), 2);
        assert!(report.observed.iter().all(|v| *v == report.winner));
        assert!(report.winner.starts_with("valor-thread-"));
    }

    #[tokio::test]
    async fn try_set_only_once() {
        let cell = StableValue::new();
        assert!(!cell.is_set());
        assert!(cell.try_set(1));
        assert!(!cell.try_set(2));
        assert_eq!(cell.get_or_init(|| async { 3 }).await, &1);
    }

    #[tokio::test]
    async fn failed_producer_leaves_cell_empty() {
        let cell: StableValue<u32> = StableValue::new();

        let failed: std::result::Result<&u32, &str> =
            cell.get_or_try_init(|| async { Err("unavailable") }).await;
        assert!(failed.is_err());
        assert!(cell.get().is_none());

        let value = cell
            .get_or_try_init(|| async { Ok::<_, &str>(7) })
            .await
            .unwrap();
        assert_eq!(*value, 7);
    }

    #[test]
    fn debug_shows_state() {
        let cell: StableValue<u8> = StableValue::default();
        assert_eq!(format!("{cell:?}"), "StableValue(<unset>)");
        cell.try_set(4);
        assert_eq!(format!("{cell:?}"), "StableValue(4)");
    }
}
