//! Keyed single-flight cache
//!
//! Both directory tables (country list, per-country city lists) are
//! populated lazily, exactly once per key, for the life of the process.
//! Concurrent first requests for the same key share one in-flight
//! population instead of each dialing the upstream directory.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

/// At-most-once-population table keyed by a lookup key.
///
/// Each key owns a [`OnceCell`]; callers racing on an unpopulated key all
/// await the same cell, so only one `populate` future runs at a time. A
/// failed population leaves the cell empty and the next caller retries.
/// A populated value is immutable until the process exits.
pub struct SingleFlight<K, V> {
    entries: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> SingleFlight<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, populating it on first access.
    #[tracing::instrument(level = "debug", skip(self, key, populate))]
    pub async fn get_or_populate<E, F, Fut>(&self, key: K, populate: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(key).or_default().clone()
        };

        let value = cell.get_or_try_init(populate).await?;
        Ok(value.clone())
    }
}

impl<K, V> Default for SingleFlight<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_requests_populate_once() {
        let table: Arc<SingleFlight<String, u64>> = Arc::new(SingleFlight::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let table = Arc::clone(&table);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                table
                    .get_or_populate("FR".to_string(), || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        // Hold the population open so the other callers
                        // observe an in-flight cell rather than a miss.
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok::<u64, String>(42)
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Ok(42));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_population_is_not_cached() {
        let table: SingleFlight<&str, u64> = SingleFlight::new();

        let failed = table
            .get_or_populate("DE", || async { Err::<u64, String>("boom".to_string()) })
            .await;
        assert_eq!(failed, Err("boom".to_string()));

        let recovered = table
            .get_or_populate("DE", || async { Ok::<u64, String>(7) })
            .await;
        assert_eq!(recovered, Ok(7));
    }

    #[tokio::test]
    async fn test_populated_value_is_immutable() {
        let table: SingleFlight<&str, u64> = SingleFlight::new();

        let first = table
            .get_or_populate("JP", || async { Ok::<u64, String>(1) })
            .await;
        assert_eq!(first, Ok(1));

        // A later populate closure for the same key must never run.
        let second = table
            .get_or_populate("JP", || async {
                Err::<u64, String>("population ran twice for the same key".to_string())
            })
            .await;
        assert_eq!(second, Ok(1));
    }

    #[tokio::test]
    async fn test_distinct_keys_populate_independently() {
        let table: SingleFlight<&str, u64> = SingleFlight::new();

        let fr = table
            .get_or_populate("FR", || async { Ok::<u64, String>(1) })
            .await;
        let jp = table
            .get_or_populate("JP", || async { Ok::<u64, String>(2) })
            .await;
        assert_eq!(fr, Ok(1));
        assert_eq!(jp, Ok(2));
    }
}
