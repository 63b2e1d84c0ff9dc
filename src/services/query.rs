// src/services/query.rs

//! Query cache with staleness, garbage collection and retries.
//!
//! Results are keyed by what was asked for (resource plus page params, or
//! resource plus id). A cached entry younger than `stale_time` is served
//! without touching the network; older entries are refetched, and entries
//! older than `gc_time` are dropped outright.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::error::Result;
use crate::models::{PageParams, QueryConfig, Resource};

/// Identity of a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List { resource: Resource, params: PageParams },
    Detail { resource: Resource, id: String },
}

/// Exponential backoff for failed fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (0-based): `min(base * 2^attempt, max)`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Run `op`, retrying transient failures.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retries && e.is_transient() => {
                    let delay = self.delay(attempt);
                    log::debug!(
                        "Attempt {} failed ({}), retrying in {:?}",
                        attempt + 1,
                        e,
                        delay
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl From<&QueryConfig> for RetryPolicy {
    fn from(config: &QueryConfig) -> Self {
        Self {
            retries: config.retry,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        }
    }
}

struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

/// LRU-bounded cache of query results.
pub struct QueryCache<V> {
    entries: Mutex<LruCache<QueryKey, Entry<V>>>,
    stale_time: Duration,
    gc_time: Duration,
    retry: RetryPolicy,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(capacity: usize, stale_time: Duration, gc_time: Duration, retry: RetryPolicy) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stale_time,
            gc_time,
            retry,
        }
    }

    pub fn from_config(config: &QueryConfig) -> Self {
        Self::new(
            config.capacity,
            config.stale_time(),
            config.gc_time(),
            RetryPolicy::from(config),
        )
    }

    /// Cached value for `key` if it is still fresh.
    pub fn get_fresh(&self, key: &QueryKey) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let age = entries.peek(key)?.fetched_at.elapsed();
        if age >= self.gc_time {
            entries.pop(key);
            return None;
        }
        if age >= self.stale_time {
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: QueryKey, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.put(
            key,
            Entry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop one key, or everything.
    pub fn invalidate(&self, key: Option<&QueryKey>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match key {
            Some(key) => {
                entries.pop(key);
            }
            None => entries.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serve `key` from cache, or run `loader` (with retries) and cache the result.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, loader: F) -> Result<V>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get_fresh(&key) {
            log::debug!("Query cache hit: {:?}", key);
            return Ok(value);
        }

        let value = self.retry.run(loader).await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn list_key(offset: u64) -> QueryKey {
        QueryKey::List {
            resource: Resource::Articles,
            params: PageParams { limit: 3, offset },
        }
    }

    fn cache(stale: Duration) -> QueryCache<u32> {
        QueryCache::new(2, stale, Duration::from_secs(600), RetryPolicy::none())
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            retries: 5,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
        };
        assert_eq!(policy.delay(0), Duration::from_millis(1000));
        assert_eq!(policy.delay(1), Duration::from_millis(2000));
        assert_eq!(policy.delay(2), Duration::from_millis(4000));
        assert_eq!(policy.delay(5), Duration::from_millis(30_000));
        assert_eq!(policy.delay(40), Duration::from_millis(30_000));
    }

    #[tokio::test]
    async fn fresh_entry_is_served_from_cache() {
        let cache = cache(Duration::from_secs(300));
        let counter = AtomicU32::new(0);
        let calls = &counter;

        for _ in 0..3 {
            let value = cache
                .fetch(list_key(0), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_entry_is_refetched() {
        let cache = cache(Duration::ZERO);
        let counter = AtomicU32::new(0);
        let calls = &counter;

        for _ in 0..2 {
            cache
                .fetch(list_key(0), move || async move {
                    Ok(calls.fetch_add(1, Ordering::SeqCst))
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn distinct_params_are_distinct_entries() {
        let cache = cache(Duration::from_secs(300));
        cache.fetch(list_key(0), || async { Ok(1) }).await.unwrap();
        cache.fetch(list_key(3), || async { Ok(2) }).await.unwrap();
        assert_eq!(cache.get_fresh(&list_key(0)), Some(1));
        assert_eq!(cache.get_fresh(&list_key(3)), Some(2));
    }

    #[test]
    fn capacity_evicts_least_recent() {
        let cache = cache(Duration::from_secs(300));
        cache.insert(list_key(0), 1);
        cache.insert(list_key(3), 2);
        cache.insert(list_key(6), 3);
        assert_eq!(cache.len(), 2);
        assert!(cache.get_fresh(&list_key(0)).is_none());
    }

    #[test]
    fn invalidate_removes_entries() {
        let cache = cache(Duration::from_secs(300));
        cache.insert(list_key(0), 1);
        cache.insert(list_key(3), 2);
        cache.invalidate(Some(&list_key(0)));
        assert_eq!(cache.len(), 1);
        cache.invalidate(None);
        assert!(cache.is_empty());
    }

    #[test]
    fn entries_past_gc_time_are_dropped() {
        let cache = QueryCache::new(
            4,
            Duration::from_secs(300),
            Duration::ZERO,
            RetryPolicy::none(),
        );
        cache.insert(list_key(0), 7);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get_fresh(&list_key(0)), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn stale_entries_are_kept_until_gc_time() {
        let cache = QueryCache::new(
            4,
            Duration::ZERO,
            Duration::from_secs(600),
            RetryPolicy::none(),
        );
        cache.insert(list_key(0), 7);

        assert_eq!(cache.get_fresh(&list_key(0)), None);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn transient_errors_are_retried() {
        let policy = RetryPolicy {
            retries: 3,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        };
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = policy
            .run(move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(AppError::api(503, "busy"))
                } else {
                    Ok("done")
                }
            })
            .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_fail_fast() {
        let policy = RetryPolicy {
            retries: 3,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        };
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<()> = policy
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::api(404, "Not found."))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_are_bounded() {
        let policy = RetryPolicy {
            retries: 2,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        };
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<()> = policy
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::api(500, "boom"))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
