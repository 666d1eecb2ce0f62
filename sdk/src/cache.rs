//! Read-through memo cache with a single shared expiry watermark.
//!
//! One watermark governs every key of a cache instance: any computation
//! pushes it to `now + ttl`, and once it passes, the next read of *any* key
//! recomputes that key. A key that has never been computed is always
//! computed. A `ttl` of zero disables time-based expiry entirely.
//!
//! Misses are not serialized. Two concurrent reads of the same cold key may
//! both run `compute`; the last write wins.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

pub struct TimedCache<A: ?Sized, K, V> {
    name: &'static str,
    ttl: Duration,
    key_of: fn(&A) -> K,
    inner: Mutex<Inner<K, V>>,
}

struct Inner<K, V> {
    entries: HashMap<K, V>,
    expires_at: Option<Instant>,
}

impl<A: ?Sized, K, V> TimedCache<A, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(name: &'static str, ttl: Duration, key_of: fn(&A) -> K) -> Self {
        Self {
            name,
            ttl,
            key_of,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                expires_at: None,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value for `args`, or run `compute` and store its
    /// result. Errors from `compute` are returned as-is and nothing is cached.
    pub async fn get<F, Fut, E>(&self, args: &A, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let key = (self.key_of)(args);

        if let Some(value) = self.lookup(&key) {
            tracing::debug!(cache = self.name, "cache hit");
            return Ok(value);
        }

        tracing::debug!(cache = self.name, "cache miss");
        let value = compute().await?;

        let mut inner = self.inner.lock();
        inner.entries.insert(key, value.clone());
        if !self.ttl.is_zero() {
            inner.expires_at = Some(Instant::now() + self.ttl);
        }
        Ok(value)
    }

    fn lookup(&self, key: &K) -> Option<V> {
        let inner = self.inner.lock();
        let value = inner.entries.get(key)?;
        if self.ttl.is_zero() {
            return Some(value.clone());
        }
        match inner.expires_at {
            Some(deadline) if Instant::now() < deadline => Some(value.clone()),
            _ => None,
        }
    }

    /// Drop every entry and reset the watermark.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.expires_at = None;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn identity(k: &u32) -> u32 {
        *k
    }

    async fn counted(calls: &AtomicUsize, value: u64) -> Result<u64, Infallible> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_computes_unseen_keys_and_then_holds() {
        let cache = TimedCache::new("test", Duration::ZERO, identity);
        let calls = AtomicUsize::new(0);

        assert_eq!(cache.get(&1, || counted(&calls, 10)).await.unwrap(), 10);
        assert_eq!(cache.get(&2, || counted(&calls, 20)).await.unwrap(), 20);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert_eq!(cache.get(&1, || counted(&calls, 11)).await.unwrap(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl_and_recompute_after() {
        let cache = TimedCache::new("test", Duration::from_millis(500), identity);
        let calls = AtomicUsize::new(0);

        assert_eq!(cache.get(&1, || counted(&calls, 10)).await.unwrap(), 10);
        tokio::time::advance(Duration::from_millis(499)).await;
        assert_eq!(cache.get(&1, || counted(&calls, 99)).await.unwrap(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get(&1, || counted(&calls, 12)).await.unwrap(), 12);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watermark_is_shared_across_keys() {
        let cache = TimedCache::new("test", Duration::from_millis(100), identity);
        let calls = AtomicUsize::new(0);

        cache.get(&1, || counted(&calls, 10)).await.unwrap();
        tokio::time::advance(Duration::from_millis(80)).await;
        // Computing key 2 pushes the watermark for key 1 as well.
        cache.get(&2, || counted(&calls, 20)).await.unwrap();
        tokio::time::advance(Duration::from_millis(80)).await;

        assert_eq!(cache.get(&1, || counted(&calls, 11)).await.unwrap(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unseen_key_always_computes() {
        let cache = TimedCache::new("test", Duration::from_secs(60), identity);
        let calls = AtomicUsize::new(0);

        cache.get(&1, || counted(&calls, 10)).await.unwrap();
        cache.get(&2, || counted(&calls, 20)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_value_is_a_hit() {
        let cache = TimedCache::new("test", Duration::from_secs(60), identity);
        let calls = AtomicUsize::new(0);

        assert_eq!(cache.get(&1, || counted(&calls, 0)).await.unwrap(), 0);
        assert_eq!(cache.get(&1, || counted(&calls, 5)).await.unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_not_cached() {
        let cache: TimedCache<u32, u32, u64> =
            TimedCache::new("test", Duration::from_secs(60), identity);

        let err: Result<u64, &str> = cache.get(&1, || async { Err("boom") }).await;
        assert_eq!(err, Err("boom"));
        assert!(cache.is_empty());

        let ok: Result<u64, &str> = cache.get(&1, || async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_forces_recompute() {
        let cache = TimedCache::new("test", Duration::ZERO, identity);
        let calls = AtomicUsize::new(0);

        cache.get(&1, || counted(&calls, 10)).await.unwrap();
        cache.clear();
        cache.get(&1, || counted(&calls, 10)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
