//! Query cache storage.
//!
//! [`QueryCache`] is the backend seam; [`MemoryQueryCache`] is the built-in
//! in-process implementation with LRU eviction, expiry and dependencies.

use std::num::NonZeroUsize;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use lru::LruCache;
use metrics::counter;
use serde_json::Value;
use tracing::trace;

use super::deps::{Dependency, DependencySnapshot};
use super::keys::CacheKey;
use super::lock::{rw_read, rw_write};
use crate::telemetry::METRIC_QUERY_CACHE_EVICT_TOTAL;

const SOURCE: &str = "cache::store";

/// Key-value backend for cached query results.
///
/// `get` reports a miss as `None`, so cached `false`, `null` or empty values
/// are ordinary hits.
pub trait QueryCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Value>;

    /// Store `value`; `ttl` of `None` keeps it until evicted.
    fn set(
        &self,
        key: CacheKey,
        value: Value,
        ttl: Option<Duration>,
        dependency: Option<Arc<dyn Dependency>>,
    );
}

struct Entry {
    value: Value,
    expires_at: Option<Instant>,
    dependency: Option<DependencySnapshot>,
}

impl Entry {
    fn is_stale(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
            || self
                .dependency
                .as_ref()
                .is_some_and(DependencySnapshot::is_changed)
    }
}

pub struct MemoryQueryCache {
    entries: RwLock<LruCache<CacheKey, Entry>>,
}

impl MemoryQueryCache {
    /// Create a store holding at most `capacity` results (clamped to 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        rw_write(&self.entries, SOURCE, "clear").clear();
    }
}

impl QueryCache for MemoryQueryCache {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        let mut entries = rw_write(&self.entries, SOURCE, "get");
        let stale = entries.peek(key)?.is_stale(Instant::now());
        if stale {
            entries.pop(key);
            trace!(key_digest = key.digest(), "Dropped stale query cache entry");
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(
        &self,
        key: CacheKey,
        value: Value,
        ttl: Option<Duration>,
        dependency: Option<Arc<dyn Dependency>>,
    ) {
        let entry = Entry {
            value,
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
            dependency: dependency.map(DependencySnapshot::capture),
        };

        let evicted = rw_write(&self.entries, SOURCE, "set").push(key.clone(), entry);
        if evicted.is_some_and(|(evicted_key, _)| evicted_key != key) {
            counter!(METRIC_QUERY_CACHE_EVICT_TOTAL).increment(1);
        }
    }
}
