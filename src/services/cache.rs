//! Time-boxed cache for task and reference lists.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default validity window for cached lists (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// Injectable time source so expiry can be tested without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time source used outside of tests.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry<V> {
    data: V,
    stored_at: Instant,
}

/// A key-value cache whose entries expire after a fixed TTL.
///
/// Entries are owned exclusively by the cache; `get` hands out clones.
/// When caching is disabled every `get` reports a miss, so callers
/// always refetch. The cache itself cannot fail, it only reports
/// hit or miss.
pub struct ExpiringCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
    enabled: bool,
    clock: Arc<dyn Clock>,
}

impl<K: Eq + Hash, V: Clone> ExpiringCache<K, V> {
    pub fn new(ttl: Duration, enabled: bool) -> Self {
        Self::with_clock(ttl, enabled, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, enabled: bool, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            enabled,
            clock,
        }
    }

    /// Cached data for a key, if present and still within the TTL.
    pub fn get(&self, key: &K) -> Option<V> {
        if !self.enabled {
            return None;
        }
        let entries = self.lock();
        let entry = entries.get(key)?;
        self.is_valid(entry).then(|| entry.data.clone())
    }

    /// Cached data regardless of TTL. Used only as a fallback when a
    /// background refresh fails and stale data beats no data.
    pub fn peek_stale(&self, key: &K) -> Option<V> {
        self.lock().get(key).map(|entry| entry.data.clone())
    }

    /// Store data under a key with a fresh timestamp, overwriting any
    /// previous entry.
    pub fn put(&self, key: K, data: V) {
        let stored_at = self.clock.now();
        self.lock().insert(key, CacheEntry { data, stored_at });
    }

    /// Remove a key outright. Called after any mutation that could
    /// change the cached collection.
    pub fn invalidate(&self, key: &K) {
        self.lock().remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn is_valid(&self, entry: &CacheEntry<V>) -> bool {
        self.clock.now().duration_since(entry.stored_at) < self.ttl
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
