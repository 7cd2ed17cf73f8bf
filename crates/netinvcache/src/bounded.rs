//! Thread-safe bounded store with get-or-load
//!
//! Loaders run without the table lock held, so a slow backend never blocks
//! readers of other keys. Two callers missing the same key may both load;
//! the last write wins.

use std::hash::Hash;

use parking_lot::Mutex;
use tracing::trace;

use crate::config::CacheConfig;
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Bounded key/value store shared between threads
pub struct BoundedCache<K, V> {
    table: Mutex<LruCache<K, V>>,
    stats: CacheStats,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Create an empty store sized by `config`
    ///
    /// # Errors
    /// * `InvalidConfig` - sizing rejected by [`CacheConfig::validate`]
    pub fn new(config: &CacheConfig) -> netinv::Result<Self> {
        config.validate()?;
        Ok(Self::with_validated(config))
    }

    /// Build from a config the caller has already validated
    pub(crate) fn with_validated(config: &CacheConfig) -> Self {
        Self {
            table: Mutex::new(LruCache::with_capacity(
                config.initial_capacity,
                config.max_capacity,
            )),
            stats: CacheStats::new(),
        }
    }

    /// Get a cached value, marking it recently used
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.table.lock().get(key).cloned();
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Get a cached value or load it
    ///
    /// On a miss `loader` runs exactly once. `Ok(Some(_))` results are stored;
    /// `Ok(None)` and errors are returned to the caller without touching the table.
    ///
    /// # Arguments
    /// * `key` - Key to look up
    /// * `loader` - Fallback producing the value for `key`
    pub fn get_or_try_load<E, F>(&self, key: K, loader: F) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Result<Option<V>, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(Some(value));
        }

        self.stats.record_load();
        match loader() {
            Ok(Some(value)) => {
                self.put(key, value.clone());
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                self.stats.record_load_failure();
                Err(err)
            }
        }
    }

    /// Insert or overwrite an entry, evicting the least recently used one if full
    pub fn put(&self, key: K, value: V) {
        let evicted = self.table.lock().put(key, value);
        self.stats.record_insert();
        if let Some((evicted_key, _)) = evicted {
            self.stats.record_eviction();
            trace!(key = ?evicted_key, "evicted cache entry");
        }
    }

    /// Check for a key without affecting recency or stats
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.lock().peek(key).is_some()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }

    /// Entry ceiling
    pub fn capacity(&self) -> usize {
        self.table.lock().capacity()
    }

    /// Counters for this store
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
