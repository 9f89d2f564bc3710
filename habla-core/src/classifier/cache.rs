//! Bounded memo cache for classifier decisions

use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of cache usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Read-mostly memo table.
///
/// Once `capacity` entries are stored, new results are still computed and
/// returned but no longer inserted, so the cache never evicts and lookups
/// stay deterministic.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.entries.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();

        let mut entries = self.entries.write();
        if entries.len() < self.capacity {
            entries.entry(key).or_insert_with(|| value.clone());
        }
        value
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.read().len(),
            capacity: self.capacity,
        }
    }

    /// Drop all entries and reset the counters
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
