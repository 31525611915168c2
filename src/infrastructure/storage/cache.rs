// Bounded in-memory memo cache with least-recently-used eviction
use indexmap::IndexMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Thread-safe LRU cache
///
/// Entries are kept in an `IndexMap` ordered from least to most recently
/// used. A hit moves the entry to the back; an insert at capacity evicts
/// from the front.
pub struct MemoryCache<K, V> {
    map: Mutex<IndexMap<K, V>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Point-in-time occupancy and hit counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub len: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl<K, V> MemoryCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            map: Mutex::new(IndexMap::with_capacity(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<K, V>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut map = self.lock();
        match map.shift_remove(key) {
            Some(value) => {
                map.insert(key.clone(), value.clone());
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert or replace `key`. Racing writers for the same key are benign:
    /// the last write wins.
    pub fn insert(&self, key: K, value: V) {
        let mut map = self.lock();
        map.shift_remove(&key);
        while map.len() >= self.capacity {
            map.shift_remove_index(0);
        }
        map.insert(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
