//! Storage backends for cache policies.
//!
//! Stores own key/value pairs and enforce entry-count capacity; policies own
//! eviction order and ranking metadata. Keeping the two apart lets a policy
//! change its metadata structures without touching value ownership.

use std::sync::Arc;

/// Snapshot of store-level counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
    pub evictions: u64,
}

/// Error returned when a store is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFull;

/// Core store operations common to all backends.
pub trait StoreCore<K, V> {
    /// Fetch a value by key.
    fn get(&self, key: &K) -> Option<Arc<V>>;

    /// Check whether a key exists.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Check if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum entries allowed by the policy.
    fn capacity(&self) -> usize;

    /// Snapshot the store's current counters.
    fn metrics(&self) -> StoreMetrics {
        StoreMetrics::default()
    }

    /// Record that the policy evicted an entry.
    fn record_eviction(&self) {}
}

/// Mutable store operations.
pub trait StoreMut<K, V>: StoreCore<K, V> {
    /// Insert or update a value. Returns the previous value if present.
    /// Returns `StoreFull` if at capacity and inserting a new key.
    fn try_insert(&mut self, key: K, value: Arc<V>) -> Result<Option<Arc<V>>, StoreFull>;

    /// Remove a value by key.
    fn remove(&mut self, key: &K) -> Option<Arc<V>>;

    /// Remove all entries.
    fn clear(&mut self);
}
