//! HashMap-backed value store.
//!
//! ## Key Components
//! - [`HashMapStore`]: single-threaded `K -> Arc<V>` store with entry-count
//!   capacity enforcement and always-on operation counters.
//!
//! ## Implementation Notes
//! - Counters use `Cell`, which is enough under the crate's single-threaded
//!   model; `metrics()` snapshots them without borrowing mutably.
//! - Capacity is enforced on *new* keys only; updating a resident key never
//!   fails.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//!
//! use cachesim::store::hashmap::HashMapStore;
//! use cachesim::store::traits::{StoreCore, StoreMut};
//!
//! let mut store: HashMapStore<u64, &str> = HashMapStore::new(2);
//! store.try_insert(1, Arc::new("a")).unwrap();
//! assert!(store.contains(&1));
//! assert!(store.try_insert(2, Arc::new("b")).is_ok());
//! assert!(store.try_insert(3, Arc::new("c")).is_err()); // full
//! ```

use std::cell::Cell;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::store::traits::{StoreCore, StoreFull, StoreMetrics, StoreMut};

#[derive(Debug, Default)]
struct StoreCounters {
    hits: Cell<u64>,
    misses: Cell<u64>,
    inserts: Cell<u64>,
    updates: Cell<u64>,
    removes: Cell<u64>,
    evictions: Cell<u64>,
}

impl StoreCounters {
    fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            hits: self.hits.get(),
            misses: self.misses.get(),
            inserts: self.inserts.get(),
            updates: self.updates.get(),
            removes: self.removes.get(),
            evictions: self.evictions.get(),
        }
    }

    fn bump(cell: &Cell<u64>) {
        cell.set(cell.get() + 1);
    }
}

/// Single-threaded HashMap-backed store.
#[derive(Debug)]
pub struct HashMapStore<K, V> {
    map: HashMap<K, Arc<V>>,
    capacity: usize,
    counters: StoreCounters,
}

impl<K, V> HashMapStore<K, V>
where
    K: Eq + Hash,
{
    /// Create a store with a fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            capacity,
            counters: StoreCounters::default(),
        }
    }

    /// Fetch a value reference by key, updating hit/miss counters.
    pub fn get_ref(&self, key: &K) -> Option<&Arc<V>> {
        match self.map.get(key) {
            Some(value) => {
                StoreCounters::bump(&self.counters.hits);
                Some(value)
            }
            None => {
                StoreCounters::bump(&self.counters.misses);
                None
            }
        }
    }

    /// Fetch a value reference by key without touching counters.
    pub fn peek_ref(&self, key: &K) -> Option<&Arc<V>> {
        self.map.get(key)
    }
}

impl<K, V> StoreCore<K, V> for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn get(&self, key: &K) -> Option<Arc<V>> {
        self.get_ref(key).cloned()
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn metrics(&self) -> StoreMetrics {
        self.counters.snapshot()
    }

    fn record_eviction(&self) {
        StoreCounters::bump(&self.counters.evictions);
    }
}

impl<K, V> StoreMut<K, V> for HashMapStore<K, V>
where
    K: Eq + Hash,
{
    fn try_insert(&mut self, key: K, value: Arc<V>) -> Result<Option<Arc<V>>, StoreFull> {
        if !self.map.contains_key(&key) && self.map.len() >= self.capacity {
            return Err(StoreFull);
        }
        let previous = self.map.insert(key, value);
        if previous.is_some() {
            StoreCounters::bump(&self.counters.updates);
        } else {
            StoreCounters::bump(&self.counters.inserts);
        }
        Ok(previous)
    }

    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let removed = self.map.remove(key);
        if removed.is_some() {
            StoreCounters::bump(&self.counters.removes);
        }
        removed
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
