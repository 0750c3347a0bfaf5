//! # LFU (Least Frequently Used) Cache
//!
//! Online LFU replacement: eviction decisions use only past observed
//! accesses. Frequency is the primary rank; within the minimum-frequency
//! class, the key promoted longest ago is evicted first. Promotion,
//! insertion, and eviction are all O(1) amortized.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       LfuCache<K, V>                         │
//!   │                                                              │
//!   │   ┌──────────────────────────┐  ┌─────────────────────────┐  │
//!   │   │ store: HashMapStore<K,V> │  │ ranks: FrequencyBuckets │  │
//!   │   │  K -> Arc<V>             │  │  freq -> recency bucket │  │
//!   │   │  (values live here)      │  │  min_freq pointer       │  │
//!   │   └──────────────────────────┘  └─────────────────────────┘  │
//!   │                                                              │
//!   │   Eviction: pop the tail of the min_freq bucket, O(1)        │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//!
//! | Operation        | Effect                                               |
//! |------------------|------------------------------------------------------|
//! | `get` (hit)      | frequency +1, key moves to head of its new bucket    |
//! | `get` (miss)     | pure; no ranking state changes                       |
//! | `insert` (new)   | evict if full, then admit at frequency 1, min_freq=1 |
//! | `insert` (resident) | overwrite value **and** promote, same as a hit    |
//! | `contains`       | membership only, never promotes                      |
//!
//! A resident-key `insert` counts as an access: the caller handed the key a
//! fresh value, which is evidence of use. (Policies that preserve frequency
//! on update exist; this engine deliberately promotes.)
//!
//! ## Eviction walk-through
//!
//! ```text
//!   capacity 2:  insert(A)  insert(B)  get(A)  insert(C)
//!
//!     after get(A):   A freq=2, B freq=1      min_freq=1, victim=B
//!     insert(C):      B evicted ──► residents {A, C}
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cachesim::policy::lfu::LfuCache;
//! use cachesim::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache: LfuCache<&str, i32> = LfuCache::new(2);
//! cache.insert("a", Arc::new(1));
//! cache.insert("b", Arc::new(2));
//! cache.get(&"a");
//!
//! cache.insert("c", Arc::new(3)); // "b" has the lowest frequency: evicted
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! assert!(cache.contains(&"c"));
//! ```
//!
//! ## Limitations
//!
//! - No frequency decay: long-lived hot keys stay hot forever.
//! - Cold-start: fresh keys enter at frequency 1 and are the first victims.
//! - Not thread-safe; wrap externally if shared.

use std::hash::Hash;
use std::sync::Arc;

use crate::ds::FrequencyBuckets;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsSnapshotProvider,
};
#[cfg(feature = "metrics")]
use crate::metrics::LfuMetrics;
use crate::store::hashmap::HashMapStore;
use crate::store::traits::{StoreCore, StoreMut};
use crate::traits::{CoreCache, LfuCacheTrait, ReadOnlyCache};

/// LFU cache with least-recently-promoted tie-breaking.
///
/// Values are stored as `Arc<V>`; see the module docs for semantics.
#[derive(Debug)]
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    store: HashMapStore<K, V>,
    ranks: FrequencyBuckets<K>,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

/// Read-only view of one resident entry, yielded by
/// [`iter_entries`](LfuCache::iter_entries).
#[derive(Debug)]
pub struct LfuEntryMeta<'a, K, V> {
    pub key: &'a K,
    pub value: &'a Arc<V>,
    pub freq: u64,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Capacity 0 is honored: such a cache rejects every insert.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: HashMapStore::new(capacity),
            ranks: FrequencyBuckets::with_capacity(capacity),
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    /// Iterates resident entries with their frequencies, in no defined
    /// order. Diagnostic only.
    pub fn iter_entries(&self) -> impl Iterator<Item = LfuEntryMeta<'_, K, V>> {
        self.ranks.iter_entries().filter_map(move |meta| {
            self.store.peek_ref(meta.key).map(|value| LfuEntryMeta {
                key: meta.key,
                value,
                freq: meta.freq,
            })
        })
    }

    /// Validates the store/ranking invariants.
    ///
    /// Intended for tests and debugging; the public contract cannot violate
    /// these, so a failure indicates an engine bug.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.store.len() != self.ranks.len() {
            return Err(InvariantError::new(format!(
                "store holds {} entries but ranks track {}",
                self.store.len(),
                self.ranks.len()
            )));
        }
        if self.store.len() > self.store.capacity() {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.store.len(),
                self.store.capacity()
            )));
        }
        for meta in self.ranks.iter_entries() {
            if self.store.peek_ref(meta.key).is_none() {
                return Err(InvariantError::new("ranked key missing from store"));
            }
            if meta.freq == 0 {
                return Err(InvariantError::new("resident key with zero frequency"));
            }
        }
        if let Some(min) = self.ranks.min_freq() {
            match self.ranks.peek_min() {
                Some((_, freq)) if freq == min => {}
                _ => return Err(InvariantError::new("min_freq bucket has no tail")),
            }
        } else if !self.ranks.is_empty() {
            return Err(InvariantError::new("non-empty ranks without a minimum"));
        }
        Ok(())
    }

    fn evict_one(&mut self) -> Option<(K, Arc<V>)> {
        let (victim, _freq) = self.ranks.pop_min()?;
        self.store.record_eviction();
        let value = self.store.remove(&victim)?;
        Some((victim, value))
    }
}

impl<K, V> ReadOnlyCache<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn capacity(&self) -> usize {
        self.store.capacity()
    }
}

impl<K, V> CoreCache<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.ranks.contains(&key) {
            // Overwrite counts as an access: promote like a hit.
            self.ranks.touch(&key);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return self.store.try_insert(key, value).ok().flatten();
        }

        if self.store.capacity() == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.store.len() >= self.store.capacity() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            if self.evict_one().is_some() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }

        if self.store.try_insert(key.clone(), value).is_err() {
            return None;
        }
        self.ranks.insert(key);
        None
    }

    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        if !self.ranks.contains(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            let _ = self.store.get_ref(key);
            return None;
        }

        self.ranks.touch(key);
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.store.get_ref(key)
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.store.clear();
        self.ranks.clear();
    }
}

impl<K, V> LfuCacheTrait<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, Arc<V>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let result = self.evict_one();

        #[cfg(feature = "metrics")]
        if result.is_some() {
            self.metrics.record_pop_lfu_found();
        }
        result
    }

    fn peek_lfu(&self) -> Option<(&K, &Arc<V>)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_call();

        let (key, _freq) = self.ranks.peek_min()?;
        let value = self.store.peek_ref(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_found();
        Some((key, value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_frequency_call();

        let result = self.ranks.frequency(key);

        #[cfg(feature = "metrics")]
        if result.is_some() {
            (&self.metrics).record_frequency_found();
        }
        result
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            frequency_calls: self.metrics.frequency_calls.get(),
            frequency_found: self.metrics.frequency_found.get(),
            cache_len: self.store.len(),
            capacity: self.store.capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}
