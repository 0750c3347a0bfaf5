//! # Belady (Offline Optimal) Cache
//!
//! Offline optimal replacement, also known as Belady's MIN or the
//! clairvoyant policy: eviction decisions use full foreknowledge of every
//! key's future access positions, supplied up front via
//! [`load_access_pattern`](crate::traits::ClairvoyantCache::load_access_pattern).
//!
//! Because it needs the entire future to decide anything, this engine is a
//! simulator, not a usable live policy. Its purpose is the provably optimal
//! hit count for a request sequence: the upper bound online policies such
//! as [`LfuCache`](crate::policy::lfu::LfuCache) are measured against.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        BeladyCache<K, V>                         │
//!   │                                                                  │
//!   │  store: HashMapStore<K, V>        values of resident keys        │
//!   │  patterns: FxHashMap<K, AccessPattern>                           │
//!   │             per-key future schedule + retirement cursor          │
//!   │  ranks: LazyMaxHeap<K, NextUse>                                  │
//!   │             resident keys ranked by next-use; the top is the     │
//!   │             entry needed furthest in the future (the victim)     │
//!   │  clock: u64  furthest position processed so far                  │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lazy rank maintenance
//!
//! Ranks are refreshed per key, never by a global pass: a key's cursor
//! advances only when that key is touched or inspected as an eviction
//! candidate. The heap may briefly hold ranks computed against an older
//! clock; candidates are revalidated (and their entries refreshed) before
//! any eviction commits, so observable behavior matches an eager
//! implementation while eviction stays O(log n) instead of O(capacity).
//!
//! ## Admission rule
//!
//! At `position`, a new key's next-use is its first registered position
//! strictly greater than `position`; the request being processed is itself
//! consumed. Then:
//!
//! - next-use `Never` (no pattern, or schedule exhausted): never admitted,
//!   since caching it cannot produce a future hit.
//! - below capacity: admitted.
//! - at capacity: admitted only by evicting a resident whose next-use is
//!   strictly further; otherwise the insert is silently rejected.
//!
//! Ties among residents sharing the furthest next-use (including several
//! `Never`s) break deterministically toward the entry whose rank was
//! established earliest.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cachesim::policy::belady::BeladyCache;
//! use cachesim::traits::{ClairvoyantCache, ReadOnlyCache};
//!
//! // Request sequence: A B A C  (positions 0..=3)
//! let mut cache: BeladyCache<char, u32> = BeladyCache::new(1);
//! cache.load_access_pattern('A', vec![0, 2]);
//! cache.load_access_pattern('B', vec![1]);
//! cache.load_access_pattern('C', vec![3]);
//!
//! let mut hits = 0;
//! for (position, key) in ['A', 'B', 'A', 'C'].into_iter().enumerate() {
//!     if cache.get(&key, position as u64).is_some() {
//!         hits += 1;
//!     } else {
//!         cache.insert(key, Arc::new(0), position as u64);
//!     }
//! }
//!
//! // B and C are never worth caching over A; only A at position 2 hits.
//! assert_eq!(hits, 1);
//! assert!(cache.contains(&'A'));
//! ```
//!
//! ## Limitations
//!
//! - Requires the complete request sequence in advance.
//! - Positions must be replayed non-decreasingly for meaningful results;
//!   the clock never rewinds.
//! - Not thread-safe; wrap externally if shared.

use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ds::{AccessPattern, LazyMaxHeap, NextUse};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::BeladyMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    BeladyMetricsReadRecorder, BeladyMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider,
};
#[cfg(feature = "metrics")]
use crate::metrics::BeladyMetrics;
use crate::store::hashmap::HashMapStore;
use crate::store::traits::{StoreCore, StoreMut};
use crate::traits::{ClairvoyantCache, ReadOnlyCache};

// Heap entries tolerated per live key before a rebuild compacts the heap.
const MAX_RANK_STALENESS: usize = 4;

/// Offline optimal (Belady/MIN) cache simulator.
///
/// See the module docs for the admission rule and rank maintenance; values
/// are stored as `Arc<V>`.
#[derive(Debug)]
pub struct BeladyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    store: HashMapStore<K, V>,
    patterns: FxHashMap<K, AccessPattern>,
    ranks: LazyMaxHeap<K, NextUse>,
    clock: u64,
    #[cfg(feature = "metrics")]
    metrics: BeladyMetrics,
}

/// Read-only view of one resident entry, yielded by
/// [`iter_entries`](BeladyCache::iter_entries). `next_use` is computed
/// fresh against the current clock.
#[derive(Debug)]
pub struct BeladyEntryMeta<'a, K, V> {
    pub key: &'a K,
    pub value: &'a Arc<V>,
    pub next_use: NextUse,
}

impl<K, V> BeladyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a simulator holding at most `capacity` entries.
    ///
    /// Capacity 0 is honored: such a cache rejects every insert.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: HashMapStore::new(capacity),
            patterns: FxHashMap::default(),
            ranks: LazyMaxHeap::with_capacity(capacity),
            clock: 0,
            #[cfg(feature = "metrics")]
            metrics: BeladyMetrics::default(),
        }
    }

    /// Iterates resident entries with clock-fresh next-use ranks, in no
    /// defined order. Diagnostic only.
    pub fn iter_entries(&self) -> impl Iterator<Item = BeladyEntryMeta<'_, K, V>> {
        self.ranks.iter().filter_map(move |(key, _)| {
            self.store.peek_ref(key).map(|value| BeladyEntryMeta {
                key,
                value,
                next_use: self.fresh_rank_of(key),
            })
        })
    }

    /// Validates store/rank/schedule invariants.
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
        for (key, stored) in self.ranks.iter() {
            if self.store.peek_ref(key).is_none() {
                return Err(InvariantError::new("ranked key missing from store"));
            }
            let fresh = self.fresh_rank_of(key);
            // Ranks only move toward the future as the clock advances.
            if stored > fresh {
                return Err(InvariantError::new("stored rank ahead of schedule"));
            }
            if let NextUse::At(position) = fresh {
                if position <= self.clock {
                    return Err(InvariantError::new("resident rank not in the future"));
                }
            }
        }
        Ok(())
    }

    /// Clock-fresh rank without touching any cursor.
    fn fresh_rank_of(&self, key: &K) -> NextUse {
        match self.patterns.get(key) {
            Some(pattern) => pattern.next_after(self.clock),
            None => NextUse::Never,
        }
    }

    /// Retires the key's schedule through the clock and returns its rank.
    fn refresh_rank(&mut self, key: &K) -> NextUse {
        match self.patterns.get_mut(key) {
            Some(pattern) => {
                pattern.retire_through(self.clock);
                pattern.peek_next()
            }
            None => NextUse::Never,
        }
    }

    /// The resident needed furthest in the future, with a validated rank.
    ///
    /// Revalidates candidate ranks against the current clock, refreshing
    /// stale heap entries until the top is trustworthy.
    fn freshest_victim(&mut self) -> Option<(K, NextUse)> {
        loop {
            let (key, stored) = {
                let (key, stored) = self.ranks.peek_best()?;
                (key.clone(), stored)
            };
            let fresh = self.refresh_rank(&key);
            if fresh == stored {
                return Some((key, stored));
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_stale_rank_refresh();
            self.ranks.update(key, fresh);
        }
    }
}

impl<K, V> ReadOnlyCache<K, Arc<V>> for BeladyCache<K, V>
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

impl<K, V> ClairvoyantCache<K, Arc<V>> for BeladyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn load_access_pattern(&mut self, key: K, positions: Vec<u64>) {
        #[cfg(feature = "metrics")]
        self.metrics.record_pattern_load();

        let resident = self.store.contains(&key);
        self.patterns.insert(key.clone(), AccessPattern::new(positions));
        if resident {
            // Re-rank a resident key against its replacement schedule.
            let rank = self.refresh_rank(&key);
            self.ranks.update(key, rank);
        }
    }

    fn get(&mut self, key: &K, position: u64) -> Option<&Arc<V>> {
        if !self.store.contains(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            let _ = self.store.get_ref(key);
            return None;
        }

        self.clock = self.clock.max(position);
        let rank = self.refresh_rank(key);
        self.ranks.update(key.clone(), rank);
        self.ranks.maybe_rebuild(MAX_RANK_STALENESS);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.store.get_ref(key)
    }

    fn insert(&mut self, key: K, value: Arc<V>, position: u64) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.store.capacity() == 0 {
            return None;
        }
        self.clock = self.clock.max(position);

        if self.store.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            let rank = self.refresh_rank(&key);
            self.ranks.update(key.clone(), rank);
            return self.store.try_insert(key, value).ok().flatten();
        }

        // The request being processed consumes its own schedule slot; what
        // remains is the key's first genuinely future access.
        let rank = self.refresh_rank(&key);
        if rank.is_never() {
            // No future access registered: caching could never pay off.
            #[cfg(feature = "metrics")]
            self.metrics.record_rejected_insert();
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.store.len() >= self.store.capacity() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            let (victim, victim_rank) = match self.freshest_victim() {
                Some(found) => found,
                None => return None,
            };
            if rank >= victim_rank {
                // Every resident is needed at least as soon: keep them.
                #[cfg(feature = "metrics")]
                self.metrics.record_rejected_insert();
                return None;
            }
            self.ranks.remove(&victim);
            self.store.record_eviction();
            self.store.remove(&victim);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        if self.store.try_insert(key.clone(), value).is_err() {
            return None;
        }
        self.ranks.update(key, rank);
        self.ranks.maybe_rebuild(MAX_RANK_STALENESS);
        None
    }

    fn next_use(&self, key: &K) -> Option<NextUse> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_next_use_call();

        if !self.store.contains(key) {
            return None;
        }

        #[cfg(feature = "metrics")]
        (&self.metrics).record_next_use_found();
        Some(self.fresh_rank_of(key))
    }

    fn current_position(&self) -> u64 {
        self.clock
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.store.clear();
        self.patterns.clear();
        self.ranks.clear();
        self.clock = 0;
    }
}

#[cfg(feature = "metrics")]
impl<K, V> BeladyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> BeladyMetricsSnapshot {
        BeladyMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            rejected_inserts: self.metrics.rejected_inserts,
            pattern_loads: self.metrics.pattern_loads,
            stale_rank_refreshes: self.metrics.stale_rank_refreshes,
            next_use_calls: self.metrics.next_use_calls.get(),
            next_use_found: self.metrics.next_use_found.get(),
            cache_len: self.store.len(),
            capacity: self.store.capacity(),
            current_position: self.clock,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<BeladyMetricsSnapshot> for BeladyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> BeladyMetricsSnapshot {
        self.metrics_snapshot()
    }
}
