//! # Cache Trait Hierarchy
//!
//! Defines the trait hierarchy shared by the replacement engines, giving each
//! policy exactly the operation set its semantics support.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────────────────────────┐
//!                  │         ReadOnlyCache<K, V>          │
//!                  │                                      │
//!                  │  contains(&, &K) → bool              │
//!                  │  len(&) → usize                      │
//!                  │  is_empty(&) → bool                  │
//!                  │  capacity(&) → usize                 │
//!                  └──────────────┬───────────────────────┘
//!                                 │
//!              ┌──────────────────┴──────────────────┐
//!              ▼                                     ▼
//!  ┌───────────────────────────┐       ┌────────────────────────────────┐
//!  │     CoreCache<K, V>       │       │     ClairvoyantCache<K, V>     │
//!  │                           │       │                                │
//!  │  insert(&mut, K, V)       │       │  load_access_pattern(&mut,..)  │
//!  │  get(&mut, &K) → &V       │       │  get(&mut, &K, position)       │
//!  │  clear(&mut)              │       │  insert(&mut, K, V, position)  │
//!  └─────────────┬─────────────┘       │  next_use(&, &K)               │
//!                │                     │  current_position(&) → u64     │
//!                ▼                     │  clear(&mut)                   │
//!  ┌───────────────────────────┐       └────────────────────────────────┘
//!  │    LfuCacheTrait<K, V>    │
//!  │                           │
//!  │  pop_lfu() → (K, V)       │
//!  │  peek_lfu() → (&K, &V)    │
//!  │  frequency(&K) → u64      │
//!  └───────────────────────────┘
//! ```
//!
//! ## Design Rule
//!
//! A policy only exposes operations that fit its semantics. The offline
//! engine cannot answer a position-less `get`: every ranking decision
//! depends on where in the request sequence the call happens, so
//! [`ClairvoyantCache`] extends [`ReadOnlyCache`] directly instead of
//! pretending to be a [`CoreCache`]. This mirrors the split between online
//! policies (past-only information) and the offline simulator (full future
//! knowledge).

use crate::ds::NextUse;

/// Side-effect-free cache queries shared by every policy.
///
/// `contains` in particular must not touch any ranking state: callers probe
/// membership without promoting, demoting, or retiring anything.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachesim::policy::lfu::LfuCache;
/// use cachesim::traits::{CoreCache, ReadOnlyCache};
///
/// let mut cache: LfuCache<u64, &str> = LfuCache::new(8);
/// cache.insert(1, Arc::new("one"));
///
/// assert!(cache.contains(&1));
/// assert!(!cache.contains(&2));
/// assert_eq!(cache.len(), 1);
/// assert_eq!(cache.capacity(), 8);
/// ```
pub trait ReadOnlyCache<K, V> {
    /// Checks membership without updating any access state.
    fn contains(&self, key: &K) -> bool;

    /// Current number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if no entries are resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries; 0 disables insertion entirely.
    fn capacity(&self) -> usize;
}

/// Online cache operations: decisions from past observations only.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachesim::policy::lfu::LfuCache;
/// use cachesim::traits::{CoreCache, ReadOnlyCache};
///
/// let mut cache: LfuCache<u64, i32> = LfuCache::new(2);
/// assert_eq!(cache.insert(1, Arc::new(10)), None);
/// assert_eq!(cache.get(&1).map(|v| **v), Some(10));
/// assert_eq!(cache.get(&9), None);
///
/// cache.clear();
/// assert!(cache.is_empty());
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key was
    /// resident. May evict according to the policy; may be a no-op when
    /// `capacity() == 0`.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Fetches a value, updating the policy's ranking state on a hit.
    /// A miss has no side effect beyond counters.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes all entries and ranking state.
    fn clear(&mut self);
}

/// Frequency-ranked operations for LFU policies.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachesim::policy::lfu::LfuCache;
/// use cachesim::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache: LfuCache<&str, i32> = LfuCache::new(4);
/// cache.insert("a", Arc::new(1));
/// cache.insert("b", Arc::new(2));
/// cache.get(&"b");
///
/// assert_eq!(cache.frequency(&"a"), Some(1));
/// assert_eq!(cache.frequency(&"b"), Some(2));
///
/// // "a" is the current victim: lowest frequency.
/// assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some("a"));
/// let (victim, _) = cache.pop_lfu().unwrap();
/// assert_eq!(victim, "a");
/// ```
pub trait LfuCacheTrait<K, V>: CoreCache<K, V> {
    /// Removes and returns the least-frequently-used entry (ties broken
    /// toward the entry promoted longest ago).
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks the current eviction victim without removing or promoting it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Access frequency for a resident key.
    fn frequency(&self, key: &K) -> Option<u64>;
}

/// Offline-optimal cache operations: decisions from full future knowledge.
///
/// Every state-changing call carries the logical position of the request
/// being processed; the engine advances its clock to that position and
/// retires future-access schedule entries accordingly.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachesim::policy::belady::BeladyCache;
/// use cachesim::ds::NextUse;
/// use cachesim::traits::{ClairvoyantCache, ReadOnlyCache};
///
/// let mut cache: BeladyCache<&str, i32> = BeladyCache::new(1);
/// cache.load_access_pattern("a", vec![0, 2]);
/// cache.load_access_pattern("b", vec![1]);
///
/// cache.insert("a", Arc::new(1), 0);
/// assert_eq!(cache.next_use(&"a"), Some(NextUse::At(2)));
///
/// // "b" is never needed again after position 1; "a" is needed at 2.
/// // Caching "b" could not beat keeping "a", so it is rejected.
/// cache.insert("b", Arc::new(2), 1);
/// assert!(cache.contains(&"a"));
/// assert!(!cache.contains(&"b"));
/// ```
pub trait ClairvoyantCache<K, V>: ReadOnlyCache<K, V> {
    /// Registers the complete ascending sequence of future positions at
    /// which `key` will be requested. Keys without a registered pattern are
    /// treated as never accessed again.
    fn load_access_pattern(&mut self, key: K, positions: Vec<u64>);

    /// Membership lookup at `position`. On a hit, advances the clock and
    /// refreshes the key's next-use rank; a miss changes nothing (the caller
    /// is expected to follow up with [`insert`](Self::insert)).
    fn get(&mut self, key: &K, position: u64) -> Option<&V>;

    /// Inserts at `position`, advancing the clock. The entry is admitted
    /// only when optimal replacement profits from caching it; otherwise the
    /// insert is silently rejected.
    fn insert(&mut self, key: K, value: V, position: u64) -> Option<V>;

    /// Rank of a resident key's nearest future access, relative to the
    /// current clock. Side-effect free and never stale.
    fn next_use(&self, key: &K) -> Option<NextUse>;

    /// The logical clock: the furthest position processed so far.
    fn current_position(&self) -> u64;

    /// Removes all entries, schedules, and clock state.
    fn clear(&mut self);
}
