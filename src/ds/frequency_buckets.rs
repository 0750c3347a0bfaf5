//! Frequency buckets for O(1) LFU tracking.
//!
//! Tracks per-key access frequencies for LFU eviction with O(1) insert,
//! promote, remove, and victim selection. Keys sharing a frequency live in a
//! doubly-linked bucket ordered by promotion recency; the buckets themselves
//! are doubly linked in ascending frequency order so the minimum frequency is
//! maintained incrementally, never by scanning.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  index: FxHashMap<K, SlotId>      entries: SlotArena<Entry<K>>     │
//! │                                                                    │
//! │  min_freq = 1                                                      │
//! │      │                                                             │
//! │      ▼                                                             │
//! │  freq=1: head ─► [c] ◄─► [a] ◄─ tail     (tail = promoted longest  │
//! │      ▲                                    ago, evicted first)      │
//! │      │ prev/next bucket links                                      │
//! │      ▼                                                             │
//! │  freq=3: head ─► [b] ◄─ tail                                       │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Promotion removes the key from its bucket (dropping the bucket and
//! splicing its neighbors when it empties), pushes it onto the head of the
//! next-frequency bucket, and nudges `min_freq` along the bucket links.
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                        |
//! |-------------|------|----------------------------------------------|
//! | `insert`    | O(1) | new key starts at frequency 1, `min_freq`=1  |
//! | `touch`     | O(1) | frequency +1, head of the new bucket         |
//! | `pop_min`   | O(1) | tail of the minimum bucket                   |
//! | `remove`    | O(1) | arbitrary key removal                        |
//! | `frequency` | O(1) | current count for a key                      |
//!
//! ## Example
//!
//! ```
//! use cachesim::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("a");
//! freq.insert("b");
//! freq.touch(&"a"); // "a" now at frequency 2
//!
//! // "b" is the victim: lowest frequency, promoted longest ago.
//! assert_eq!(freq.pop_min(), Some(("b", 1)));
//! assert_eq!(freq.pop_min(), Some(("a", 2)));
//! assert_eq!(freq.pop_min(), None);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Entry<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
}

#[derive(Debug)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// O(1) LFU metadata tracker with least-recently-promoted tie-breaking.
///
/// Within a bucket the head is the most recently promoted key and the tail
/// is the eviction candidate. `min_freq` is 0 only when the tracker is
/// empty; externally it is reported as `Option<u64>`.
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    min_freq: u64,
}

/// Read-only view of one tracked key, yielded by
/// [`iter_entries`](FrequencyBuckets::iter_entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntryMeta<'a, K> {
    pub key: &'a K,
    pub freq: u64,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Creates an empty tracker with reserved entry/index capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is tracked.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Current frequency for `key`, if tracked.
    ///
    /// # Example
    ///
    /// ```
    /// use cachesim::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("key");
    /// freq.touch(&"key");
    /// assert_eq!(freq.frequency(&"key"), Some(2));
    /// assert_eq!(freq.frequency(&"missing"), None);
    /// ```
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Smallest frequency with a live bucket, or `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        if self.min_freq == 0 {
            None
        } else {
            Some(self.min_freq)
        }
    }

    /// Peeks the eviction candidate `(key, freq)` without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        if self.min_freq == 0 {
            return None;
        }
        let id = self.buckets.get(&self.min_freq)?.tail?;
        self.entries.get(id).map(|entry| (&entry.key, entry.freq))
    }

    /// Starts tracking a new key at frequency 1.
    ///
    /// Returns `false` (and changes nothing) if the key is already tracked.
    /// The key lands at the head of bucket 1 and `min_freq` resets to 1.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            key: key.clone(),
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&1) {
            let next = self.min_freq();
            self.link_bucket(1, None, next);
        }
        self.push_front(1, id);
        self.min_freq = 1;
        true
    }

    /// Promotes `key` by one frequency step; returns the new frequency.
    ///
    /// The key moves to the head of its new bucket (most recently promoted).
    /// If the old bucket empties and held the minimum, `min_freq` follows
    /// the bucket link forward. Returns `None` for untracked keys.
    ///
    /// # Example
    ///
    /// ```
    /// use cachesim::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("key");
    /// assert_eq!(freq.touch(&"key"), Some(2));
    /// assert_eq!(freq.touch(&"key"), Some(3));
    /// assert_eq!(freq.min_freq(), Some(3));
    /// assert_eq!(freq.touch(&"missing"), None);
    /// ```
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let freq = self.entries.get(id)?.freq;

        if freq == u64::MAX {
            // Saturated: just refresh recency within the bucket.
            self.unlink(freq, id);
            self.push_front(freq, id);
            return Some(freq);
        }
        let next_freq = freq + 1;

        let (bucket_prev, bucket_next) = {
            let bucket = self.buckets.get(&freq)?;
            (bucket.prev, bucket.next)
        };

        self.unlink(freq, id);
        let emptied = self.bucket_is_empty(freq);
        if emptied {
            self.unlink_bucket(freq);
            if self.min_freq == freq {
                self.min_freq = bucket_next.unwrap_or(0);
            }
        }

        if !self.buckets.contains_key(&next_freq) {
            let prev = if emptied { bucket_prev } else { Some(freq) };
            self.link_bucket(next_freq, prev, bucket_next);
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.push_front(next_freq, id);
        if self.min_freq == 0 || next_freq < self.min_freq {
            self.min_freq = next_freq;
        }

        Some(next_freq)
    }

    /// Stops tracking `key`; returns its last frequency.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = self.index.remove(key)?;
        let freq = self.entries.get(id)?.freq;
        let bucket_next = self.buckets.get(&freq)?.next;

        self.unlink(freq, id);
        if self.bucket_is_empty(freq) {
            self.unlink_bucket(freq);
            if self.min_freq == freq {
                self.min_freq = bucket_next.unwrap_or(0);
            }
        }
        self.entries.remove(id).map(|entry| entry.freq)
    }

    /// Removes and returns the eviction candidate `(key, freq)`.
    ///
    /// The candidate is the tail of the minimum-frequency bucket: among all
    /// least-frequent keys, the one promoted longest ago.
    ///
    /// # Example
    ///
    /// ```
    /// use cachesim::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("a");
    /// freq.insert("b");
    /// freq.insert("c");
    /// freq.touch(&"a");
    ///
    /// // Same frequency: the earliest-promoted key leaves first.
    /// assert_eq!(freq.pop_min(), Some(("b", 1)));
    /// assert_eq!(freq.pop_min(), Some(("c", 1)));
    /// assert_eq!(freq.pop_min(), Some(("a", 2)));
    /// ```
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        if self.min_freq == 0 {
            return None;
        }
        let freq = self.min_freq;
        let id = self.buckets.get(&freq)?.tail?;
        let bucket_next = self.buckets.get(&freq)?.next;

        self.unlink(freq, id);
        if self.bucket_is_empty(freq) {
            self.unlink_bucket(freq);
            self.min_freq = bucket_next.unwrap_or(0);
        }

        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.freq))
    }

    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Iterates all tracked keys with their frequencies, in no defined order.
    pub fn iter_entries(&self) -> impl Iterator<Item = FrequencyEntryMeta<'_, K>> {
        self.entries.iter().map(|(_, entry)| FrequencyEntryMeta {
            key: &entry.key,
            freq: entry.freq,
        })
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .map(|bucket| bucket.head.is_none())
            .unwrap_or(true)
    }

    fn link_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );
        if let Some(prev) = prev {
            if let Some(bucket) = self.buckets.get_mut(&prev) {
                bucket.next = Some(freq);
            }
        }
        if let Some(next) = next {
            if let Some(bucket) = self.buckets.get_mut(&next) {
                bucket.prev = Some(freq);
            }
        }
    }

    fn unlink_bucket(&mut self, freq: u64) {
        let (prev, next) = match self.buckets.remove(&freq) {
            Some(bucket) => (bucket.prev, bucket.next),
            None => return,
        };
        if let Some(prev) = prev {
            if let Some(bucket) = self.buckets.get_mut(&prev) {
                bucket.next = next;
            }
        }
        if let Some(next) = next {
            if let Some(bucket) = self.buckets.get_mut(&next) {
                bucket.prev = prev;
            }
        }
    }

    fn push_front(&mut self, freq: u64, id: SlotId) {
        let bucket = self.buckets.get_mut(&freq).expect("bucket missing");
        let old_head = bucket.head;
        bucket.head = Some(id);
        if old_head.is_none() {
            bucket.tail = Some(id);
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(old_head) = old_head {
            if let Some(entry) = self.entries.get_mut(old_head) {
                entry.prev = Some(id);
            }
        }
    }

    fn unlink(&mut self, freq: u64, id: SlotId) {
        let (prev, next) = match self.entries.get(id) {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };
        match prev {
            Some(prev) => {
                if let Some(entry) = self.entries.get_mut(prev) {
                    entry.next = next;
                }
            }
            None => {
                if let Some(bucket) = self.buckets.get_mut(&freq) {
                    bucket.head = next;
                }
            }
        }
        match next {
            Some(next) => {
                if let Some(entry) = self.entries.get_mut(next) {
                    entry.prev = prev;
                }
            }
            None => {
                if let Some(bucket) = self.buckets.get_mut(&freq) {
                    bucket.tail = prev;
                }
            }
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.len(), self.index.len());

        if self.is_empty() {
            assert!(self.buckets.is_empty());
            assert_eq!(self.min_freq, 0);
            return;
        }

        assert!(self.min_freq > 0);
        assert!(self.buckets.contains_key(&self.min_freq));

        for (&freq, bucket) in &self.buckets {
            assert!(bucket.head.is_some());
            assert!(bucket.tail.is_some());
            if let Some(prev) = bucket.prev {
                assert!(prev < freq);
                assert!(self.buckets.contains_key(&prev));
                assert_eq!(self.buckets[&prev].next, Some(freq));
            } else {
                assert_eq!(self.min_freq, freq);
            }
            if let Some(next) = bucket.next {
                assert!(next > freq);
                assert!(self.buckets.contains_key(&next));
                assert_eq!(self.buckets[&next].prev, Some(freq));
            }

            let mut current = bucket.head;
            let mut last = None;
            while let Some(id) = current {
                let entry = self.entries.get(id).expect("bucket entry missing");
                assert_eq!(entry.freq, freq);
                assert_eq!(entry.prev, last);
                assert_eq!(self.index.get(&entry.key), Some(&id));
                last = Some(id);
                current = entry.next;
            }
            assert_eq!(bucket.tail, last);
        }
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
