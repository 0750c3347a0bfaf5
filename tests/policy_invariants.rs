// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Tests that verify library-wide behavioral consistency across both
// replacement engines. These span multiple modules and belong here rather
// than in any single source file.

use std::sync::Arc;

use cachesim::policy::belady::BeladyCache;
use cachesim::policy::lfu::LfuCache;
use cachesim::traits::{ClairvoyantCache, CoreCache, ReadOnlyCache};

// ==============================================
// Capacity-0 Behavior
// ==============================================
//
// Capacity 0 must be honored as "disabled", never coerced to 1.

mod lfu_zero_capacity {
    use super::*;

    #[test]
    fn capacity_zero_is_honored() {
        let cache: LfuCache<&str, i32> = LfuCache::new(0);
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn capacity_zero_rejects_inserts() {
        let mut cache: LfuCache<&str, i32> = LfuCache::new(0);
        cache.insert("key", Arc::new(42));
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }
}

mod belady_zero_capacity {
    use super::*;

    #[test]
    fn capacity_zero_is_honored() {
        let cache: BeladyCache<&str, i32> = BeladyCache::new(0);
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn capacity_zero_rejects_inserts() {
        let mut cache: BeladyCache<&str, i32> = BeladyCache::new(0);
        cache.load_access_pattern("key", vec![0, 1, 2]);
        cache.insert("key", Arc::new(42), 0);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }
}

// ==============================================
// Size Bound Under Churn
// ==============================================
//
// len() never exceeds capacity(), whatever the workload does.

#[test]
fn lfu_len_never_exceeds_capacity() {
    for capacity in [1usize, 2, 3, 7] {
        let mut cache: LfuCache<u64, u64> = LfuCache::new(capacity);
        for round in 0..200u64 {
            let key = round % 11;
            if cache.get(&key).is_none() {
                cache.insert(key, Arc::new(key));
            }
            assert!(cache.len() <= cache.capacity());
            cache.check_invariants().unwrap();
        }
    }
}

#[test]
fn belady_len_never_exceeds_capacity() {
    let keys: Vec<u64> = (0..200u64).map(|round| (round * 7) % 11).collect();
    for capacity in [1usize, 2, 3, 7] {
        let mut cache: BeladyCache<u64, u64> = BeladyCache::new(capacity);
        for key in 0..11u64 {
            let positions: Vec<u64> = keys
                .iter()
                .enumerate()
                .filter(|(_, &k)| k == key)
                .map(|(position, _)| position as u64)
                .collect();
            cache.load_access_pattern(key, positions);
        }
        for (position, &key) in keys.iter().enumerate() {
            let position = position as u64;
            if cache.get(&key, position).is_none() {
                cache.insert(key, Arc::new(key), position);
            }
            assert!(cache.len() <= cache.capacity());
            cache.check_invariants().unwrap();
        }
    }
}

// ==============================================
// contains() Idempotence
// ==============================================
//
// Membership probes must never change ranking state or future behavior.

#[test]
fn lfu_contains_has_no_side_effects() {
    let mut cache: LfuCache<&str, i32> = LfuCache::new(2);
    cache.insert("a", Arc::new(1));
    cache.insert("b", Arc::new(2));
    cache.get(&"b"); // "a" is the victim

    for _ in 0..100 {
        assert!(cache.contains(&"a"));
    }

    // Probing "a" 100 times must not have promoted it.
    cache.insert("c", Arc::new(3));
    assert!(!cache.contains(&"a"));
    assert!(cache.contains(&"b"));
}

#[test]
fn belady_contains_has_no_side_effects() {
    use cachesim::ds::NextUse;

    let mut cache: BeladyCache<&str, i32> = BeladyCache::new(1);
    cache.load_access_pattern("a", vec![0, 5]);
    cache.insert("a", Arc::new(1), 0);

    for _ in 0..100 {
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"z"));
    }

    // Neither the clock nor the rank moved.
    assert_eq!(cache.current_position(), 0);
    assert_eq!(cache.next_use(&"a"), Some(NextUse::At(5)));
}
