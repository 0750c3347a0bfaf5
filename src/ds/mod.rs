pub mod access_pattern;
pub mod frequency_buckets;
pub mod lazy_heap;
pub mod slot_arena;

pub use access_pattern::{AccessPattern, NextUse};
pub use frequency_buckets::{FrequencyBuckets, FrequencyEntryMeta};
pub use lazy_heap::LazyMaxHeap;
pub use slot_arena::{SlotArena, SlotId};
