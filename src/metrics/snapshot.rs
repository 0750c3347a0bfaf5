//! Copyable snapshot structs captured from engine counters.

/// Point-in-time counters for an [`LfuCache`](crate::policy::lfu::LfuCache).
#[derive(Debug, Default, Clone, Copy)]
pub struct LfuMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: u64,
    pub peek_lfu_found: u64,
    pub frequency_calls: u64,
    pub frequency_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

/// Point-in-time counters for a [`BeladyCache`](crate::policy::belady::BeladyCache).
#[derive(Debug, Default, Clone, Copy)]
pub struct BeladyMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub rejected_inserts: u64,

    pub pattern_loads: u64,
    pub stale_rank_refreshes: u64,
    pub next_use_calls: u64,
    pub next_use_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
    pub current_position: u64,
}
