//! Counter structs backing the recorder traits.

use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    BeladyMetricsReadRecorder, BeladyMetricsRecorder, CoreMetricsRecorder, LfuMetricsReadRecorder,
    LfuMetricsRecorder,
};

/// Counters for [`LfuCache`](crate::policy::lfu::LfuCache).
///
/// Peek/frequency counters are [`MetricsCell`]s because those operations
/// take `&self`.
#[derive(Debug, Default)]
pub struct LfuMetrics {
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
    pub peek_lfu_calls: MetricsCell,
    pub peek_lfu_found: MetricsCell,
    pub frequency_calls: MetricsCell,
    pub frequency_found: MetricsCell,
}

impl CoreMetricsRecorder for LfuMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {}
}

impl LfuMetricsRecorder for LfuMetrics {
    fn record_pop_lfu_call(&mut self) {
        self.pop_lfu_calls += 1;
    }

    fn record_pop_lfu_found(&mut self) {
        self.pop_lfu_found += 1;
    }
}

impl LfuMetricsReadRecorder for &LfuMetrics {
    fn record_peek_lfu_call(&self) {
        self.peek_lfu_calls.incr();
    }

    fn record_peek_lfu_found(&self) {
        self.peek_lfu_found.incr();
    }

    fn record_frequency_call(&self) {
        self.frequency_calls.incr();
    }

    fn record_frequency_found(&self) {
        self.frequency_found.incr();
    }
}

/// Counters for [`BeladyCache`](crate::policy::belady::BeladyCache).
#[derive(Debug, Default)]
pub struct BeladyMetrics {
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
    pub next_use_calls: MetricsCell,
    pub next_use_found: MetricsCell,
}

impl CoreMetricsRecorder for BeladyMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {}
}

impl BeladyMetricsRecorder for BeladyMetrics {
    fn record_pattern_load(&mut self) {
        self.pattern_loads += 1;
    }

    fn record_rejected_insert(&mut self) {
        self.rejected_inserts += 1;
    }

    fn record_stale_rank_refresh(&mut self) {
        self.stale_rank_refreshes += 1;
    }
}

impl BeladyMetricsReadRecorder for &BeladyMetrics {
    fn record_next_use_call(&self) {
        self.next_use_calls.incr();
    }

    fn record_next_use_found(&self) {
        self.next_use_found.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lfu_recorders_accumulate() {
        let mut metrics = LfuMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_insert_call();
        metrics.record_insert_new();
        metrics.record_pop_lfu_call();
        (&metrics).record_peek_lfu_call();
        (&metrics).record_frequency_call();

        assert_eq!(metrics.get_calls, 2);
        assert_eq!(metrics.get_hits, 1);
        assert_eq!(metrics.get_misses, 1);
        assert_eq!(metrics.insert_calls, 1);
        assert_eq!(metrics.pop_lfu_calls, 1);
        assert_eq!(metrics.peek_lfu_calls.get(), 1);
        assert_eq!(metrics.frequency_calls.get(), 1);
    }

    #[test]
    fn belady_recorders_accumulate() {
        let mut metrics = BeladyMetrics::default();
        metrics.record_pattern_load();
        metrics.record_rejected_insert();
        metrics.record_stale_rank_refresh();
        (&metrics).record_next_use_call();
        (&metrics).record_next_use_found();

        assert_eq!(metrics.pattern_loads, 1);
        assert_eq!(metrics.rejected_inserts, 1);
        assert_eq!(metrics.stale_rank_refreshes, 1);
        assert_eq!(metrics.next_use_calls.get(), 1);
        assert_eq!(metrics.next_use_found.get(), 1);
    }
}
