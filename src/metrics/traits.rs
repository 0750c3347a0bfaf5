//! Recorder and snapshot traits for engine metrics.
//!
//! Recorders only write counters; [`MetricsSnapshotProvider`] only reads.
//! Policy-specific recorders extend [`CoreMetricsRecorder`] with their own
//! signals, and each gets a read-only sibling for `&self` operations.

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LFU behavior (frequency order).
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
}

/// Read-only LFU metrics for `&self` methods (uses interior mutability).
pub trait LfuMetricsReadRecorder {
    fn record_peek_lfu_call(&self);
    fn record_peek_lfu_found(&self);
    fn record_frequency_call(&self);
    fn record_frequency_found(&self);
}

/// Metrics for offline-optimal behavior (next-use order).
pub trait BeladyMetricsRecorder: CoreMetricsRecorder {
    fn record_pattern_load(&mut self);
    fn record_rejected_insert(&mut self);
    fn record_stale_rank_refresh(&mut self);
}

/// Read-only offline-optimal metrics for `&self` methods.
pub trait BeladyMetricsReadRecorder {
    fn record_next_use_call(&self);
    fn record_next_use_found(&self);
}

/// Uniform access to a policy's metrics snapshot (bench/test consumption).
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
