//! Operation counters for the replacement engines (feature `metrics`).
//!
//! Mirrors the cache trait design by separating *recording* from
//! *snapshotting*: recorder traits only write counters, snapshot structs are
//! plain copyable data for benches and tests. Counters that must be bumped
//! from `&self` methods (peeks, rank queries) use [`cell::MetricsCell`];
//! everything else is a plain `u64` behind `&mut self`.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use cell::MetricsCell;
pub use metrics_impl::{BeladyMetrics, LfuMetrics};
pub use snapshot::{BeladyMetricsSnapshot, LfuMetricsSnapshot};
pub use traits::{
    BeladyMetricsReadRecorder, BeladyMetricsRecorder, CoreMetricsRecorder, LfuMetricsReadRecorder,
    LfuMetricsRecorder, MetricsSnapshotProvider,
};
