//! Convenience re-exports for typical use.
//!
//! ```
//! use cachesim::prelude::*;
//! use std::sync::Arc;
//!
//! let mut cache: LfuCache<u64, u64> = LfuCache::new(16);
//! cache.insert(1, Arc::new(1));
//! assert!(cache.contains(&1));
//! ```

pub use crate::ds::{AccessPattern, FrequencyBuckets, LazyMaxHeap, NextUse};
pub use crate::error::{InvariantError, TraceError};
pub use crate::policy::belady::BeladyCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::replay::{ReplayReport, Trace};
pub use crate::traits::{ClairvoyantCache, CoreCache, LfuCacheTrait, ReadOnlyCache};

#[cfg(feature = "metrics")]
pub use crate::metrics::{BeladyMetricsSnapshot, LfuMetricsSnapshot, MetricsSnapshotProvider};
