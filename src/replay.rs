//! Trace replay: feed a request sequence through an engine, count hits.
//!
//! A trace is whitespace-separated integers: `capacity element_count key...`.
//! Replay walks the keys in order, calling `get` first and `insert` on a
//! miss (the key doubles as its own value), and reports the number of hits.
//!
//! For the offline engine the trace is pre-scanned once to build each key's
//! future-access position list before the replay starts; this is the only
//! place the "full foreknowledge" the Belady policy requires comes from.
//!
//! ## Example
//!
//! ```
//! use cachesim::replay::{self, Trace};
//!
//! // Capacity 2, four requests: 1 2 1 3
//! let trace: Trace = "2 4  1 2 1 3".parse().unwrap();
//! assert_eq!(replay::replay_lfu(&trace), 1);
//! assert_eq!(replay::replay_belady(&trace), 1);
//! ```

use std::io::BufRead;
use std::str::FromStr;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::TraceError;
use crate::policy::belady::BeladyCache;
use crate::policy::lfu::LfuCache;
use crate::traits::{ClairvoyantCache, CoreCache};

/// A parsed request trace: cache capacity plus the requested keys in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub capacity: usize,
    pub keys: Vec<i64>,
}

impl Trace {
    /// Reads a trace from a buffered reader.
    ///
    /// Tokens may be split across lines arbitrarily; the element count from
    /// the header decides how many keys are read.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TraceError> {
        let mut tokens = Vec::new();
        for line in reader.lines() {
            let line = line?;
            tokens.extend(line.split_whitespace().map(str::to_owned));
        }
        Self::from_tokens(&tokens)
    }

    /// Pre-scans the trace into per-key ascending access-position lists.
    ///
    /// This is the access-pattern input the offline engine needs up front.
    pub fn access_patterns(&self) -> FxHashMap<i64, Vec<u64>> {
        let mut patterns: FxHashMap<i64, Vec<u64>> = FxHashMap::default();
        for (position, &key) in self.keys.iter().enumerate() {
            patterns.entry(key).or_default().push(position as u64);
        }
        patterns
    }

    fn from_tokens(tokens: &[String]) -> Result<Self, TraceError> {
        let mut iter = tokens.iter();

        let capacity = match iter.next() {
            Some(token) => parse_token(token, "capacity")?,
            None => {
                return Err(TraceError::Truncated {
                    expected: 2,
                    found: 0,
                })
            }
        };
        let count: usize = match iter.next() {
            Some(token) => parse_token(token, "element count")?,
            None => {
                return Err(TraceError::Truncated {
                    expected: 2,
                    found: 1,
                })
            }
        };

        let mut keys = Vec::with_capacity(count);
        for token in iter.take(count) {
            keys.push(parse_token(token, "key")?);
        }
        if keys.len() < count {
            return Err(TraceError::Truncated {
                expected: count,
                found: keys.len(),
            });
        }
        Ok(Trace { capacity, keys })
    }
}

impl FromStr for Trace {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<String> = s.split_whitespace().map(str::to_owned).collect();
        Self::from_tokens(&tokens)
    }
}

fn parse_token<T: FromStr>(token: &str, what: &'static str) -> Result<T, TraceError> {
    token.parse().map_err(|_| TraceError::Parse {
        what,
        token: token.to_owned(),
    })
}

/// Hit counts from replaying one trace through both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    pub requests: usize,
    pub lfu_hits: u64,
    pub belady_hits: u64,
}

/// Replays the trace through an [`LfuCache`]; returns the hit count.
pub fn replay_lfu(trace: &Trace) -> u64 {
    let mut cache: LfuCache<i64, i64> = LfuCache::new(trace.capacity);
    let mut hits = 0;
    for &key in &trace.keys {
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            cache.insert(key, Arc::new(key));
        }
    }
    hits
}

/// Replays the trace through a [`BeladyCache`]; returns the optimal hit
/// count.
///
/// The trace is pre-scanned once so every key's future positions are loaded
/// before the first request is replayed.
pub fn replay_belady(trace: &Trace) -> u64 {
    let mut cache: BeladyCache<i64, i64> = BeladyCache::new(trace.capacity);
    for (key, positions) in trace.access_patterns() {
        cache.load_access_pattern(key, positions);
    }

    let mut hits = 0;
    for (position, &key) in trace.keys.iter().enumerate() {
        let position = position as u64;
        if cache.get(&key, position).is_some() {
            hits += 1;
        } else {
            cache.insert(key, Arc::new(key), position);
        }
    }
    hits
}

/// Replays the trace through both engines for side-by-side comparison.
///
/// The Belady count is the offline-optimal upper bound for the trace.
pub fn compare(trace: &Trace) -> ReplayReport {
    ReplayReport {
        requests: trace.keys.len(),
        lfu_hits: replay_lfu(trace),
        belady_hits: replay_belady(trace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_keys() {
        let trace: Trace = "3 5 10 20 10 30 10".parse().unwrap();
        assert_eq!(trace.capacity, 3);
        assert_eq!(trace.keys, vec![10, 20, 10, 30, 10]);
    }

    #[test]
    fn parses_across_lines_and_ignores_trailing_tokens() {
        let input = "2 3\n7\n8 7 999";
        let trace = Trace::from_reader(input.as_bytes()).unwrap();
        assert_eq!(trace.capacity, 2);
        // Only the announced three keys are consumed.
        assert_eq!(trace.keys, vec![7, 8, 7]);
    }

    #[test]
    fn rejects_bad_tokens() {
        assert!(matches!(
            "x 1 5".parse::<Trace>(),
            Err(TraceError::Parse { what: "capacity", .. })
        ));
        assert!(matches!(
            "2 two".parse::<Trace>(),
            Err(TraceError::Parse {
                what: "element count",
                ..
            })
        ));
        assert!(matches!(
            "2 1 abc".parse::<Trace>(),
            Err(TraceError::Parse { what: "key", .. })
        ));
    }

    #[test]
    fn rejects_truncated_streams() {
        assert!(matches!("".parse::<Trace>(), Err(TraceError::Truncated { .. })));
        assert!(matches!("4".parse::<Trace>(), Err(TraceError::Truncated { .. })));
        assert!(matches!(
            "2 5 1 2".parse::<Trace>(),
            Err(TraceError::Truncated {
                expected: 5,
                found: 2
            })
        ));
    }

    #[test]
    fn access_patterns_are_ascending_and_complete() {
        let trace: Trace = "2 5 1 2 1 3 1".parse().unwrap();
        let patterns = trace.access_patterns();
        assert_eq!(patterns[&1], vec![0, 2, 4]);
        assert_eq!(patterns[&2], vec![1]);
        assert_eq!(patterns[&3], vec![3]);
    }

    #[test]
    fn lfu_replay_counts_hits() {
        // a b a c: "a" hits once, "c" evicts "b".
        let trace: Trace = "2 4 1 2 1 3".parse().unwrap();
        assert_eq!(replay_lfu(&trace), 1);
    }

    #[test]
    fn belady_replay_matches_hand_computed_optimum() {
        // The canonical single-slot sequence.
        let trace: Trace = "1 4 1 2 1 3".parse().unwrap();
        assert_eq!(replay_belady(&trace), 1);
    }

    #[test]
    fn belady_never_loses_to_lfu() {
        let traces = [
            "1 4 1 2 1 3",
            "2 8 1 2 3 1 2 4 1 2",
            "3 10 5 4 5 3 5 2 5 1 5 4",
            "2 6 9 9 9 9 9 9",
        ];
        for input in traces {
            let report = compare(&input.parse().unwrap());
            assert!(
                report.belady_hits >= report.lfu_hits,
                "belady {} < lfu {} on {input:?}",
                report.belady_hits,
                report.lfu_hits
            );
        }
    }

    #[test]
    fn repeated_single_key_hits_every_time_after_first() {
        let trace: Trace = "1 5 42 42 42 42 42".parse().unwrap();
        let report = compare(&trace);
        assert_eq!(report.requests, 5);
        assert_eq!(report.lfu_hits, 4);
        assert_eq!(report.belady_hits, 4);
    }

    #[test]
    fn zero_capacity_never_hits() {
        let trace: Trace = "0 4 1 1 1 1".parse().unwrap();
        let report = compare(&trace);
        assert_eq!(report.lfu_hits, 0);
        assert_eq!(report.belady_hits, 0);
    }
}
