//! Error types for the cachesim library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: returned when internal data-structure invariants are
//!   violated (test/debug-only `check_invariants` methods).
//! - [`TraceError`]: returned by the replay harness when a request trace
//!   cannot be read or parsed. The engines themselves never read external
//!   input and have no failure mode tied to it.

use std::fmt;
use std::io;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on the engines (e.g.
/// [`LfuCache::check_invariants`](crate::policy::lfu::LfuCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// TraceError
// ---------------------------------------------------------------------------

/// Error returned when a request trace cannot be read or parsed.
///
/// # Example
///
/// ```
/// use cachesim::replay::Trace;
///
/// let err = "2 three".parse::<Trace>().unwrap_err();
/// assert!(err.to_string().contains("three"));
/// ```
#[derive(Debug)]
pub enum TraceError {
    /// The underlying reader failed.
    Io(io::Error),
    /// A token could not be parsed as a number.
    Parse { what: &'static str, token: String },
    /// The stream ended before the announced element count was read.
    Truncated { expected: usize, found: usize },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Io(err) => write!(f, "trace read failed: {err}"),
            TraceError::Parse { what, token } => {
                write!(f, "invalid {what}: {token:?}")
            }
            TraceError::Truncated { expected, found } => {
                write!(f, "trace truncated: expected {expected} keys, found {found}")
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TraceError {
    fn from(err: io::Error) -> Self {
        TraceError::Io(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
