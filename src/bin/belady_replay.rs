//! Replay a request trace through the offline-optimal engine.
//!
//! Reads `capacity element_count key...` from stdin, pre-scans the keys into
//! per-key access patterns, and prints the optimal hit count: the upper
//! bound for any replacement policy on this trace.
//!
//! ```text
//! $ echo "1 4 1 2 1 3" | belady_replay
//! 1
//! ```

use std::io;
use std::process;

use cachesim::replay::{self, Trace};

fn main() {
    let stdin = io::stdin();
    let trace = match Trace::from_reader(stdin.lock()) {
        Ok(trace) => trace,
        Err(err) => {
            eprintln!("belady_replay: {err}");
            process::exit(1);
        }
    };
    println!("{}", replay::replay_belady(&trace));
}
