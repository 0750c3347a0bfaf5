//! Replay a request trace through the online LFU engine.
//!
//! Reads `capacity element_count key...` from stdin and prints the hit
//! count.
//!
//! ```text
//! $ echo "2 4 1 2 1 3" | lfu_replay
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
            eprintln!("lfu_replay: {err}");
            process::exit(1);
        }
    };
    println!("{}", replay::replay_lfu(&trace));
}
