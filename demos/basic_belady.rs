use cachesim::replay::{self, Trace};

fn main() {
    // Capacity 2, eight requests.
    let trace: Trace = "2 8 1 2 3 1 2 4 1 2".parse().expect("valid trace");

    let report = replay::compare(&trace);
    println!("requests:    {}", report.requests);
    println!("lfu hits:    {}", report.lfu_hits);
    println!("belady hits: {}", report.belady_hits);
}

// Expected output:
// requests:    8
// lfu hits:    0
// belady hits: 4
//
// Explanation: with full foreknowledge the optimal policy keeps 1 and 2
// resident and sacrifices the one-shot keys 3 and 4; online LFU keeps
// churning through its capacity and never hits.
