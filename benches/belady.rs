use cachesim::replay::{self, Trace};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn uniform_trace(capacity: usize, requests: usize, key_space: u64, seed: u64) -> Trace {
    let mut rng = StdRng::seed_from_u64(seed);
    Trace {
        capacity,
        keys: (0..requests)
            .map(|_| rng.random_range(0..key_space) as i64)
            .collect(),
    }
}

fn bench_belady_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("belady");
    let requests = 8192usize;
    group.throughput(Throughput::Elements(requests as u64));
    group.bench_function("replay_uniform", |b| {
        b.iter_batched(
            || uniform_trace(256, requests, 1024, 7),
            |trace| std::hint::black_box(replay::replay_belady(&trace)),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_belady_tight_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("belady");
    let requests = 8192usize;
    group.throughput(Throughput::Elements(requests as u64));
    group.bench_function("replay_tight_reuse", |b| {
        b.iter_batched(
            // Small key space: high hit rate, constant rank refreshes.
            || uniform_trace(64, requests, 128, 11),
            |trace| std::hint::black_box(replay::replay_belady(&trace)),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_comparison_harness(c: &mut Criterion) {
    let mut group = c.benchmark_group("belady");
    let requests = 4096usize;
    group.throughput(Throughput::Elements(requests as u64 * 2));
    group.bench_function("compare_both_engines", |b| {
        b.iter_batched(
            || uniform_trace(128, requests, 512, 23),
            |trace| std::hint::black_box(replay::compare(&trace)),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_belady_replay,
    bench_belady_tight_reuse,
    bench_comparison_harness
);
criterion_main!(benches);
