use std::sync::Arc;

use cachesim::policy::lfu::LfuCache;
use cachesim::traits::CoreCache;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn bench_lfu_insert_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu");
    let ops_per_iter = 1024u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));
    group.bench_function("insert_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(1024);
                for i in 0..1024u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), Arc::new(i));
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lfu_get_hotset(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu");
    group.throughput(Throughput::Elements(4096));
    group.bench_function("get_hotset", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(4096);
                for i in 0..4096u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lfu_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu");
    group.throughput(Throughput::Elements(4096));
    group.bench_function("eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(512);
                for i in 0..512u64 {
                    cache.insert(i, Arc::new(i));
                }
                cache
            },
            |mut cache| {
                // Every insert misses and evicts.
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(i + 100_000), Arc::new(i));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lfu_zipf_like_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu");
    group.throughput(Throughput::Elements(8192));
    group.bench_function("skewed_mix", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(42);
                // Square the draw to skew toward small keys.
                let requests: Vec<u64> = (0..8192)
                    .map(|_| {
                        let r = rng.random_range(0..64u64);
                        (r * r) / 8
                    })
                    .collect();
                (LfuCache::new(128), requests)
            },
            |(mut cache, requests)| {
                for key in requests {
                    if cache.get(&key).is_none() {
                        cache.insert(key, Arc::new(key));
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_lfu_insert_get,
    bench_lfu_get_hotset,
    bench_lfu_eviction_churn,
    bench_lfu_zipf_like_mix
);
criterion_main!(benches);
