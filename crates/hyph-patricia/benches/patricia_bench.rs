//! Benchmarks for PATRICIA insert and lookup.
//!
//! Run with: cargo bench -p hyph-patricia --bench patricia_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hyph_patricia::PatriciaMap;
use std::hint::black_box;

/// Deterministic pseudo-words over a small alphabet, like pattern keys.
fn keys(count: usize) -> Vec<Vec<u8>> {
    let mut state = 0x2545_f491_u32;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let len = 2 + (state % 6) as usize;
            (0..len)
                .map(|i| b'a' + ((state >> (i * 3)) % 26) as u8)
                .collect()
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("patricia/insert");
    for count in [1_000usize, 10_000] {
        let keys = keys(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &keys, |b, keys| {
            b.iter(|| {
                let mut map = PatriciaMap::new(0usize);
                for (i, k) in keys.iter().enumerate() {
                    map.insert(k, i).unwrap();
                }
                black_box(map.node_count())
            })
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("patricia/lookup");
    let keys = keys(10_000);
    let mut map = PatriciaMap::new(0usize);
    for (i, k) in keys.iter().enumerate() {
        map.insert(k, i).unwrap();
    }

    group.bench_function("hit", |b| {
        b.iter(|| {
            for k in keys.iter().take(1_000) {
                black_box(map.lookup(black_box(k)));
            }
        })
    });

    group.bench_function("miss", |b| {
        b.iter(|| {
            for k in keys.iter().take(1_000) {
                let mut absent = k.clone();
                absent.push(b'#');
                black_box(map.lookup(black_box(&absent)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup);
criterion_main!(benches);
