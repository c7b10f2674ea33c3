//! Criterion micro-benchmarks for buffer reads, writes and indexing.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use locus_bench::filled_buffer;
use locus_buffer::{Backend, Buffer, IndexedBuffer};
use locus_space::Space;
use locus_test_utils::LinearSpace;

/// Benchmark: read all 10K slots of an array buffer.
fn bench_get_10k(c: &mut Criterion) {
    let space = LinearSpace::new(10_000);
    let buffer = filled_buffer(space.all(), Backend::Array);

    c.bench_function("get_array_10k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for p in 0..10_000u64 {
                sum += buffer.get(black_box(&p)).unwrap_or(0);
            }
            black_box(sum)
        });
    });
}

/// Benchmark: in-place writes versus copy-on-write writes over 1K slots.
fn bench_set_1k(c: &mut Criterion) {
    let space = LinearSpace::new(1_000);

    c.bench_function("set_array_1k", |b| {
        let mut buffer = filled_buffer(space.all(), Backend::Array);
        b.iter(|| {
            for p in 0..1_000u64 {
                buffer.store(p, Some(black_box(p + 1))).unwrap();
            }
        });
    });

    c.bench_function("set_persistent_1k", |b| {
        let mut buffer = filled_buffer(space.all(), Backend::Persistent);
        b.iter(|| {
            for p in 0..1_000u64 {
                buffer.store(p, Some(black_box(p + 1))).unwrap();
            }
        });
    });
}

/// Benchmark: build a Field index over 10K slots and look up one Field.
fn bench_index_build_and_lookup(c: &mut Criterion) {
    let space = LinearSpace::new(10_000);
    let buffer = filled_buffer(space.all(), Backend::Array);

    c.bench_function("index_build_lookup_10k", |b| {
        b.iter(|| {
            let indexed = IndexedBuffer::new(buffer.clone());
            black_box(indexed.positions_of(&Some(black_box(4_321))).len())
        });
    });
}

criterion_group!(
    benches,
    bench_get_10k,
    bench_set_1k,
    bench_index_build_and_lookup
);
criterion_main!(benches);
