//! Diff Engine Benchmarks
//!
//! **Purpose:** Measure joining and ranking of two datasets
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench diff_engine
//! cargo bench --bench diff_engine -- --save-baseline main
//! cargo bench --bench diff_engine -- --baseline main
//! ```
//!
//! **What's Being Measured:**
//! 1. `compare small trees (100 files)` - A handful of tools
//! 2. `compare test-suite trees (5000 files)` - Typical compiler test-suite build
//! 3. `compare partially overlapping trees (5000 files)` - Half the names only on one side
//!
//! **Performance Notes:**
//! - Join is one hash lookup per record
//! - Ranking sorts each side once, so cost is dominated by `n log n`

use codesize_diff::collector::{Dataset, SizeRecord};
use codesize_diff::diff::DiffEngine;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn record(filename: String, decimal_total: u64) -> SizeRecord {
    SizeRecord {
        text_bytes: decimal_total,
        data_bytes: 0,
        bss_bytes: 0,
        decimal_total,
        hex_total: format!("{decimal_total:x}"),
        filename,
    }
}

fn tree(count: u64, offset: u64, scale: impl Fn(u64) -> u64) -> Dataset {
    (offset..offset + count)
        .map(|i| record(format!("/suite_{}/bench_{}", i / 100, i), scale(i)))
        .collect()
}

fn bench_small(c: &mut Criterion) {
    let before = tree(100, 0, |i| 10_000 + i * 13);
    let after = tree(100, 0, |i| 10_000 + (i * 29) % 2600);
    let engine = DiffEngine::default();

    c.bench_function("compare small trees (100 files)", |b| {
        b.iter(|| engine.compare(black_box(&before), black_box(&after)))
    });
}

fn bench_test_suite(c: &mut Criterion) {
    let before = tree(5000, 0, |i| 4096 + i * 7);
    let after = tree(5000, 0, |i| 4096 + (i * 11) % 40_000);
    let engine = DiffEngine::default();

    c.bench_function("compare test-suite trees (5000 files)", |b| {
        b.iter(|| engine.compare(black_box(&before), black_box(&after)))
    });
}

fn bench_partial_overlap(c: &mut Criterion) {
    let before = tree(5000, 0, |i| 4096 + i * 7);
    let after = tree(5000, 2500, |i| 4096 + (i * 11) % 40_000);
    let engine = DiffEngine::default();

    c.bench_function("compare partially overlapping trees (5000 files)", |b| {
        b.iter(|| engine.compare(black_box(&before), black_box(&after)))
    });
}

criterion_group!(benches, bench_small, bench_test_suite, bench_partial_overlap);
criterion_main!(benches);
