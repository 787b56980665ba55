use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use fulcrumsort::prelude::*;
use rand::Rng;
use std::hint::black_box;

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random u64");
    group.sample_size(20);

    let mut rng = rand::rng();
    let count = 10_000;
    let input: Vec<u64> = (0..count).map(|_| rng.random()).collect();

    group.bench_function("fulcrumsort", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| fulcrumsort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| data.sort(),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_adaptive_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("Adaptive Patterns");
    group.sample_size(20);

    let count = 10_000u64;
    let sorted: Vec<u64> = (0..count).collect();
    let reversed: Vec<u64> = (0..count).rev().collect();
    let sawtooth: Vec<u64> = (0..count).map(|i| i % 17).collect();
    let mut rng = rand::rng();
    let few_distinct: Vec<u64> = (0..count).map(|_| rng.random_range(0..3)).collect();

    for (name, input) in [
        ("presorted", &sorted),
        ("reversed", &reversed),
        ("sawtooth", &sawtooth),
        ("few distinct", &few_distinct),
    ] {
        group.bench_function(format!("fulcrumsort / {name}"), |b| {
            b.iter_batched(
                || input.clone(),
                |mut data| fulcrumsort(black_box(&mut data)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("slice::sort_unstable / {name}"), |b| {
            b.iter_batched(
                || input.clone(),
                |mut data| data.sort_unstable(),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_reused_scratch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reused Scratch");
    group.sample_size(20);

    let mut rng = rand::rng();
    let count = 10_000;
    let input: Vec<u64> = (0..count).map(|_| rng.random()).collect();
    let mut swap = vec![0u64; 512];

    group.bench_function("fulcrumsort_swap", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| fulcrumsort_swap(black_box(&mut data), &mut swap),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_random,
    bench_adaptive_patterns,
    bench_reused_scratch
);
criterion_main!(benches);
