use fulcrumsort::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

// Sorting with a comparator that is not an order must terminate and keep
// every element in the slice; the resulting arrangement is unspecified.
fn assert_same_multiset(mut actual: Vec<i64>, mut original: Vec<i64>) {
    actual.sort_unstable();
    original.sort_unstable();
    assert_eq!(actual, original);
}

#[test]
fn test_random_comparator_keeps_multiset() {
    let mut rng = StdRng::seed_from_u64(97);

    for len in [300usize, 1000, 5000] {
        let original: Vec<i64> = (0..len).map(|_| rng.random_range(0..50)).collect();
        let mut data = original.clone();

        let mut coin = StdRng::seed_from_u64(len as u64);
        fulcrumsort_by(&mut data, |_, _| match coin.random_range(0..3) {
            0 => Ordering::Less,
            1 => Ordering::Equal,
            _ => Ordering::Greater,
        });

        assert_same_multiset(data, original);
    }
}

#[test]
fn test_constant_comparators_keep_multiset() {
    let verdicts = [Ordering::Less, Ordering::Equal, Ordering::Greater];

    for verdict in verdicts {
        let original: Vec<i64> = (0..4000).map(|i| i * 31 % 977).collect();
        let mut data = original.clone();

        fulcrumsort_by(&mut data, |_, _| verdict);
        assert_same_multiset(data, original);
    }
}

#[test]
fn test_comparator_panic_propagates() {
    let mut data: Vec<i64> = (0..1000).rev().collect();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut calls = 0u32;
        fulcrumsort_by(&mut data, |a, b| {
            calls += 1;
            if calls > 100 {
                panic!("comparator fault");
            }
            a.cmp(b)
        });
    }));

    assert!(result.is_err());
}

#[test]
fn test_seeded_regression_sweep() {
    // Random lengths and value ranges around the dispatch thresholds,
    // checked against the standard sort.
    let mut rng = StdRng::seed_from_u64(137);

    for _ in 0..50 {
        let len = rng.random_range(257..6000);
        let span = [2i64, 10, 100, 1_000_000][rng.random_range(0..4)];

        let mut data: Vec<i64> = (0..len).map(|_| rng.random_range(0..span)).collect();
        let mut expected = data.clone();
        expected.sort();

        fulcrumsort(&mut data);
        assert_eq!(data, expected, "failed at len {len}, span {span}");
    }
}

#[test]
fn test_seeded_regression_small_sweep() {
    let mut rng = StdRng::seed_from_u64(139);

    for _ in 0..200 {
        let len = rng.random_range(0..257);
        let mut data: Vec<i64> = (0..len).map(|_| rng.random_range(-20..20)).collect();
        let mut expected = data.clone();
        expected.sort();

        fulcrumsort(&mut data);
        assert_eq!(data, expected, "failed at len {len}");
    }
}
