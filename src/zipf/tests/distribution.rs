use crate::{
    frequency::count,
    types::constants,
    zipf::{ZipfError, ZipfMandelbrot},
};

const EPS: f64 = 1e-12;

/// Smallest rank i with u < C[i], scanning the table front to back
fn linear_scan(dist: &ZipfMandelbrot, u: f64) -> usize {
    for rank in 1..=dist.num_contents() {
        if u < dist.cumulative_at(rank) {
            return rank;
        }
    }
    dist.num_contents()
}

/// N = 3, q = 0, s = 1 gives weights 1, 1/2, 1/3
#[test]
fn test_three_contents_harmonic() {
    let dist = ZipfMandelbrot::new(3, 0.0, 1.0).expect("valid parameters");
    let total = 1.0 + 0.5 + 1.0 / 3.0;

    assert_eq!(dist.cumulative().len(), 4);
    assert_eq!(dist.cumulative_at(0), 0.0);
    assert!((dist.cumulative_at(1) - 1.0 / total).abs() < EPS);
    assert!((dist.cumulative_at(2) - 1.5 / total).abs() < EPS);
    assert_eq!(dist.cumulative_at(3), 1.0);
    assert!((dist.cumulative_at(1) - 0.5455).abs() < 1e-4);
    assert!((dist.cumulative_at(2) - 0.8182).abs() < 1e-4);

    assert_eq!(dist.rank_for(0.3), 1);
    assert_eq!(dist.rank_for(0.6), 2);
    assert_eq!(dist.rank_for(0.9), 3);
}

#[test]
fn test_table_is_normalized_and_monotonic() {
    for &(n, q, s) in &[(1, 0.0, 1.0), (10, 0.7, 0.7), (100, 2.5, 1.2), (1000, 0.0, 0.01), (50, 10.0, 3.0), (5, 1000.0, 150.0), (20, 0.0, 400.0)] {
        let dist = ZipfMandelbrot::new(n, q, s).expect("valid parameters");
        let table = dist.cumulative();

        assert_eq!(table.len(), n + 1);
        assert_eq!(dist.cumulative_at(0), 0.0);
        assert!((dist.cumulative_at(n) - 1.0).abs() < EPS);
        assert!(table.windows(2).all(|w| w[0] <= w[1]), "table not monotonic for n={} q={} s={}", n, q, s);
    }
}

/// Ranks past N saturate at 1
#[test]
fn test_cumulative_beyond_last_rank() {
    let dist = ZipfMandelbrot::new(4, 0.0, 1.0).expect("valid parameters");
    assert_eq!(dist.cumulative_at(5), 1.0);
    assert_eq!(dist.cumulative_at(usize::MAX), 1.0);
}

#[test]
fn test_probabilities_match_weights() {
    let (n, q, s) = (6, 0.7, 0.9);
    let dist = ZipfMandelbrot::new(n, q, s).expect("valid parameters");
    let weights: Vec<f64> = (1..=n).map(|i| 1.0 / (i as f64 + q).powf(s)).collect();
    let total: f64 = weights.iter().sum();

    for (i, w) in weights.iter().enumerate() {
        assert!((dist.probability(i + 1) - w / total).abs() < EPS);
    }
    assert_eq!(dist.probability(0), 0.0);
    assert_eq!(dist.probability(n + 1), 0.0);
    let sum: f64 = (1..=n).map(|r| dist.probability(r)).sum();
    assert!((sum - 1.0).abs() < EPS);
}

/// Larger s concentrates more mass on rank 1, larger q flattens the head
#[test]
fn test_shape_parameters() {
    let mild = ZipfMandelbrot::new(20, 0.0, 0.5).expect("valid parameters");
    let steep = ZipfMandelbrot::new(20, 0.0, 2.0).expect("valid parameters");
    let flat = ZipfMandelbrot::new(20, 50.0, 2.0).expect("valid parameters");

    assert!(steep.probability(1) > mild.probability(1));
    assert!(flat.probability(1) < steep.probability(1));
    for dist in [&mild, &steep, &flat] {
        assert!((1..20).all(|r| dist.probability(r) >= dist.probability(r + 1)));
    }
}

#[test]
fn test_invalid_parameters() {
    assert!(matches!(ZipfMandelbrot::new(0, 0.7, 0.7), Err(ZipfError::InvalidParameter(_))));
    assert!(matches!(ZipfMandelbrot::new(10, 0.7, 0.0), Err(ZipfError::InvalidParameter(_))));
    assert!(matches!(ZipfMandelbrot::new(10, 0.7, -1.0), Err(ZipfError::InvalidParameter(_))));
    assert!(matches!(ZipfMandelbrot::new(10, -0.1, 0.7), Err(ZipfError::InvalidParameter(_))));
    assert!(matches!(ZipfMandelbrot::new(10, f64::NAN, 0.7), Err(ZipfError::InvalidParameter(_))));
    assert!(matches!(ZipfMandelbrot::new(10, 0.7, f64::INFINITY), Err(ZipfError::InvalidParameter(_))));
    assert!(matches!(ZipfMandelbrot::new(usize::MAX, 0.7, 0.7), Err(ZipfError::InvalidParameter(_))));
    assert!(matches!(ZipfMandelbrot::new(1usize << 61, 0.7, 0.7), Err(ZipfError::InvalidParameter(_))));
}

/// Large q and s overflow (i + q)^s, yet every rank keeps a real share
#[test]
fn test_large_plateau_and_exponent_stay_finite() {
    let dist = ZipfMandelbrot::new(5, 1000.0, 150.0).expect("valid parameters");

    assert!(dist.cumulative().iter().all(|c| c.is_finite()));
    for rank in 1..=5 {
        let p = dist.probability(rank);
        assert!(p > 0.1 && p < 0.3, "rank {} has probability {}", rank, p);
    }
    // Rank 1 weighs 1, rank 2 weighs (1001 / 1002)^150
    let ratio = dist.probability(2) / dist.probability(1);
    assert!((ratio - (1001.0_f64 / 1002.0).powf(150.0)).abs() < 1e-9);
    assert_eq!(dist.rank_for(0.0), 1);
    assert_eq!(dist.rank_for(0.999), 5);
}

/// Binary search inversion returns the same rank as the linear scan
#[test]
fn test_rank_for_matches_linear_scan() {
    let dist = ZipfMandelbrot::new(37, 1.3, 0.8).expect("valid parameters");
    for step in 0..=10_000 {
        let u = step as f64 / 10_000.0;
        assert_eq!(dist.rank_for(u), linear_scan(&dist, u), "u = {}", u);
    }
    for rank in 0..=37 {
        let u = dist.cumulative_at(rank);
        assert_eq!(dist.rank_for(u), linear_scan(&dist, u), "boundary of rank {}", rank);
    }
}

/// A draw at or past the end of the table clamps to N instead of 0
#[test]
fn test_rank_for_rounding_fallback_clamps() {
    let dist = ZipfMandelbrot::new(5, 0.0, 1.0).expect("valid parameters");

    assert_eq!(dist.rank_for(1.0), 5);
    assert_eq!(dist.rank_for(1.0 + 1e-9), 5);
    assert_eq!(dist.rank_for(0.0), 1);
}

#[test]
fn test_default_parameters() {
    let dist = ZipfMandelbrot::default();

    assert_eq!(dist.num_contents(), constants::DEFAULT_NUM_CONTENTS);
    assert_eq!(dist.q(), constants::DEFAULT_Q);
    assert_eq!(dist.s(), constants::DEFAULT_S);
}

#[test]
fn test_max_deviation() {
    let dist = ZipfMandelbrot::new(3, 0.0, 1.0).expect("valid parameters");

    assert_eq!(dist.max_deviation(&count(Vec::<usize>::new())), 0.0);

    // All mass on rank 1: the gap at rank 1 is 1 - p(1) = p(2) + p(3)
    let observed = count(vec![1usize; 10]);
    let expected = 1.0 - dist.probability(1);
    assert!((dist.max_deviation(&observed) - expected).abs() < EPS);
}
