use popularity::{
    count, select_top_k_by_heap, select_top_k_by_sort, FrequencyTable, RankedEntry,
    SelectionStrategy, SequenceSampler, ZipfMandelbrot,
};
use rand::{distributions::Distribution, rngs::StdRng, SeedableRng};
use rand_distr::Zipf;

/// Sampled requests fed back through the counter rank the contents by popularity
#[test]
fn test_generated_requests_rank_head_first() {
    let dist = ZipfMandelbrot::new(20, 0.0, 1.2).expect("valid parameters");
    let mut sampler = SequenceSampler::seeded(31);
    let table = count(sampler.draw_many(&dist, 100_000));

    let by_heap = select_top_k_by_heap(&table, 3);
    let by_sort = select_top_k_by_sort(&table, 3);

    let ranks: Vec<usize> = by_heap.iter().map(|e| e.value).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(by_heap, by_sort);
}

/// With q = 0 the law is plain Zipf, so shares match rand_distr's sampler
#[test]
fn test_matches_reference_zipf_when_q_is_zero() {
    let (n, s, draws) = (15usize, 1.1, 200_000usize);
    let dist = ZipfMandelbrot::new(n, 0.0, s).expect("valid parameters");

    let ours = count(SequenceSampler::seeded(8).draw_many(&dist, draws));

    let reference = Zipf::new(n as u64, s).expect("valid reference parameters");
    let mut rng = StdRng::seed_from_u64(9);
    let theirs: FrequencyTable<usize> = (0..draws).map(|_| reference.sample(&mut rng) as usize).collect();

    for rank in 1..=n {
        let a = ours.get(&rank).unwrap_or(0) as f64 / draws as f64;
        let b = theirs.get(&rank).unwrap_or(0) as f64 / draws as f64;
        assert!((a - b).abs() < 0.01, "rank {}: {} vs {}", rank, a, b);
    }
    assert!(dist.max_deviation(&theirs) < 0.01);
}

#[test]
fn test_strategies_from_config_strings() {
    let table = count(vec![5, 5, 5, 2, 2, 9]);

    for name in ["sort", "heap"] {
        let strategy: SelectionStrategy = name.parse().expect("known strategy");
        let result = strategy.select(&table, 2);
        assert_eq!(result, vec![RankedEntry::new(5, 3), RankedEntry::new(2, 2)]);
    }
}

#[test]
fn test_result_serializes_for_reports() {
    let table = count(vec![5, 5, 5, 2, 2, 9]);
    let result = select_top_k_by_sort(&table, 1);

    let json = serde_json::to_value(&result).expect("serializable");
    assert_eq!(json, serde_json::json!([{ "value": 5, "count": 3 }]));

    let strategy: SelectionStrategy = serde_json::from_str("\"heap\"").expect("deserializable");
    assert_eq!(strategy, SelectionStrategy::Heap);
}

/// Tables are read-only and can be shared across threads
#[test]
fn test_tables_shared_across_threads() {
    let dist = ZipfMandelbrot::default();
    let table = count(SequenceSampler::seeded(4).draw_many(&dist, 10_000));

    std::thread::scope(|scope| {
        let by_sort = scope.spawn(|| select_top_k_by_sort(&table, 5));
        let by_heap = scope.spawn(|| select_top_k_by_heap(&table, 5));
        let draws = scope.spawn(|| SequenceSampler::for_worker(4, 1).draw_many(&dist, 1_000));

        let by_sort = by_sort.join().expect("sort thread");
        let by_heap = by_heap.join().expect("heap thread");
        let counts = |r: &Vec<RankedEntry<usize>>| r.iter().map(|e| e.count).collect::<Vec<_>>();
        assert_eq!(counts(&by_sort), counts(&by_heap));
        assert!(draws.join().expect("sampler thread").iter().all(|&r| (1..=10).contains(&r)));
    });
}
