mod common;

use std::collections::HashSet;

use common::*;
use topo_graph::graph::generators::{generate_grid, generate_random};
use topo_graph::{Cost, GraphPathSearch, KShortestPaths, LazyKShortestPaths, Path, ALL_PATHS};

#[test]
fn test_example_two_shortest_include_tie() {
    init_logging();
    let (graph, weigher) = five_vertex_example();
    let result = KShortestPaths::new().search(&graph, &"A", Some(&"E"), &weigher, 2).unwrap();

    let paths = result.paths();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].vertices(), vec![&"A", &"B", &"D", &"E"]);
    assert_eq!(paths[1].vertices(), vec![&"A", &"C", &"D", &"E"]);
    assert!(paths.iter().all(|p| p.cost() == cost(4.0)));
}

#[test]
fn test_fewer_paths_than_requested() {
    let (graph, weigher) = five_vertex_example();
    let result = KShortestPaths::new().search(&graph, &"A", Some(&"E"), &weigher, 10).unwrap();
    assert_eq!(result.paths().len(), 2);

    let none = KShortestPaths::new().search(&graph, &"E", Some(&"A"), &weigher, 10).unwrap();
    assert!(none.paths().is_empty());
}

#[test]
fn test_matches_brute_force_ranking() {
    init_logging();
    for seed in 0..30 {
        let (graph, weigher) = generate_random(7, 2.5, 4, seed).unwrap();
        let mut expected: Vec<Cost> = simple_paths(&graph, &weigher, &0, &6)
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        expected.sort();

        let result = KShortestPaths::new().search(&graph, &0, Some(&6), &weigher, ALL_PATHS).unwrap();
        let costs: Vec<Cost> = result.paths().iter().map(|p| p.cost()).collect();
        assert_eq!(costs, expected, "seed {}", seed);

        let distinct: HashSet<_> = result.paths().iter().map(|p| p.edges().to_vec()).collect();
        assert_eq!(distinct.len(), result.paths().len());
        assert!(result.paths().iter().all(|p| p.is_loopless()));
    }
}

#[test]
fn test_bounded_result_is_sorted_prefix() {
    for seed in 0..20 {
        let (graph, weigher) = generate_random(8, 3.0, 5, seed).unwrap();
        for k in [1usize, 3, 5] {
            let result = KShortestPaths::new().search(&graph, &1, Some(&7), &weigher, k).unwrap();
            let paths = result.paths();
            assert!(paths.len() <= k);
            assert!(paths.windows(2).all(|w| w[0] <= w[1]), "seed {} k {}", seed, k);
        }
    }
}

#[test]
fn test_lazy_yields_eager_prefix() {
    let (graph, weigher) = generate_grid(4, 4).unwrap();
    let eager = KShortestPaths::new().search(&graph, &0, Some(&15), &weigher, 12).unwrap();

    for n in [1usize, 5, 12] {
        let lazy: Vec<Path<u32, NumberedEdge, Cost>> = LazyKShortestPaths::new(&graph, &0, &15, &weigher)
            .unwrap()
            .take(n)
            .collect();
        assert_eq!(lazy.as_slice(), &eager.paths()[..n]);
    }
}

#[test]
fn test_lazy_does_only_requested_work() {
    let (graph, weigher) = generate_grid(5, 5).unwrap();
    let mut lazy = LazyKShortestPaths::new(&graph, &0, &24, &weigher).unwrap();
    assert_eq!(lazy.pending(), 0);

    let first = lazy.next().unwrap();
    assert_eq!(first.hop_count(), 8);
    assert_eq!(lazy.produced(), 1);
    // only the seed candidate has been produced so far
    assert_eq!(lazy.pending(), 0);

    lazy.next().unwrap();
    assert_eq!(lazy.produced(), 2);
    assert!(lazy.pending() > 0);
}

#[test]
fn test_deterministic_across_runs() {
    let (graph, weigher) = generate_random(8, 3.0, 2, 5).unwrap();
    let first = KShortestPaths::new().search(&graph, &0, Some(&4), &weigher, 6).unwrap();
    let second = KShortestPaths::new().search(&graph, &0, Some(&4), &weigher, 6).unwrap();
    assert_eq!(first.paths(), second.paths());
}
