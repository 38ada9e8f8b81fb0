mod common;

use common::*;
use topo_graph::graph::generators::{generate_grid, generate_random};
use topo_graph::{
    BellmanFord, BreadthFirstSearch, Cost, DefaultEdge, Dijkstra, Error, GraphPathSearch, HopCountWeigher,
    SearchResult, TableWeigher, ALL_PATHS,
};

#[test]
fn test_dijkstra_example_scenario() {
    init_logging();
    let (graph, weigher) = five_vertex_example();

    let result = Dijkstra::new().search(&graph, &"A", Some(&"E"), &weigher, ALL_PATHS).unwrap();
    assert_eq!(result.cost(&"E"), Some(cost(4.0)));
    // both equal-cost paths are kept
    let routes: Vec<Vec<&&str>> = result.paths().iter().map(|p| p.vertices()).collect();
    assert_eq!(routes, vec![vec![&"A", &"B", &"D", &"E"], vec![&"A", &"C", &"D", &"E"]]);
    assert_eq!(result.parents()[&"D"].len(), 2);
}

#[test]
fn test_single_parent_tie_break() {
    let (graph, weigher) = five_vertex_example();

    // B settles before C, so B->D is the kept parent of D
    let result = Dijkstra::new().search(&graph, &"A", Some(&"E"), &weigher, 1).unwrap();
    assert_eq!(result.paths().len(), 1);
    assert_eq!(result.paths()[0].vertices(), vec![&"A", &"B", &"D", &"E"]);
    assert_eq!(result.parents()[&"D"], vec![DefaultEdge::new("B", "D")]);

    // repeated runs agree
    let again = Dijkstra::new().search(&graph, &"A", Some(&"E"), &weigher, 1).unwrap();
    assert_eq!(result.paths(), again.paths());
}

#[test]
fn test_paths_to_every_vertex_without_destination() {
    let (graph, weigher) = five_vertex_example();
    let result = Dijkstra::new().search(&graph, &"A", None, &weigher, 1).unwrap();

    assert_eq!(result.paths().len(), 4);
    assert_eq!(result.cost(&"A"), Some(cost(0.0)));
    assert_eq!(result.cost(&"B"), Some(cost(1.0)));
    assert_eq!(result.cost(&"C"), Some(cost(2.0)));
    assert_eq!(result.cost(&"D"), Some(cost(3.0)));
    assert!(result.parents().get(&"A").is_none());
}

#[test]
fn test_unreachable_is_empty_not_error() {
    let (graph, weigher) = five_vertex_example();
    let result = Dijkstra::new().search(&graph, &"E", Some(&"A"), &weigher, ALL_PATHS).unwrap();
    assert!(result.paths().is_empty());
    assert!(!result.has_cost(&"A"));
}

#[test]
fn test_unknown_vertices_rejected() {
    let (graph, weigher) = five_vertex_example();
    let missing_src = Dijkstra::new().search(&graph, &"Z", None, &weigher, ALL_PATHS);
    assert!(matches!(missing_src, Err(Error::VertexNotFound(_))));
    let missing_dst = BreadthFirstSearch::new().search(&graph, &"A", Some(&"Z"), &weigher, ALL_PATHS);
    assert!(matches!(missing_dst, Err(Error::VertexNotFound(_))));
}

#[test]
fn test_dijkstra_rejects_negative_weight() {
    let (graph, mut weigher) = five_vertex_example();
    weigher.insert(DefaultEdge::new("C", "D"), cost(-1.0));
    let result = Dijkstra::new().search(&graph, &"A", None, &weigher, ALL_PATHS);
    assert!(matches!(result, Err(Error::InvalidWeight { .. })));
}

#[test]
fn test_non_viable_edges_are_skipped() {
    let (graph, mut weigher) = five_vertex_example();
    weigher.insert(DefaultEdge::new("B", "D"), cost(f64::INFINITY));
    let result = Dijkstra::new().search(&graph, &"A", Some(&"E"), &weigher, ALL_PATHS).unwrap();
    assert_eq!(result.paths().len(), 1);
    assert_eq!(result.paths()[0].vertices(), vec![&"A", &"C", &"D", &"E"]);
}

#[test]
fn test_dijkstra_matches_brute_force() {
    init_logging();
    for seed in 0..40 {
        let (graph, weigher) = generate_random(7, 2.5, 6, seed).unwrap();
        for src in 0..7u32 {
            let result = Dijkstra::new().search(&graph, &src, None, &weigher, ALL_PATHS).unwrap();
            for dst in 0..7u32 {
                if dst == src {
                    continue;
                }
                let expected = brute_force_cost(&graph, &weigher, &src, &dst);
                assert_eq!(result.cost(&dst), expected, "seed {} from {} to {}", seed, src, dst);
                for path in result.paths().iter().filter(|p| *p.dst() == dst) {
                    assert_eq!(Some(path.cost()), expected);
                    assert!(path.is_loopless());
                }
            }
        }
    }
}

#[test]
fn test_bfs_equals_dijkstra_on_unit_weights() {
    for seed in 0..20 {
        let (graph, _) = generate_random(8, 2.0, 1, seed).unwrap();
        let bfs: SearchResult<u32, NumberedEdge, Cost> = BreadthFirstSearch::new()
            .search(&graph, &0, None, &HopCountWeigher, ALL_PATHS)
            .unwrap();
        let dijkstra: SearchResult<u32, NumberedEdge, Cost> = Dijkstra::new()
            .search(&graph, &0, None, &HopCountWeigher, ALL_PATHS)
            .unwrap();
        assert_eq!(bfs.costs(), dijkstra.costs(), "seed {}", seed);
        assert_eq!(bfs.parents(), dijkstra.parents(), "seed {}", seed);
    }
}

#[test]
fn test_bfs_keeps_every_minimum_hop_path() {
    let (graph, weigher) = five_vertex_example();
    let result = BreadthFirstSearch::new().search(&graph, &"A", Some(&"E"), &weigher, ALL_PATHS).unwrap();
    assert_eq!(result.cost(&"E"), Some(cost(3.0)));
    assert_eq!(result.paths().len(), 2);
}

#[test]
fn test_bellman_ford_negative_cycle_only_when_reachable() {
    init_logging();
    let (graph, weigher) = weighted(&[
        ("A", "B", 1.0),
        ("B", "D", 2.0),
        ("A", "C", 2.0),
        ("C", "D", 1.0),
        ("D", "E", 1.0),
        ("B", "A", -5.0),
    ]);

    let from_a = BellmanFord::new().search(&graph, &"A", Some(&"E"), &weigher, ALL_PATHS);
    assert!(matches!(from_a, Err(Error::NegativeCycleDetected)));

    let from_c = BellmanFord::new().search(&graph, &"C", Some(&"E"), &weigher, ALL_PATHS).unwrap();
    assert_eq!(from_c.cost(&"E"), Some(cost(2.0)));
    assert!(!from_c.has_cost(&"A"));
}

#[test]
fn test_bellman_ford_matches_dijkstra_without_cycle() {
    let (graph, weigher) = five_vertex_example();
    let bellman_ford = BellmanFord::new().search(&graph, &"A", None, &weigher, ALL_PATHS).unwrap();
    let dijkstra = Dijkstra::new().search(&graph, &"A", None, &weigher, ALL_PATHS).unwrap();
    assert_eq!(bellman_ford.costs(), dijkstra.costs());
    assert_eq!(bellman_ford.paths(), dijkstra.paths());

    for seed in 0..20 {
        let (graph, weigher) = generate_random(7, 2.5, 9, seed).unwrap();
        let bellman_ford = BellmanFord::new().search(&graph, &3, None, &weigher, ALL_PATHS).unwrap();
        let dijkstra = Dijkstra::new().search(&graph, &3, None, &weigher, ALL_PATHS).unwrap();
        assert_eq!(bellman_ford.costs(), dijkstra.costs(), "seed {}", seed);
    }
}

#[test]
fn test_bellman_ford_single_parent_across_zero_weight_cycle() {
    let (graph, weigher) = weighted(&[("S", "A", 1.0), ("A", "B", 0.0), ("B", "A", 0.0)]);

    let result = BellmanFord::new().search(&graph, &"S", Some(&"B"), &weigher, 1).unwrap();
    assert_eq!(result.cost(&"B"), Some(cost(1.0)));
    assert_eq!(result.paths().len(), 1);
    assert_eq!(result.paths()[0].vertices(), vec![&"S", &"A", &"B"]);
    assert_eq!(result.parents()[&"A"], vec![DefaultEdge::new("S", "A")]);

    // every reachable vertex still gets its path
    let untargeted = BellmanFord::new().search(&graph, &"S", None, &weigher, 1).unwrap();
    assert_eq!(untargeted.paths().len(), 2);
    let dijkstra = Dijkstra::new().search(&graph, &"S", None, &weigher, 1).unwrap();
    assert_eq!(untargeted.paths(), dijkstra.paths());
}

#[test]
fn test_bellman_ford_handles_negative_edges() {
    let (graph, weigher) = weighted(&[("A", "B", 4.0), ("A", "C", 1.0), ("C", "B", -2.0), ("B", "D", 1.0)]);
    let result = BellmanFord::new().search(&graph, &"A", Some(&"D"), &weigher, ALL_PATHS).unwrap();
    assert_eq!(result.cost(&"B"), Some(cost(-1.0)));
    assert_eq!(result.paths()[0].vertices(), vec![&"A", &"C", &"B", &"D"]);
    assert_eq!(result.paths()[0].cost(), cost(0.0));
}

#[test]
fn test_table_weigher_default_marks_unlisted_edges() {
    let graph = topo_graph::Graph::from_edges(vec![DefaultEdge::new("A", "B"), DefaultEdge::new("B", "C")]);
    let mut weigher: TableWeigher<NamedEdge, Cost> = TableWeigher::new();
    weigher.insert(DefaultEdge::new("A", "B"), cost(1.0));
    let result = Dijkstra::new().search(&graph, &"A", None, &weigher, ALL_PATHS).unwrap();
    assert!(result.has_cost(&"B"));
    assert!(!result.has_cost(&"C"));
}

#[test]
fn test_untargeted_search_builds_one_path_per_vertex() {
    let (graph, weigher) = generate_grid(9, 9).unwrap();
    let result = Dijkstra::new().search(&graph, &0, None, &weigher, ALL_PATHS).unwrap();
    assert_eq!(result.paths().len(), 80);
    assert_eq!(result.cost(&80), Some(cost(16.0)));
    // equal-cost parents are still reported
    assert_eq!(result.parents()[&80].len(), 2);

    // a targeted search enumerates every minimum-hop route
    let (graph, weigher) = generate_grid(3, 3).unwrap();
    let corner = Dijkstra::new().search(&graph, &0, Some(&8), &weigher, ALL_PATHS).unwrap();
    assert_eq!(corner.paths().len(), 6);
}
