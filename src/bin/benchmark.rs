use std::fs::File;
use std::time::{Duration, Instant};

use log::info;
use topo_graph::graph::generators::{generate_random, WeightedGraph};
use topo_graph::{
    BellmanFord, BreadthFirstSearch, Cost, DefaultEdge, Dijkstra, GraphPathSearch, KShortestPaths, SearchConfig,
    Suurballe,
};

type Search = dyn GraphPathSearch<u32, DefaultEdge<u32>, Cost>;

// Times one search from vertex 0 and reports what it reached
fn benchmark_search(search: &Search, topology: &WeightedGraph, dst: Option<u32>, max_paths: usize) -> Duration {
    let (graph, weigher) = topology;
    println!("Running {} on graph with {} vertices...", search.name(), graph.vertex_count());

    let start = Instant::now();
    let result = search.search(graph, &0, dst.as_ref(), weigher, max_paths);
    let duration = start.elapsed();

    match result {
        Ok(result) => println!(
            "  - Reached {} vertices, {} paths in {:?}",
            result.costs().len(),
            result.paths().len(),
            duration
        ),
        Err(err) => println!("  - Failed after {:?}: {}", duration, err),
    }
    duration
}

fn main() {
    env_logger::init();

    // Optional JSON configuration as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match File::open(&path).map_err(topo_graph::Error::from).and_then(SearchConfig::from_reader) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Cannot load configuration from {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => SearchConfig::default(),
    };
    info!("benchmark configuration: {:?}", config);

    let graph_sizes = vec![1_000, 10_000, 50_000];
    let edge_factor = 3.0;

    println!("=====================================================");
    println!("Benchmark: single-source and pair searches");
    println!("Edge factor: {} edges per vertex (on average)", edge_factor);
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random graph with {} vertices...", size);
        let topology = match generate_random(size, edge_factor, 100, 42) {
            Ok(topology) => topology,
            Err(err) => {
                eprintln!("Cannot generate graph: {}", err);
                std::process::exit(1);
            }
        };
        println!(
            "Graph has {} vertices and {} edges",
            topology.0.vertex_count(),
            topology.0.edge_count()
        );
        let far = size - 1;

        let dijkstra = benchmark_search(&Dijkstra::new(), &topology, None, config.path_bound());
        let bellman_ford = benchmark_search(&BellmanFord::new(), &topology, None, config.path_bound());
        let bfs = benchmark_search(&BreadthFirstSearch::new(), &topology, None, config.path_bound());
        let k_shortest = benchmark_search(&KShortestPaths::new(), &topology, Some(far), config.k);
        let suurballe = benchmark_search(&Suurballe::new(), &topology, Some(far), 2);

        results.push((size, dijkstra, bellman_ford, bfs, k_shortest, suurballe));
    }

    println!("\n=====================================================");
    println!("Summary of Results (ms)");
    println!("=====================================================");
    println!(
        "{:<10} | {:<10} | {:<12} | {:<10} | {:<10} | {:<10}",
        "Vertices", "Dijkstra", "BellmanFord", "BFS", "K-shortest", "Suurballe"
    );
    println!("-----------------------------------------------------");

    for (size, dijkstra, bellman_ford, bfs, k_shortest, suurballe) in &results {
        println!(
            "{:<10} | {:<10} | {:<12} | {:<10} | {:<10} | {:<10}",
            size,
            dijkstra.as_millis(),
            bellman_ford.as_millis(),
            bfs.as_millis(),
            k_shortest.as_millis(),
            suurballe.as_millis()
        );
    }
}
