#![allow(dead_code)]

use ordered_float::OrderedFloat;
use topo_graph::{Cost, DefaultEdge, Edge, EdgeWeigher, Graph, TableWeigher};

pub type NamedEdge = DefaultEdge<&'static str>;
pub type NamedGraph = Graph<&'static str, NamedEdge>;
pub type NumberedEdge = DefaultEdge<u32>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn cost(value: f64) -> Cost {
    OrderedFloat(value)
}

/// Builds a graph and its weight table from `(src, dst, weight)` triples
pub fn weighted(links: &[(&'static str, &'static str, f64)]) -> (NamedGraph, TableWeigher<NamedEdge, Cost>) {
    let graph = Graph::from_edges(links.iter().map(|&(s, d, _)| DefaultEdge::new(s, d)));
    let weigher = links
        .iter()
        .map(|&(s, d, w)| (DefaultEdge::new(s, d), cost(w)))
        .collect();
    (graph, weigher)
}

/// A-B(1), B-D(2), A-C(2), C-D(1), D-E(1)
pub fn five_vertex_example() -> (NamedGraph, TableWeigher<NamedEdge, Cost>) {
    weighted(&[
        ("A", "B", 1.0),
        ("B", "D", 2.0),
        ("A", "C", 2.0),
        ("C", "D", 1.0),
        ("D", "E", 1.0),
    ])
}

/// Every simple path from `src` to `dst` over traversable edges, with its cost
pub fn simple_paths<V, E>(
    graph: &Graph<V, E>,
    weigher: &dyn EdgeWeigher<E, Cost>,
    src: &V,
    dst: &V,
) -> Vec<(Vec<E>, Cost)>
where
    V: topo_graph::Vertex,
    E: Edge<V>,
{
    let mut found = Vec::new();
    let mut visited = vec![src.clone()];
    let mut chain = Vec::new();
    extend(graph, weigher, src, dst, &mut visited, &mut chain, &mut found);
    found
}

fn extend<V, E>(
    graph: &Graph<V, E>,
    weigher: &dyn EdgeWeigher<E, Cost>,
    current: &V,
    dst: &V,
    visited: &mut Vec<V>,
    chain: &mut Vec<E>,
    found: &mut Vec<(Vec<E>, Cost)>,
) where
    V: topo_graph::Vertex,
    E: Edge<V>,
{
    if current == dst {
        let total = chain.iter().fold(cost(0.0), |acc, e| acc + weigher.weight(e));
        found.push((chain.clone(), total));
        return;
    }
    for edge in graph.edges_from(current) {
        if !weigher.is_viable(weigher.weight(edge)) || visited.contains(edge.dst()) {
            continue;
        }
        visited.push(edge.dst().clone());
        chain.push(edge.clone());
        extend(graph, weigher, edge.dst(), dst, visited, chain, found);
        chain.pop();
        visited.pop();
    }
}

/// Cheapest cost over all simple paths, `None` if unreachable
pub fn brute_force_cost<V, E>(graph: &Graph<V, E>, weigher: &dyn EdgeWeigher<E, Cost>, src: &V, dst: &V) -> Option<Cost>
where
    V: topo_graph::Vertex,
    E: Edge<V>,
{
    simple_paths(graph, weigher, src, dst).into_iter().map(|(_, c)| c).min()
}

/// Cheapest combined cost over all pairs of edge-disjoint simple paths
pub fn brute_force_pair_cost<V, E>(
    graph: &Graph<V, E>,
    weigher: &dyn EdgeWeigher<E, Cost>,
    src: &V,
    dst: &V,
    compatible: impl Fn(&[E], &[E]) -> bool,
) -> Option<Cost>
where
    V: topo_graph::Vertex,
    E: Edge<V>,
{
    let paths = simple_paths(graph, weigher, src, dst);
    let mut best: Option<Cost> = None;
    for (i, (a, cost_a)) in paths.iter().enumerate() {
        for (b, cost_b) in paths.iter().skip(i + 1) {
            if a.iter().any(|e| b.contains(e)) || !compatible(a, b) {
                continue;
            }
            let total = *cost_a + *cost_b;
            if best.map_or(true, |current| total < current) {
                best = Some(total);
            }
        }
    }
    best
}
