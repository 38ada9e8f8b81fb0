use crate::graph::{DefaultEdge, Graph, TableWeigher};
use crate::{Cost, Result};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use std::collections::HashMap;

/// Generated topology: the graph plus a weigher holding every edge weight
pub type WeightedGraph = (Graph<u32, DefaultEdge<u32>>, TableWeigher<DefaultEdge<u32>, Cost>);

fn assemble(n: u32, edges: Vec<(DefaultEdge<u32>, Cost)>) -> Result<WeightedGraph> {
    let graph = Graph::new(0..n, edges.iter().map(|(e, _)| *e))?;
    let weigher = edges.into_iter().collect();
    Ok((graph, weigher))
}

/// Generates a bidirectional ring of `n` vertices with unit weights
pub fn generate_ring(n: u32) -> Result<WeightedGraph> {
    let mut edges = Vec::new();

    for v in 0..n {
        let next = (v + 1) % n;
        if next == v {
            continue;
        }
        edges.push((DefaultEdge::new(v, next), OrderedFloat(1.0)));
        edges.push((DefaultEdge::new(next, v), OrderedFloat(1.0)));
    }

    assemble(n, edges)
}

/// Generates a `width` x `height` grid with links in both directions
pub fn generate_grid(width: u32, height: u32) -> Result<WeightedGraph> {
    let mut edges = Vec::new();
    let index = |x: u32, y: u32| y * width + x;

    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            if x + 1 < width {
                let right = index(x + 1, y);
                edges.push((DefaultEdge::new(current, right), OrderedFloat(1.0)));
                edges.push((DefaultEdge::new(right, current), OrderedFloat(1.0)));
            }
            if y + 1 < height {
                let below = index(x, y + 1);
                edges.push((DefaultEdge::new(current, below), OrderedFloat(1.0)));
                edges.push((DefaultEdge::new(below, current), OrderedFloat(1.0)));
            }
        }
    }

    assemble(width * height, edges)
}

/// Generates a random directed multigraph.
///
/// `edge_factor` is the average number of outgoing edges per vertex. Weights
/// are integers in `1..=max_weight` so that equal-cost ties actually occur.
/// Self-loops are skipped; parallel edges get distinct keys.
pub fn generate_random(n: u32, edge_factor: f64, max_weight: u32, seed: u64) -> Result<WeightedGraph> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    let mut keys: HashMap<(u32, u32), u32> = HashMap::new();
    let num_edges = (edge_factor * n as f64) as usize;

    if n > 1 {
        for _ in 0..num_edges {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u == v {
                continue;
            }
            let key = keys.entry((u, v)).or_insert(0);
            let weight = OrderedFloat(rng.gen_range(1..=max_weight.max(1)) as f64);
            edges.push((DefaultEdge::with_key(u, v, *key), weight));
            *key += 1;
        }
    }

    assemble(n, edges)
}
