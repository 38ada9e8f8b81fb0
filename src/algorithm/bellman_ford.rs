use std::collections::VecDeque;

use log::{debug, warn};

use crate::algorithm::traits::{
    check_arguments, edge_weights, invalid_weight, GraphPathSearch, SearchResult, SearchState,
};
use crate::graph::{Edge, EdgeWeigher, EdgeWeight, Graph, Vertex};
use crate::{Error, Result};

/// Bellman-Ford shortest paths, tolerating negative weights.
///
/// Fails with `NegativeCycleDetected` when a negative cycle is reachable from
/// the source. Cycles the source cannot reach do not matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellmanFord;

impl BellmanFord {
    pub fn new() -> Self {
        BellmanFord
    }
}

impl<V, E, W> GraphPathSearch<V, E, W> for BellmanFord
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn name(&self) -> &'static str {
        "BellmanFord"
    }

    fn search(
        &self,
        graph: &Graph<V, E>,
        src: &V,
        dst: Option<&V>,
        weigher: &dyn EdgeWeigher<E, W>,
        max_paths: usize,
    ) -> Result<SearchResult<V, E, W>> {
        let (src, dst) = check_arguments(graph, src, dst)?;
        let weights = edge_weights(graph, weigher);

        let mut state = SearchState::new(graph.vertex_count());
        state.costs[src] = Some(weigher.initial_weight());

        let mut rounds = 0;
        for _ in 1..graph.vertex_count().max(1) {
            rounds += 1;
            if !relax_all(graph, &weights, &mut state)? {
                break;
            }
        }

        // One more improving pass means a reachable negative cycle
        if relax_all(graph, &weights, &mut state)? {
            warn!("negative cycle reachable from {:?}", graph.vertex(src));
            return Err(Error::NegativeCycleDetected);
        }

        record_parents(graph, &weights, &mut state, src, max_paths != 1);

        debug!("Bellman-Ford from {:?} converged after {} rounds", graph.vertex(src), rounds);
        Ok(state.into_result(graph, src, dst, &weights, max_paths))
    }
}

/// Relaxes every edge once in edge order; returns true if any cost improved
fn relax_all<V, E, W>(graph: &Graph<V, E>, weights: &[W], state: &mut SearchState<W>) -> Result<bool>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    let mut changed = false;
    for (edge, &weight) in weights.iter().enumerate() {
        if weight.is_nan() {
            return Err(invalid_weight(graph, edge, weight));
        }
        if weight.is_infinite() {
            continue;
        }
        let (u, v) = graph.endpoints(edge);
        let cost_u = match state.costs[u] {
            Some(cost) => cost,
            None => continue,
        };
        let candidate = cost_u + weight;
        if state.costs[v].map_or(true, |current| candidate < current) {
            state.costs[v] = Some(candidate);
            changed = true;
        }
    }
    Ok(changed)
}

/// Rebuilds parent edges from the converged costs: an edge is a parent of its
/// destination when it is tight.
///
/// A single parent is taken in breadth-first order from the source over tight
/// edges, so every kept parent chain leads back to the source even across
/// zero-weight cycles.
fn record_parents<V, E, W>(
    graph: &Graph<V, E>,
    weights: &[W],
    state: &mut SearchState<W>,
    src: usize,
    all_parents: bool,
)
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    // cost of the edge's destination when the edge is tight
    let tight_cost = |state: &SearchState<W>, edge: usize| -> Option<W> {
        let (u, v) = graph.endpoints(edge);
        let (cost_u, cost_v) = (state.costs[u]?, state.costs[v]?);
        (!weights[edge].is_infinite() && cost_u + weights[edge] == cost_v).then_some(cost_v)
    };

    if all_parents {
        for edge in 0..weights.len() {
            let (u, v) = graph.endpoints(edge);
            if u == v || v == src {
                continue;
            }
            if let Some(cost_v) = tight_cost(&*state, edge) {
                state.update_vertex(v, edge, cost_v, false);
            }
        }
        return;
    }

    let mut visited = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::from([src]);
    visited[src] = true;
    while let Some(u) = queue.pop_front() {
        for &edge in graph.outgoing(u) {
            let (_, v) = graph.endpoints(edge);
            if visited[v] {
                continue;
            }
            if let Some(cost_v) = tight_cost(&*state, edge) {
                visited[v] = true;
                state.update_vertex(v, edge, cost_v, false);
                queue.push_back(v);
            }
        }
    }
}
