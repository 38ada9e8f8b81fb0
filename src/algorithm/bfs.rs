use log::debug;

use crate::algorithm::traits::{check_arguments, edge_weights, GraphPathSearch, SearchResult, SearchState};
use crate::graph::{Edge, EdgeWeigher, EdgeWeight, Graph, Vertex};
use crate::Result;

/// Breadth-first search minimising hop count.
///
/// The weigher only decides which edges are traversable; every traversable
/// edge counts as one hop and reported costs are hop counts. All parent edges
/// that reach a vertex in the minimal number of hops are retained, so every
/// minimum-hop path can be rebuilt.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirstSearch;

impl BreadthFirstSearch {
    pub fn new() -> Self {
        BreadthFirstSearch
    }
}

impl<V, E, W> GraphPathSearch<V, E, W> for BreadthFirstSearch
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn name(&self) -> &'static str {
        "BreadthFirstSearch"
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
        let hops: Vec<W> = edge_weights(graph, weigher)
            .into_iter()
            .map(|w| if w.is_infinite() { W::infinity() } else { W::one() })
            .collect();

        let mut state = SearchState::new(graph.vertex_count());
        state.costs[src] = Some(W::zero());

        let mut frontier = vec![src];
        let mut level = W::zero();

        // Finish the level containing the destination so all its parents are kept
        while !frontier.is_empty() && !dst.map_or(false, |d| state.costs[d].is_some() && d != src) {
            let next_level = level + W::one();
            let mut next = Vec::new();

            for &u in &frontier {
                for &edge in graph.outgoing(u) {
                    if hops[edge].is_infinite() {
                        continue;
                    }
                    let (_, v) = graph.endpoints(edge);
                    match state.costs[v] {
                        None => {
                            state.update_vertex(v, edge, next_level, true);
                            next.push(v);
                        }
                        Some(cost) if cost == next_level => {
                            state.update_vertex(v, edge, next_level, false);
                        }
                        Some(_) => {}
                    }
                }
            }

            next.sort_unstable();
            frontier = next;
            level = next_level;
        }

        debug!(
            "BFS from {:?} explored {} levels",
            graph.vertex(src),
            level.to_usize().unwrap_or(0)
        );
        Ok(state.into_result(graph, src, dst, &hops, max_paths))
    }
}
