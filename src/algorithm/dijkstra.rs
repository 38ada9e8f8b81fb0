use log::{debug, trace};

use crate::algorithm::traits::{
    check_arguments, edge_weights, require_non_negative, GraphPathSearch, SearchResult, SearchState,
};
use crate::data_structures::Heap;
use crate::graph::{Edge, EdgeWeigher, EdgeWeight, Graph, Vertex};
use crate::Result;

/// Classic Dijkstra's algorithm implementation.
///
/// All traversed weights must be non-negative; the first negative (or NaN)
/// weight met aborts the search with `InvalidWeight`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<V, E, W> GraphPathSearch<V, E, W> for Dijkstra
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
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

        let state = shortest_path_tree(
            graph,
            &weights,
            src,
            dst,
            weigher.initial_weight(),
            max_paths != 1,
            &SearchMask::open(graph),
        )?;

        debug!(
            "Dijkstra from {:?} reached {} of {} vertices",
            graph.vertex(src),
            state.costs.iter().filter(|c| c.is_some()).count(),
            graph.vertex_count()
        );
        Ok(state.into_result(graph, src, dst, &weights, max_paths))
    }
}

/// Edges and vertices a search must not use.
#[derive(Debug, Clone)]
pub(crate) struct SearchMask {
    pub edges: Vec<bool>,
    pub vertices: Vec<bool>,
}

impl SearchMask {
    /// Mask blocking nothing
    pub fn open<V, E>(graph: &Graph<V, E>) -> Self
    where
        V: Vertex,
        E: Edge<V>,
    {
        SearchMask {
            edges: vec![false; graph.edge_count()],
            vertices: vec![false; graph.vertex_count()],
        }
    }

    fn allows(&self, edge: usize, dst: usize) -> bool {
        !self.edges[edge] && !self.vertices[dst]
    }
}

/// Runs Dijkstra over vertex/edge positions.
///
/// With `all_parents`, every equal-cost parent edge is retained; otherwise the
/// first parent reaching the minimum is kept. When `dst` is given the search
/// stops once no unsettled vertex can still tie with the destination.
pub(crate) fn shortest_path_tree<V, E, W>(
    graph: &Graph<V, E>,
    weights: &[W],
    src: usize,
    dst: Option<usize>,
    initial: W,
    all_parents: bool,
    mask: &SearchMask,
) -> Result<SearchState<W>>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    let mut state = SearchState::new(graph.vertex_count());
    let mut settled = vec![false; graph.vertex_count()];
    let mut queue = Heap::natural();

    state.costs[src] = Some(initial);
    queue.insert(src, initial);

    // Cost at which the destination was settled
    let mut stop_at: Option<W> = None;

    while let Some((u, dist_u)) = queue.extract_min() {
        if let Some(limit) = stop_at {
            if dist_u > limit {
                break;
            }
        }
        settled[u] = true;
        if Some(u) == dst {
            stop_at = Some(dist_u);
        }

        // Relax all outgoing edges
        for &edge in graph.outgoing(u) {
            let (_, v) = graph.endpoints(edge);
            if !mask.allows(edge, v) {
                continue;
            }
            let weight = weights[edge];
            if weight.is_infinite() && weight > W::zero() {
                continue;
            }
            require_non_negative(graph, edge, weight)?;
            // nothing non-negative improves the source or a self-loop target
            if v == src || v == u {
                continue;
            }

            let new_dist = dist_u + weight;
            match state.costs[v] {
                Some(current) if new_dist > current => {}
                Some(current) if new_dist == current => {
                    if all_parents {
                        state.update_vertex(v, edge, new_dist, false);
                    }
                }
                _ if settled[v] => {}
                _ => {
                    trace!("relaxed {:?} to {:?}", graph.vertex(v), new_dist);
                    state.update_vertex(v, edge, new_dist, true);
                    queue.insert(v, new_dist);
                }
            }
        }
    }

    Ok(state)
}
