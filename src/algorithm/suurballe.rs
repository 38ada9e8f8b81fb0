use std::collections::BTreeMap;

use log::{debug, error, trace};

use crate::algorithm::dijkstra::{shortest_path_tree, SearchMask};
use crate::algorithm::traits::{edge_weights, GraphPathSearch, SearchResult, SearchState};
use crate::graph::{
    DisjointPathPair, Disjointness, Edge, EdgeWeigher, EdgeWeight, Graph, Path, PathBuilder, ResidualEdge, Vertex,
};
use crate::{Error, Result};

/// Suurballe's algorithm for a minimum total cost pair of edge-disjoint
/// paths.
///
/// A first Dijkstra pass yields the shortest path P and the distance d(v) of
/// every vertex. Edges are then reweighted to `w(u,v) + d(u) - d(v)`, which is
/// never negative, and the edges of P are reversed at zero cost. The shortest
/// path Q over this residual graph is combined with P: edges used in both
/// directions cancel and the remainder splits into two disjoint paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct Suurballe;

impl Suurballe {
    pub fn new() -> Self {
        Suurballe
    }

    /// Returns the cheapest pair of edge-disjoint paths from `src` to `dst`.
    ///
    /// Fails with `DisjointPairUnavailable` when `dst` is unreachable or no
    /// second disjoint path exists.
    pub fn find_pair<V, E, W>(
        &self,
        graph: &Graph<V, E>,
        src: &V,
        dst: &V,
        weigher: &dyn EdgeWeigher<E, W>,
    ) -> Result<DisjointPathPair<V, E, W>>
    where
        V: Vertex,
        E: Edge<V>,
        W: EdgeWeight,
    {
        let src = graph.require_vertex(src)?;
        let dst = graph.require_vertex(dst)?;
        let weights = edge_weights(graph, weigher);

        let outcome = disjoint_pair(graph, &weights, src, dst)?;
        match (outcome.primary, outcome.secondary) {
            (Some(primary), Some(secondary)) => Ok(DisjointPathPair::new(
                build_path(graph, &weights, src, &primary),
                build_path(graph, &weights, src, &secondary),
                Disjointness::Edge,
            )),
            _ => Err(Error::DisjointPairUnavailable),
        }
    }
}

impl<V, E, W> GraphPathSearch<V, E, W> for Suurballe
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn name(&self) -> &'static str {
        "Suurballe"
    }

    /// Returns the pair as two paths, primary first. When only one path
    /// exists it is returned alone; `find_pair` is the strict variant.
    fn search(
        &self,
        graph: &Graph<V, E>,
        src: &V,
        dst: Option<&V>,
        weigher: &dyn EdgeWeigher<E, W>,
        max_paths: usize,
    ) -> Result<SearchResult<V, E, W>> {
        let dst = dst.ok_or(Error::MissingDestination)?;
        let (src, dst) = (graph.require_vertex(src)?, graph.require_vertex(dst)?);
        let weights = edge_weights(graph, weigher);

        let outcome = disjoint_pair(graph, &weights, src, dst)?;
        let paths = pair_paths(graph, &weights, src, outcome.primary, outcome.secondary, Disjointness::Edge);

        let mut result = outcome.tree.into_result(graph, src, Some(dst), &weights, 0);
        result.paths = paths.into_iter().take(max_paths).collect();
        Ok(result)
    }
}

/// Index-level outcome of a disjoint pair search
pub(crate) struct PairOutcome<W> {
    /// Shortest path tree from the source
    pub tree: SearchState<W>,
    pub primary: Option<Vec<usize>>,
    pub secondary: Option<Vec<usize>>,
}

/// Runs Suurballe over edge positions.
///
/// `primary` is the plain shortest path; `secondary` is only set when an
/// edge-disjoint pair exists, in which case the two returned paths form the
/// minimum total cost pair (and `primary` is replaced by its half of it).
pub(crate) fn disjoint_pair<V, E, W>(
    graph: &Graph<V, E>,
    weights: &[W],
    src: usize,
    dst: usize,
) -> Result<PairOutcome<W>>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    let tree = shortest_path_tree(graph, weights, src, None, W::zero(), false, &SearchMask::open(graph))?;

    if src == dst {
        return Ok(PairOutcome {
            tree,
            primary: Some(Vec::new()),
            secondary: Some(Vec::new()),
        });
    }

    let shortest = match tree_path(graph, &tree, src, dst) {
        Some(path) => path,
        None => {
            debug!("Suurballe: {:?} unreachable", graph.vertex(dst));
            return Ok(PairOutcome {
                tree,
                primary: None,
                secondary: None,
            });
        }
    };

    let mut on_shortest = vec![false; graph.edge_count()];
    for &edge in &shortest {
        on_shortest[edge] = true;
    }

    // Residual graph keyed by residual edge, carrying (reduced weight, origin)
    let mut residual_edges: BTreeMap<ResidualEdge<E>, (W, usize)> = BTreeMap::new();
    for (edge, &weight) in weights.iter().enumerate() {
        if weight.is_infinite() {
            continue;
        }
        let (u, v) = graph.endpoints(edge);
        if u == v {
            continue;
        }
        let (du, dv) = match (tree.costs[u], tree.costs[v]) {
            (Some(du), Some(dv)) => (du, dv),
            _ => continue,
        };
        let original = graph.edge(edge).clone();
        if on_shortest[edge] {
            residual_edges.insert(ResidualEdge::Reversed(original), (W::zero(), edge));
        } else {
            // rounding may push a tight edge marginally below zero
            let reduced = Ord::max(weight + du - dv, W::zero());
            residual_edges.insert(ResidualEdge::Forward(original), (reduced, edge));
        }
    }

    let origins: Vec<usize> = residual_edges.values().map(|&(_, origin)| origin).collect();
    let residual_weights: Vec<W> = residual_edges.values().map(|&(weight, _)| weight).collect();
    let residual = Graph::new(graph.vertices().iter().cloned(), residual_edges.into_keys())?;
    trace!(
        "Suurballe residual graph has {} of {} edges",
        residual.edge_count(),
        graph.edge_count()
    );

    // Vertex positions are shared since the vertex sets are identical
    let second_tree = shortest_path_tree(
        &residual,
        &residual_weights,
        src,
        Some(dst),
        W::zero(),
        false,
        &SearchMask::open(&residual),
    )?;

    let augmenting = match tree_path(&residual, &second_tree, src, dst) {
        Some(path) => path,
        None => {
            debug!(
                "Suurballe: no second path from {:?} to {:?}",
                graph.vertex(src),
                graph.vertex(dst)
            );
            return Ok(PairOutcome {
                tree,
                primary: Some(shortest),
                secondary: None,
            });
        }
    };

    // Overlay both paths; an augmenting edge over a reversed edge cancels it
    let mut used = on_shortest;
    for &r in &augmenting {
        used[origins[r]] = !residual.edge(r).is_reversed();
    }

    let first = match extract_walk(graph, &mut used, src, dst) {
        Some(walk) => walk,
        None => {
            error!("Suurballe: overlay does not decompose into two paths");
            return Err(Error::DisjointPairUnavailable);
        }
    };
    let second = match extract_walk(graph, &mut used, src, dst) {
        Some(walk) => walk,
        None => {
            error!("Suurballe: overlay does not decompose into two paths");
            return Err(Error::DisjointPairUnavailable);
        }
    };

    Ok(PairOutcome {
        tree,
        primary: Some(remove_loops(graph, src, &first)),
        secondary: Some(remove_loops(graph, src, &second)),
    })
}

/// Follows single parents back from `dst`; returns edge positions in order
pub(crate) fn tree_path<V, E, W>(graph: &Graph<V, E>, tree: &SearchState<W>, src: usize, dst: usize) -> Option<Vec<usize>>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    tree.costs[dst]?;
    let mut edges = Vec::new();
    let mut current = dst;
    while current != src {
        let edge = *tree.parents[current].first()?;
        edges.push(edge);
        current = graph.endpoints(edge).0;
        if edges.len() > graph.vertex_count() {
            return None;
        }
    }
    edges.reverse();
    Some(edges)
}

/// Walks from `src` to `dst` over edges still marked `used`, consuming them.
/// The lowest available edge is taken at every vertex.
fn extract_walk<V, E>(graph: &Graph<V, E>, used: &mut [bool], src: usize, dst: usize) -> Option<Vec<usize>>
where
    V: Vertex,
    E: Edge<V>,
{
    let mut walk = Vec::new();
    let mut current = src;
    while current != dst {
        let edge = graph.outgoing(current).iter().copied().find(|&e| used[e])?;
        used[edge] = false;
        walk.push(edge);
        current = graph.endpoints(edge).1;
    }
    Some(walk)
}

/// Cuts out every cycle of a walk, keeping it a simple path
pub(crate) fn remove_loops<V, E>(graph: &Graph<V, E>, src: usize, walk: &[usize]) -> Vec<usize>
where
    V: Vertex,
    E: Edge<V>,
{
    let mut vertices = vec![src];
    let mut edges: Vec<usize> = Vec::with_capacity(walk.len());
    for &edge in walk {
        let (_, v) = graph.endpoints(edge);
        match vertices.iter().position(|&seen| seen == v) {
            Some(at) => {
                vertices.truncate(at + 1);
                edges.truncate(at);
            }
            None => {
                vertices.push(v);
                edges.push(edge);
            }
        }
    }
    edges
}

pub(crate) fn build_path<V, E, W>(graph: &Graph<V, E>, weights: &[W], src: usize, edges: &[usize]) -> Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    let mut builder = PathBuilder::new(graph.vertex(src).clone());
    for &edge in edges {
        if let Err(err) = builder.push_back(graph.edge(edge).clone(), weights[edge]) {
            error!("disjoint path is not contiguous: {}", err);
            break;
        }
    }
    builder.build()
}

/// Turns an index-level pair into ranked paths: both when the pair exists,
/// the primary alone otherwise.
pub(crate) fn pair_paths<V, E, W>(
    graph: &Graph<V, E>,
    weights: &[W],
    src: usize,
    primary: Option<Vec<usize>>,
    secondary: Option<Vec<usize>>,
    disjointness: Disjointness,
) -> Vec<Path<V, E, W>>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    match (primary, secondary) {
        (Some(primary), Some(secondary)) => {
            let pair = DisjointPathPair::new(
                build_path(graph, weights, src, &primary),
                build_path(graph, weights, src, &secondary),
                disjointness,
            );
            let (primary, secondary) = pair.into_paths();
            vec![primary, secondary]
        }
        (Some(primary), None) => vec![build_path(graph, weights, src, &primary)],
        _ => Vec::new(),
    }
}
