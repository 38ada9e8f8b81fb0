use std::collections::BTreeMap;

use crate::graph::{Edge, EdgeWeigher, EdgeWeight, Graph, Path, PathBuilder, Vertex};
use crate::{Error, Result};

/// `max_paths` value requesting every path the search can produce
pub const ALL_PATHS: usize = usize::MAX;

/// Result of a path search
#[derive(Debug, Clone)]
pub struct SearchResult<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    /// Source vertex
    pub(crate) src: V,

    /// Destination vertex, if the search targeted one
    pub(crate) dst: Option<V>,

    /// Paths found, ranked ascending by cost
    pub(crate) paths: Vec<Path<V, E, W>>,

    /// Cost from the source to every reached vertex
    pub(crate) costs: BTreeMap<V, W>,

    /// Parent edges retained for every reached vertex other than the source
    pub(crate) parents: BTreeMap<V, Vec<E>>,
}

impl<V, E, W> SearchResult<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    pub fn src(&self) -> &V {
        &self.src
    }

    pub fn dst(&self) -> Option<&V> {
        self.dst.as_ref()
    }

    pub fn paths(&self) -> &[Path<V, E, W>] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<Path<V, E, W>> {
        self.paths
    }

    pub fn costs(&self) -> &BTreeMap<V, W> {
        &self.costs
    }

    pub fn parents(&self) -> &BTreeMap<V, Vec<E>> {
        &self.parents
    }

    /// Returns the cost to reach a vertex, `None` if it was not reached
    pub fn cost(&self, vertex: &V) -> Option<W> {
        self.costs.get(vertex).copied()
    }

    /// Returns true if the vertex was reached
    pub fn has_cost(&self, vertex: &V) -> bool {
        self.costs.contains_key(vertex)
    }

    /// Returns the best-ranked path ending at `vertex`
    pub fn path_to(&self, vertex: &V) -> Option<&Path<V, E, W>> {
        self.paths.iter().find(|p| p.dst() == vertex)
    }
}

/// Contract shared by every path search.
///
/// Given a graph, a source, an optional destination, a weigher and a bound on
/// the number of paths per destination, produce ranked paths plus per-vertex
/// cost and parent information.
pub trait GraphPathSearch<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    /// Searches `graph` from `src`, towards `dst` if given.
    ///
    /// Fails with `VertexNotFound` when `src` or `dst` is not in the graph.
    fn search(
        &self,
        graph: &Graph<V, E>,
        src: &V,
        dst: Option<&V>,
        weigher: &dyn EdgeWeigher<E, W>,
        max_paths: usize,
    ) -> Result<SearchResult<V, E, W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}

/// Per-vertex search state indexed by vertex position.
#[derive(Debug, Clone)]
pub(crate) struct SearchState<W> {
    pub costs: Vec<Option<W>>,
    pub parents: Vec<Vec<usize>>,
}

impl<W: EdgeWeight> SearchState<W> {
    pub fn new(vertex_count: usize) -> Self {
        SearchState {
            costs: vec![None; vertex_count],
            parents: vec![Vec::new(); vertex_count],
        }
    }

    /// Records `edge` as a way to reach `vertex` at `cost`.
    ///
    /// With `replace`, previously recorded parents are dropped first.
    pub fn update_vertex(&mut self, vertex: usize, edge: usize, cost: W, replace: bool) {
        self.costs[vertex] = Some(cost);
        if replace {
            self.parents[vertex].clear();
        }
        if !self.parents[vertex].contains(&edge) {
            self.parents[vertex].push(edge);
        }
    }

    /// Converts the index-level state into a caller-facing result.
    ///
    /// Paths are built towards `dst` only, bounded by `max_paths`. Without a
    /// destination one path is built per reached vertex other than the source;
    /// every equal-cost parent is still reported.
    pub fn into_result<V, E>(
        self,
        graph: &Graph<V, E>,
        src: usize,
        dst: Option<usize>,
        weights: &[W],
        max_paths: usize,
    ) -> SearchResult<V, E, W>
    where
        V: Vertex,
        E: Edge<V>,
    {
        let mut paths = Vec::new();
        match dst {
            Some(dst) => paths.extend(self.paths_to(graph, src, dst, weights, max_paths)),
            None => {
                let per_vertex = max_paths.min(1);
                for vertex in 0..graph.vertex_count() {
                    if vertex != src {
                        paths.extend(self.paths_to(graph, src, vertex, weights, per_vertex));
                    }
                }
            }
        }
        paths.sort();

        let costs = self
            .costs
            .iter()
            .enumerate()
            .filter_map(|(v, cost)| cost.map(|c| (graph.vertex(v).clone(), c)))
            .collect();
        let parents = self
            .parents
            .iter()
            .enumerate()
            .filter(|(_, edges)| !edges.is_empty())
            .map(|(v, edges)| {
                let mut edges: Vec<E> = edges.iter().map(|&e| graph.edge(e).clone()).collect();
                edges.sort();
                (graph.vertex(v).clone(), edges)
            })
            .collect();

        SearchResult {
            src: graph.vertex(src).clone(),
            dst: dst.map(|d| graph.vertex(d).clone()),
            paths,
            costs,
            parents,
        }
    }

    /// Enumerates up to `max_paths` loopless paths from `src` to `dst` through
    /// the parent graph, walking backwards from `dst`.
    pub fn paths_to<V, E>(
        &self,
        graph: &Graph<V, E>,
        src: usize,
        dst: usize,
        weights: &[W],
        max_paths: usize,
    ) -> Vec<Path<V, E, W>>
    where
        V: Vertex,
        E: Edge<V>,
    {
        if self.costs[dst].is_none() || max_paths == 0 {
            return Vec::new();
        }
        if src == dst {
            return vec![Path::empty(graph.vertex(src).clone())];
        }

        let mut found = Vec::new();
        let mut on_path = vec![false; graph.vertex_count()];
        let mut chain = Vec::new();
        on_path[dst] = true;
        self.collect_paths(graph, src, dst, weights, max_paths, &mut on_path, &mut chain, &mut found);
        found
    }

    #[allow(clippy::too_many_arguments)]
    fn collect_paths<V, E>(
        &self,
        graph: &Graph<V, E>,
        src: usize,
        current: usize,
        weights: &[W],
        max_paths: usize,
        on_path: &mut [bool],
        chain: &mut Vec<usize>,
        found: &mut Vec<Path<V, E, W>>,
    ) where
        V: Vertex,
        E: Edge<V>,
    {
        if current == src {
            // chain holds edges from the destination backwards
            let mut builder = PathBuilder::new(graph.vertex(src).clone());
            for &edge in chain.iter().rev() {
                if builder.push_back(graph.edge(edge).clone(), weights[edge]).is_err() {
                    return;
                }
            }
            found.push(builder.build());
            return;
        }

        let mut parents = self.parents[current].clone();
        parents.sort_unstable();
        for edge in parents {
            if found.len() >= max_paths {
                return;
            }
            let (prev, _) = graph.endpoints(edge);
            // zero-weight cycles in the parent graph would otherwise loop
            if on_path[prev] {
                continue;
            }
            on_path[prev] = true;
            chain.push(edge);
            self.collect_paths(graph, src, prev, weights, max_paths, on_path, chain, found);
            chain.pop();
            on_path[prev] = false;
        }
    }
}

/// Resolves the source and the optional destination to vertex positions
pub(crate) fn check_arguments<V, E>(
    graph: &Graph<V, E>,
    src: &V,
    dst: Option<&V>,
) -> Result<(usize, Option<usize>)>
where
    V: Vertex,
    E: Edge<V>,
{
    let src = graph.require_vertex(src)?;
    let dst = dst.map(|d| graph.require_vertex(d)).transpose()?;
    Ok((src, dst))
}

/// Evaluates the weigher once for every edge, in edge order.
///
/// Untraversable edges are reported as infinity regardless of the sentinel the
/// weigher uses.
pub(crate) fn edge_weights<V, E, W>(graph: &Graph<V, E>, weigher: &dyn EdgeWeigher<E, W>) -> Vec<W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    graph
        .edges()
        .iter()
        .map(|edge| {
            let weight = weigher.weight(edge);
            if weigher.is_viable(weight) || weight.is_nan() {
                weight
            } else {
                W::infinity()
            }
        })
        .collect()
}

/// Checks that a weight is usable by a search that forbids negative costs
pub(crate) fn require_non_negative<V, E, W>(graph: &Graph<V, E>, edge: usize, weight: W) -> Result<()>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    if weight.is_nan() || weight < W::zero() {
        return Err(invalid_weight(graph, edge, weight));
    }
    Ok(())
}

pub(crate) fn invalid_weight<V, E, W>(graph: &Graph<V, E>, edge: usize, weight: W) -> Error
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    Error::InvalidWeight {
        edge: format!("{:?}", graph.edge(edge)),
        weight: weight.to_f64().unwrap_or(f64::NAN),
    }
}
