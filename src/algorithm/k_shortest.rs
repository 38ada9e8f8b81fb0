use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::FusedIterator;

use log::{debug, error, trace};

use crate::algorithm::dijkstra::{shortest_path_tree, SearchMask};
use crate::algorithm::traits::{
    edge_weights, require_non_negative, GraphPathSearch, SearchResult, ALL_PATHS,
};
use crate::data_structures::Heap;
use crate::graph::{Edge, EdgeWeigher, EdgeWeight, Graph, Path, PathBuilder, Vertex};
use crate::{Error, Result};

type CandidateRank<W> = (W, usize);
type CandidatePool<W> = Heap<Vec<usize>, CandidateRank<W>, fn(&CandidateRank<W>, &CandidateRank<W>) -> Ordering>;

/// Eager k-shortest loopless paths (Yen's deviation search).
///
/// `max_paths` is K; the result holds at most K paths ranked by cost, then
/// hop count, then edge sequence. Fewer paths are returned when fewer exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct KShortestPaths;

impl KShortestPaths {
    pub fn new() -> Self {
        KShortestPaths
    }
}

impl<V, E, W> GraphPathSearch<V, E, W> for KShortestPaths
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn name(&self) -> &'static str {
        "KShortestPaths"
    }

    fn search(
        &self,
        graph: &Graph<V, E>,
        src: &V,
        dst: Option<&V>,
        weigher: &dyn EdgeWeigher<E, W>,
        max_paths: usize,
    ) -> Result<SearchResult<V, E, W>> {
        let dst = dst.ok_or(Error::MissingDestination)?;
        let lazy = LazyKShortestPaths::new(graph, src, dst, weigher)?;
        let paths: Vec<Path<V, E, W>> = if max_paths == ALL_PATHS {
            lazy.collect()
        } else {
            lazy.take(max_paths).collect()
        };

        debug!("k-shortest from {:?} to {:?} found {} paths", src, dst, paths.len());

        let mut costs = BTreeMap::new();
        costs.insert(src.clone(), weigher.initial_weight());
        let mut parents: BTreeMap<V, Vec<E>> = BTreeMap::new();
        if let Some(best) = paths.first() {
            costs.insert(dst.clone(), best.cost());
        }
        for path in &paths {
            if let Some(last) = path.edges().last() {
                let entry = parents.entry(dst.clone()).or_default();
                if !entry.contains(last) {
                    entry.push(last.clone());
                }
            }
        }

        Ok(SearchResult {
            src: src.clone(),
            dst: Some(dst.clone()),
            paths,
            costs,
            parents,
        })
    }
}

/// Lazy k-shortest loopless paths, produced on demand.
///
/// Each call to `next` performs only the deviations of the previously
/// returned path and pops the cheapest remaining candidate. The sequence is
/// single-pass: it owns and consumes its candidate pool, cannot be cloned and
/// stays exhausted once it returns `None`.
pub struct LazyKShortestPaths<'a, V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    graph: &'a Graph<V, E>,
    weights: Vec<W>,
    src: usize,
    dst: usize,

    /// Edge positions of every path returned so far
    accepted: Vec<Vec<usize>>,

    candidates: CandidatePool<W>,
    started: bool,
    exhausted: bool,
}

impl<'a, V, E, W> LazyKShortestPaths<'a, V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    /// Prepares a lazy search from `src` to `dst`.
    ///
    /// Weights of edges reachable from `src` are checked up front; a negative
    /// or NaN weight fails with `InvalidWeight`.
    pub fn new(
        graph: &'a Graph<V, E>,
        src: &V,
        dst: &V,
        weigher: &dyn EdgeWeigher<E, W>,
    ) -> Result<Self> {
        let (src, dst) = (graph.require_vertex(src)?, graph.require_vertex(dst)?);
        let weights = edge_weights(graph, weigher);
        Self::with_weights(graph, weights, src, dst)
    }

    pub(crate) fn with_weights(graph: &'a Graph<V, E>, weights: Vec<W>, src: usize, dst: usize) -> Result<Self> {
        validate_reachable(graph, &weights, src)?;
        Ok(LazyKShortestPaths {
            graph,
            weights,
            src,
            dst,
            accepted: Vec::new(),
            candidates: Heap::natural(),
            started: false,
            exhausted: false,
        })
    }

    /// Number of paths produced so far
    pub fn produced(&self) -> usize {
        self.accepted.len()
    }

    /// Number of candidates waiting in the pool
    pub fn pending(&self) -> usize {
        self.candidates.len()
    }

    /// Produces the next path as edge positions plus cost
    pub(crate) fn next_edges(&mut self) -> Option<(Vec<usize>, W)> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
            if self.src == self.dst {
                self.exhausted = true;
                return Some((Vec::new(), W::zero()));
            }
            let mask = SearchMask::open(self.graph);
            if let Some(first) = self.spur_path(self.src, &mask) {
                let rank = self.rank(&first);
                self.candidates.insert(first, rank);
            }
        } else if let Err(err) = self.deviate_from_last() {
            error!("k-shortest deviation failed: {}", err);
            self.exhausted = true;
            return None;
        }

        match self.candidates.extract_min() {
            Some((edges, (cost, _))) => {
                trace!("accepted path #{} with cost {:?}", self.accepted.len() + 1, cost);
                self.accepted.push(edges.clone());
                Some((edges, cost))
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    /// Pushes every deviation of the last accepted path into the pool
    fn deviate_from_last(&mut self) -> Result<()> {
        let last = match self.accepted.last() {
            Some(last) => last.clone(),
            None => return Ok(()),
        };
        let vertices: Vec<usize> = std::iter::once(self.src)
            .chain(last.iter().map(|&e| self.graph.endpoints(e).1))
            .collect();

        for i in 0..last.len() {
            let spur = vertices[i];
            let root = &last[..i];

            let mut mask = SearchMask::open(self.graph);
            // leave the spur through an edge no accepted path with this root used
            for path in &self.accepted {
                if path.len() > i && path[..i] == *root {
                    mask.edges[path[i]] = true;
                }
            }
            // keep the spliced path loopless
            for &v in &vertices[..i] {
                mask.vertices[v] = true;
            }

            if let Some(spur_edges) = self.spur_path_checked(spur, &mask)? {
                let mut total = root.to_vec();
                total.extend(spur_edges);
                if !self.accepted.contains(&total) {
                    let rank = self.rank(&total);
                    trace!("deviation at hop {} yields candidate with cost {:?}", i, rank.0);
                    self.candidates.insert(total, rank);
                }
            }
        }
        Ok(())
    }

    fn spur_path(&self, from: usize, mask: &SearchMask) -> Option<Vec<usize>> {
        match self.spur_path_checked(from, mask) {
            Ok(path) => path,
            Err(err) => {
                error!("k-shortest spur search failed: {}", err);
                None
            }
        }
    }

    /// Shortest path from `from` to the destination avoiding `mask`
    fn spur_path_checked(&self, from: usize, mask: &SearchMask) -> Result<Option<Vec<usize>>> {
        let tree = shortest_path_tree(self.graph, &self.weights, from, Some(self.dst), W::zero(), false, mask)?;
        if tree.costs[self.dst].is_none() {
            return Ok(None);
        }
        let mut edges = Vec::new();
        let mut current = self.dst;
        while current != from {
            let edge = match tree.parents[current].first() {
                Some(&edge) => edge,
                None => return Ok(None),
            };
            edges.push(edge);
            current = self.graph.endpoints(edge).0;
        }
        edges.reverse();
        Ok(Some(edges))
    }

    fn rank(&self, edges: &[usize]) -> CandidateRank<W> {
        let cost = edges.iter().fold(W::zero(), |acc, &e| acc + self.weights[e]);
        (cost, edges.len())
    }

    fn build(&self, edges: &[usize], cost: W) -> Path<V, E, W> {
        let mut builder = PathBuilder::new(self.graph.vertex(self.src).clone());
        for &edge in edges {
            if let Err(err) = builder.push_back(self.graph.edge(edge).clone(), self.weights[edge]) {
                error!("k-shortest produced a broken chain: {}", err);
                break;
            }
        }
        builder.with_cost(cost).build()
    }
}

impl<'a, V, E, W> Iterator for LazyKShortestPaths<'a, V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    type Item = Path<V, E, W>;

    fn next(&mut self) -> Option<Self::Item> {
        let (edges, cost) = self.next_edges()?;
        Some(self.build(&edges, cost))
    }
}

impl<'a, V, E, W> FusedIterator for LazyKShortestPaths<'a, V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
}

/// Rejects negative or NaN weights on any edge reachable from `src`
fn validate_reachable<V, E, W>(graph: &Graph<V, E>, weights: &[W], src: usize) -> Result<()>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    let mut seen = vec![false; graph.vertex_count()];
    let mut stack = vec![src];
    seen[src] = true;
    while let Some(u) = stack.pop() {
        for &edge in graph.outgoing(u) {
            let weight = weights[edge];
            if weight.is_infinite() && weight > W::zero() {
                continue;
            }
            require_non_negative(graph, edge, weight)?;
            let (_, v) = graph.endpoints(edge);
            if !seen[v] {
                seen[v] = true;
                stack.push(v);
            }
        }
    }
    Ok(())
}
