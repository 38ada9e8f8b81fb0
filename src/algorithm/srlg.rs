use std::collections::BTreeSet;
use std::fmt::Debug;

use log::{debug, trace, warn};

use crate::algorithm::dijkstra::{shortest_path_tree, SearchMask};
use crate::algorithm::k_shortest::LazyKShortestPaths;
use crate::algorithm::suurballe::{build_path, disjoint_pair, pair_paths, tree_path};
use crate::algorithm::traits::{edge_weights, GraphPathSearch, SearchResult};
use crate::graph::{DisjointPathPair, Disjointness, Edge, EdgeWeigher, EdgeWeight, Graph, RiskProfile, Vertex};
use crate::{Error, Result};

/// Default bound on the primaries examined by the fallback search
pub const DEFAULT_MAX_CANDIDATES: usize = 64;

/// Disjoint pair search honouring shared-risk link groups.
///
/// Two paths are SRLG-disjoint when they share no edge and no edge of one
/// belongs to a group of an edge of the other. The Suurballe pair is tried
/// first and kept when it already qualifies. Otherwise primaries are drawn
/// in cost order from a lazy k-shortest enumeration and each is paired with
/// the cheapest path avoiding its edges and groups; the enumeration stops as
/// soon as twice the primary cost reaches the best pair found, which makes
/// the result optimal, or after `max_candidates` primaries.
#[derive(Debug, Clone)]
pub struct SrlgGraphSearch<E, G = u32>
where
    E: Eq + std::hash::Hash,
    G: Ord,
{
    risk: RiskProfile<E, G>,
    max_candidates: usize,
}

impl<E, G> SrlgGraphSearch<E, G>
where
    E: Eq + std::hash::Hash + Clone,
    G: Ord + Clone + Debug,
{
    pub fn new(risk: RiskProfile<E, G>) -> Self {
        SrlgGraphSearch {
            risk,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// Bounds the number of primaries the fallback search examines
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    pub fn risk(&self) -> &RiskProfile<E, G> {
        &self.risk
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Returns the cheapest SRLG-disjoint pair from `src` to `dst`.
    ///
    /// Fails with `DisjointPairUnavailable` when no such pair was found.
    pub fn find_pair<V, W>(
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
        let (src, dst) = (graph.require_vertex(src)?, graph.require_vertex(dst)?);
        let weights = edge_weights(graph, weigher);
        match self.search_pair(graph, &weights, src, dst)? {
            (Some(primary), Some(secondary)) => Ok(DisjointPathPair::new(
                build_path(graph, &weights, src, &primary),
                build_path(graph, &weights, src, &secondary),
                Disjointness::Srlg,
            )),
            _ => Err(Error::DisjointPairUnavailable),
        }
    }

    /// Index-level search; returns (shortest or primary, secondary)
    fn search_pair<V, W>(
        &self,
        graph: &Graph<V, E>,
        weights: &[W],
        src: usize,
        dst: usize,
    ) -> Result<(Option<Vec<usize>>, Option<Vec<usize>>)>
    where
        V: Vertex,
        E: Edge<V>,
        W: EdgeWeight,
    {
        let outcome = disjoint_pair(graph, weights, src, dst)?;
        let shortest = tree_path(graph, &outcome.tree, src, dst);
        let (primary, secondary) = match (outcome.primary, outcome.secondary) {
            (Some(p), Some(s)) => (p, s),
            // no edge-disjoint pair means no SRLG-disjoint pair either
            _ => return Ok((shortest, None)),
        };
        if self.compatible(graph, &primary, &secondary) {
            trace!("Suurballe pair is already SRLG-disjoint");
            return Ok((Some(primary), Some(secondary)));
        }

        let cost = |edges: &[usize]| edges.iter().fold(W::zero(), |acc, &e| acc + weights[e]);
        let mut lazy = LazyKShortestPaths::with_weights(graph, weights.to_vec(), src, dst)?;
        let mut best: Option<(W, Vec<usize>, Vec<usize>)> = None;
        let mut proven = false;

        for _ in 0..self.max_candidates {
            let (candidate, candidate_cost) = match lazy.next_edges() {
                Some(next) => next,
                None => {
                    proven = true;
                    break;
                }
            };
            if let Some((best_cost, _, _)) = &best {
                if candidate_cost + candidate_cost >= *best_cost {
                    proven = true;
                    break;
                }
            }

            let mask = self.risk_mask(graph, &candidate);
            let tree = shortest_path_tree(graph, weights, src, Some(dst), W::zero(), false, &mask)?;
            if let Some(partner) = tree_path(graph, &tree, src, dst) {
                let total = candidate_cost + cost(&partner);
                if best.as_ref().map_or(true, |(best_cost, _, _)| total < *best_cost) {
                    trace!("SRLG candidate pair with cost {:?}", total);
                    best = Some((total, candidate, partner));
                }
            }
        }

        if !proven {
            warn!(
                "SRLG search stopped after {} candidates; the pair found may not be optimal",
                self.max_candidates
            );
        }

        match best {
            Some((total, first, second)) => {
                debug!("SRLG pair found with cost {:?}", total);
                Ok((Some(first), Some(second)))
            }
            None => {
                debug!("no SRLG-disjoint pair between {:?} and {:?}", graph.vertex(src), graph.vertex(dst));
                Ok((shortest, None))
            }
        }
    }

    /// Blocks the edges of `path` and every edge sharing a group with them
    fn risk_mask<V>(&self, graph: &Graph<V, E>, path: &[usize]) -> SearchMask
    where
        V: Vertex,
        E: Edge<V>,
    {
        let mut mask = SearchMask::open(graph);
        let groups: BTreeSet<G> = self.risk.groups_of_all(path.iter().map(|&e| graph.edge(e)));
        for &edge in path {
            mask.edges[edge] = true;
        }
        if !groups.is_empty() {
            for (edge, candidate) in graph.edges().iter().enumerate() {
                if self.risk.touches(candidate, &groups) {
                    mask.edges[edge] = true;
                }
            }
        }
        mask
    }

    /// Returns true if the two paths share no edge and no risk group
    fn compatible<V>(&self, graph: &Graph<V, E>, a: &[usize], b: &[usize]) -> bool
    where
        V: Vertex,
        E: Edge<V>,
    {
        if a.iter().any(|e| b.contains(e)) {
            return false;
        }
        let groups_a = self.risk.groups_of_all(a.iter().map(|&e| graph.edge(e)));
        let groups_b = self.risk.groups_of_all(b.iter().map(|&e| graph.edge(e)));
        groups_a.is_disjoint(&groups_b)
    }
}

impl<V, E, W, G> GraphPathSearch<V, E, W> for SrlgGraphSearch<E, G>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
    G: Ord + Clone + Debug,
{
    fn name(&self) -> &'static str {
        "SrlgGraphSearch"
    }

    /// Returns the SRLG-disjoint pair, primary first, or only the shortest
    /// path when no such pair exists.
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

        let (primary, secondary) = self.search_pair(graph, &weights, src, dst)?;
        let paths = pair_paths(graph, &weights, src, primary, secondary, Disjointness::Srlg);

        let tree = shortest_path_tree(graph, &weights, src, None, W::zero(), false, &SearchMask::open(graph))?;
        let mut result = tree.into_result(graph, src, Some(dst), &weights, 0);
        result.paths = paths.into_iter().take(max_paths).collect();
        Ok(result)
    }
}
