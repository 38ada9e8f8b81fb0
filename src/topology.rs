//! Path services over a topology snapshot.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

use log::debug;
use rayon::prelude::*;

use crate::algorithm::dijkstra::{shortest_path_tree, SearchMask};
use crate::algorithm::tarjan::SccResult;
use crate::algorithm::GraphPathSearch;
use crate::config::SearchConfig;
use crate::graph::{
    DisjointPathPair, Edge, EdgeWeigher, EdgeWeight, Graph, HopCountWeigher, Path, RiskProfile, Vertex,
};
use crate::{
    Cost, Dijkstra, Error, KShortestPaths, LazyKShortestPaths, Result, SearchResult, SrlgGraphSearch, Suurballe,
    TarjanScc,
};

/// Path queries against one immutable topology snapshot.
///
/// Queries naming a vertex outside the snapshot answer with no paths instead
/// of failing. Clusters (strongly connected components) are computed on first
/// use and shared by every later query.
pub struct TopologyPaths<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    graph: Arc<Graph<V, E>>,
    config: SearchConfig,
    clusters: OnceLock<SccResult<V, E>>,
}

impl<V, E> TopologyPaths<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    pub fn new(graph: Arc<Graph<V, E>>, config: SearchConfig) -> Self {
        TopologyPaths {
            graph,
            config,
            clusters: OnceLock::new(),
        }
    }

    pub fn from_graph(graph: Graph<V, E>) -> Self {
        Self::new(Arc::new(graph), SearchConfig::default())
    }

    pub fn graph(&self) -> &Arc<Graph<V, E>> {
        &self.graph
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn snapshot(&self) -> &Graph<V, E> {
        &self.graph
    }

    fn covers(&self, src: &V, dst: &V) -> bool {
        self.graph.contains_vertex(src) && self.graph.contains_vertex(dst)
    }

    /// Shortest paths from `src` to `dst` using the configured algorithm
    pub fn paths<W: EdgeWeight>(&self, src: &V, dst: &V, weigher: &dyn EdgeWeigher<E, W>) -> Result<Vec<Path<V, E, W>>> {
        if !self.covers(src, dst) {
            return Ok(Vec::new());
        }
        let search = self.config.algorithm.searcher::<V, E, W>();
        let result = search.search(self.snapshot(), src, Some(dst), weigher, self.config.path_bound())?;
        Ok(result.into_paths())
    }

    /// Up to `k` shortest loopless paths; the configured K when `k` is `None`
    pub fn k_shortest_paths<W: EdgeWeight>(
        &self,
        src: &V,
        dst: &V,
        weigher: &dyn EdgeWeigher<E, W>,
        k: Option<usize>,
    ) -> Result<Vec<Path<V, E, W>>> {
        if !self.covers(src, dst) {
            return Ok(Vec::new());
        }
        let k = k.unwrap_or(self.config.k);
        let result = KShortestPaths::new().search(self.snapshot(), src, Some(dst), weigher, k)?;
        Ok(result.into_paths())
    }

    /// Lazily enumerated shortest loopless paths
    pub fn lazy_k_shortest_paths<'a, W: EdgeWeight>(
        &'a self,
        src: &V,
        dst: &V,
        weigher: &dyn EdgeWeigher<E, W>,
    ) -> Result<Option<LazyKShortestPaths<'a, V, E, W>>> {
        if !self.covers(src, dst) {
            return Ok(None);
        }
        LazyKShortestPaths::new(self.snapshot(), src, dst, weigher).map(Some)
    }

    /// Cheapest edge-disjoint pair, `None` when there is none
    pub fn disjoint_paths<W: EdgeWeight>(
        &self,
        src: &V,
        dst: &V,
        weigher: &dyn EdgeWeigher<E, W>,
    ) -> Result<Option<DisjointPathPair<V, E, W>>> {
        if !self.covers(src, dst) {
            return Ok(None);
        }
        unavailable_as_none(Suurballe::new().find_pair(self.snapshot(), src, dst, weigher))
    }

    /// Cheapest SRLG-disjoint pair, `None` when there is none
    pub fn srlg_disjoint_paths<W, G>(
        &self,
        src: &V,
        dst: &V,
        weigher: &dyn EdgeWeigher<E, W>,
        risk: &RiskProfile<E, G>,
    ) -> Result<Option<DisjointPathPair<V, E, W>>>
    where
        W: EdgeWeight,
        G: Ord + Clone + Debug,
    {
        if !self.covers(src, dst) {
            return Ok(None);
        }
        let search = SrlgGraphSearch::new(risk.clone()).with_max_candidates(self.config.srlg_max_candidates);
        unavailable_as_none(search.find_pair(self.snapshot(), src, dst, weigher))
    }

    /// Strongly connected components of the snapshot
    pub fn clusters(&self) -> &SccResult<V, E> {
        self.clusters.get_or_init(|| {
            let clusters = TarjanScc::new().search::<V, E, Cost>(self.snapshot(), &HopCountWeigher);
            debug!("topology has {} clusters", clusters.component_count());
            clusters
        })
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters().component_count()
    }

    pub fn cluster_of(&self, vertex: &V) -> Option<usize> {
        self.clusters().component_of(vertex)
    }

    /// Lowest vertex of a cluster
    pub fn cluster_root(&self, cluster: usize) -> Option<&V> {
        self.clusters().components().get(cluster)?.first()
    }

    /// Edges of the minimum-hop tree spanning a cluster from its root.
    ///
    /// Only edges with both endpoints in the cluster are used. Returns an
    /// empty set for an unknown cluster.
    pub fn broadcast_tree(&self, cluster: usize) -> Vec<E> {
        let root = match self.cluster_root(cluster).and_then(|r| self.graph.vertex_index(r)) {
            Some(root) => root,
            None => return Vec::new(),
        };

        let mut mask = SearchMask::open(self.snapshot());
        for (position, vertex) in self.graph.vertices().iter().enumerate() {
            mask.vertices[position] = self.cluster_of(vertex) != Some(cluster);
        }
        let hops: Vec<Cost> = vec![Cost::from(1.0); self.graph.edge_count()];
        let tree = match shortest_path_tree(self.snapshot(), &hops, root, None, Cost::from(0.0), false, &mask) {
            Ok(tree) => tree,
            Err(_) => return Vec::new(),
        };

        let mut edges: Vec<E> = tree
            .parents
            .iter()
            .filter_map(|parents| parents.first())
            .map(|&e| self.graph.edge(e).clone())
            .collect();
        edges.sort();
        edges
    }
}

impl<V, E> TopologyPaths<V, E>
where
    V: Vertex + Send + Sync,
    E: Edge<V> + Send + Sync,
{
    /// Runs one Dijkstra search per vertex, in parallel
    pub fn shortest_paths_from_all<W: EdgeWeight>(
        &self,
        weigher: &(dyn EdgeWeigher<E, W> + Sync),
    ) -> Result<BTreeMap<V, SearchResult<V, E, W>>> {
        let max_paths = self.config.path_bound();
        self.graph
            .vertices()
            .par_iter()
            .map(|src| {
                let result = Dijkstra::new().search(self.snapshot(), src, None, weigher, max_paths)?;
                Ok((src.clone(), result))
            })
            .collect()
    }
}

fn unavailable_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::DisjointPairUnavailable) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DefaultEdge;
    use ordered_float::OrderedFloat;

    type E = DefaultEdge<&'static str>;

    fn two_islands() -> TopologyPaths<&'static str, E> {
        let graph = Graph::from_edges(vec![
            DefaultEdge::new("A", "B"),
            DefaultEdge::new("B", "C"),
            DefaultEdge::new("C", "A"),
            DefaultEdge::new("A", "C"),
            DefaultEdge::new("C", "D"),
            DefaultEdge::new("D", "E"),
            DefaultEdge::new("E", "D"),
        ]);
        TopologyPaths::from_graph(graph)
    }

    fn unit(_: &E) -> Cost {
        OrderedFloat(1.0)
    }

    #[test]
    fn test_absent_vertex_yields_nothing() {
        let topology = two_islands();
        assert!(topology.paths(&"A", &"Z", &unit).unwrap().is_empty());
        assert!(topology.k_shortest_paths(&"Z", &"A", &unit, None).unwrap().is_empty());
        assert!(topology.lazy_k_shortest_paths(&"A", &"Z", &unit).unwrap().is_none());
        assert!(topology.disjoint_paths(&"A", &"Z", &unit).unwrap().is_none());
    }

    #[test]
    fn test_clusters() {
        let topology = two_islands();
        assert_eq!(topology.cluster_count(), 2);
        assert_eq!(topology.cluster_of(&"A"), topology.cluster_of(&"C"));
        assert_ne!(topology.cluster_of(&"A"), topology.cluster_of(&"D"));

        let cluster = topology.cluster_of(&"B").unwrap();
        assert_eq!(topology.cluster_root(cluster), Some(&"A"));
        assert_eq!(
            topology.broadcast_tree(cluster),
            vec![DefaultEdge::new("A", "B"), DefaultEdge::new("A", "C")]
        );
    }

    #[test]
    fn test_disjoint_pair_missing_is_none() {
        let topology = two_islands();
        // C->D is a bridge
        assert!(topology.disjoint_paths(&"A", &"E", &unit).unwrap().is_none());
        assert!(topology.disjoint_paths(&"A", &"C", &unit).unwrap().is_some());
    }

    #[test]
    fn test_shortest_paths_from_all() {
        let topology = two_islands();
        let all = topology.shortest_paths_from_all(&unit).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[&"A"].cost(&"E"), Some(OrderedFloat(3.0)));
        assert_eq!(all[&"E"].cost(&"A"), None);
    }
}
