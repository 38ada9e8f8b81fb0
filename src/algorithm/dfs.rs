use std::collections::BTreeMap;

use log::debug;

use crate::algorithm::traits::{check_arguments, edge_weights, GraphPathSearch, SearchResult, SearchState};
use crate::graph::{Edge, EdgeWeigher, EdgeWeight, Graph, Vertex};
use crate::Result;

/// Classification of an edge relative to the DFS spanning forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// Edge that discovered its destination
    Tree,
    /// Edge to an ancestor still on the DFS stack (closes a cycle)
    Back,
    /// Edge to an already finished descendant
    Forward,
    /// Any other edge, between unrelated subtrees or trees
    Cross,
}

/// Outcome of a depth-first traversal.
#[derive(Debug, Clone)]
pub struct DfsResult<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    /// Vertices in discovery order
    pub pre_order: Vec<V>,

    /// Vertices in finishing order
    pub post_order: Vec<V>,

    /// Roots of the trees of the spanning forest, in visiting order
    pub roots: Vec<V>,

    /// Classification of every traversed edge
    pub edge_types: BTreeMap<E, EdgeType>,

    /// Discovery and finish timestamps per vertex
    pub timestamps: BTreeMap<V, (usize, usize)>,
}

impl<V, E> DfsResult<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    /// Returns true if the traversal met a back edge
    pub fn has_cycle(&self) -> bool {
        self.edge_types.values().any(|t| *t == EdgeType::Back)
    }

    /// Tree edges of the spanning forest
    pub fn tree_edges(&self) -> impl Iterator<Item = &E> {
        self.edge_types
            .iter()
            .filter(|(_, t)| **t == EdgeType::Tree)
            .map(|(e, _)| e)
    }

    pub fn edge_type(&self, edge: &E) -> Option<EdgeType> {
        self.edge_types.get(edge).copied()
    }
}

/// Depth-first search producing a spanning forest and edge classification.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirstSearch;

impl DepthFirstSearch {
    pub fn new() -> Self {
        DepthFirstSearch
    }

    /// Traverses from `src`, or over the whole graph (roots in vertex order)
    /// when `src` is `None`. Untraversable edges are ignored.
    pub fn traverse<V, E, W>(
        &self,
        graph: &Graph<V, E>,
        src: Option<&V>,
        weigher: &dyn EdgeWeigher<E, W>,
    ) -> Result<DfsResult<V, E>>
    where
        V: Vertex,
        E: Edge<V>,
        W: EdgeWeight,
    {
        let roots: Vec<usize> = match src {
            Some(src) => vec![graph.require_vertex(src)?],
            None => (0..graph.vertex_count()).collect(),
        };
        let weights = edge_weights(graph, weigher);
        let walk = Walk::run(graph, &weights, &roots);
        Ok(walk.into_result(graph))
    }
}

impl<V, E, W> GraphPathSearch<V, E, W> for DepthFirstSearch
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn name(&self) -> &'static str {
        "DepthFirstSearch"
    }

    /// Paths follow the DFS spanning tree from `src`; costs are accumulated
    /// along tree edges and are not shortest-path costs.
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
        let walk = Walk::run(graph, &weights, &[src]);

        let mut state = SearchState::new(graph.vertex_count());
        state.costs[src] = Some(weigher.initial_weight());
        // discovery order guarantees a tree parent is costed before its children
        for &u in &walk.pre_order {
            if let Some(edge) = walk.tree_parent[u] {
                let (p, _) = graph.endpoints(edge);
                if let Some(cost) = state.costs[p] {
                    state.update_vertex(u, edge, cost + weights[edge], true);
                }
            }
        }

        debug!("DFS from {:?} visited {} vertices", graph.vertex(src), walk.pre_order.len());
        Ok(state.into_result(graph, src, dst, &weights, max_paths))
    }
}

/// Hooks called by [`Walk`] as the traversal progresses, by vertex and edge
/// position.
pub(crate) trait DfsVisitor {
    /// `vertex` was reached for the first time
    fn discover(&mut self, _vertex: usize) {}

    /// `edge` from `u` to `v` was examined and classified
    fn examine(&mut self, _edge: usize, _u: usize, _v: usize, _kind: EdgeType) {}

    /// Every edge out of `vertex` was examined; `parent` is its tree parent
    fn finish(&mut self, _vertex: usize, _parent: Option<usize>) {}
}

impl DfsVisitor for () {}

/// Index-level iterative DFS state
pub(crate) struct Walk {
    pub pre_order: Vec<usize>,
    pub post_order: Vec<usize>,
    pub roots: Vec<usize>,
    pub discovered: Vec<Option<usize>>,
    pub finished: Vec<Option<usize>>,
    pub tree_parent: Vec<Option<usize>>,
    pub edge_types: Vec<(usize, EdgeType)>,
}

impl Walk {
    pub fn run<V, E, W>(graph: &Graph<V, E>, weights: &[W], roots: &[usize]) -> Self
    where
        V: Vertex,
        E: Edge<V>,
        W: EdgeWeight,
    {
        Self::run_with(graph, weights, roots, &mut ())
    }

    /// Walks from each unvisited root in turn, skipping untraversable edges
    pub fn run_with<V, E, W, D>(graph: &Graph<V, E>, weights: &[W], roots: &[usize], visitor: &mut D) -> Self
    where
        V: Vertex,
        E: Edge<V>,
        W: EdgeWeight,
        D: DfsVisitor,
    {
        let n = graph.vertex_count();
        let mut walk = Walk {
            pre_order: Vec::new(),
            post_order: Vec::new(),
            roots: Vec::new(),
            discovered: vec![None; n],
            finished: vec![None; n],
            tree_parent: vec![None; n],
            edge_types: Vec::new(),
        };
        let mut clock = 0;

        for &root in roots {
            if walk.discovered[root].is_some() {
                continue;
            }
            walk.roots.push(root);
            walk.discovered[root] = Some(clock);
            clock += 1;
            walk.pre_order.push(root);
            visitor.discover(root);

            // (vertex, position of the next outgoing edge to examine)
            let mut stack = vec![(root, 0usize)];
            while let Some(top) = stack.last_mut() {
                let u = top.0;
                let outgoing = graph.outgoing(u);
                if top.1 == outgoing.len() {
                    stack.pop();
                    walk.finished[u] = Some(clock);
                    clock += 1;
                    walk.post_order.push(u);
                    visitor.finish(u, stack.last().map(|&(parent, _)| parent));
                    continue;
                }
                let edge = outgoing[top.1];
                top.1 += 1;
                if weights[edge].is_infinite() {
                    continue;
                }

                let (_, v) = graph.endpoints(edge);
                let kind = match (walk.discovered[v], walk.finished[v]) {
                    (None, _) => EdgeType::Tree,
                    (Some(_), None) => EdgeType::Back,
                    (Some(dv), Some(_)) if walk.discovered[u] < Some(dv) => EdgeType::Forward,
                    _ => EdgeType::Cross,
                };
                walk.edge_types.push((edge, kind));
                visitor.examine(edge, u, v, kind);

                if kind == EdgeType::Tree {
                    walk.discovered[v] = Some(clock);
                    clock += 1;
                    walk.tree_parent[v] = Some(edge);
                    walk.pre_order.push(v);
                    visitor.discover(v);
                    stack.push((v, 0));
                }
            }
        }

        walk
    }

    fn into_result<V, E>(self, graph: &Graph<V, E>) -> DfsResult<V, E>
    where
        V: Vertex,
        E: Edge<V>,
    {
        let vertex = |i: &usize| graph.vertex(*i).clone();
        let timestamps = (0..graph.vertex_count())
            .filter_map(|v| match (self.discovered[v], self.finished[v]) {
                (Some(d), Some(f)) => Some((graph.vertex(v).clone(), (d, f))),
                _ => None,
            })
            .collect();

        DfsResult {
            pre_order: self.pre_order.iter().map(vertex).collect(),
            post_order: self.post_order.iter().map(vertex).collect(),
            roots: self.roots.iter().map(vertex).collect(),
            edge_types: self
                .edge_types
                .iter()
                .map(|&(e, t)| (graph.edge(e).clone(), t))
                .collect(),
            timestamps,
        }
    }
}
