use log::debug;

use crate::algorithm::dfs::{DfsVisitor, EdgeType, Walk};
use crate::algorithm::traits::edge_weights;
use crate::graph::{Edge, EdgeWeigher, EdgeWeight, Graph, Vertex};

/// Partition of a graph into strongly connected components.
#[derive(Debug, Clone)]
pub struct SccResult<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    /// Vertices of each component, sorted
    components: Vec<Vec<V>>,

    /// Traversable edges with both endpoints inside each component
    component_edges: Vec<Vec<E>>,

    /// Component number of every vertex, by vertex position
    membership: Vec<usize>,

    /// Vertex positions, for lookups by identity
    lookup: std::collections::HashMap<V, usize>,

    has_self_loop: Vec<bool>,
}

impl<V, E> SccResult<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    /// Number of components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Vertices of every component, in emission order
    pub fn components(&self) -> &[Vec<V>] {
        &self.components
    }

    /// Internal edges of every component, aligned with `components`
    pub fn component_edges(&self) -> &[Vec<E>] {
        &self.component_edges
    }

    /// Component number of a vertex
    pub fn component_of(&self, vertex: &V) -> Option<usize> {
        self.lookup.get(vertex).map(|&i| self.membership[i])
    }

    /// Returns true if both vertices can reach each other
    pub fn same_component(&self, a: &V, b: &V) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }

    /// A graph is acyclic iff every component is a single vertex without a
    /// self-loop.
    pub fn is_acyclic(&self) -> bool {
        self.components.iter().all(|c| c.len() == 1) && !self.has_self_loop.iter().any(|&l| l)
    }
}

/// Tarjan's strongly connected components search.
#[derive(Debug, Default, Clone, Copy)]
pub struct TarjanScc;

impl TarjanScc {
    pub fn new() -> Self {
        TarjanScc
    }

    /// Computes the components of `graph`, ignoring untraversable edges.
    ///
    /// Components are emitted in reverse topological order of the condensed
    /// graph; traversal roots are taken in vertex order.
    pub fn search<V, E, W>(&self, graph: &Graph<V, E>, weigher: &dyn EdgeWeigher<E, W>) -> SccResult<V, E>
    where
        V: Vertex,
        E: Edge<V>,
        W: EdgeWeight,
    {
        let weights = edge_weights(graph, weigher);
        let n = graph.vertex_count();

        let roots: Vec<usize> = (0..n).collect();
        let mut low_links = LowLinks::new(n);
        Walk::run_with(graph, &weights, &roots, &mut low_links);
        let LowLinks {
            membership,
            components,
            ..
        } = low_links;

        let mut component_edges: Vec<Vec<E>> = vec![Vec::new(); components.len()];
        let mut has_self_loop = vec![false; components.len()];
        for (edge, weight) in weights.iter().enumerate() {
            if weight.is_infinite() {
                continue;
            }
            let (u, v) = graph.endpoints(edge);
            if membership[u] == membership[v] {
                component_edges[membership[u]].push(graph.edge(edge).clone());
                if u == v {
                    has_self_loop[membership[u]] = true;
                }
            }
        }

        debug!("Tarjan found {} components over {} vertices", components.len(), n);

        SccResult {
            components: components
                .into_iter()
                .map(|c| c.into_iter().map(|v| graph.vertex(v).clone()).collect())
                .collect(),
            component_edges,
            membership,
            lookup: graph
                .vertices()
                .iter()
                .enumerate()
                .map(|(i, v)| (v.clone(), i))
                .collect(),
            has_self_loop,
        }
    }
}

/// Low-link bookkeeping driven by the depth-first walk
struct LowLinks {
    index: Vec<usize>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    membership: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl LowLinks {
    fn new(n: usize) -> Self {
        LowLinks {
            index: vec![0; n],
            low_link: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
            membership: vec![usize::MAX; n],
            components: Vec::new(),
        }
    }
}

impl DfsVisitor for LowLinks {
    fn discover(&mut self, vertex: usize) {
        self.index[vertex] = self.next_index;
        self.low_link[vertex] = self.next_index;
        self.next_index += 1;
        self.stack.push(vertex);
        self.on_stack[vertex] = true;
    }

    fn examine(&mut self, _edge: usize, u: usize, v: usize, kind: EdgeType) {
        if kind != EdgeType::Tree && self.on_stack[v] {
            self.low_link[u] = self.low_link[u].min(self.index[v]);
        }
    }

    fn finish(&mut self, vertex: usize, parent: Option<usize>) {
        if let Some(parent) = parent {
            self.low_link[parent] = self.low_link[parent].min(self.low_link[vertex]);
        }
        if self.low_link[vertex] != self.index[vertex] {
            return;
        }

        let id = self.components.len();
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            self.membership[w] = id;
            component.push(w);
            if w == vertex {
                break;
            }
        }
        component.sort_unstable();
        self.components.push(component);
    }
}
