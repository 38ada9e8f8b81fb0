use std::collections::{BTreeSet, HashMap};

use crate::graph::traits::{Edge, Vertex};
use crate::{Error, Result};

/// An immutable directed multigraph snapshot with an adjacency index.
///
/// Vertices and edges are stored in their `Ord` order and addressed
/// internally by position, which keeps every search deterministic for
/// identical input.
#[derive(Debug, Clone)]
pub struct Graph<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    /// Sorted vertex set
    vertices: Vec<V>,

    /// vertex -> position in `vertices`
    index: HashMap<V, usize>,

    /// Sorted edge set
    edges: Vec<E>,

    /// edge position -> (source position, destination position)
    endpoints: Vec<(usize, usize)>,

    /// Outgoing edge positions for each vertex position
    outgoing: Vec<Vec<usize>>,

    /// Incoming edge positions for each vertex position
    incoming: Vec<Vec<usize>>,
}

impl<V, E> Graph<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    /// Builds a graph from a vertex set and an edge set.
    ///
    /// Fails with `MalformedGraph` if an edge references a vertex outside the
    /// vertex set. Duplicate vertices and edges are collapsed.
    pub fn new<I, J>(vertices: I, edges: J) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        J: IntoIterator<Item = E>,
    {
        let vertices: Vec<V> = vertices.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let edges: Vec<E> = edges.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

        let index: HashMap<V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();

        let mut endpoints = Vec::with_capacity(edges.len());
        let mut outgoing = vec![Vec::new(); vertices.len()];
        let mut incoming = vec![Vec::new(); vertices.len()];

        for (position, edge) in edges.iter().enumerate() {
            let lookup = |vertex: &V| {
                index.get(vertex).copied().ok_or_else(|| Error::MalformedGraph {
                    edge: format!("{:?}", edge),
                    vertex: format!("{:?}", vertex),
                })
            };
            let src = lookup(edge.src())?;
            let dst = lookup(edge.dst())?;

            endpoints.push((src, dst));
            outgoing[src].push(position);
            incoming[dst].push(position);
        }

        Ok(Graph {
            vertices,
            index,
            edges,
            endpoints,
            outgoing,
            incoming,
        })
    }

    /// Builds a graph whose vertex set is exactly the edge endpoints
    pub fn from_edges<J>(edges: J) -> Self
    where
        J: IntoIterator<Item = E>,
    {
        let edges: Vec<E> = edges.into_iter().collect();
        let vertices: Vec<V> = edges
            .iter()
            .flat_map(|e| [e.src().clone(), e.dst().clone()])
            .collect();

        match Self::new(vertices, edges) {
            Ok(graph) => graph,
            // Every endpoint was added to the vertex set above
            Err(_) => unreachable!("edge endpoints are always graph vertices"),
        }
    }

    /// Returns the number of vertices in the graph
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the vertices in ascending order
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Returns the edges in ascending order
    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    /// Returns true if the vertex exists in the graph
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Returns true if the edge exists in the graph
    pub fn contains_edge(&self, edge: &E) -> bool {
        self.edge_index(edge).is_some()
    }

    /// Returns the outgoing edges of a vertex, empty for unknown vertices
    pub fn edges_from<'a>(&'a self, vertex: &V) -> impl Iterator<Item = &'a E> + 'a {
        let positions: &'a [usize] = match self.index.get(vertex) {
            Some(&i) => &self.outgoing[i],
            None => &[],
        };
        positions.iter().map(move |&e| &self.edges[e])
    }

    /// Returns the incoming edges of a vertex, empty for unknown vertices
    pub fn edges_to<'a>(&'a self, vertex: &V) -> impl Iterator<Item = &'a E> + 'a {
        let positions: &'a [usize] = match self.index.get(vertex) {
            Some(&i) => &self.incoming[i],
            None => &[],
        };
        positions.iter().map(move |&e| &self.edges[e])
    }

    pub(crate) fn vertex_index(&self, vertex: &V) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    pub(crate) fn edge_index(&self, edge: &E) -> Option<usize> {
        self.edges.binary_search(edge).ok()
    }

    pub(crate) fn vertex(&self, index: usize) -> &V {
        &self.vertices[index]
    }

    pub(crate) fn edge(&self, index: usize) -> &E {
        &self.edges[index]
    }

    /// (source, destination) vertex positions of an edge
    pub(crate) fn endpoints(&self, edge: usize) -> (usize, usize) {
        self.endpoints[edge]
    }

    pub(crate) fn outgoing(&self, vertex: usize) -> &[usize] {
        &self.outgoing[vertex]
    }

    /// Resolves a vertex to its position or fails with `VertexNotFound`
    pub(crate) fn require_vertex(&self, vertex: &V) -> Result<usize> {
        self.vertex_index(vertex)
            .ok_or_else(|| Error::VertexNotFound(format!("{:?}", vertex)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DefaultEdge;

    fn edge(src: &'static str, dst: &'static str) -> DefaultEdge<&'static str> {
        DefaultEdge::new(src, dst)
    }

    #[test]
    fn test_adjacency_index() {
        let graph = Graph::new(
            ["A", "B", "C"],
            [edge("A", "B"), edge("A", "C"), edge("B", "C")],
        )
        .unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edges_from(&"A").count(), 2);
        assert_eq!(graph.edges_to(&"C").count(), 2);
        assert_eq!(graph.edges_from(&"C").count(), 0);
        assert_eq!(graph.edges_from(&"Z").count(), 0);
    }

    #[test]
    fn test_malformed_graph_rejected() {
        let result = Graph::new(["A", "B"], [edge("A", "B"), edge("B", "X")]);
        match result {
            Err(Error::MalformedGraph { vertex, .. }) => assert_eq!(vertex, "\"X\""),
            other => panic!("expected MalformedGraph, got {:?}", other),
        }
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let graph = Graph::from_edges([
            DefaultEdge::with_key("A", "B", 0),
            DefaultEdge::with_key("A", "B", 1),
            DefaultEdge::with_key("A", "B", 1),
        ]);

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(&DefaultEdge::with_key("A", "B", 1)));
        assert!(!graph.contains_edge(&DefaultEdge::with_key("B", "A", 1)));
    }
}
