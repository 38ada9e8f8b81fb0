use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use crate::graph::traits::{Edge, EdgeWeight, Vertex};
use crate::{Error, Result};

/// A contiguous chain of edges from `src` to `dst` with its total cost.
///
/// A path without edges is the degenerate path from a vertex to itself and
/// costs zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<V, E, W> {
    src: V,
    dst: V,
    edges: Vec<E>,
    cost: W,
}

impl<V, E, W> Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    /// Creates the zero-cost path that stays at `vertex`
    pub fn empty(vertex: V) -> Self {
        Path {
            src: vertex.clone(),
            dst: vertex,
            edges: Vec::new(),
            cost: W::zero(),
        }
    }

    /// Builds a path from a non-empty edge chain and its precomputed cost
    pub fn from_edges(edges: Vec<E>, cost: W) -> Result<Self> {
        let mut builder: Option<PathBuilder<V, E, W>> = None;
        for edge in edges {
            let builder = builder.get_or_insert_with(|| PathBuilder::new(edge.src().clone()));
            builder.push_back(edge, W::zero())?;
        }
        match builder {
            Some(builder) => Ok(builder.with_cost(cost).build()),
            None => Err(Error::NonContiguousPath {
                at: "<empty>".to_string(),
                edge: "<none>".to_string(),
            }),
        }
    }

    pub fn src(&self) -> &V {
        &self.src
    }

    pub fn dst(&self) -> &V {
        &self.dst
    }

    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    pub fn cost(&self) -> W {
        self.cost
    }

    /// Number of edges on the path
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the vertices visited, in order, starting with `src`
    pub fn vertices(&self) -> Vec<&V> {
        std::iter::once(&self.src)
            .chain(self.edges.iter().map(|e| e.dst()))
            .collect()
    }

    /// Returns true if no vertex is visited twice
    pub fn is_loopless(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.vertices().into_iter().all(|v| seen.insert(v))
    }

    /// Returns true if the path shares at least one edge with `other`
    pub fn shares_edge_with(&self, other: &Path<V, E, W>) -> bool {
        self.edges.iter().any(|e| other.edges.contains(e))
    }
}

impl<V, E, W> PartialOrd for Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Paths rank by cost, then hop count, then endpoints and edge sequence.
impl<V, E, W> Ord for Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.edges.len().cmp(&other.edges.len()))
            .then_with(|| self.src.cmp(&other.src))
            .then_with(|| self.dst.cmp(&other.dst))
            .then_with(|| self.edges.cmp(&other.edges))
    }
}

impl<V, E, W> fmt::Display for Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hops: Vec<String> = self.vertices().iter().map(|v| format!("{:?}", v)).collect();
        write!(f, "{} (cost {:?})", hops.join(" -> "), self.cost)
    }
}

/// Mutable path under construction.
///
/// Searches that walk parent pointers backwards from a destination grow the
/// path at the front; forward walks grow it at the back. Each push adds the
/// edge weight to the running cost.
#[derive(Debug, Clone)]
pub struct PathBuilder<V, E, W> {
    src: V,
    dst: V,
    edges: VecDeque<E>,
    cost: W,
}

impl<V, E, W> PathBuilder<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    /// Starts an empty path anchored at `vertex`
    pub fn new(vertex: V) -> Self {
        PathBuilder {
            src: vertex.clone(),
            dst: vertex,
            edges: VecDeque::new(),
            cost: W::zero(),
        }
    }

    /// Appends an edge that must leave the current end of the path
    pub fn push_back(&mut self, edge: E, weight: W) -> Result<&mut Self> {
        if edge.src() != &self.dst {
            return Err(Error::NonContiguousPath {
                at: format!("{:?}", self.dst),
                edge: format!("{:?}", edge),
            });
        }
        self.dst = edge.dst().clone();
        self.edges.push_back(edge);
        self.cost = self.cost + weight;
        Ok(self)
    }

    /// Prepends an edge that must enter the current start of the path
    pub fn push_front(&mut self, edge: E, weight: W) -> Result<&mut Self> {
        if edge.dst() != &self.src {
            return Err(Error::NonContiguousPath {
                at: format!("{:?}", self.src),
                edge: format!("{:?}", edge),
            });
        }
        self.src = edge.src().clone();
        self.edges.push_front(edge);
        self.cost = self.cost + weight;
        Ok(self)
    }

    /// Overrides the accumulated cost
    pub fn with_cost(mut self, cost: W) -> Self {
        self.cost = cost;
        self
    }

    pub fn src(&self) -> &V {
        &self.src
    }

    pub fn dst(&self) -> &V {
        &self.dst
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Freezes the builder into an immutable path
    pub fn build(self) -> Path<V, E, W> {
        Path {
            src: self.src,
            dst: self.dst,
            edges: self.edges.into(),
            cost: self.cost,
        }
    }
}

/// Criterion under which the two paths of a pair are disjoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disjointness {
    /// The paths share no edge
    Edge,
    /// The paths share no edge and no shared-risk link group
    Srlg,
}

/// A primary/secondary path pair between the same endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointPathPair<V, E, W> {
    primary: Path<V, E, W>,
    secondary: Path<V, E, W>,
    disjointness: Disjointness,
}

impl<V, E, W> DisjointPathPair<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: EdgeWeight,
{
    /// Pairs two paths; the cheaper one (by path ranking) becomes primary
    pub fn new(first: Path<V, E, W>, second: Path<V, E, W>, disjointness: Disjointness) -> Self {
        let (primary, secondary) = if second < first {
            (second, first)
        } else {
            (first, second)
        };
        DisjointPathPair {
            primary,
            secondary,
            disjointness,
        }
    }

    pub fn primary(&self) -> &Path<V, E, W> {
        &self.primary
    }

    pub fn secondary(&self) -> &Path<V, E, W> {
        &self.secondary
    }

    pub fn disjointness(&self) -> Disjointness {
        self.disjointness
    }

    pub fn src(&self) -> &V {
        self.primary.src()
    }

    pub fn dst(&self) -> &V {
        self.primary.dst()
    }

    /// Combined cost of both paths
    pub fn cost(&self) -> W {
        self.primary.cost() + self.secondary.cost()
    }

    pub fn into_paths(self) -> (Path<V, E, W>, Path<V, E, W>) {
        (self.primary, self.secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DefaultEdge;
    use ordered_float::OrderedFloat;

    type E = DefaultEdge<&'static str>;
    type W = OrderedFloat<f64>;

    #[test]
    fn test_builder_front_and_back() {
        let mut builder: PathBuilder<&str, E, W> = PathBuilder::new("B");
        builder.push_front(DefaultEdge::new("A", "B"), OrderedFloat(1.0)).unwrap();
        builder.push_back(DefaultEdge::new("B", "C"), OrderedFloat(2.5)).unwrap();
        let path = builder.build();

        assert_eq!(path.src(), &"A");
        assert_eq!(path.dst(), &"C");
        assert_eq!(path.hop_count(), 2);
        assert_eq!(path.cost(), OrderedFloat(3.5));
        assert_eq!(path.vertices(), vec![&"A", &"B", &"C"]);
        assert!(path.is_loopless());
    }

    #[test]
    fn test_builder_rejects_gap() {
        let mut builder: PathBuilder<&str, E, W> = PathBuilder::new("A");
        let err = builder.push_back(DefaultEdge::new("B", "C"), OrderedFloat(1.0));
        assert!(matches!(err, Err(Error::NonContiguousPath { .. })));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_degenerate_path() {
        let path: Path<&str, E, W> = Path::empty("A");
        assert!(path.is_empty());
        assert_eq!(path.src(), path.dst());
        assert_eq!(path.cost(), OrderedFloat(0.0));
    }

    #[test]
    fn test_pair_orders_primary_first() {
        let long: Path<&str, E, W> = Path::from_edges(
            vec![DefaultEdge::new("A", "C"), DefaultEdge::new("C", "D")],
            OrderedFloat(5.0),
        )
        .unwrap();
        let short: Path<&str, E, W> =
            Path::from_edges(vec![DefaultEdge::new("A", "D")], OrderedFloat(2.0)).unwrap();

        let pair = DisjointPathPair::new(long, short, Disjointness::Edge);
        assert_eq!(pair.primary().cost(), OrderedFloat(2.0));
        assert_eq!(pair.cost(), OrderedFloat(7.0));
        assert!(!pair.primary().shares_edge_with(pair.secondary()));
    }
}
