use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use num_traits::Float;

/// Identity of a graph vertex.
///
/// Vertices carry no payload the algorithms care about; equality and ordering
/// are all that is needed. The ordering fixes iteration order and therefore
/// tie-breaking between equal-cost alternatives.
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}

impl<T> Vertex for T where T: Clone + Eq + Hash + Ord + Debug {}

/// A directed edge between two vertices.
///
/// Parallel edges between the same pair of vertices must differ in some other
/// part of their identity. Undirected links are modelled as two opposing edges.
pub trait Edge<V: Vertex>: Clone + Eq + Hash + Ord + Debug {
    /// Returns the vertex this edge leaves
    fn src(&self) -> &V;

    /// Returns the vertex this edge enters
    fn dst(&self) -> &V;

    /// Returns true if this edge starts and ends at the same vertex
    fn is_self_loop(&self) -> bool {
        self.src() == self.dst()
    }
}

/// Numeric cost of traversing an edge.
///
/// Infinity is the "untraversable" sentinel. NaN is never a valid weight.
pub trait EdgeWeight: Float + Debug + Copy + Ord + Send + Sync {}

impl<T> EdgeWeight for T where T: Float + Debug + Copy + Ord + Send + Sync {}

/// Pure function from an edge to its traversal cost.
pub trait EdgeWeigher<E, W: EdgeWeight> {
    /// Returns the weight of the given edge
    fn weight(&self, edge: &E) -> W;

    /// Cost assigned to the search source
    fn initial_weight(&self) -> W {
        W::zero()
    }

    /// Weight reported for edges that must not be traversed
    fn non_viable_weight(&self) -> W {
        W::infinity()
    }

    /// Returns true if an edge with this weight may be traversed
    fn is_viable(&self, weight: W) -> bool {
        !weight.is_infinite() && weight != self.non_viable_weight()
    }
}

impl<E, W, F> EdgeWeigher<E, W> for F
where
    W: EdgeWeight,
    F: Fn(&E) -> W,
{
    fn weight(&self, edge: &E) -> W {
        self(edge)
    }
}

/// Weigher under which every edge costs one hop.
#[derive(Debug, Default, Clone, Copy)]
pub struct HopCountWeigher;

impl<E, W: EdgeWeight> EdgeWeigher<E, W> for HopCountWeigher {
    fn weight(&self, _edge: &E) -> W {
        W::one()
    }
}

/// Weigher backed by an explicit edge-to-weight table.
#[derive(Debug, Clone)]
pub struct TableWeigher<E, W>
where
    E: Eq + Hash,
    W: EdgeWeight,
{
    weights: HashMap<E, W>,
    default: W,
}

impl<E, W> TableWeigher<E, W>
where
    E: Eq + Hash,
    W: EdgeWeight,
{
    /// Creates a table where unlisted edges are untraversable
    pub fn new() -> Self {
        TableWeigher {
            weights: HashMap::new(),
            default: W::infinity(),
        }
    }

    /// Sets the weight reported for edges missing from the table
    pub fn with_default(mut self, default: W) -> Self {
        self.default = default;
        self
    }

    /// Sets the weight of a single edge
    pub fn insert(&mut self, edge: E, weight: W) -> Option<W> {
        self.weights.insert(edge, weight)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<E, W> Default for TableWeigher<E, W>
where
    E: Eq + Hash,
    W: EdgeWeight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, W> FromIterator<(E, W)> for TableWeigher<E, W>
where
    E: Eq + Hash,
    W: EdgeWeight,
{
    fn from_iter<I: IntoIterator<Item = (E, W)>>(iter: I) -> Self {
        TableWeigher {
            weights: iter.into_iter().collect(),
            default: W::infinity(),
        }
    }
}

impl<E, W> EdgeWeigher<E, W> for TableWeigher<E, W>
where
    E: Eq + Hash,
    W: EdgeWeight,
{
    fn weight(&self, edge: &E) -> W {
        self.weights.get(edge).copied().unwrap_or(self.default)
    }
}
