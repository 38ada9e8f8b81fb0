use crate::graph::traits::{Edge, Vertex};

/// A directed edge identified by its endpoints and a key.
///
/// The key tells parallel edges apart; two edges with the same endpoints and
/// key are the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefaultEdge<V> {
    src: V,
    dst: V,
    key: u32,
}

impl<V: Vertex> DefaultEdge<V> {
    /// Creates an edge with key 0
    pub fn new(src: V, dst: V) -> Self {
        DefaultEdge { src, dst, key: 0 }
    }

    /// Creates an edge with an explicit key, for parallel links
    pub fn with_key(src: V, dst: V, key: u32) -> Self {
        DefaultEdge { src, dst, key }
    }

    pub fn key(&self) -> u32 {
        self.key
    }

    /// Returns the opposing edge with the same key
    pub fn reversed(&self) -> Self {
        DefaultEdge {
            src: self.dst.clone(),
            dst: self.src.clone(),
            key: self.key,
        }
    }
}

impl<V: Vertex> Edge<V> for DefaultEdge<V> {
    fn src(&self) -> &V {
        &self.src
    }

    fn dst(&self) -> &V {
        &self.dst
    }
}

/// Edge of a residual graph built from an original edge.
///
/// `Reversed` points from the original destination back to the original
/// source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResidualEdge<E> {
    Forward(E),
    Reversed(E),
}

impl<E> ResidualEdge<E> {
    /// Returns the original edge
    pub fn original(&self) -> &E {
        match self {
            ResidualEdge::Forward(edge) | ResidualEdge::Reversed(edge) => edge,
        }
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, ResidualEdge::Reversed(_))
    }
}

impl<V, E> Edge<V> for ResidualEdge<E>
where
    V: Vertex,
    E: Edge<V>,
{
    fn src(&self) -> &V {
        match self {
            ResidualEdge::Forward(edge) => edge.src(),
            ResidualEdge::Reversed(edge) => edge.dst(),
        }
    }

    fn dst(&self) -> &V {
        match self {
            ResidualEdge::Forward(edge) => edge.dst(),
            ResidualEdge::Reversed(edge) => edge.src(),
        }
    }
}
