//! Topology path search
//!
//! A weighted-graph model plus the family of search algorithms used to turn a
//! network topology snapshot into end-to-end paths: breadth-first and
//! depth-first traversal, Dijkstra, Bellman-Ford, eager and lazy k-shortest
//! paths, Suurballe edge-disjoint pairs with a shared-risk-link-group variant,
//! and Tarjan strongly connected components.
//!
//! Graphs are immutable snapshots. Every search allocates its own state, so the
//! same graph and weigher can be searched from several threads at once.

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod graph;
pub mod topology;

pub use algorithm::{
    bellman_ford::BellmanFord, bfs::BreadthFirstSearch, dfs::DepthFirstSearch,
    dijkstra::Dijkstra, k_shortest::KShortestPaths, k_shortest::LazyKShortestPaths,
    srlg::SrlgGraphSearch, suurballe::Suurballe, tarjan::TarjanScc, GraphPathSearch,
    SearchResult, ALL_PATHS,
};
pub use config::{SearchAlgorithm, SearchConfig};
/// Re-export main types for convenient use
pub use graph::{
    DefaultEdge, DisjointPathPair, Disjointness, Edge, EdgeWeigher, EdgeWeight, Graph,
    HopCountWeigher, Path, PathBuilder, RiskProfile, TableWeigher, Vertex,
};
pub use topology::TopologyPaths;

/// Default weight type used throughout the tests and the benchmark binary
pub type Cost = ordered_float::OrderedFloat<f64>;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed graph: edge {edge} references vertex {vertex} outside the vertex set")]
    MalformedGraph { edge: String, vertex: String },

    #[error("Vertex not found in graph: {0}")]
    VertexNotFound(String),

    #[error("Search requires a destination vertex")]
    MissingDestination,

    #[error("Invalid edge weight {weight} on edge {edge}")]
    InvalidWeight { edge: String, weight: f64 },

    #[error("Negative cycle reachable from the source")]
    NegativeCycleDetected,

    #[error("No disjoint path pair available")]
    DisjointPairUnavailable,

    #[error("Edge {edge} does not continue a path ending at {at}")]
    NonContiguousPath { at: String, edge: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
