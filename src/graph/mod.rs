pub mod adjacency;
pub mod edge;
pub mod generators;
pub mod path;
pub mod risk;
pub mod traits;

pub use adjacency::Graph;
pub use edge::{DefaultEdge, ResidualEdge};
pub use path::{DisjointPathPair, Disjointness, Path, PathBuilder};
pub use risk::RiskProfile;
pub use traits::{Edge, EdgeWeigher, EdgeWeight, HopCountWeigher, TableWeigher, Vertex};
