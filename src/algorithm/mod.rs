pub mod bellman_ford;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod k_shortest;
pub mod srlg;
pub mod suurballe;
pub mod tarjan;
pub mod traits;

pub use traits::{GraphPathSearch, SearchResult, ALL_PATHS};
