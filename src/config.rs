//! Search configuration
//!
//! Settings consumed by [`TopologyPaths`](crate::TopologyPaths), loadable from
//! JSON. Missing fields take their defaults.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::algorithm::srlg::DEFAULT_MAX_CANDIDATES;
use crate::algorithm::{GraphPathSearch, ALL_PATHS};
use crate::graph::{Edge, EdgeWeight, Vertex};
use crate::{BellmanFord, BreadthFirstSearch, Dijkstra, Result};

/// Single-pair search used for plain path queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    #[default]
    Dijkstra,
    BellmanFord,
    BreadthFirst,
}

impl SearchAlgorithm {
    /// Returns the search implementing this choice
    pub fn searcher<V, E, W>(&self) -> Box<dyn GraphPathSearch<V, E, W> + Send + Sync>
    where
        V: Vertex,
        E: Edge<V>,
        W: EdgeWeight,
    {
        match self {
            SearchAlgorithm::Dijkstra => Box::new(Dijkstra::new()),
            SearchAlgorithm::BellmanFord => Box::new(BellmanFord::new()),
            SearchAlgorithm::BreadthFirst => Box::new(BreadthFirstSearch::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: SearchAlgorithm,

    /// Bound on equal-cost paths per destination; `None` keeps them all
    pub max_paths: Option<usize>,

    /// Default K for k-shortest queries
    pub k: usize,

    /// Primaries examined by the SRLG fallback search
    pub srlg_max_candidates: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: SearchAlgorithm::default(),
            max_paths: None,
            k: 4,
            srlg_max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl SearchConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_algorithm(mut self, algorithm: SearchAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_srlg_max_candidates(mut self, max_candidates: usize) -> Self {
        self.srlg_max_candidates = max_candidates;
        self
    }

    /// `max_paths` as passed to searches
    pub fn path_bound(&self) -> usize {
        self.max_paths.unwrap_or(ALL_PATHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.algorithm, SearchAlgorithm::Dijkstra);
        assert_eq!(config.path_bound(), ALL_PATHS);
        assert_eq!(config.k, 4);
        assert_eq!(config.srlg_max_candidates, 64);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SearchConfig::from_json_str(r#"{"algorithm": "bellman_ford", "k": 2}"#).unwrap();
        assert_eq!(config.algorithm, SearchAlgorithm::BellmanFord);
        assert_eq!(config.k, 2);
        assert_eq!(config.max_paths, None);
        assert_eq!(config.srlg_max_candidates, 64);
    }

    #[test]
    fn test_from_reader_and_back() {
        let original = SearchConfig::default()
            .with_algorithm(SearchAlgorithm::BreadthFirst)
            .with_max_paths(1)
            .with_srlg_max_candidates(8);
        let json = original.to_json_string().unwrap();
        let parsed = SearchConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.path_bound(), 1);
    }

    #[test]
    fn test_invalid_json() {
        let result = SearchConfig::from_json_str(r#"{"algorithm": "astar"}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
