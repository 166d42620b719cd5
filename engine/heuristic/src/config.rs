//! Heuristic search configuration.

use std::time::Duration;

/// Configuration for the alpha-beta searcher.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicConfig {
    /// Deepest iterative-deepening iteration, in plies.
    pub max_depth: u32,

    /// Optional wall-clock budget. An iteration still running when it expires
    /// is discarded.
    pub time_limit: Option<Duration>,

    /// Optional node budget, checked the same way as `time_limit`.
    pub max_nodes: Option<u64>,

    /// Number of plies from the root where wide nodes get their depth cut.
    pub shallow_plies: u32,

    /// Branching factor above which a shallow node counts as wide.
    pub wide_branching: usize,

    /// Plies removed from the remaining depth at a wide shallow node.
    pub wide_reduction: u32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            max_depth: 12,
            time_limit: Some(Duration::from_millis(3_000)),
            max_nodes: Some(2_000_000),
            shallow_plies: 2,
            wide_branching: 20,
            wide_reduction: 3,
        }
    }
}

impl HeuristicConfig {
    /// Depth-bounded config with no clock, so results depend only on the
    /// position.
    pub fn deterministic(max_depth: u32) -> Self {
        Self {
            max_depth,
            time_limit: None,
            ..Self::default()
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_depth: 4,
            time_limit: None,
            max_nodes: Some(200_000),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_max_nodes(mut self, nodes: Option<u64>) -> Self {
        self.max_nodes = nodes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeuristicConfig::default();
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.shallow_plies, 2);
        assert_eq!(config.wide_branching, 20);
        assert_eq!(config.wide_reduction, 3);
    }

    #[test]
    fn test_builder_pattern() {
        let config = HeuristicConfig::default()
            .with_max_depth(6)
            .with_time_limit(None)
            .with_max_nodes(None);
        assert_eq!(config.max_depth, 6);
        assert!(config.time_limit.is_none());
        assert!(config.max_nodes.is_none());
    }
}
