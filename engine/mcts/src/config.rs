//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant C in the UCB1 formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration: f64,

    /// Maximum number of select/expand/simulate/backpropagate iterations.
    pub max_iterations: u32,

    /// Optional wall-clock budget. The search stops at whichever of
    /// `max_iterations` and `time_limit` is reached first.
    pub time_limit: Option<Duration>,

    /// Arena capacity. Once reached, leaves are simulated without expansion.
    pub max_nodes: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            max_iterations: 20_000,
            time_limit: Some(Duration::from_millis(2_000)),
            max_nodes: 200_000,
        }
    }
}

impl MctsConfig {
    /// Iteration-bounded config with no wall clock, so results depend only
    /// on the seed.
    pub fn deterministic(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            time_limit: None,
            ..Self::default()
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            max_iterations: 500,
            time_limit: None,
            max_nodes: 10_000,
        }
    }

    /// Builder pattern: set iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set wall-clock budget.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Builder pattern: set arena capacity.
    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }
}
