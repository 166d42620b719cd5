//! Monte Carlo Tree Search (MCTS) for Ultimate Tic-Tac-Toe.
//!
//! # Overview
//!
//! MCTS builds a search tree by running iterations. Each iteration consists of
//! four phases:
//!
//! 1. **Selection**: Traverse fully expanded nodes using UCB1 to balance
//!    exploration and exploitation
//! 2. **Expansion**: Add a single child for one untried legal move
//! 3. **Simulation**: Play uniformly random legal moves until the game ends
//! 4. **Backpropagation**: Update visit counts and rewards along the path from
//!    the new node to the root, flipping the sign at each level
//!
//! # Usage
//!
//! ```rust
//! use engine_core::BoardState;
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let state = BoardState::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(&state, MctsConfig::deterministic(200), &mut rng).unwrap();
//!
//! println!("Best move: {}", result.best_move);
//! println!("Value: {:.3}", result.value);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `exploration`: UCB1 constant C (default: sqrt(2))
//! - `max_iterations`: iteration budget (default: 20000)
//! - `time_limit`: optional wall-clock budget (default: 2s)
//! - `max_nodes`: arena capacity (default: 200000)
//!
//! # Architecture
//!
//! ```text
//! MctsSearch
//!  ├── MctsTree (arena of MctsNode, addressed by NodeId)
//!  └── select → expand → simulate → backpropagate
//! ```
//!
//! The tree is rebuilt for every search and dropped afterwards.

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use search::{run_mcts, MctsSearch, SearchResult};
pub use tree::{MctsTree, TreeStats};
