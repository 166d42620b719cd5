//! Heuristic alpha-beta player for Ultimate Tic-Tac-Toe.
//!
//! Negamax with alpha-beta pruning over [`engine_core::BoardState`], using:
//!
//! - iterative deepening up to [`HeuristicConfig::max_depth`], with depth cut
//!   at wide nodes near the root
//! - a per-search transposition table keyed by the full board state
//! - move ordering that tries game wins, sub-board wins and blocks first
//! - a static evaluation built from won sub-boards, threats and where the
//!   side to move has been sent
//!
//! ```rust
//! use engine_core::BoardState;
//! use heuristic::{search, HeuristicConfig};
//!
//! let result = search(&BoardState::new(), HeuristicConfig::deterministic(3)).unwrap();
//! println!("{} scores {}", result.best_move, result.score);
//! ```

pub mod config;
pub mod eval;
pub mod ordering;
pub mod search;
pub mod tt;

pub use config::HeuristicConfig;
pub use eval::{evaluate, WIN_SCORE};
pub use search::{search, SearchResult, Searcher};
