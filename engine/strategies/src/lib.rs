//! AI players for Ultimate Tic-Tac-Toe.
//!
//! A [`Difficulty`] picks a [`Strategy`]:
//!
//! | Difficulty | Strategy |
//! |------------|----------|
//! | Easy       | uniformly random legal move |
//! | Medium     | Monte Carlo Tree Search ([`mcts`]) |
//! | Hard       | alpha-beta search ([`heuristic`]) |
//!
//! [`AiPlayer`] wraps a strategy with its own seeded RNG, an optional
//! opening book and, for Medium, a tactical pre-check ([`tactical_move`]).
//!
//! ```rust
//! use engine_core::BoardState;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use strategies::{AiSettings, Difficulty, Strategy};
//!
//! let strategy = Strategy::for_difficulty(Difficulty::Easy, &AiSettings::default());
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let mv = strategy.select_move(&BoardState::new(), &mut rng).unwrap();
//! println!("{}", mv);
//! ```

pub mod difficulty;
pub mod opening;
pub mod player;
pub mod random;
pub mod strategy;
pub mod tactics;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use opening::book_move;
pub use player::{AiMove, AiPlayer};
pub use strategy::{AiSettings, Strategy};
pub use tactics::tactical_move;
