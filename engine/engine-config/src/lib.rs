//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the binaries (web, arena).
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`UTTT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! UTTT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     UTTT_COMMON_LOG_LEVEL=debug
//!     UTTT_COMMON_SEED=42
//!     UTTT_WEB_PORT=3000
//!     UTTT_MCTS_MAX_ITERATIONS=5000
//!     UTTT_AI_DEFAULT_DIFFICULTY=hard
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
