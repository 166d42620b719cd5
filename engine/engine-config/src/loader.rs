//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by UTTT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("UTTT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from UTTT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!("UTTT_CONFIG={} not found, searching defaults", path.display());
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &PathBuf) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
    // Comma-separated list field
    ($config:expr, $section:ident . $field:ident, $key:expr, list) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: UTTT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "UTTT_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "UTTT_COMMON_SEED", optional_parse);

    // Web
    env_override!(config, web.host, "UTTT_WEB_HOST");
    env_override!(config, web.port, "UTTT_WEB_PORT", parse);
    env_override!(config, web.allowed_origins, "UTTT_WEB_ALLOWED_ORIGINS", list);
    env_override!(config, web.max_sessions, "UTTT_WEB_MAX_SESSIONS", parse);

    // MCTS
    env_override!(config, mcts.exploration, "UTTT_MCTS_EXPLORATION", parse);
    env_override!(
        config,
        mcts.max_iterations,
        "UTTT_MCTS_MAX_ITERATIONS",
        parse
    );
    env_override!(config, mcts.time_limit_ms, "UTTT_MCTS_TIME_LIMIT_MS", parse);
    env_override!(config, mcts.max_nodes, "UTTT_MCTS_MAX_NODES", parse);

    // Heuristic
    env_override!(
        config,
        heuristic.max_depth,
        "UTTT_HEURISTIC_MAX_DEPTH",
        parse
    );
    env_override!(
        config,
        heuristic.time_limit_ms,
        "UTTT_HEURISTIC_TIME_LIMIT_MS",
        parse
    );
    env_override!(
        config,
        heuristic.wide_branching,
        "UTTT_HEURISTIC_WIDE_BRANCHING",
        parse
    );
    env_override!(
        config,
        heuristic.wide_reduction,
        "UTTT_HEURISTIC_WIDE_REDUCTION",
        parse
    );
    env_override!(
        config,
        heuristic.max_nodes,
        "UTTT_HEURISTIC_MAX_NODES",
        parse
    );

    // AI
    env_override!(config, ai.default_difficulty, "UTTT_AI_DEFAULT_DIFFICULTY");
    env_override!(config, ai.opening_book, "UTTT_AI_OPENING_BOOK", parse);
    env_override!(config, ai.tactics, "UTTT_AI_TACTICS", parse);

    // Arena
    env_override!(config, arena.games, "UTTT_ARENA_GAMES", parse);
    env_override!(config, arena.x, "UTTT_ARENA_X");
    env_override!(config, arena.o, "UTTT_ARENA_O");

    config
}
