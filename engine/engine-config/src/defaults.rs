//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so every binary starts
//! from the same defaults.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    web: WebDefaults,
    mcts: MctsDefaults,
    heuristic: HeuristicDefaults,
    ai: AiDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct WebDefaults {
    host: String,
    port: u16,
    allowed_origins: Vec<String>,
    max_sessions: usize,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    exploration: f64,
    max_iterations: u32,
    time_limit_ms: u64,
    max_nodes: usize,
}

#[derive(Debug, Deserialize)]
struct HeuristicDefaults {
    max_depth: u32,
    time_limit_ms: u64,
    wide_branching: usize,
    wide_reduction: u32,
    max_nodes: u64,
}

#[derive(Debug, Deserialize)]
struct AiDefaults {
    default_difficulty: String,
    opening_book: bool,
    tactics: bool,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    x: String,
    o: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Web
pub fn host() -> &'static str {
    &DEFAULTS.web.host
}
pub fn port() -> u16 {
    DEFAULTS.web.port
}
pub fn allowed_origins() -> &'static [String] {
    &DEFAULTS.web.allowed_origins
}
pub fn max_sessions() -> usize {
    DEFAULTS.web.max_sessions
}

// MCTS
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn max_iterations() -> u32 {
    DEFAULTS.mcts.max_iterations
}
pub fn mcts_time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}
pub fn mcts_max_nodes() -> usize {
    DEFAULTS.mcts.max_nodes
}

// Heuristic
pub fn max_depth() -> u32 {
    DEFAULTS.heuristic.max_depth
}
pub fn heuristic_time_limit_ms() -> u64 {
    DEFAULTS.heuristic.time_limit_ms
}
pub fn wide_branching() -> usize {
    DEFAULTS.heuristic.wide_branching
}
pub fn wide_reduction() -> u32 {
    DEFAULTS.heuristic.wide_reduction
}
pub fn heuristic_max_nodes() -> u64 {
    DEFAULTS.heuristic.max_nodes
}

// AI
pub fn default_difficulty() -> &'static str {
    &DEFAULTS.ai.default_difficulty
}
pub fn opening_book() -> bool {
    DEFAULTS.ai.opening_book
}
pub fn tactics() -> bool {
    DEFAULTS.ai.tactics
}

// Arena
pub fn arena_games() -> u32 {
    DEFAULTS.arena.games
}
pub fn arena_x() -> &'static str {
    &DEFAULTS.arena.x
}
pub fn arena_o() -> &'static str {
    &DEFAULTS.arena.o
}
