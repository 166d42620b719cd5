//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use std::time::Duration;

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_host() -> String {
    defaults::host().into()
}
fn d_port() -> u16 {
    defaults::port()
}
fn d_allowed_origins() -> Vec<String> {
    defaults::allowed_origins().to_vec()
}
fn d_max_sessions() -> usize {
    defaults::max_sessions()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_max_iterations() -> u32 {
    defaults::max_iterations()
}
fn d_mcts_time_limit() -> u64 {
    defaults::mcts_time_limit_ms()
}
fn d_mcts_max_nodes() -> usize {
    defaults::mcts_max_nodes()
}
fn d_max_depth() -> u32 {
    defaults::max_depth()
}
fn d_heuristic_time_limit() -> u64 {
    defaults::heuristic_time_limit_ms()
}
fn d_wide_branching() -> usize {
    defaults::wide_branching()
}
fn d_wide_reduction() -> u32 {
    defaults::wide_reduction()
}
fn d_heuristic_max_nodes() -> u64 {
    defaults::heuristic_max_nodes()
}
fn d_default_difficulty() -> String {
    defaults::default_difficulty().into()
}
fn d_opening_book() -> bool {
    defaults::opening_book()
}
fn d_tactics() -> bool {
    defaults::tactics()
}
fn d_arena_games() -> u32 {
    defaults::arena_games()
}
fn d_arena_x() -> String {
    defaults::arena_x().into()
}
fn d_arena_o() -> String {
    defaults::arena_o().into()
}

/// A zero budget in the file means "no limit".
fn nonzero_ms(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub heuristic: HeuristicConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Fixed RNG seed for AI players. Unset means seed from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: None,
        }
    }
}

/// Web server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WebConfig {
    #[serde(default = "d_host")]
    pub host: String,
    #[serde(default = "d_port")]
    pub port: u16,
    #[serde(default = "d_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// Sessions kept in memory before new ones are refused
    #[serde(default = "d_max_sessions")]
    pub max_sessions: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: defaults::host().into(),
            port: defaults::port(),
            allowed_origins: defaults::allowed_origins().to_vec(),
            max_sessions: defaults::max_sessions(),
        }
    }
}

/// Monte Carlo Tree Search settings (Medium difficulty)
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u32,
    /// Wall-clock budget per move; 0 disables it
    #[serde(default = "d_mcts_time_limit")]
    pub time_limit_ms: u64,
    /// Tree size budget per move; 0 disables it
    #[serde(default = "d_mcts_max_nodes")]
    pub max_nodes: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: defaults::exploration(),
            max_iterations: defaults::max_iterations(),
            time_limit_ms: defaults::mcts_time_limit_ms(),
            max_nodes: defaults::mcts_max_nodes(),
        }
    }
}

impl MctsConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        nonzero_ms(self.time_limit_ms)
    }

    pub fn node_limit(&self) -> Option<usize> {
        (self.max_nodes > 0).then_some(self.max_nodes)
    }
}

/// Alpha-beta search settings (Hard difficulty)
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HeuristicConfig {
    #[serde(default = "d_max_depth")]
    pub max_depth: u32,
    /// Wall-clock budget per move; 0 disables it
    #[serde(default = "d_heuristic_time_limit")]
    pub time_limit_ms: u64,
    #[serde(default = "d_wide_branching")]
    pub wide_branching: usize,
    #[serde(default = "d_wide_reduction")]
    pub wide_reduction: u32,
    /// Node budget per move; 0 disables it
    #[serde(default = "d_heuristic_max_nodes")]
    pub max_nodes: u64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::max_depth(),
            time_limit_ms: defaults::heuristic_time_limit_ms(),
            wide_branching: defaults::wide_branching(),
            wide_reduction: defaults::wide_reduction(),
            max_nodes: defaults::heuristic_max_nodes(),
        }
    }
}

impl HeuristicConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        nonzero_ms(self.time_limit_ms)
    }

    pub fn node_limit(&self) -> Option<u64> {
        (self.max_nodes > 0).then_some(self.max_nodes)
    }
}

/// AI player settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AiConfig {
    /// Difficulty used when a request does not name one (easy/medium/hard)
    #[serde(default = "d_default_difficulty")]
    pub default_difficulty: String,
    #[serde(default = "d_opening_book")]
    pub opening_book: bool,
    /// Medium takes immediate small-board wins and blocks before searching
    #[serde(default = "d_tactics")]
    pub tactics: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_difficulty: defaults::default_difficulty().into(),
            opening_book: defaults::opening_book(),
            tactics: defaults::tactics(),
        }
    }
}

/// AI-vs-AI tournament settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_arena_games")]
    pub games: u32,
    /// Difficulty playing X in the first game
    #[serde(default = "d_arena_x")]
    pub x: String,
    /// Difficulty playing O in the first game
    #[serde(default = "d_arena_o")]
    pub o: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::arena_games(),
            x: defaults::arena_x().into(),
            o: defaults::arena_o().into(),
        }
    }
}
