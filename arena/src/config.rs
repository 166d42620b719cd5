//! Configuration for the arena CLI
//!
//! Defaults come from config.toml (with UTTT_* environment overrides).
//! CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use strategies::{AiSettings, Difficulty};
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_x() -> String {
    CENTRAL_CONFIG.arena.x.clone()
}

fn default_o() -> String {
    CENTRAL_CONFIG.arena.o.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Play Ultimate Tic-Tac-Toe AI difficulties against each other")]
#[command(
    long_about = "Runs a series of games between two AI difficulties and reports
wins, draws and game length.

Defaults are read from config.toml with UTTT_* environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Difficulty playing X in the first game (easy, medium, hard)
    #[arg(long, default_value_t = default_x())]
    pub x: String,

    /// Difficulty playing O in the first game (easy, medium, hard)
    #[arg(long, default_value_t = default_o())]
    pub o: String,

    /// Base RNG seed; unset seeds every player from entropy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Alternate colours every game
    #[arg(long)]
    pub swap_sides: bool,

    /// Override the MCTS iteration budget
    #[arg(long)]
    pub mcts_iterations: Option<u32>,

    /// Override the alpha-beta depth limit
    #[arg(long)]
    pub heuristic_depth: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Write a JSON summary to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        self.entrants()?;

        if self.mcts_iterations == Some(0) {
            return Err(anyhow!("mcts_iterations must be greater than 0"));
        }

        if self.heuristic_depth == Some(0) {
            return Err(anyhow!("heuristic_depth must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// The two difficulties, in first-game colour order (X, O).
    pub fn entrants(&self) -> Result<[Difficulty; 2]> {
        let x: Difficulty = self
            .x
            .parse()
            .map_err(|e| anyhow!("invalid --x: {}", e))?;
        let o: Difficulty = self
            .o
            .parse()
            .map_err(|e| anyhow!("invalid --o: {}", e))?;
        Ok([x, o])
    }

    /// Seed from the CLI, falling back to `common.seed`.
    pub fn base_seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.common.seed)
    }

    /// Search settings from the central config with CLI overrides applied.
    pub fn ai_settings(&self) -> AiSettings {
        let mut settings = AiSettings::from(&*CENTRAL_CONFIG);
        if let Some(n) = self.mcts_iterations {
            settings.mcts = settings.mcts.with_iterations(n);
        }
        if let Some(depth) = self.heuristic_depth {
            settings.heuristic = settings.heuristic.with_max_depth(depth);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            games: 4,
            x: "hard".into(),
            o: "medium".into(),
            seed: Some(1),
            swap_sides: false,
            mcts_iterations: None,
            heuristic_depth: None,
            log_level: "info".into(),
            output: None,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_games() {
        let mut cfg = base_config();
        cfg.games = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("games"));
    }

    #[test]
    fn validate_rejects_unknown_difficulty() {
        let mut cfg = base_config();
        cfg.o = "impossible".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("--o"));
    }

    #[test]
    fn validate_rejects_zero_budgets() {
        let mut cfg = base_config();
        cfg.mcts_iterations = Some(0);
        assert!(cfg.validate().is_err());

        let mut cfg = base_config();
        cfg.heuristic_depth = Some(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "loud".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn entrants_parse_case_insensitively() {
        let mut cfg = base_config();
        cfg.x = "EASY".into();
        assert_eq!(
            cfg.entrants().unwrap(),
            [Difficulty::Easy, Difficulty::Medium]
        );
    }

    #[test]
    fn overrides_reach_search_settings() {
        let mut cfg = base_config();
        cfg.mcts_iterations = Some(123);
        cfg.heuristic_depth = Some(3);
        let settings = cfg.ai_settings();
        assert_eq!(settings.mcts.max_iterations, 123);
        assert_eq!(settings.heuristic.max_depth, 3);
    }

    #[test]
    fn cli_seed_wins() {
        assert_eq!(base_config().base_seed(), Some(1));
    }

    #[test]
    fn parses_command_line() {
        let cfg = Config::try_parse_from([
            "arena",
            "--games",
            "10",
            "--x",
            "easy",
            "--o",
            "hard",
            "--swap-sides",
            "--seed",
            "9",
        ])
        .unwrap();
        assert_eq!(cfg.games, 10);
        assert!(cfg.swap_sides);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.entrants().unwrap(), [Difficulty::Easy, Difficulty::Hard]);
    }
}
