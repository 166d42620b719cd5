//! Tournament results and the JSON summary.

use anyhow::{Context, Result};
use engine_core::Winner;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use strategies::Difficulty;
use tracing::debug;

/// Running tally for one side of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrantStats {
    pub difficulty: Difficulty,
    pub wins: u32,
    pub wins_as_x: u32,
    pub wins_as_o: u32,
}

impl EntrantStats {
    fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            wins: 0,
            wins_as_x: 0,
            wins_as_o: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TournamentStats {
    entrants: [EntrantStats; 2],
    games: u32,
    draws: u32,
    total_plies: u64,
}

/// Serializable results, written with `--output`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub games: u32,
    pub entrants: Vec<EntrantSummary>,
    pub draws: u32,
    pub avg_plies: f64,
    pub elapsed_seconds: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntrantSummary {
    #[serde(flatten)]
    pub stats: EntrantStats,
    /// Share of decisive games won
    pub win_rate: f64,
}

impl TournamentStats {
    pub fn new(entrants: [Difficulty; 2]) -> Self {
        Self {
            entrants: entrants.map(EntrantStats::new),
            games: 0,
            draws: 0,
            total_plies: 0,
        }
    }

    /// Record a finished game. `x_entrant` is the index of the side that played X.
    pub fn record(&mut self, x_entrant: usize, winner: Winner, plies: usize) {
        self.games += 1;
        self.total_plies += plies as u64;
        match winner {
            Winner::X => {
                let e = &mut self.entrants[x_entrant];
                e.wins += 1;
                e.wins_as_x += 1;
            }
            Winner::O => {
                let e = &mut self.entrants[1 - x_entrant];
                e.wins += 1;
                e.wins_as_o += 1;
            }
            Winner::Draw | Winner::None => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn entrant(&self, idx: usize) -> &EntrantStats {
        &self.entrants[idx]
    }

    pub fn avg_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }

    /// Wins over decisive games, 0 when every game was drawn.
    pub fn win_rate(&self, idx: usize) -> f64 {
        let decisive = self.games - self.draws;
        if decisive == 0 {
            0.0
        } else {
            self.entrants[idx].wins as f64 / decisive as f64
        }
    }

    pub fn summary(&self, elapsed: Duration, seed: Option<u64>) -> TournamentSummary {
        TournamentSummary {
            games: self.games,
            entrants: (0..2)
                .map(|i| EntrantSummary {
                    stats: self.entrants[i],
                    win_rate: self.win_rate(i),
                })
                .collect(),
            draws: self.draws,
            avg_plies: self.avg_plies(),
            elapsed_seconds: elapsed.as_secs_f64(),
            seed,
        }
    }
}

impl fmt::Display for TournamentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games played: {}", self.games)?;
        for (i, e) in self.entrants.iter().enumerate() {
            writeln!(
                f,
                "  {:<6} wins: {:>4} (as X {}, as O {}), win rate {:.1}%",
                e.difficulty,
                e.wins,
                e.wins_as_x,
                e.wins_as_o,
                self.win_rate(i) * 100.0
            )?;
        }
        writeln!(f, "  draws:       {:>4}", self.draws)?;
        write!(f, "Average plies: {:.1}", self.avg_plies())
    }
}

impl TournamentSummary {
    /// Write as pretty JSON (write-then-rename).
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| format!("failed to write {}", path.display()));
        }
        debug!("Wrote tournament summary to {}", path.display());
        Ok(())
    }
}
