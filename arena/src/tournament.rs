//! Match runner: AI against AI over a series of games.

use anyhow::{anyhow, Result};
use engine_core::{apply_move, BoardState, Player, Winner};
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use strategies::{AiPlayer, AiSettings, Difficulty};
use tracing::{debug, info, warn};

use crate::stats::TournamentStats;

/// Final position of one game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub winner: Winner,
    pub plies: usize,
}

/// Play one game to completion.
pub fn play_game(x: &mut AiPlayer, o: &mut AiPlayer) -> Result<GameRecord> {
    let mut state = BoardState::new();
    while !state.is_terminal() {
        let (ai, player) = match state.turn() {
            Player::X => (&mut *x, Player::X),
            Player::O => (&mut *o, Player::O),
        };
        let choice = ai.choose_move(&state)?;
        apply_move(&mut state, choice.mv.row(), choice.mv.col(), player).map_err(|e| {
            anyhow!(
                "{} chose an illegal move {}: {}",
                ai.difficulty(),
                choice.mv,
                e
            )
        })?;
    }
    Ok(GameRecord {
        winner: state.winner(),
        plies: state.move_count(),
    })
}

pub struct Tournament {
    entrants: [Difficulty; 2],
    games: u32,
    swap_sides: bool,
    settings: AiSettings,
    seed: Option<u64>,
}

impl Tournament {
    pub fn new(
        entrants: [Difficulty; 2],
        games: u32,
        swap_sides: bool,
        settings: AiSettings,
        seed: Option<u64>,
    ) -> Self {
        Self {
            entrants,
            games,
            swap_sides,
            settings,
            seed,
        }
    }

    /// Index of the entrant playing X in game `game`.
    pub fn x_entrant(&self, game: u32) -> usize {
        if self.swap_sides && game % 2 == 1 {
            1
        } else {
            0
        }
    }

    fn player_seed(&self, game: u32, side: u64) -> Option<u64> {
        self.seed
            .map(|s| s.wrapping_add(2 * u64::from(game)).wrapping_add(side))
    }

    /// Play every game, stopping early once `shutdown` is set.
    pub fn run(
        &self,
        shutdown: &AtomicBool,
        progress: Option<&ProgressBar>,
    ) -> Result<TournamentStats> {
        let mut stats = TournamentStats::new(self.entrants);

        for game in 0..self.games {
            if shutdown.load(Ordering::Relaxed) {
                warn!("Stopping after {} of {} games", game, self.games);
                break;
            }

            let x_idx = self.x_entrant(game);
            let mut x = AiPlayer::from_seed_option(
                self.entrants[x_idx],
                &self.settings,
                self.player_seed(game, 0),
            );
            let mut o = AiPlayer::from_seed_option(
                self.entrants[1 - x_idx],
                &self.settings,
                self.player_seed(game, 1),
            );

            let start = Instant::now();
            let record = play_game(&mut x, &mut o)?;
            stats.record(x_idx, record.winner, record.plies);
            debug!(
                game = game + 1,
                x = %x.difficulty(),
                o = %o.difficulty(),
                winner = ?record.winner,
                plies = record.plies,
                secs = start.elapsed().as_secs_f64(),
                "Game finished"
            );

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        info!(
            games = stats.games(),
            draws = stats.draws(),
            "Tournament finished"
        );
        Ok(stats)
    }
}
