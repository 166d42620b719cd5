//! Game session management.

use std::sync::atomic::{AtomicU64, Ordering};

use engine_core::{apply_move, BoardState, EngineError, Player};
use strategies::{AiPlayer, AiSettings, Difficulty};

use crate::types::GameStateResponse;

/// Process-wide logical clock ordering session activity.
static ACTIVITY: AtomicU64 = AtomicU64::new(0);

fn tick() -> u64 {
    ACTIVITY.fetch_add(1, Ordering::Relaxed)
}

/// One human-vs-AI game.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: BoardState,
    human: Player,
    ai: AiPlayer,
    last_active: u64,
}

impl GameSession {
    /// Fresh game. The human plays X unless `ai_first` is set.
    pub fn new(
        difficulty: Difficulty,
        ai_first: bool,
        settings: &AiSettings,
        seed: Option<u64>,
    ) -> Self {
        Self {
            state: BoardState::new(),
            human: if ai_first { Player::O } else { Player::X },
            ai: AiPlayer::from_seed_option(difficulty, settings, seed),
            last_active: tick(),
        }
    }

    /// Mark the session as used now.
    pub fn touch(&mut self) {
        self.last_active = tick();
    }

    /// Activity stamp; larger means more recent.
    pub fn last_active(&self) -> u64 {
        self.last_active
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.ai.difficulty()
    }

    pub fn human_player(&self) -> Player {
        self.human
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_human_turn(&self) -> bool {
        self.state.turn() == self.human
    }

    /// Place the human's mark.
    pub fn human_move(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        apply_move(&mut self.state, row, col, self.human)
    }

    /// Place the AI's mark.
    pub fn ai_move(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        apply_move(&mut self.state, row, col, self.human.opponent())
    }

    /// Detach the AI so it can search off the async runtime.
    pub fn ai(&self) -> AiPlayer {
        self.ai.clone()
    }

    /// Put back an AI returned from a search, keeping its advanced RNG.
    pub fn restore_ai(&mut self, ai: AiPlayer) {
        self.ai = ai;
    }

    /// Convert to API response format.
    pub fn to_response(&self) -> GameStateResponse {
        GameStateResponse::from_state(&self.state, self.difficulty(), self.human)
    }
}
