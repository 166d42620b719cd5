//! An AI opponent: a strategy with its randomness, plus the opening book and
//! tactical shortcuts.

use std::time::{Duration, Instant};

use engine_core::{BoardState, EngineError, Move};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::difficulty::Difficulty;
use crate::opening::book_move;
use crate::strategy::{AiSettings, Strategy};
use crate::tactics::tactical_move;

/// A chosen move and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct AiMove {
    pub mv: Move,
    /// "book", "tactics", or the name of the strategy that searched
    pub source: &'static str,
    pub think_time: Duration,
}

#[derive(Debug, Clone)]
pub struct AiPlayer {
    difficulty: Difficulty,
    strategy: Strategy,
    opening_book: bool,
    tactics: bool,
    rng: ChaCha20Rng,
}

impl AiPlayer {
    /// Player seeded from OS entropy.
    pub fn new(difficulty: Difficulty, settings: &AiSettings) -> Self {
        Self::with_rng(difficulty, settings, ChaCha20Rng::from_entropy())
    }

    /// Player with a fixed seed, for reproducible games.
    pub fn with_seed(difficulty: Difficulty, settings: &AiSettings, seed: u64) -> Self {
        Self::with_rng(difficulty, settings, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is set, from entropy otherwise.
    pub fn from_seed_option(
        difficulty: Difficulty,
        settings: &AiSettings,
        seed: Option<u64>,
    ) -> Self {
        match seed {
            Some(seed) => Self::with_seed(difficulty, settings, seed),
            None => Self::new(difficulty, settings),
        }
    }

    fn with_rng(difficulty: Difficulty, settings: &AiSettings, rng: ChaCha20Rng) -> Self {
        Self {
            difficulty,
            strategy: Strategy::for_difficulty(difficulty, settings),
            // Easy stays purely random.
            opening_book: settings.opening_book && difficulty != Difficulty::Easy,
            tactics: settings.tactics && difficulty == Difficulty::Medium,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Choose a move for the side to move in `state`.
    pub fn choose_move(&mut self, state: &BoardState) -> Result<AiMove, EngineError> {
        let start = Instant::now();

        if state.is_terminal() {
            return Err(EngineError::NoLegalMoves);
        }

        let shortcut = self
            .opening_book
            .then(|| book_move(state))
            .flatten()
            .map(|mv| (mv, "book"))
            .or_else(|| {
                self.tactics
                    .then(|| tactical_move(state))
                    .flatten()
                    .map(|mv| (mv, "tactics"))
            });
        let (mv, source) = match shortcut {
            Some(choice) => choice,
            None => (
                self.strategy.select_move(state, &mut self.rng)?,
                self.strategy.name(),
            ),
        };

        let think_time = start.elapsed();
        debug!(
            difficulty = %self.difficulty,
            source,
            mv = %mv,
            player = %state.turn(),
            think_ms = think_time.as_millis() as u64,
            "AI move chosen"
        );

        Ok(AiMove {
            mv,
            source,
            think_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::legal_moves;

    fn fast_settings() -> AiSettings {
        AiSettings {
            mcts: mcts::MctsConfig::for_testing(),
            heuristic: heuristic::HeuristicConfig::for_testing(),
            opening_book: true,
            tactics: true,
        }
    }

    #[test]
    fn test_book_opening() {
        let mut ai = AiPlayer::with_seed(Difficulty::Hard, &fast_settings(), 1);
        let choice = ai.choose_move(&BoardState::new()).unwrap();
        assert_eq!(choice.mv, Move { row: 4, col: 4 });
        assert_eq!(choice.source, "book");
    }

    #[test]
    fn test_easy_ignores_book() {
        let mut ai = AiPlayer::with_seed(Difficulty::Easy, &fast_settings(), 1);
        let choice = ai.choose_move(&BoardState::new()).unwrap();
        assert_eq!(choice.source, "random");
    }

    #[test]
    fn test_book_disabled() {
        let settings = AiSettings {
            opening_book: false,
            ..fast_settings()
        };
        let mut ai = AiPlayer::with_seed(Difficulty::Medium, &settings, 1);
        let choice = ai.choose_move(&BoardState::new()).unwrap();
        assert_eq!(choice.source, "mcts");
    }

    fn capture_position() -> BoardState {
        let parsed: BoardState = "
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | X X . | . . .
            . . . | O . . | . . .
            . . . | . . O | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
        "
        .parse()
        .unwrap();
        BoardState::from_position(
            *parsed.cells(),
            parsed.turn(),
            engine_core::ActiveBoard::Board { row: 1, col: 1 },
        )
        .unwrap()
    }

    #[test]
    fn test_medium_takes_capture_without_search() {
        let mut ai = AiPlayer::with_seed(Difficulty::Medium, &fast_settings(), 1);
        let choice = ai.choose_move(&capture_position()).unwrap();
        assert_eq!(choice.mv, Move { row: 3, col: 5 });
        assert_eq!(choice.source, "tactics");
    }

    #[test]
    fn test_tactics_disabled() {
        let settings = AiSettings {
            tactics: false,
            ..fast_settings()
        };
        let mut ai = AiPlayer::with_seed(Difficulty::Medium, &settings, 1);
        let choice = ai.choose_move(&capture_position()).unwrap();
        assert_eq!(choice.source, "mcts");
    }

    #[test]
    fn test_tactics_only_for_medium() {
        let mut hard = AiPlayer::with_seed(Difficulty::Hard, &fast_settings(), 1);
        assert_eq!(hard.choose_move(&capture_position()).unwrap().source, "heuristic");
        let mut easy = AiPlayer::with_seed(Difficulty::Easy, &fast_settings(), 1);
        assert_eq!(easy.choose_move(&capture_position()).unwrap().source, "random");
    }

    #[test]
    fn test_seeded_players_agree() {
        let mut state = BoardState::new();
        state.play(Move { row: 4, col: 4 }).unwrap();
        state.play(Move { row: 3, col: 3 }).unwrap();

        let mut a = AiPlayer::with_seed(Difficulty::Medium, &fast_settings(), 8);
        let mut b = AiPlayer::with_seed(Difficulty::Medium, &fast_settings(), 8);
        assert_eq!(
            a.choose_move(&state).unwrap().mv,
            b.choose_move(&state).unwrap().mv
        );
    }

    #[test]
    fn test_full_game_between_players() {
        let mut x = AiPlayer::with_seed(Difficulty::Easy, &fast_settings(), 2);
        let mut o = AiPlayer::with_seed(Difficulty::Easy, &fast_settings(), 3);
        let mut state = BoardState::new();

        while !state.is_terminal() {
            let ai = if state.turn() == engine_core::Player::X {
                &mut x
            } else {
                &mut o
            };
            let choice = ai.choose_move(&state).unwrap();
            assert!(legal_moves(&state).contains(&choice.mv));
            state.play(choice.mv).unwrap();
        }
        assert!(state.winner().is_decided());
        assert!(x.choose_move(&state).is_err());
    }
}
