//! Strategy dispatch.

use engine_config::CentralConfig;
use engine_core::{BoardState, EngineError, Move};
use heuristic::HeuristicConfig;
use mcts::MctsConfig;
use rand_chacha::ChaCha20Rng;

use crate::difficulty::Difficulty;
use crate::random;

/// Search settings for every difficulty.
#[derive(Debug, Clone, PartialEq)]
pub struct AiSettings {
    pub mcts: MctsConfig,
    pub heuristic: HeuristicConfig,
    /// Use the opening book for Medium and Hard
    pub opening_book: bool,
    /// Let Medium take immediate captures and blocks before searching
    pub tactics: bool,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            mcts: MctsConfig::default(),
            heuristic: HeuristicConfig::default(),
            opening_book: true,
            tactics: true,
        }
    }
}

impl From<&CentralConfig> for AiSettings {
    fn from(config: &CentralConfig) -> Self {
        let heuristic = HeuristicConfig {
            max_depth: config.heuristic.max_depth,
            time_limit: config.heuristic.time_limit(),
            max_nodes: config.heuristic.node_limit(),
            wide_branching: config.heuristic.wide_branching,
            wide_reduction: config.heuristic.wide_reduction,
            ..HeuristicConfig::default()
        };
        Self {
            mcts: MctsConfig {
                exploration: config.mcts.exploration,
                max_iterations: config.mcts.max_iterations,
                time_limit: config.mcts.time_limit(),
                max_nodes: config.mcts.node_limit().unwrap_or(usize::MAX),
            },
            heuristic,
            opening_book: config.ai.opening_book,
            tactics: config.ai.tactics,
        }
    }
}

/// A move-selection algorithm with its configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    Random,
    Mcts(MctsConfig),
    Heuristic(HeuristicConfig),
}

impl Strategy {
    pub fn for_difficulty(difficulty: Difficulty, settings: &AiSettings) -> Self {
        match difficulty {
            Difficulty::Easy => Strategy::Random,
            Difficulty::Medium => Strategy::Mcts(settings.mcts.clone()),
            Difficulty::Hard => Strategy::Heuristic(settings.heuristic.clone()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Mcts(_) => "mcts",
            Strategy::Heuristic(_) => "heuristic",
        }
    }

    /// Choose a move for the side to move.
    ///
    /// Fails with [`EngineError::NoLegalMoves`] on a finished game.
    pub fn select_move(
        &self,
        state: &BoardState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Move, EngineError> {
        match self {
            Strategy::Random => random::select_move(state, rng),
            Strategy::Mcts(config) => {
                mcts::run_mcts(state, config.clone(), rng).map(|r| r.best_move)
            }
            Strategy::Heuristic(config) => {
                heuristic::search(state, config.clone()).map(|r| r.best_move)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{legal_moves, ActiveBoard, Cell, Player};
    use rand::SeedableRng;

    fn fast_settings() -> AiSettings {
        AiSettings {
            mcts: MctsConfig::for_testing(),
            heuristic: HeuristicConfig::for_testing(),
            opening_book: false,
            tactics: false,
        }
    }

    fn all_strategies() -> Vec<Strategy> {
        let settings = fast_settings();
        Difficulty::ALL
            .iter()
            .map(|&d| Strategy::for_difficulty(d, &settings))
            .collect()
    }

    fn position(diagram: &str, turn: Player, active: ActiveBoard) -> BoardState {
        let parsed: BoardState = diagram.parse().unwrap();
        BoardState::from_position(*parsed.cells(), turn, active).unwrap()
    }

    #[test]
    fn test_difficulty_mapping() {
        let settings = fast_settings();
        assert_eq!(Strategy::for_difficulty(Difficulty::Easy, &settings), Strategy::Random);
        assert!(matches!(
            Strategy::for_difficulty(Difficulty::Medium, &settings),
            Strategy::Mcts(_)
        ));
        assert!(matches!(
            Strategy::for_difficulty(Difficulty::Hard, &settings),
            Strategy::Heuristic(_)
        ));
    }

    #[test]
    fn test_single_legal_move_for_every_strategy() {
        let state = position(
            "
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | X O X | . . .
            . . . | X O O | . . .
            . . . | O X . | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ",
            Player::X,
            ActiveBoard::Board { row: 1, col: 1 },
        );
        for strategy in all_strategies() {
            let mut rng = ChaCha20Rng::seed_from_u64(0);
            assert_eq!(
                strategy.select_move(&state, &mut rng).unwrap(),
                Move { row: 5, col: 5 },
                "{}",
                strategy.name()
            );
        }
    }

    #[test]
    fn test_terminal_state_fails_for_every_strategy() {
        let mut cells = [[Cell::Empty; 9]; 9];
        for b in 0..3 {
            for c in 0..3 {
                cells[b * 3][b * 3 + c] = Cell::X;
            }
        }
        let state = BoardState::from_position(cells, Player::O, ActiveBoard::Any).unwrap();
        for strategy in all_strategies() {
            let mut rng = ChaCha20Rng::seed_from_u64(0);
            assert_eq!(
                strategy.select_move(&state, &mut rng),
                Err(EngineError::NoLegalMoves)
            );
        }
    }

    #[test]
    fn test_searching_strategies_take_the_win() {
        let state = position(
            "
            X X X | X X X | X X .
            O O . | O O . | . . .
            . . . | . . . | . . .
            ------+-------+------
            O . . | O . . | O . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            O . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ",
            Player::X,
            ActiveBoard::Board { row: 0, col: 2 },
        );
        let settings = fast_settings();
        for d in [Difficulty::Medium, Difficulty::Hard] {
            let mut rng = ChaCha20Rng::seed_from_u64(5);
            let mv = Strategy::for_difficulty(d, &settings)
                .select_move(&state, &mut rng)
                .unwrap();
            assert_eq!(mv, Move { row: 0, col: 8 }, "{}", d);
        }
    }

    #[test]
    fn test_strategies_are_deterministic() {
        let mut state = BoardState::new();
        state.play(Move { row: 4, col: 4 }).unwrap();

        for strategy in all_strategies() {
            let mut rng1 = ChaCha20Rng::seed_from_u64(17);
            let mut rng2 = ChaCha20Rng::seed_from_u64(17);
            let a = strategy.select_move(&state, &mut rng1).unwrap();
            let b = strategy.select_move(&state, &mut rng2).unwrap();
            assert_eq!(a, b, "{}", strategy.name());
            assert!(legal_moves(&state).contains(&a));
        }
    }

    #[test]
    fn test_settings_from_central_config() {
        let mut config = CentralConfig::default();
        config.mcts.max_iterations = 123;
        config.mcts.time_limit_ms = 0;
        config.heuristic.max_depth = 3;
        config.mcts.max_nodes = 0;
        config.heuristic.max_nodes = 0;
        config.ai.opening_book = false;
        config.ai.tactics = false;

        let settings = AiSettings::from(&config);
        assert_eq!(settings.mcts.max_iterations, 123);
        assert!(settings.mcts.time_limit.is_none());
        assert_eq!(settings.mcts.max_nodes, usize::MAX);
        assert_eq!(settings.heuristic.max_depth, 3);
        assert!(settings.heuristic.max_nodes.is_none());
        assert_eq!(settings.heuristic.shallow_plies, 2);
        assert!(!settings.opening_book);
        assert!(!settings.tactics);
    }
}
