//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse fully expanded nodes using UCB1
//! 2. Expansion: Add one child for an untried move
//! 3. Simulation: Play uniformly random moves until the game ends
//! 4. Backpropagation: Update statistics along the path

use std::time::Instant;

use engine_core::rules::legal_moves_into;
use engine_core::{legal_moves, BoardState, EngineError, Move, Player};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::tree::{MctsTree, TreeStats};

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move to play (most visited root child)
    pub best_move: Move,

    /// Visit counts of the expanded root moves, in row-major order
    pub visits: Vec<(Move, u32)>,

    /// Mean reward of the chosen child for the player to move, in [-1, 1]
    pub value: f64,

    /// Number of iterations performed
    pub iterations: u32,

    /// Nodes allocated in the arena
    pub nodes: usize,
}

/// MCTS search state.
pub struct MctsSearch {
    tree: MctsTree,
    config: MctsConfig,
    root_player: Player,
    /// Scratch buffer for playout move generation
    move_buf: Vec<Move>,
}

impl MctsSearch {
    /// Create a new MCTS search from the given game state.
    pub fn new(state: &BoardState, config: MctsConfig) -> Self {
        Self {
            root_player: state.turn(),
            tree: MctsTree::new(state.clone()),
            config,
            move_buf: Vec::with_capacity(81),
        }
    }

    /// Run the search until the iteration or time budget is exhausted.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, EngineError> {
        let root = self.tree.get(self.tree.root());
        if root.is_terminal() {
            return Err(EngineError::NoLegalMoves);
        }

        // A forced move needs no search.
        if root.untried.len() == 1 && root.children.is_empty() {
            let only = root.untried[0];
            return Ok(SearchResult {
                best_move: only,
                visits: vec![(only, 0)],
                value: 0.0,
                iterations: 0,
                nodes: self.tree.len(),
            });
        }

        let start = Instant::now();
        let mut iterations = 0u32;
        let max_iterations = self.config.max_iterations.max(1);

        while iterations < max_iterations {
            self.iterate(rng);
            iterations += 1;

            if let Some(limit) = self.config.time_limit {
                if start.elapsed() >= limit {
                    debug!(iterations, "MCTS time limit reached");
                    break;
                }
            }
        }

        let (best_move, best_visits) = self.tree.best_move().ok_or(EngineError::NoLegalMoves)?;
        let value = self
            .tree
            .root_child(best_move)
            .map(|child| child.mean_value())
            .unwrap_or(0.0);

        debug!(
            best_move = %best_move,
            visits = best_visits,
            value,
            iterations,
            nodes = self.tree.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "MCTS search complete"
        );

        Ok(SearchResult {
            best_move,
            visits: self.tree.visit_counts(),
            value,
            iterations,
            nodes: self.tree.len(),
        })
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    fn iterate(&mut self, rng: &mut ChaCha20Rng) {
        let selected = self.select();
        let leaf_id = self.expand(selected, rng);

        let leaf_state = self.tree.get(leaf_id).state.clone();
        let leaf_mover = leaf_state.turn().opponent();
        let reward = self.simulate(leaf_state, rng);

        // Playout reward is relative to the root player; store it from the
        // point of view of whoever moved into the leaf.
        let value = if leaf_mover == self.root_player {
            reward
        } else {
            -reward
        };
        self.tree.backpropagate(leaf_id, value);

        trace!(leaf = leaf_id.0, reward, "MCTS iteration complete");
    }

    /// Descend through fully expanded nodes using UCB1.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if !node.is_fully_expanded() || node.is_leaf() {
                return current;
            }
            match self.tree.select_child(current, self.config.exploration) {
                Some(child_id) => current = child_id,
                None => return current,
            }
        }
    }

    /// Expand one untried move of `node_id`, returning the new child.
    ///
    /// Terminal nodes and a full arena return `node_id` itself, which is
    /// then simulated directly. The root always gets its first child so a
    /// tiny node budget still yields a move.
    fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> NodeId {
        let unexpanded_root =
            node_id == self.tree.root() && self.tree.get(node_id).children.is_empty();
        if self.tree.len() >= self.config.max_nodes && !unexpanded_root {
            return node_id;
        }

        let node = self.tree.get_mut(node_id);
        if node.untried.is_empty() {
            return node_id;
        }

        let idx = rng.gen_range(0..node.untried.len());
        let mv = node.untried.swap_remove(idx);
        let state = node.state.clone();

        match state.after(mv) {
            Ok(child_state) => self.tree.add_child(node_id, mv, child_state),
            // Untried moves come from legal_moves on the same state.
            Err(_) => node_id,
        }
    }

    /// Random playout from `state`. Returns +1 if the root player wins,
    /// -1 if they lose and 0 for a draw.
    fn simulate(&mut self, mut state: BoardState, rng: &mut ChaCha20Rng) -> f64 {
        while !state.is_terminal() {
            legal_moves_into(&state, &mut self.move_buf);
            if self.move_buf.is_empty() {
                break;
            }
            let mv = self.move_buf[rng.gen_range(0..self.move_buf.len())];
            if state.play(mv).is_err() {
                break;
            }
        }
        state.winner().reward_for(self.root_player)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts(
    state: &BoardState,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, EngineError> {
    if legal_moves(state).is_empty() {
        return Err(EngineError::NoLegalMoves);
    }
    MctsSearch::new(state, config).run(rng)
}
