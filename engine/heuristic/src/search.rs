//! Negamax alpha-beta search with iterative deepening.
//!
//! Each iteration searches the full window from the root. An iteration that
//! runs out of time or nodes is thrown away and the previous one stands.

use std::time::Instant;

use engine_core::{legal_moves, BoardState, EngineError, Move};
use tracing::{debug, trace};

use crate::config::HeuristicConfig;
use crate::eval::{evaluate, terminal_score, WIN_SCORE, WIN_THRESHOLD};
use crate::ordering::order_moves;
use crate::tt::{Bound, TranspositionTable};

const INF: i32 = WIN_SCORE + 1;

/// Result of a heuristic search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found
    pub best_move: Move,
    /// Score of the best move for the side to move
    pub score: i32,
    /// Depth of the last completed iteration (0 if none completed)
    pub depth: u32,
    /// Total nodes searched, including any aborted iteration
    pub nodes: u64,
}

/// Per-search state. The transposition table is dropped with it.
pub struct Searcher {
    config: HeuristicConfig,
    tt: TranspositionTable,
    nodes: u64,
    start: Instant,
    aborted: bool,
}

impl Searcher {
    pub fn new(config: HeuristicConfig) -> Self {
        Self {
            config,
            tt: TranspositionTable::new(),
            nodes: 0,
            start: Instant::now(),
            aborted: false,
        }
    }

    /// Search `state` for the side to move.
    pub fn search(&mut self, state: &BoardState) -> Result<SearchResult, EngineError> {
        let mut moves = legal_moves(state);
        if moves.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }
        if moves.len() == 1 {
            return Ok(SearchResult {
                best_move: moves[0],
                score: 0,
                depth: 0,
                nodes: 0,
            });
        }

        self.start = Instant::now();
        self.nodes = 0;
        self.aborted = false;

        // Fallback if not even depth 1 completes.
        order_moves(state, &mut moves, None);
        let mut best = SearchResult {
            best_move: moves[0],
            score: 0,
            depth: 0,
            nodes: 0,
        };

        let empty_cells = 81 - state.move_count() as u32;
        let max_depth = self.config.max_depth.max(1).min(empty_cells);

        for depth in 1..=max_depth {
            let Some((mv, score)) = self.search_root(state, depth) else {
                debug!(depth, nodes = self.nodes, "Iteration aborted");
                break;
            };

            best.best_move = mv;
            best.score = score;
            best.depth = depth;

            trace!(depth, best_move = %mv, score, nodes = self.nodes, "Iteration complete");

            if score.abs() >= WIN_THRESHOLD {
                break;
            }
        }

        best.nodes = self.nodes;
        debug!(
            best_move = %best.best_move,
            score = best.score,
            depth = best.depth,
            nodes = best.nodes,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "Heuristic search complete"
        );
        Ok(best)
    }

    /// One full-window iteration. None if it was aborted.
    fn search_root(&mut self, state: &BoardState, depth: u32) -> Option<(Move, i32)> {
        let mut moves = legal_moves(state);
        let tt_move = self.tt.lookup(state, depth, 0, -INF, INF).best_move;
        order_moves(state, &mut moves, tt_move);

        let child_depth = self.child_depth(depth, 0, moves.len());
        let mut alpha = -INF;
        let mut best_move = moves[0];

        for mv in moves {
            let child = state.after(mv).ok()?;
            let score = -self.negamax(&child, child_depth, 1, -INF, -alpha);
            if self.aborted {
                return None;
            }
            if score > alpha {
                alpha = score;
                best_move = mv;
            }
        }

        self.tt
            .store(state, depth, 0, alpha, Bound::Exact, Some(best_move));
        Some((best_move, alpha))
    }

    fn negamax(
        &mut self,
        state: &BoardState,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if self.out_of_budget() {
            self.aborted = true;
            return 0;
        }

        let side = state.turn();
        if state.is_terminal() {
            return terminal_score(state.winner(), side, ply);
        }
        if depth == 0 {
            return evaluate(state, side);
        }

        let hit = self.tt.lookup(state, depth, ply, alpha, beta);
        if let Some(score) = hit.score {
            return score;
        }

        let mut moves = legal_moves(state);
        order_moves(state, &mut moves, hit.best_move);
        let child_depth = self.child_depth(depth, ply, moves.len());

        let original_alpha = alpha;
        let mut best_score = -INF;
        let mut best_move = None;

        for mv in moves {
            let Ok(child) = state.after(mv) else {
                continue;
            };
            let score = -self.negamax(&child, child_depth, ply + 1, -beta, -alpha);
            if self.aborted {
                return 0;
            }
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score <= original_alpha {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(state, depth, ply, best_score, bound, best_move);
        best_score
    }

    /// Remaining depth for the children of a node at `ply` with `branching`
    /// legal moves.
    fn child_depth(&self, depth: u32, ply: u32, branching: usize) -> u32 {
        let mut remaining = depth.saturating_sub(1);
        if ply < self.config.shallow_plies && branching > self.config.wide_branching {
            remaining = remaining.saturating_sub(self.config.wide_reduction);
        }
        remaining
    }

    fn out_of_budget(&self) -> bool {
        if let Some(max_nodes) = self.config.max_nodes {
            if self.nodes > max_nodes {
                return true;
            }
        }
        // Clock reads are comparatively slow; check every 1024 nodes.
        if let Some(limit) = self.config.time_limit {
            if self.nodes & 1023 == 0 && self.start.elapsed() >= limit {
                return true;
            }
        }
        false
    }
}

/// Convenience function to run a single heuristic search.
pub fn search(state: &BoardState, config: HeuristicConfig) -> Result<SearchResult, EngineError> {
    Searcher::new(config).search(state)
}
