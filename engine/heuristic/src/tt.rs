//! Transposition table for caching search results.
//!
//! The table lives for a single search and is keyed by the full board state,
//! so there are no hash collisions to guard against.

use std::collections::HashMap;

use engine_core::{BoardState, Move};

use crate::eval::WIN_THRESHOLD;

/// How a stored score relates to the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    Lower,
    /// Upper bound - score <= stored value (alpha fail-low)
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    /// Remaining depth searched below this position
    pub depth: u32,
    /// Score, with win/loss scores made relative to this position
    pub score: i32,
    pub bound: Bound,
    /// Best move found for this position
    pub best_move: Option<Move>,
}

/// Outcome of a table lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lookup {
    /// Score usable as the search result, if the entry allows a cutoff
    pub score: Option<i32>,
    /// Stored best move, for move ordering
    pub best_move: Option<Move>,
}

#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<BoardState, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `state` searched to at least `depth` at distance `ply` from the
    /// root.
    ///
    /// The score is only returned when the stored bound settles the
    /// `[alpha, beta]` window; the best move is returned whenever the
    /// position is known.
    pub fn lookup(
        &self,
        state: &BoardState,
        depth: u32,
        ply: u32,
        alpha: i32,
        beta: i32,
    ) -> Lookup {
        let Some(entry) = self.entries.get(state) else {
            return Lookup::default();
        };

        let score = from_tt(entry.score, ply);
        let usable = entry.depth >= depth
            && match entry.bound {
                Bound::Exact => true,
                Bound::Lower => score >= beta,
                Bound::Upper => score <= alpha,
            };

        Lookup {
            score: usable.then_some(score),
            best_move: entry.best_move,
        }
    }

    /// Store a result, keeping the deeper of an existing and a new entry.
    pub fn store(
        &mut self,
        state: &BoardState,
        depth: u32,
        ply: u32,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        let entry = TtEntry {
            depth,
            score: to_tt(score, ply),
            bound,
            best_move,
        };
        match self.entries.get_mut(state) {
            Some(existing) if existing.depth > depth => {}
            Some(existing) => *existing = entry,
            None => {
                self.entries.insert(state.clone(), entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Win/loss scores carry the distance from the root. Stored entries use the
// distance from the entry's own position instead.
fn to_tt(score: i32, ply: u32) -> i32 {
    if score >= WIN_THRESHOLD {
        score + ply as i32
    } else if score <= -WIN_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

fn from_tt(score: i32, ply: u32) -> i32 {
    if score >= WIN_THRESHOLD {
        score - ply as i32
    } else if score <= -WIN_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}
