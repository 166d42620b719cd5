//! MCTS tree node representation.
//!
//! Each node represents a game state reached by playing a move from the parent.
//! Nodes store visit statistics used for UCB1 selection and the moves that
//! have not been expanded yet.

use engine_core::{legal_moves, BoardState, Move};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub mv: Option<Move>,

    /// Game state at this node
    pub state: BoardState,

    /// Number of times this node has been visited
    pub visits: u32,

    /// Sum of rewards backpropagated through this node, from the point of
    /// view of the player who moved into it.
    pub reward_sum: f64,

    /// Legal moves not yet expanded into children.
    pub untried: Vec<Move>,

    /// Expanded children, in expansion order.
    pub children: Vec<NodeId>,
}

impl MctsNode {
    /// Create a new root node.
    pub fn new_root(state: BoardState) -> Self {
        Self::new_child(NodeId::NONE, None, state)
    }

    /// Create a new child node. Its untried moves are the legal moves of
    /// `state` (none if terminal).
    pub fn new_child(parent: NodeId, mv: Option<Move>, state: BoardState) -> Self {
        let untried = legal_moves(&state);
        Self {
            parent,
            mv,
            state,
            visits: 0,
            reward_sum: 0.0,
            untried,
            children: Vec::new(),
        }
    }

    /// Mean reward W/N. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward_sum / self.visits as f64
        }
    }

    /// UCB1 score as seen from the parent:
    /// `W/N + C * sqrt(ln(N_parent) / N)`.
    ///
    /// The stored reward is already from the parent's mover's point of view,
    /// so no negation happens here. Unvisited nodes score infinity.
    #[inline]
    pub fn ucb1(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        self.mean_value() + exploration * (ln_parent_visits / n).sqrt()
    }

    /// Whether every legal move has been expanded.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
