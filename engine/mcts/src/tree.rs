//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! The whole arena is dropped when the search that built it finishes.

use engine_core::{BoardState, Move};

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree rooted at `root_state`.
    pub fn new(root_state: BoardState) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the child of `node_id` with the highest UCB1 score.
    ///
    /// Ties go to the child expanded first.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // ln(N_parent) is shared by every child
        let ln_parent = (node.visits.max(1) as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self.get(child_id).ucb1(ln_parent, exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add a child reached by `mv` from `parent_id`.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, mv: Move, state: BoardState) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, Some(mv), state));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Backpropagate a value from a leaf to the root.
    ///
    /// `value` is from the point of view of the player who moved into the
    /// leaf, and is negated at each level (opponent's perspective).
    pub fn backpropagate(&mut self, leaf_id: NodeId, value: f64) {
        let mut current_id = leaf_id;
        let mut current_value = value;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.reward_sum += current_value;

            current_value = -current_value;
            current_id = node.parent;
        }
    }

    /// Most visited root child as `(move, visits)`.
    ///
    /// Ties are broken by the lowest move in row-major order, so results do
    /// not depend on expansion order.
    pub fn best_move(&self) -> Option<(Move, u32)> {
        self.root_children()
            .max_by(|(mv_a, n_a), (mv_b, n_b)| n_a.cmp(n_b).then_with(|| mv_b.cmp(mv_a)))
    }

    /// Visit count of every expanded root move, in row-major order.
    pub fn visit_counts(&self) -> Vec<(Move, u32)> {
        let mut counts: Vec<_> = self.root_children().collect();
        counts.sort_by_key(|(mv, _)| *mv);
        counts
    }

    /// Child of the root reached by `mv`, if it was expanded.
    pub fn root_child(&self, mv: Move) -> Option<&MctsNode> {
        self.get(self.root)
            .children
            .iter()
            .map(|&id| self.get(id))
            .find(|child| child.mv == Some(mv))
    }

    fn root_children(&self) -> impl Iterator<Item = (Move, u32)> + '_ {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.mv.map(|mv| (mv, child.visits))
            })
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: -root.mean_value(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        // Children are always allocated after their parent, so one forward
        // pass over the arena sees every parent's depth first.
        let mut depth = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                depth[i] = depth[node.parent.0 as usize] + 1;
                max_depth = max_depth.max(depth[i]);
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    /// Mean reward for the player to move at the root.
    pub root_value: f64,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(row: u8, col: u8) -> Move {
        Move { row, col }
    }

    fn after(state: &BoardState, m: Move) -> BoardState {
        state.after(m).unwrap()
    }

    #[test]
    fn test_new_tree() {
        let tree = MctsTree::new(BoardState::new());

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.untried.len(), 81);
    }

    #[test]
    fn test_add_child() {
        let root_state = BoardState::new();
        let mut tree = MctsTree::new(root_state.clone());

        let child_id = tree.add_child(tree.root(), mv(4, 4), after(&root_state, mv(4, 4)));

        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));

        let root = tree.get(tree.root());
        assert_eq!(root.children, vec![NodeId(1)]);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.mv, Some(mv(4, 4)));
        // O is sent to the centre board, which has 8 empty cells left.
        assert_eq!(child.untried.len(), 8);
    }

    #[test]
    fn test_backpropagate() {
        let s0 = BoardState::new();
        let s1 = after(&s0, mv(0, 0));
        let s2 = after(&s1, mv(1, 1));

        let mut tree = MctsTree::new(s0);
        let child_id = tree.add_child(tree.root(), mv(0, 0), s1);
        let grandchild_id = tree.add_child(child_id, mv(1, 1), s2);

        tree.backpropagate(grandchild_id, 1.0);

        assert_eq!(tree.get(grandchild_id).visits, 1);
        assert_eq!(tree.get(child_id).visits, 1);
        assert_eq!(tree.get(tree.root()).visits, 1);

        // Negated at each level
        assert!((tree.get(grandchild_id).reward_sum - 1.0).abs() < 1e-9);
        assert!((tree.get(child_id).reward_sum - (-1.0)).abs() < 1e-9);
        assert!((tree.get(tree.root()).reward_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_select_child_prefers_higher_mean() {
        let s0 = BoardState::new();
        let mut tree = MctsTree::new(s0.clone());
        let a = tree.add_child(tree.root(), mv(0, 0), after(&s0, mv(0, 0)));
        let b = tree.add_child(tree.root(), mv(4, 4), after(&s0, mv(4, 4)));

        tree.get_mut(tree.root()).visits = 20;
        tree.get_mut(a).visits = 10;
        tree.get_mut(a).reward_sum = -5.0;
        tree.get_mut(b).visits = 10;
        tree.get_mut(b).reward_sum = 5.0;

        assert_eq!(tree.select_child(tree.root(), 1.4), Some(b));
    }

    #[test]
    fn test_select_child_tie_goes_to_first() {
        let s0 = BoardState::new();
        let mut tree = MctsTree::new(s0.clone());
        let a = tree.add_child(tree.root(), mv(8, 8), after(&s0, mv(8, 8)));
        let b = tree.add_child(tree.root(), mv(0, 0), after(&s0, mv(0, 0)));

        tree.get_mut(tree.root()).visits = 2;
        tree.get_mut(a).visits = 1;
        tree.get_mut(b).visits = 1;

        assert_eq!(tree.select_child(tree.root(), 1.4), Some(a));
    }

    #[test]
    fn test_best_move_breaks_ties_row_major() {
        let s0 = BoardState::new();
        let mut tree = MctsTree::new(s0.clone());
        let late = tree.add_child(tree.root(), mv(8, 8), after(&s0, mv(8, 8)));
        let early = tree.add_child(tree.root(), mv(2, 3), after(&s0, mv(2, 3)));
        let other = tree.add_child(tree.root(), mv(0, 1), after(&s0, mv(0, 1)));

        tree.get_mut(late).visits = 7;
        tree.get_mut(early).visits = 7;
        tree.get_mut(other).visits = 3;

        assert_eq!(tree.best_move(), Some((mv(2, 3), 7)));
        assert_eq!(
            tree.visit_counts(),
            vec![(mv(0, 1), 3), (mv(2, 3), 7), (mv(8, 8), 7)]
        );
    }

    #[test]
    fn test_best_move_empty_root() {
        let tree = MctsTree::new(BoardState::new());
        assert!(tree.best_move().is_none());
    }

    #[test]
    fn test_tree_stats() {
        let s0 = BoardState::new();
        let s1 = after(&s0, mv(0, 0));
        let s2 = after(&s1, mv(1, 1));

        let mut tree = MctsTree::new(s0.clone());
        let child = tree.add_child(tree.root(), mv(0, 0), s1);
        tree.add_child(child, mv(1, 1), s2);
        tree.add_child(tree.root(), mv(4, 4), after(&s0, mv(4, 4)));

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.root_visits, 0);
    }
}
