//! Search tree nodes.
//!
//! Nodes live in an arena ([`crate::tree::SearchTree`]) and reference each
//! other by index, so a child can point back at its parent without owning
//! it; the arena owns every node and is dropped wholesale when a search
//! finishes.

use std::fmt;

use othello_rules::{self as rules, Board, Cell, Side};

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A move edge in the tree: either placing a piece or a forced pass.
///
/// A pass exists only for a node whose side to move has no legal placement
/// while the opponent still has one; expanding it hands the turn over
/// without changing the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Place(Cell),
    Pass,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(cell) => write!(f, "{cell}"),
            Action::Pass => write!(f, "pass"),
        }
    }
}

/// One node of the search tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// The position this node represents.
    pub board: Board,

    /// Whose turn it is at this node.
    pub to_move: Side,

    /// Back-reference for backpropagation; `None` only at the root.
    pub parent: Option<NodeId>,

    /// Children in expansion order.
    pub children: Vec<NodeId>,

    /// Simulations that passed through this node.
    pub visit_count: u32,

    /// Running reward total over those simulations.
    pub reward_sum: f32,

    /// Legal actions not yet expanded into children. Shrinks monotonically;
    /// empty at creation exactly when the position is terminal.
    pub untried_moves: Vec<Action>,

    /// True if neither side has a legal move from this position.
    pub terminal: bool,

    /// The action that produced this node; `None` only at the root.
    pub action: Option<Action>,
}

impl Node {
    /// Create a node for `board` with `to_move` to play.
    ///
    /// The untried list is seeded from the legal placements, or a single
    /// synthetic pass when only the opponent can move.
    pub fn new(board: Board, to_move: Side, parent: Option<NodeId>, action: Option<Action>) -> Self {
        let placements = rules::legal_moves(&board, to_move);
        let (untried_moves, terminal) = if !placements.is_empty() {
            (placements.into_iter().map(Action::Place).collect(), false)
        } else if rules::has_legal_move(&board, to_move.opposite()) {
            (vec![Action::Pass], false)
        } else {
            (Vec::new(), true)
        };

        Self {
            board,
            to_move,
            parent,
            children: Vec::new(),
            visit_count: 0,
            reward_sum: 0.0,
            untried_moves,
            terminal,
            action,
        }
    }

    /// Mean reward over all visits, 0 if the node was never visited.
    pub fn mean_reward(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.reward_sum / self.visit_count as f32
        }
    }
}
