//! Monte Carlo Tree Search driver.
//!
//! Each `select_move` call builds a private tree from scratch, runs the
//! configured number of simulations, extracts the best root move, and
//! drops the tree. One simulation is: descend with the tree policy until a
//! node is expanded (or a terminal node is reached), score that node with
//! the leaf evaluator, then backpropagate the reward to the root.

use othello_rules::{self as rules, Board, Cell, Side};
use thiserror::Error;
use tracing::trace;

use crate::config::{BackpropMode, SearchConfig};
use crate::evaluator::{EvaluatorError, LeafEvaluator};
use crate::node::{Action, Node, NodeId};
use crate::tree::SearchTree;

/// Errors that can occur during a search.
///
/// A position with no legal move is not an error: `select_move` reports it
/// as `Ok(None)` and the caller advances the turn.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),
}

/// Monte Carlo Tree Search engine.
///
/// Generic over the leaf evaluation strategy `E`, fixed at construction so
/// the simulation loop never branches on evaluator kind.
pub struct Mcts<E: LeafEvaluator> {
    config: SearchConfig,
    evaluator: E,
}

impl<E: LeafEvaluator> Mcts<E> {
    /// Create a new engine.
    pub fn new(config: SearchConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }

    /// Search from `board` with `to_move` to play and return the best move
    /// found within the iteration budget.
    ///
    /// Returns `Ok(None)` when the side to move has no legal move (forced
    /// pass or finished game), or when a zero budget left the root
    /// childless.
    ///
    /// # Errors
    /// Fails if the leaf evaluator reports a fault; the partial search is
    /// discarded.
    pub fn select_move(&mut self, board: &Board, to_move: Side) -> Result<Option<Cell>, SearchError> {
        if !rules::has_legal_move(board, to_move) {
            trace!(%to_move, "no legal move at the root");
            return Ok(None);
        }

        let tree = self.build_tree(*board, to_move)?;
        let chosen = best_root_move(&tree);
        trace!(
            chosen = ?chosen,
            nodes = tree.len(),
            root_visits = tree.root().visit_count,
            "search finished"
        );
        Ok(chosen)
    }

    /// Run the simulation loop and return the finished tree.
    fn build_tree(&mut self, board: Board, to_move: Side) -> Result<SearchTree, SearchError> {
        let mut tree = SearchTree::new(board, to_move);
        for _ in 0..self.config.iterations {
            let leaf = self.descend(&mut tree);
            let (leaf_board, leaf_side) = {
                let node = tree.get(leaf);
                (node.board, node.to_move)
            };
            let reward = self.evaluator.evaluate(&leaf_board, leaf_side)?;
            self.backpropagate(&mut tree, leaf, reward);
        }
        Ok(tree)
    }

    /// Tree policy: walk down from the root, expanding the first node that
    /// still has an untried move, otherwise following the UCT-best child.
    /// Returns the node to evaluate this iteration.
    fn descend(&self, tree: &mut SearchTree) -> NodeId {
        let mut id = NodeId::ROOT;
        loop {
            let node = tree.get(id);
            if node.terminal {
                return id;
            }
            if !node.untried_moves.is_empty() {
                return expand(tree, id);
            }
            if node.children.is_empty() {
                // Fully searched dead end; nothing left to expand below.
                return id;
            }
            id = best_child(tree, id, self.config.exploration);
        }
    }

    /// Apply `reward` along the path from `leaf` up to the root inclusive.
    fn backpropagate(&self, tree: &mut SearchTree, leaf: NodeId, reward: f32) {
        let mut value = match self.config.backprop {
            BackpropMode::SameSign => reward,
            // The evaluated node is scored for the side whose move created
            // it, so it takes the negated reward; the sign then alternates
            // once per edge.
            BackpropMode::AlternateSign => -reward,
        };

        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = tree.get_mut(id);
            node.visit_count += 1;
            node.reward_sum += value;
            if self.config.backprop == BackpropMode::AlternateSign {
                value = -value;
            }
            current = node.parent;
        }
    }
}

/// Pop the next untried action of `id`, apply it, and attach the new child.
fn expand(tree: &mut SearchTree, id: NodeId) -> NodeId {
    let node = tree.get_mut(id);
    let action = node
        .untried_moves
        .pop()
        .expect("BUG: expand called on a node without untried moves");
    let board = node.board;
    let to_move = node.to_move;

    let child_board = match action {
        Action::Place(cell) => rules::apply_move(&board, cell, to_move),
        Action::Pass => board,
    };
    let child = Node::new(child_board, to_move.opposite(), Some(id), Some(action));
    let child_id = tree.add(child);
    tree.get_mut(id).children.push(child_id);
    child_id
}

/// The child of `id` maximizing the UCT score; ties keep the first maximal
/// child in child-list order.
fn best_child(tree: &SearchTree, id: NodeId, exploration: f32) -> NodeId {
    let node = tree.get(id);
    let parent_visits = node.visit_count as f32;

    let mut best = None;
    let mut best_score = f32::NEG_INFINITY;
    for &child_id in &node.children {
        let score = uct_score(tree.get(child_id), parent_visits, exploration);
        if score > best_score {
            best_score = score;
            best = Some(child_id);
        }
    }

    best.expect("BUG: best_child called on a node without children")
}

/// UCT score of a child given its parent's visit count.
///
/// An unvisited child scores +infinity, so every child is tried before any
/// exploitation comparison and the visit-count division is never by zero.
fn uct_score(child: &Node, parent_visits: f32, exploration: f32) -> f32 {
    if child.visit_count == 0 {
        return f32::INFINITY;
    }
    let visits = child.visit_count as f32;
    child.mean_reward() + exploration * (2.0 * parent_visits.ln() / visits).sqrt()
}

/// Extract the move of the root child with the best average reward
/// (exploration constant 0).
fn best_root_move(tree: &SearchTree) -> Option<Cell> {
    let root = tree.root();
    if root.children.is_empty() {
        return None;
    }

    let best = best_child(tree, NodeId::ROOT, 0.0);
    let chosen = tree.get(best);
    debug_assert!(
        chosen.visit_count > 0 || root.children.iter().all(|&c| tree.get(c).visit_count == 0),
        "final extraction chose an unvisited child over visited siblings"
    );

    match chosen.action {
        Some(Action::Place(cell)) => Some(cell),
        // Pass edges exist only below the root; a root pass was already
        // reported as "no move" before the tree was built.
        _ => None,
    }
}
