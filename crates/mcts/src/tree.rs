//! Arena-allocated search tree.
//!
//! Nodes are stored in a contiguous vector and referenced by index. The
//! parent back-reference a node needs for backpropagation is therefore a
//! plain index, with the arena as the single owner of every node. A tree
//! lives for exactly one `select_move` call.

use othello_rules::{Board, Side};

use crate::node::{Node, NodeId};

/// Arena of search nodes, rooted at index 0.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    /// Create a tree whose root represents `board` with `to_move` to play.
    pub fn new(board: Board, to_move: Side) -> Self {
        Self {
            nodes: vec![Node::new(board, to_move, None, None)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Add a node to the arena, returning its ID.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always contains at least the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        self.get(NodeId::ROOT)
    }
}
