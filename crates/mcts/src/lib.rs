//! Monte Carlo Tree Search for Othello.
//!
//! This crate builds a game tree over positions supplied by
//! `othello_rules`, balancing exploration and exploitation with UCT, and
//! scores newly reached positions through a pluggable [`LeafEvaluator`]:
//! random playouts ([`RolloutEvaluator`]) or an externally trained value
//! function ([`ValueEvaluator`]).
//!
//! # Features
//!
//! - **UCT selection** with deterministic tie-breaks and an infinite score
//!   for unvisited children
//! - **Incremental expansion**: one child per simulation, popped from a
//!   pre-listed legal-move sequence
//! - **Pass-aware trees**: a side with no legal move hands the turn over
//!   through a synthetic pass edge instead of ending the game
//! - **Configurable backpropagation** ([`BackpropMode`]): identical-reward
//!   propagation, or the textbook alternating-sign convention
//!
//! # Example
//!
//! ```
//! use othello_mcts::{Mcts, RolloutEvaluator, SearchConfig};
//! use othello_rules::{Board, Side};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
//! let mut engine = Mcts::new(SearchConfig::with_iterations(100), evaluator);
//!
//! let board = Board::standard_opening();
//! let chosen = engine.select_move(&board, Side::Black).unwrap();
//! assert!(chosen.is_some());
//! ```

pub mod config;
pub mod evaluator;
mod node;
pub mod search;
mod tree;

pub use config::{BackpropMode, SearchConfig};
pub use evaluator::{EvaluatorError, LeafEvaluator, RolloutEvaluator, ValueEvaluator};
pub use search::{Mcts, SearchError};
