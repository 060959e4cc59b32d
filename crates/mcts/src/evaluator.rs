//! Leaf evaluation strategies.
//!
//! The `LeafEvaluator` trait is the seam between tree mechanics and
//! position scoring: the search hands a newly reached position to its
//! evaluator and gets back a scalar in [-1, 1], scored for the side to
//! move at that position. Two strategies are provided and chosen at
//! construction time, never branched on per call:
//! - `RolloutEvaluator` estimates by playing a uniformly random game to
//!   completion.
//! - `ValueEvaluator` delegates to an externally trained value function.

use othello_core::Value;
use othello_rules::{self as rules, Board, GameResult, Side};
use rand::Rng;
use thiserror::Error;

/// Errors raised while scoring a position.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    /// An external value function returned a non-finite or out-of-range
    /// score. Clamping here would mask a broken model integration, so the
    /// search call fails instead.
    #[error("evaluator returned {value}, expected a finite score in [-1, 1]")]
    InvalidValue { value: f32 },
}

/// Scores a position for the side to move, in [-1, 1].
pub trait LeafEvaluator {
    fn evaluate(&mut self, board: &Board, to_move: Side) -> Result<f32, EvaluatorError>;
}

impl<E: LeafEvaluator + ?Sized> LeafEvaluator for Box<E> {
    fn evaluate(&mut self, board: &Board, to_move: Side) -> Result<f32, EvaluatorError> {
        (**self).evaluate(board, to_move)
    }
}

/// Estimates a position by playing uniformly random legal moves for both
/// sides until the game ends, passing whenever a side is stuck.
///
/// The reward is +1 if the side to move at the start of the rollout wins
/// the simulated game, 0 on a draw and -1 otherwise. A terminal position
/// is scored directly from its final counts.
pub struct RolloutEvaluator<R: Rng> {
    rng: R,
}

impl<R: Rng> RolloutEvaluator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LeafEvaluator for RolloutEvaluator<R> {
    fn evaluate(&mut self, board: &Board, to_move: Side) -> Result<f32, EvaluatorError> {
        let mut current = *board;
        let mut turn = to_move;

        while !rules::is_terminal(&current, turn) {
            let moves = rules::legal_moves(&current, turn);
            if !moves.is_empty() {
                let cell = moves[self.rng.gen_range(0..moves.len())];
                current = rules::apply_move(&current, cell, turn);
            }
            // An empty move list is a pass; the turn flips either way.
            turn = turn.opposite();
        }

        Ok(match rules::winner(&current) {
            GameResult::Win(side) if side == to_move => 1.0,
            GameResult::Win(_) => -1.0,
            GameResult::Draw => 0.0,
        })
    }
}

/// Wraps an externally trained value function `f(board, to_move)`.
///
/// No simulation is performed; the function's result is validated through
/// [`Value`] and any non-finite or out-of-range score is reported as an
/// [`EvaluatorError::InvalidValue`].
pub struct ValueEvaluator<F> {
    value_fn: F,
}

impl<F> ValueEvaluator<F>
where
    F: FnMut(&Board, Side) -> f32,
{
    pub fn new(value_fn: F) -> Self {
        Self { value_fn }
    }
}

impl<F> LeafEvaluator for ValueEvaluator<F>
where
    F: FnMut(&Board, Side) -> f32,
{
    fn evaluate(&mut self, board: &Board, to_move: Side) -> Result<f32, EvaluatorError> {
        let raw = (self.value_fn)(board, to_move);
        let value = Value::new(raw).map_err(|_| EvaluatorError::InvalidValue { value: raw })?;
        Ok(value.get())
    }
}
