//! Move legality, application, and game termination.
//!
//! Everything here is a pure function over a [`Board`]: inputs are never
//! mutated, and `apply_move` returns a fresh board. The single
//! correctness-critical primitive is [`flips_for`]; legality and move
//! application are both defined in terms of it.

use std::cmp::Ordering;

use crate::board::BOARD_SIZE;
use crate::{Board, Cell, Side};

/// The eight compass directions as (row, column) steps.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Outcome of a finished game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    Win(Side),
    Draw,
}

/// The opposing pieces that would be captured by `side` playing at `cell`.
///
/// Scans each of the eight directions from `cell`, collecting the
/// contiguous run of opposing pieces; the run is committed only if the scan
/// reaches a `side` piece before hitting an empty cell or the board edge.
/// The content of `cell` itself is never inspected.
pub fn flips_for(board: &Board, cell: Cell, side: Side) -> Vec<Cell> {
    let mut flips = Vec::new();

    for (d_row, d_col) in DIRECTIONS {
        let mut run = Vec::new();
        let mut row = cell.row() as i8 + d_row;
        let mut col = cell.col() as i8 + d_col;

        while (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            let here = Cell::new(row as u8, col as u8);
            match board.get(here) {
                None => break,
                Some(s) if s == side => {
                    flips.append(&mut run);
                    break;
                }
                Some(_) => run.push(here),
            }
            row += d_row;
            col += d_col;
        }
    }

    flips
}

/// True if `side` may play at `cell`: the cell is empty and the placement
/// captures at least one opposing piece.
pub fn is_legal(board: &Board, cell: Cell, side: Side) -> bool {
    board.get(cell).is_none() && !flips_for(board, cell, side).is_empty()
}

/// All legal moves for `side`, in row-major order (top-left to
/// bottom-right) so that downstream tie-breaks are reproducible.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Cell> {
    let mut moves = Vec::new();
    for row in 0..BOARD_SIZE as u8 {
        for col in 0..BOARD_SIZE as u8 {
            let cell = Cell::new(row, col);
            if is_legal(board, cell, side) {
                moves.push(cell);
            }
        }
    }
    moves
}

/// True if `side` has at least one legal move. Early-exit variant of
/// `legal_moves` for hot paths that only need the existence check.
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    for row in 0..BOARD_SIZE as u8 {
        for col in 0..BOARD_SIZE as u8 {
            if is_legal(board, Cell::new(row, col), side) {
                return true;
            }
        }
    }
    false
}

/// Play `side` at `cell`, returning the resulting board. The input board
/// is left untouched.
pub fn apply_move(board: &Board, cell: Cell, side: Side) -> Board {
    let mut next = *board;
    next.set(cell, side);
    for flipped in flips_for(board, cell, side) {
        next.set(flipped, side);
    }
    next
}

/// True if the game is over: neither side has a legal move. A single side
/// having no moves is a pass, not termination.
pub fn is_terminal(board: &Board, side: Side) -> bool {
    !has_legal_move(board, side) && !has_legal_move(board, side.opposite())
}

/// Final result by majority piece count; equal counts is a draw.
pub fn winner(board: &Board) -> GameResult {
    match board.count(Side::White).cmp(&board.count(Side::Black)) {
        Ordering::Greater => GameResult::Win(Side::White),
        Ordering::Less => GameResult::Win(Side::Black),
        Ordering::Equal => GameResult::Draw,
    }
}
