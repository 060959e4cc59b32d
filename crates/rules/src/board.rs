use std::fmt;
use std::str::FromStr;

use othello_core::OthelloError;

use crate::{Cell, Side};

/// Board edge length.
pub const BOARD_SIZE: usize = 8;

/// An 8x8 Othello board.
///
/// The board has value semantics: it is `Copy`, and every move produces a
/// new board rather than mutating a shared one, so divergent futures in a
/// search tree can never alias each other's state.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Side>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// An empty board.
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// The standard four-piece opening: White on (3,3) and (4,4), Black on
    /// (3,4) and (4,3). Black conventionally moves first.
    pub fn standard_opening() -> Self {
        let mut board = Self::empty();
        board.set(Cell::new(3, 3), Side::White);
        board.set(Cell::new(4, 4), Side::White);
        board.set(Cell::new(3, 4), Side::Black);
        board.set(Cell::new(4, 3), Side::Black);
        board
    }

    /// The piece at `cell`, if any.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<Side> {
        self.cells[cell.row() as usize][cell.col() as usize]
    }

    /// Place a `side` piece at `cell`, overwriting whatever is there.
    #[inline]
    pub fn set(&mut self, cell: Cell, side: Side) {
        self.cells[cell.row() as usize][cell.col() as usize] = Some(side);
    }

    /// Number of pieces `side` has on the board.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Some(side))
            .count()
    }

    /// True if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| c.is_some())
    }

    /// Iterate all cells with their contents in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, Option<Side>)> + '_ {
        (0..BOARD_SIZE as u8).flat_map(move |row| {
            (0..BOARD_SIZE as u8).map(move |col| {
                let cell = Cell::new(row, col);
                (cell, self.get(cell))
            })
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    Some(Side::White) => 'w',
                    Some(Side::Black) => 'b',
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\n{})", self)
    }
}

impl FromStr for Board {
    type Err = OthelloError;

    /// Parse the text format produced by `Display`: eight
    /// whitespace-separated rows of eight characters, `.` for empty, `w`
    /// for White and `b` for Black (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split_whitespace().collect();
        if rows.len() != BOARD_SIZE {
            return Err(OthelloError::InvalidBoard(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != BOARD_SIZE {
                return Err(OthelloError::InvalidBoard(format!(
                    "row {row_index} has {} cells, expected {BOARD_SIZE}",
                    row.chars().count()
                )));
            }
            for (col_index, c) in row.chars().enumerate() {
                let cell = Cell::new(row_index as u8, col_index as u8);
                match c {
                    '.' => {}
                    'w' | 'W' => board.set(cell, Side::White),
                    'b' | 'B' => board.set(cell, Side::Black),
                    other => {
                        return Err(OthelloError::InvalidBoard(format!(
                            "unexpected character '{other}' at {cell}"
                        )));
                    }
                }
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_opening_layout() {
        let board = Board::standard_opening();
        assert_eq!(board.get(Cell::new(3, 3)), Some(Side::White));
        assert_eq!(board.get(Cell::new(4, 4)), Some(Side::White));
        assert_eq!(board.get(Cell::new(3, 4)), Some(Side::Black));
        assert_eq!(board.get(Cell::new(4, 3)), Some(Side::Black));
        assert_eq!(board.count(Side::White), 2);
        assert_eq!(board.count(Side::Black), 2);
        assert!(!board.is_full());
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::empty();
        let cell = Cell::new(0, 7);
        assert_eq!(board.get(cell), None);
        board.set(cell, Side::Black);
        assert_eq!(board.get(cell), Some(Side::Black));
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let board = Board::standard_opening();
        let parsed: Board = board.to_string().parse().unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_parse_rejects_wrong_row_count() {
        let result: Result<Board, _> = "........\n........".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let mut text = "........\n".repeat(7);
        text.push_str(".......\n");
        let result: Result<Board, _> = text.parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_character() {
        let mut text = "........\n".repeat(7);
        text.push_str(".....x..\n");
        let result: Result<Board, _> = text.parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_cells_iterates_row_major() {
        let board = Board::standard_opening();
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(cells.len(), 64);
        assert_eq!(cells[0].0, Cell::new(0, 0));
        assert_eq!(cells[27], (Cell::new(3, 3), Some(Side::White)));
        assert_eq!(cells[63].0, Cell::new(7, 7));
    }
}
