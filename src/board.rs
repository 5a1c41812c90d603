//! Core domain types for the Reversi board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Width and height of the board in cells.
pub const BOARD_SIZE: usize = 8;

/// A disk color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disk {
    /// Dark disk (moves first).
    Dark,
    /// Light disk (moves second).
    Light,
}

impl Disk {
    /// Returns the opposing color.
    pub fn flipped(self) -> Self {
        match self {
            Disk::Dark => Disk::Light,
            Disk::Light => Disk::Dark,
        }
    }
}

/// A cell on the Reversi board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    Empty,
    /// Cell occupied by a disk.
    Occupied(Disk),
}

/// Error raised when a coordinate lies outside the 8x8 grid.
///
/// This is a programmer error: the public game surface only ever produces
/// in-range coordinates, so hitting this means the caller passed raw
/// indices it never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("coordinate ({x}, {y}) is outside the 8x8 board")]
pub struct OutOfRange {
    /// Offending column.
    pub x: i32,
    /// Offending row.
    pub y: i32,
}

/// A validated board coordinate: `x` is the column, `y` the row, both 0-7.
///
/// Construction is the only bounds check in the crate; once a `Coordinate`
/// exists it indexes the board infallibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    x: u8,
    y: u8,
}

impl Coordinate {
    /// Creates a coordinate, rejecting anything outside the board.
    pub fn new(x: i32, y: i32) -> Result<Self, OutOfRange> {
        if (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y) {
            Ok(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(OutOfRange { x, y })
        }
    }

    /// Column, 0-7.
    pub fn x(self) -> usize {
        self.x as usize
    }

    /// Row, 0-7.
    pub fn y(self) -> usize {
        self.y as usize
    }

    /// The neighboring coordinate one step along `(dx, dy)`, if on the board.
    pub(crate) fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Self::new(self.x as i32 + dx as i32, self.y as i32 + dy as i32).ok()
    }

    /// Iterates every cell, row by row from the top-left.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE as u8)
            .flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Self { x, y }))
    }
}

/// 8x8 Reversi board. Pure data: no rule knowledge beyond cell storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Rows top to bottom, each row left to right.
    rows: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board with every cell empty.
    pub fn empty() -> Self {
        Self {
            rows: [[Square::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates a board with the canonical four-disk opening:
    /// Light at (3,3) and (4,4), Dark at (4,3) and (3,4).
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.rows[3][3] = Square::Occupied(Disk::Light);
        board.rows[3][4] = Square::Occupied(Disk::Dark);
        board.rows[4][3] = Square::Occupied(Disk::Dark);
        board.rows[4][4] = Square::Occupied(Disk::Light);
        board
    }

    /// Gets the cell at a coordinate.
    pub fn get(&self, coord: Coordinate) -> Square {
        self.rows[coord.y()][coord.x()]
    }

    /// Sets the cell at a coordinate.
    pub fn set(&mut self, coord: Coordinate, square: Square) {
        self.rows[coord.y()][coord.x()] = square;
    }

    /// Gets the cell at raw indices, bounds-checked.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<Square, OutOfRange> {
        Ok(self.get(Coordinate::new(x, y)?))
    }

    /// Sets the cell at raw indices, bounds-checked.
    pub fn set_cell_at(&mut self, x: i32, y: i32, square: Square) -> Result<(), OutOfRange> {
        self.set(Coordinate::new(x, y)?, square);
        Ok(())
    }

    /// Counts the cells holding a disk of the given color.
    pub fn count(&self, disk: Disk) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&square| square == Square::Occupied(disk))
            .count()
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.rows
            .iter()
            .flatten()
            .all(|&square| square != Square::Empty)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_board_has_center_cross() {
        let board = Board::new();
        assert_eq!(board.cell_at(3, 3).unwrap(), Square::Occupied(Disk::Light));
        assert_eq!(board.cell_at(4, 4).unwrap(), Square::Occupied(Disk::Light));
        assert_eq!(board.cell_at(4, 3).unwrap(), Square::Occupied(Disk::Dark));
        assert_eq!(board.cell_at(3, 4).unwrap(), Square::Occupied(Disk::Dark));
        assert_eq!(board.count(Disk::Dark), 2);
        assert_eq!(board.count(Disk::Light), 2);
    }

    #[test]
    fn out_of_range_rejected() {
        let board = Board::new();
        assert!(board.cell_at(8, 0).is_err());
        assert!(board.cell_at(0, -1).is_err());
        assert!(Coordinate::new(3, 8).is_err());
    }

    #[test]
    fn counts_cover_the_whole_board() {
        let mut board = Board::new();
        board.set_cell_at(0, 0, Square::Occupied(Disk::Dark)).unwrap();
        let occupied = board.count(Disk::Dark) + board.count(Disk::Light);
        let empty = Coordinate::all()
            .filter(|&c| board.get(c) == Square::Empty)
            .count();
        assert_eq!(occupied + empty, BOARD_SIZE * BOARD_SIZE);
        assert!(!board.is_full());
    }
}
