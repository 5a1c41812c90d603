//! Move legality and flip computation.
//!
//! Everything here is a pure function of a board, a side, and a target
//! cell. The state machine in [`crate::manager`] is the only mutator.

use crate::board::{Board, Coordinate, Disk, Square};
use derive_more::{Display, Error};
use strum::{EnumIter, IntoEnumIterator};

/// The 8 compass directions, in the fixed scan order used when
/// assembling a flip set.
///
/// The order is observable: the coordinate list carried by a move-made
/// event lists each direction's flips in this order, nearest to the
/// placed disk first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Direction {
    /// Up-left: (-1, -1).
    NorthWest,
    /// Up: (0, -1).
    North,
    /// Up-right: (1, -1).
    NorthEast,
    /// Right: (1, 0).
    East,
    /// Down-right: (1, 1).
    SouthEast,
    /// Down: (0, 1).
    South,
    /// Down-left: (-1, 1).
    SouthWest,
    /// Left: (-1, 0).
    West,
}

impl Direction {
    /// Step offsets as (dx, dy), with y growing downward.
    fn offsets(self) -> (i8, i8) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// A move rejected by the rules. A rejected move never changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMove {
    /// The target cell already holds a disk.
    #[display("the cell is already occupied")]
    OccupiedCell,
    /// The placement would flip no opposing disks.
    #[display("the placement flips no disks")]
    NoFlips,
    /// The game has already ended.
    #[display("the game is over")]
    GameOver,
    /// The move was offered for a side whose turn it is not.
    #[display("it is not that side's turn")]
    NotYourTurn,
}

/// Computes the disks flipped by `side` placing at `target`.
///
/// For each compass direction, the contiguous run of opposing disks
/// starting next to `target` flips if and only if it is terminated by a
/// disk of `side`'s own color. The result concatenates the runs in
/// [`Direction`] scan order, each run ordered nearest-to-target outward.
///
/// # Errors
///
/// [`IllegalMove::OccupiedCell`] if `target` is not empty,
/// [`IllegalMove::NoFlips`] if no direction yields a flip. A placement
/// that flips nothing is never legal, even on an empty cell.
pub fn flips_for(
    board: &Board,
    side: Disk,
    target: Coordinate,
) -> Result<Vec<Coordinate>, IllegalMove> {
    if board.get(target) != Square::Empty {
        return Err(IllegalMove::OccupiedCell);
    }

    let mut flips = Vec::new();
    for direction in Direction::iter() {
        let (dx, dy) = direction.offsets();
        let mut run = Vec::new();
        let mut cursor = target.offset(dx, dy);

        while let Some(coord) = cursor {
            match board.get(coord) {
                Square::Occupied(disk) if disk == side.flipped() => {
                    run.push(coord);
                    cursor = coord.offset(dx, dy);
                }
                // Run terminated by our own disk: the whole run flips.
                Square::Occupied(_) => {
                    flips.append(&mut run);
                    break;
                }
                // Empty cell: no flank in this direction.
                Square::Empty => break,
            }
        }
        // Falling off the board discards the run as well.
    }

    if flips.is_empty() {
        Err(IllegalMove::NoFlips)
    } else {
        Ok(flips)
    }
}

/// Checks whether placing `side` at `target` is legal.
pub fn is_legal(board: &Board, side: Disk, target: Coordinate) -> bool {
    flips_for(board, side, target).is_ok()
}

/// All cells where `side` can legally place a disk.
pub fn legal_moves(board: &Board, side: Disk) -> Vec<Coordinate> {
    Coordinate::all()
        .filter(|&coord| is_legal(board, side, coord))
        .collect()
}

/// Checks whether `side` has at least one legal move anywhere.
pub fn has_any_legal_move(board: &Board, side: Disk) -> bool {
    Coordinate::all().any(|coord| is_legal(board, side, coord))
}
