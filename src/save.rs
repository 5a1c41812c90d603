//! The 9-line textual save format and file persistence.
//!
//! ```text
//! x00          header: side to move ('x', 'o', or '-' once over),
//! --------             then Dark's and Light's mode digits (0/1)
//! --------
//! --------     lines 2-9: rows y=0..7, one char per column x=0..7
//! ---ox---
//! ---xo---
//! --------
//! --------
//! --------
//! ```
//!
//! Every line is newline-terminated and `serialize(parse(s)) == s` holds
//! byte for byte for any well-formed `s`.

use crate::board::{Board, Coordinate, Disk, Square};
use crate::state::{GameState, PlayerMode};
use derive_more::{Display, Error, From};
use std::fs;
use std::io;
use std::path::Path;
use tracing::instrument;

/// Why a save failed to load.
#[derive(Debug, Display, Error, From)]
pub enum SaveError {
    /// The filesystem failed; the underlying error passes through
    /// unchanged.
    #[display("save I/O failed: {_0}")]
    Io(io::Error),
    /// The file was read but its content does not conform to the save
    /// grammar. Nothing was applied.
    #[display("corrupt save: {_0}")]
    Corrupt(CorruptSave),
}

/// The specific way a save text failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CorruptSave {
    /// Not exactly 9 newline-terminated lines.
    #[display("expected 9 newline-terminated lines, found {_0}")]
    WrongLineCount(#[error(not(source))] usize),
    /// Header line is not `<x|o|->` followed by two mode digits.
    #[display("invalid header line {_0:?}")]
    BadHeader(#[error(not(source))] String),
    /// A board row is not 8 cells drawn from `-`, `x`, `o`.
    #[display("invalid board row {row}: {text:?}")]
    BadRow {
        /// Row index, 0-7 from the top.
        row: usize,
        /// The offending line.
        text: String,
    },
}

fn square_char(square: Square) -> char {
    match square {
        Square::Empty => '-',
        Square::Occupied(Disk::Dark) => 'x',
        Square::Occupied(Disk::Light) => 'o',
    }
}

fn mode_digit(mode: PlayerMode) -> char {
    match mode {
        PlayerMode::Manual => '0',
        PlayerMode::Automated => '1',
    }
}

/// Serializes a game snapshot to the save text.
pub fn serialize(state: &GameState) -> String {
    let mut out = String::with_capacity(9 * 9);
    out.push(match state.turn {
        Some(Disk::Dark) => 'x',
        Some(Disk::Light) => 'o',
        None => '-',
    });
    out.push(mode_digit(state.dark_mode));
    out.push(mode_digit(state.light_mode));
    out.push('\n');

    for y in 0..8 {
        for x in 0..8 {
            let coord = Coordinate::new(x, y).expect("loop bounds keep coordinates on the board");
            out.push(square_char(state.board.get(coord)));
        }
        out.push('\n');
    }
    out
}

/// Parses save text into a game snapshot.
///
/// The whole input is validated before anything is returned; a corrupt
/// save can never leave a caller with a half-applied state.
pub fn parse(text: &str) -> Result<GameState, CorruptSave> {
    // A well-formed save is 9 lines, each '\n'-terminated, so splitting
    // on '\n' yields those 9 plus one trailing empty piece.
    let pieces: Vec<&str> = text.split('\n').collect();
    if pieces.len() != 10 || !pieces[9].is_empty() {
        let lines = pieces.iter().filter(|p| !p.is_empty()).count();
        return Err(CorruptSave::WrongLineCount(lines));
    }

    let header = pieces[0];
    let bad_header = || CorruptSave::BadHeader(header.to_string());
    let mut chars = header.chars();
    let (Some(turn_char), Some(dark_char), Some(light_char), None) =
        (chars.next(), chars.next(), chars.next(), chars.next())
    else {
        return Err(bad_header());
    };
    let turn = match turn_char {
        'x' => Some(Disk::Dark),
        'o' => Some(Disk::Light),
        '-' => None,
        _ => return Err(bad_header()),
    };
    let parse_mode = |c: char| match c {
        '0' => Ok(PlayerMode::Manual),
        '1' => Ok(PlayerMode::Automated),
        _ => Err(bad_header()),
    };
    let dark_mode = parse_mode(dark_char)?;
    let light_mode = parse_mode(light_char)?;

    let mut board = Board::empty();
    for (row, line) in pieces[1..9].iter().enumerate() {
        let bad_row = || CorruptSave::BadRow {
            row,
            text: line.to_string(),
        };
        if line.chars().count() != 8 {
            return Err(bad_row());
        }
        for (col, c) in line.chars().enumerate() {
            let square = match c {
                '-' => Square::Empty,
                'x' => Square::Occupied(Disk::Dark),
                'o' => Square::Occupied(Disk::Light),
                _ => return Err(bad_row()),
            };
            let coord = Coordinate::new(col as i32, row as i32)
                .expect("row and column indices are 0-7");
            board.set(coord, square);
        }
    }

    Ok(GameState {
        board,
        turn,
        dark_mode,
        light_mode,
    })
}

/// Writes a snapshot to `path`. Blocking; never call it from an event
/// subscriber that runs on the mutation path.
#[instrument(skip(state))]
pub fn write_save(path: &Path, state: &GameState) -> Result<(), SaveError> {
    fs::write(path, serialize(state))?;
    Ok(())
}

/// Reads and parses the snapshot at `path`.
#[instrument]
pub fn read_save(path: &Path) -> Result<GameState, SaveError> {
    let text = fs::read_to_string(path)?;
    Ok(parse(&text)?)
}
