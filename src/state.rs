//! Value types describing a game snapshot.

use crate::board::{Board, Disk};
use serde::{Deserialize, Serialize};

/// Who controls a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerMode {
    /// Moves come from external input (taps, a UI, a remote caller).
    Manual,
    /// Moves come from the pluggable move-selection policy.
    Automated,
}

/// Whether the game is running or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Neither side can move, or the board is full. Terminal.
    Over,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The side with more disks.
    Winner(Disk),
    /// Equal disk counts.
    Draw,
}

impl Outcome {
    /// Derives the outcome from disk counts. Never stored; always
    /// recomputed from the board.
    pub fn from_board(board: &Board) -> Self {
        let dark = board.count(Disk::Dark);
        let light = board.count(Disk::Light);
        match dark.cmp(&light) {
            std::cmp::Ordering::Greater => Outcome::Winner(Disk::Dark),
            std::cmp::Ordering::Less => Outcome::Winner(Disk::Light),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Plain snapshot of everything the save format captures: the board,
/// whose turn it is (`None` once the game is over), and both player
/// modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    pub board: Board,
    /// Side to move, or `None` when the game is over.
    pub turn: Option<Disk>,
    /// Who controls Dark.
    pub dark_mode: PlayerMode,
    /// Who controls Light.
    pub light_mode: PlayerMode,
}

impl GameState {
    /// Returns the mode controlling `side`.
    pub fn mode(&self, side: Disk) -> PlayerMode {
        match side {
            Disk::Dark => self.dark_mode,
            Disk::Light => self.light_mode,
        }
    }
}
