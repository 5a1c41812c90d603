//! Events published by the engine to the presentation layer.

use crate::board::{Coordinate, Disk};
use serde::{Deserialize, Serialize};

/// One successful placement: the disk color and every cell it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The color that was placed.
    pub disk: Disk,
    /// Changed cells: the placed cell first, then each flipped cell in
    /// the resolver's direction-scan order.
    pub coordinates: Vec<Coordinate>,
}

/// Messages sent from the engine to its subscribers.
///
/// Delivery never blocks a mutation: events are queued on unbounded
/// channels after the state they describe has settled, so a subscriber
/// re-reading state on receipt always sees a board consistent with the
/// event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A disk was placed; the listed cells changed.
    MoveMade(MoveRecord),
    /// Turn, status, modes, or the whole game changed. Carries no
    /// payload; re-read the state.
    StateChanged,
}
