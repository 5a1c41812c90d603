//! Reversi engine - rules, state machine, and turn orchestration
//!
//! This library owns everything below the presentation layer of a
//! two-player Reversi game: board state, legal-move computation,
//! disk-flipping resolution, turn progression, win/draw detection, the
//! textual save format, and human/automated turn dispatch. A UI layer
//! subscribes to the event stream and forwards taps as coordinates.
//!
//! # Architecture
//!
//! - **Board**: pure 8x8 cell storage with no rule knowledge
//! - **Rules**: pure flip computation and legality queries
//! - **Manager**: the single owner of mutable game state; every
//!   mutation funnels through it and fans out as events
//! - **Save**: the 9-line textual save format plus file persistence
//! - **Policy**: the pluggable, cancellable automated-move strategy
//!
//! # Example
//!
//! ```no_run
//! use reversi_engine::{GameEvent, GameManager};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let game = GameManager::new();
//! let mut events = game.subscribe();
//!
//! game.place_disk(5, 4)?;
//! if let Some(GameEvent::MoveMade(record)) = events.recv().await {
//!     // Re-render exactly the cells the engine changed, in order.
//!     for coordinate in &record.coordinates {
//!         let _ = (coordinate.x(), coordinate.y());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod events;
mod manager;
mod policy;
mod rules;
mod save;
mod state;

// Crate-level exports - Board primitives
pub use board::{BOARD_SIZE, Board, Coordinate, Disk, OutOfRange, Square};

// Crate-level exports - Rules
pub use rules::{Direction, IllegalMove, flips_for, has_any_legal_move, is_legal, legal_moves};

// Crate-level exports - Game state machine
pub use manager::{GameError, GameManager};

// Crate-level exports - State snapshots
pub use state::{GameState, GameStatus, Outcome, PlayerMode};

// Crate-level exports - Events
pub use events::{GameEvent, MoveRecord};

// Crate-level exports - Persistence
pub use save::{CorruptSave, SaveError, parse, read_save, serialize, write_save};

// Crate-level exports - Automated-move policies
pub use policy::{MovePolicy, RandomPolicy};
