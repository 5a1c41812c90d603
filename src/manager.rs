//! The game manager: state machine, turn dispatch, and event fan-out.
//!
//! [`GameManager`] is the single owner of all mutable game state. Every
//! public entry point serializes through one internal mutex, so at most
//! one mutation is in flight at a time even while an automated policy
//! lookup runs concurrently with user input. The policy call is the only
//! operation that suspends, and it runs outside the lock on its own task.

use crate::board::{Board, Coordinate, Disk, OutOfRange, Square};
use crate::events::{GameEvent, MoveRecord};
use crate::policy::{MovePolicy, RandomPolicy};
use crate::rules::{self, IllegalMove};
use crate::save::{self, SaveError};
use crate::state::{GameState, GameStatus, Outcome, PlayerMode};
use derive_more::{Display, Error, From};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info, instrument, warn};

/// Errors surfaced by [`GameManager::place_disk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    /// Coordinate outside the board. Programmer error: the public game
    /// surface never produces one.
    #[display("{_0}")]
    OutOfRange(OutOfRange),
    /// The rules rejected the move. Recoverable; state is unchanged.
    #[display("{_0}")]
    IllegalMove(IllegalMove),
}

/// An automated move request currently in flight.
struct Pending {
    epoch: u64,
    side: Disk,
    abort: AbortHandle,
}

struct Inner {
    board: Board,
    turn: Disk,
    status: GameStatus,
    dark_mode: PlayerMode,
    light_mode: PlayerMode,
    listeners: Vec<mpsc::UnboundedSender<GameEvent>>,
    /// Bumped by every reset-like action; a policy result carrying a
    /// stale epoch is discarded even if it slipped past the abort.
    epoch: u64,
    pending: Option<Pending>,
}

impl Inner {
    fn mode(&self, side: Disk) -> PlayerMode {
        match side {
            Disk::Dark => self.dark_mode,
            Disk::Light => self.light_mode,
        }
    }

    fn mode_mut(&mut self, side: Disk) -> &mut PlayerMode {
        match side {
            Disk::Dark => &mut self.dark_mode,
            Disk::Light => &mut self.light_mode,
        }
    }

    /// Queues an event on every live subscriber, dropping closed ones.
    fn emit(&mut self, event: GameEvent) {
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn snapshot(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            turn: (self.status == GameStatus::InProgress).then_some(self.turn),
            dark_mode: self.dark_mode,
            light_mode: self.light_mode,
        }
    }

    /// Aborts any in-flight policy task and invalidates its result.
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(side = ?pending.side, "cancelling in-flight automated move");
            pending.abort.abort();
        }
        self.epoch += 1;
    }
}

/// Owns a Reversi game: board, turn, player modes, and game status.
///
/// Cloning is cheap and shares the same game; the spawned policy task
/// holds a clone so an automated move can re-enter
/// [`place_disk`](Self::place_disk) through the same lock as everyone
/// else.
///
/// Automated turns run on spawned Tokio tasks, so any entry point that
/// can hand the turn to a [`PlayerMode::Automated`] side
/// ([`place_disk`](Self::place_disk), [`new_game`](Self::new_game),
/// [`change_player_mode`](Self::change_player_mode),
/// [`load_game`](Self::load_game)) must be called from within a Tokio
/// runtime. Games where both sides stay manual never spawn and work
/// anywhere.
#[derive(Clone)]
pub struct GameManager {
    inner: Arc<Mutex<Inner>>,
    policy: Arc<dyn MovePolicy>,
}

impl GameManager {
    /// Creates a manager holding a fresh game, Dark to move, both sides
    /// manual, with the stock [`RandomPolicy`] for automated turns.
    pub fn new() -> Self {
        Self::with_policy(RandomPolicy::new())
    }

    /// Creates a manager with a custom automated-move policy.
    pub fn with_policy(policy: impl MovePolicy + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                board: Board::new(),
                turn: Disk::Dark,
                status: GameStatus::InProgress,
                dark_mode: PlayerMode::Manual,
                light_mode: PlayerMode::Manual,
                listeners: Vec::new(),
                epoch: 0,
                pending: None,
            })),
            policy: Arc::new(policy),
        }
    }

    /// Subscribes to the event stream. Events queued after this call are
    /// delivered in mutation order; delivery never blocks the engine.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().unwrap().listeners.push(tx);
        rx
    }

    /// Resets to the canonical four-disk opening with Dark to move.
    /// Player modes are preserved. Cancels any in-flight automated move
    /// and emits a state-changed event.
    #[instrument(skip(self))]
    pub fn new_game(&self) {
        info!("starting a new game");
        let mut inner = self.inner.lock().unwrap();
        inner.cancel_pending();
        inner.board = Board::new();
        inner.turn = Disk::Dark;
        inner.status = GameStatus::InProgress;
        inner.emit(GameEvent::StateChanged);
        self.dispatch(&mut inner);
    }

    /// Places a disk for the side to move at column `x`, row `y`.
    ///
    /// On success the target and every flipped cell take the mover's
    /// color, one move-made event fires with the changed cells, the turn
    /// advances (passing or ending the game as the rules require), and a
    /// state-changed event fires once the transition settles.
    ///
    /// # Errors
    ///
    /// [`GameError::OutOfRange`] for coordinates off the board;
    /// [`GameError::IllegalMove`] when the game is over, the cell is
    /// occupied, or the placement flips nothing. State is untouched on
    /// any error.
    ///
    /// # Panics
    ///
    /// Panics if the move hands the turn to an automated side while the
    /// caller is outside a Tokio runtime (see [`GameManager`]).
    #[instrument(skip(self))]
    pub fn place_disk(&self, x: i32, y: i32) -> Result<(), GameError> {
        let coord = Coordinate::new(x, y)?;
        let mut inner = self.inner.lock().unwrap();
        let side = inner.turn;
        self.place_and_settle(&mut inner, side, coord)
    }

    /// Sets who controls `side`, effective immediately.
    ///
    /// Switching the thinking side to manual cancels its in-flight
    /// automated move without touching the board; switching the side to
    /// move to automated schedules a move right away.
    #[instrument(skip(self))]
    pub fn change_player_mode(&self, side: Disk, mode: PlayerMode) {
        let mut inner = self.inner.lock().unwrap();
        *inner.mode_mut(side) = mode;
        info!(?side, ?mode, "player mode changed");
        if mode == PlayerMode::Manual
            && inner.pending.as_ref().is_some_and(|p| p.side == side)
        {
            inner.cancel_pending();
        }
        inner.emit(GameEvent::StateChanged);
        self.dispatch(&mut inner);
    }

    /// Writes the current game to `path` in the textual save format.
    ///
    /// Blocking file I/O; never call it from an event subscriber running
    /// on the mutation path.
    pub fn save_game(&self, path: &Path) -> Result<(), SaveError> {
        let state = self.state();
        save::write_save(path, &state)
    }

    /// Replaces the current game with the one saved at `path`.
    ///
    /// The file is read and fully validated before anything is applied;
    /// on any error the in-memory game is untouched. A successful load
    /// cancels any in-flight automated move, emits a state-changed
    /// event, and dispatches the next turn.
    #[instrument(skip(self))]
    pub fn load_game(&self, path: &Path) -> Result<(), SaveError> {
        let state = save::read_save(path)?;
        info!("loaded game");
        let mut inner = self.inner.lock().unwrap();
        inner.cancel_pending();
        inner.status = match state.turn {
            Some(_) => GameStatus::InProgress,
            None => GameStatus::Over,
        };
        inner.turn = state.turn.unwrap_or(Disk::Dark);
        inner.board = state.board;
        inner.dark_mode = state.dark_mode;
        inner.light_mode = state.light_mode;
        inner.emit(GameEvent::StateChanged);
        self.dispatch(&mut inner);
        Ok(())
    }

    /// Snapshot of board, turn, and modes (what the save format holds).
    pub fn state(&self) -> GameState {
        self.inner.lock().unwrap().snapshot()
    }

    /// The current board.
    pub fn board(&self) -> Board {
        self.inner.lock().unwrap().board.clone()
    }

    /// The side to move, or `None` once the game is over.
    pub fn turn(&self) -> Option<Disk> {
        let inner = self.inner.lock().unwrap();
        (inner.status == GameStatus::InProgress).then_some(inner.turn)
    }

    /// Whether the game is running or finished.
    pub fn status(&self) -> GameStatus {
        self.inner.lock().unwrap().status
    }

    /// Who controls `side`.
    pub fn mode(&self, side: Disk) -> PlayerMode {
        self.inner.lock().unwrap().mode(side)
    }

    /// Number of disks of `disk`'s color on the board.
    pub fn count(&self, disk: Disk) -> usize {
        self.inner.lock().unwrap().board.count(disk)
    }

    /// The result, recomputed from disk counts. `None` while in
    /// progress.
    pub fn outcome(&self) -> Option<Outcome> {
        let inner = self.inner.lock().unwrap();
        (inner.status == GameStatus::Over).then(|| Outcome::from_board(&inner.board))
    }

    /// Resolves once no automated move is in flight. For tests and UIs
    /// that need to line up with move completion.
    pub async fn wait_for_idle(&self) {
        loop {
            if self.inner.lock().unwrap().pending.is_none() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Applies a validated placement and settles the turn transition.
    fn place_and_settle(
        &self,
        inner: &mut Inner,
        side: Disk,
        coord: Coordinate,
    ) -> Result<(), GameError> {
        if inner.status == GameStatus::Over {
            return Err(IllegalMove::GameOver.into());
        }
        if side != inner.turn {
            return Err(IllegalMove::NotYourTurn.into());
        }

        let flips = rules::flips_for(&inner.board, side, coord)?;
        inner.board.set(coord, Square::Occupied(side));
        for &flip in &flips {
            inner.board.set(flip, Square::Occupied(side));
        }

        let mut coordinates = vec![coord];
        coordinates.extend(flips);
        debug!(?side, changed = coordinates.len(), "disk placed");
        inner.emit(GameEvent::MoveMade(MoveRecord {
            disk: side,
            coordinates,
        }));

        // Any policy still thinking about the previous position is now
        // working from a stale board.
        inner.cancel_pending();

        let other = side.flipped();
        if inner.board.is_full() {
            inner.status = GameStatus::Over;
        } else if rules::has_any_legal_move(&inner.board, other) {
            inner.turn = other;
        } else if rules::has_any_legal_move(&inner.board, side) {
            // Forced pass: the opponent is stuck, the turn stays put.
            info!(stuck = ?other, "opponent has no legal move; turn passes back");
        } else {
            inner.status = GameStatus::Over;
        }
        if inner.status == GameStatus::Over {
            info!(outcome = ?Outcome::from_board(&inner.board), "game over");
        }

        inner.emit(GameEvent::StateChanged);
        self.dispatch(inner);
        Ok(())
    }

    /// Schedules an automated move if the side to move wants one.
    fn dispatch(&self, inner: &mut Inner) {
        if inner.status != GameStatus::InProgress {
            return;
        }
        let side = inner.turn;
        if inner.mode(side) != PlayerMode::Automated || inner.pending.is_some() {
            return;
        }
        if !rules::has_any_legal_move(&inner.board, side) {
            // Only reachable through a loaded save that stranded the
            // mover; the policy is never asked without a legal move.
            warn!(?side, "automated side to move has no legal move; awaiting reset");
            return;
        }

        let epoch = inner.epoch;
        let board = inner.board.clone();
        let manager = self.clone();
        let policy = Arc::clone(&self.policy);
        let handle = tokio::spawn(async move {
            let result = policy.select_move(board, side).await;
            manager.finish_automated(epoch, side, result);
        });
        inner.pending = Some(Pending {
            epoch,
            side,
            abort: handle.abort_handle(),
        });
        debug!(?side, "scheduled automated move");
    }

    /// Applies a completed policy result, discarding anything stale.
    fn finish_automated(&self, epoch: u64, side: Disk, result: anyhow::Result<Coordinate>) {
        let mut inner = self.inner.lock().unwrap();
        if inner.pending.as_ref().map(|p| p.epoch) != Some(epoch) {
            debug!(?side, "stale automated move result discarded");
            return;
        }
        inner.pending = None;

        let coord = match result {
            Ok(coord) => coord,
            Err(err) => {
                warn!(?side, %err, "move policy failed; no move made");
                return;
            }
        };
        if let Err(err) = self.place_and_settle(&mut inner, side, coord) {
            // A reset or mode flip raced the policy; the result is
            // dropped, never surfaced as a game error.
            debug!(?side, %err, "automated move no longer applicable; discarded");
        }
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
