//! Pluggable move selection for automated sides.

use crate::board::{Board, Coordinate, Disk};
use crate::rules;
use anyhow::Result;
use rand::seq::IndexedRandom;
use std::time::Duration;
use tracing::debug;

/// A strategy that chooses moves for an automated side.
///
/// The engine only calls [`select_move`](MovePolicy::select_move) after
/// confirming at least one legal move exists for `side`, and it may drop
/// the future at any time (mode change, new game, load). An error return
/// is swallowed by the dispatcher and simply results in no move.
#[async_trait::async_trait]
pub trait MovePolicy: Send + Sync {
    /// Picks a cell for `side` to play on `board`.
    async fn select_move(&self, board: Board, side: Disk) -> Result<Coordinate>;
}

/// Policy that thinks for a fixed delay, then plays a uniformly random
/// legal move.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    delay: Duration,
}

impl RandomPolicy {
    /// Creates the policy with the stock two-second thinking delay.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_secs(2))
    }

    /// Creates the policy with a custom thinking delay. Tests use zero.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MovePolicy for RandomPolicy {
    async fn select_move(&self, board: Board, side: Disk) -> Result<Coordinate> {
        tokio::time::sleep(self.delay).await;

        let moves = rules::legal_moves(&board, side);
        let choice = moves
            .choose(&mut rand::rng())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no legal move available for {side:?}"))?;
        debug!(?side, x = choice.x(), y = choice.y(), "policy chose a move");
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn random_policy_picks_a_legal_opening() {
        let policy = RandomPolicy::with_delay(Duration::ZERO);
        let board = Board::new();
        let choice = policy.select_move(board.clone(), Disk::Dark).await.unwrap();
        assert!(rules::is_legal(&board, Disk::Dark, choice));
    }
}
