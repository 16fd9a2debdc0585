//! Moves, play outcomes and history errors.
//!
//! Invalid plays are not failures: they come back as
//! [`PlayOutcome::Ignored`] with the reason attached, and the history is
//! left exactly as it was.

use super::{Mark, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Getters,
    derive_new::new,
    derive_more::Display,
)]
#[display("{} at {}", mark, position)]
pub struct Move {
    /// The mark placed.
    mark: Mark,
    /// Where it was placed.
    position: Position,
}

/// Why a play request left the history unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoredReason {
    /// The square at the position is already occupied.
    #[display("{} is already occupied", _0)]
    SquareOccupied(Position),

    /// The active snapshot already has a winner.
    #[display("Game is already over: {} won", winner)]
    GameOver {
        /// Mark that completed a line.
        winner: Mark,
    },
}

/// Result of a play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    /// A new snapshot was appended.
    Played {
        /// The placement that produced the snapshot.
        played: Move,
        /// Winner of the new snapshot, if the move completed a line.
        winner: Option<Mark>,
    },
    /// Nothing changed.
    Ignored(IgnoredReason),
}

impl PlayOutcome {
    /// Whether the play changed the history.
    pub fn is_played(&self) -> bool {
        matches!(self, PlayOutcome::Played { .. })
    }
}

/// Error navigating the move history.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display, derive_more::Error,
)]
pub enum HistoryError {
    /// A move-list slot past the end of the list.
    #[display("Move list slot {} is out of range ({} entries)", slot, len)]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of entries in the list.
        len: usize,
    },

    /// A history index past the last snapshot.
    #[display("Move {} does not exist ({} snapshots)", index, len)]
    MoveOutOfRange {
        /// Requested history index.
        index: usize,
        /// Number of snapshots in the history.
        len: usize,
    },

    /// Snapshots that do not form a game played from the empty board.
    #[display("Inconsistent history: {} snapshots, cursor {}", len, cursor)]
    Inconsistent {
        /// Number of snapshots supplied.
        len: usize,
        /// Cursor supplied.
        cursor: usize,
    },
}
