//! Snapshot history with a movable cursor.
//!
//! `GameHistory` is the single owner of game state: every board the game
//! has passed through, the index of the active one, and the order in which
//! the move list is displayed.

use super::action::{HistoryError, IgnoredReason, Move, PlayOutcome};
use super::rules::winner_of;
use super::{Board, GameStatus, Mark, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Display order of the move list. Has no effect on play.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest snapshot first.
    #[default]
    #[display("ascending")]
    Ascending,
    /// Newest snapshot first.
    #[display("descending")]
    Descending,
}

impl SortOrder {
    /// Returns the other order.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Maps a display slot to a history index for a list of `len` entries.
    ///
    /// The mapping is its own inverse, so it also maps indices to slots.
    pub fn index_for_slot(self, slot: usize, len: usize) -> usize {
        match self {
            SortOrder::Ascending => slot,
            SortOrder::Descending => len - 1 - slot,
        }
    }
}

/// One row of the move list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_new::new)]
pub struct MoveEntry {
    /// Position of the row in the displayed list.
    slot: usize,
    /// History index of the snapshot the row refers to.
    index: usize,
    /// Whether this snapshot is the active one.
    is_current: bool,
    /// Placement that produced the snapshot; `None` for the initial board.
    played: Option<Move>,
}

impl MoveEntry {
    /// Move number shown to the player (history index + 1).
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Text of the row: a static label for the active snapshot, a jump
    /// action for every other one.
    pub fn label(&self) -> String {
        if self.is_current {
            format!("Current move: {}", self.number())
        } else {
            format!("Go to move {}", self.number())
        }
    }
}

/// Ordered board snapshots, a cursor and the move-list sort order.
///
/// Invariants:
/// - there is always at least one snapshot and the first is empty;
/// - snapshot `i` differs from snapshot `i - 1` by one placement;
/// - `cursor < snapshots.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct GameHistory {
    snapshots: Vec<Board>,
    cursor: usize,
    sort_order: SortOrder,
}

/// Unchecked field set, validated before it becomes a [`GameHistory`].
#[derive(Deserialize)]
struct RawHistory {
    snapshots: Vec<Board>,
    cursor: usize,
    #[serde(default)]
    sort_order: SortOrder,
}

impl TryFrom<RawHistory> for GameHistory {
    type Error = HistoryError;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        let history = Self {
            snapshots: raw.snapshots,
            cursor: raw.cursor,
            sort_order: raw.sort_order,
        };
        if history.is_consistent() {
            Ok(history)
        } else {
            Err(HistoryError::Inconsistent {
                len: history.snapshots.len(),
                cursor: history.cursor,
            })
        }
    }
}

impl GameHistory {
    /// Creates a history holding only the empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::with_sort_order(SortOrder::default())
    }

    /// Creates a fresh history with the given move-list order.
    #[instrument]
    pub fn with_sort_order(sort_order: SortOrder) -> Self {
        Self {
            snapshots: vec![Board::new()],
            cursor: 0,
            sort_order,
        }
    }

    /// All recorded snapshots, oldest first.
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    /// Number of snapshots (always at least one).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; a history starts with the empty board.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the active snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current move-list order.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// The active snapshot.
    pub fn current(&self) -> &Board {
        &self.snapshots[self.cursor]
    }

    /// Mark that plays next from the active snapshot.
    pub fn next_mark(&self) -> Mark {
        Mark::for_move(self.cursor)
    }

    /// Winner of the active snapshot.
    pub fn winner(&self) -> Option<Mark> {
        winner_of(self.current())
    }

    /// Status of the active snapshot.
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(mark) => GameStatus::Won(mark),
            None => GameStatus::InProgress {
                next: self.next_mark(),
            },
        }
    }

    /// Placement that produced snapshot `index`.
    pub fn played_at(&self, index: usize) -> Option<Move> {
        let prev = self.snapshots.get(index.checked_sub(1)?)?;
        let (position, mark) = self.snapshots.get(index)?.diff(prev)?;
        Some(Move::new(mark, position))
    }

    /// Places the next mark at `position`.
    ///
    /// Ignored if the active snapshot already has a winner or the square is
    /// taken. Otherwise every snapshot after the cursor is discarded, the
    /// new board is appended and the cursor moves onto it.
    #[instrument(skip(self), fields(cursor = self.cursor, len = self.snapshots.len()))]
    pub fn play(&mut self, position: Position) -> PlayOutcome {
        let current = *self.current();

        if let Some(winner) = winner_of(&current) {
            debug!(%winner, "Play ignored, game already decided");
            return PlayOutcome::Ignored(IgnoredReason::GameOver { winner });
        }

        if !current.is_empty(position) {
            debug!(%position, "Play ignored, square occupied");
            return PlayOutcome::Ignored(IgnoredReason::SquareOccupied(position));
        }

        let mark = self.next_mark();
        let next = current.with_mark(position, mark);

        let discarded = self.snapshots.len() - (self.cursor + 1);
        if discarded > 0 {
            debug!(discarded, "Truncating history after cursor");
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(next);
        self.cursor = self.snapshots.len() - 1;
        debug_assert!(self.is_consistent());

        let winner = winner_of(&next);
        info!(%mark, %position, move_number = self.cursor, ?winner, "Move played");

        PlayOutcome::Played {
            played: Move::new(mark, position),
            winner,
        }
    }

    /// Moves the cursor to the entry shown at `slot` in the move list.
    ///
    /// Returns the new cursor.
    #[instrument(skip(self), fields(sort_order = %self.sort_order))]
    pub fn jump_to(&mut self, slot: usize) -> Result<usize, HistoryError> {
        let len = self.snapshots.len();
        if slot >= len {
            return Err(HistoryError::SlotOutOfRange { slot, len });
        }
        let index = self.sort_order.index_for_slot(slot, len);
        self.jump_to_move(index)?;
        Ok(index)
    }

    /// Moves the cursor to history index `index`, ignoring sort order.
    #[instrument(skip(self))]
    pub fn jump_to_move(&mut self, index: usize) -> Result<(), HistoryError> {
        let len = self.snapshots.len();
        if index >= len {
            return Err(HistoryError::MoveOutOfRange { index, len });
        }
        debug!(from = self.cursor, to = index, "Jumping");
        self.cursor = index;
        Ok(())
    }

    /// Flips the move-list order.
    #[instrument(skip(self))]
    pub fn toggle_sort(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.toggled();
        debug!(sort_order = %self.sort_order, "Sort order toggled");
        self.sort_order
    }

    /// Discards every move, keeping the sort order.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(discarded = self.snapshots.len() - 1, "Resetting history");
        *self = Self::with_sort_order(self.sort_order);
    }

    /// Move-list rows in display order.
    pub fn moves(&self) -> Vec<MoveEntry> {
        let len = self.snapshots.len();
        (0..len)
            .map(|slot| {
                let index = self.sort_order.index_for_slot(slot, len);
                MoveEntry::new(slot, index, index == self.cursor, self.played_at(index))
            })
            .collect()
    }

    /// Display slot of the active snapshot.
    pub fn current_slot(&self) -> usize {
        self.sort_order.index_for_slot(self.cursor, self.snapshots.len())
    }

    /// Checks the structural invariants of the history.
    pub fn is_consistent(&self) -> bool {
        let starts_empty = self.snapshots.first() == Some(&Board::new());
        let single_steps = (1..self.snapshots.len()).all(|i| {
            self.played_at(i)
                .is_some_and(|mv| *mv.mark() == Mark::for_move(i - 1))
        });
        starts_empty && single_steps && self.cursor < self.snapshots.len()
    }
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}
