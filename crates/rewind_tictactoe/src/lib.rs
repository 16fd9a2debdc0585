//! Tic-tac-toe with a rewindable move history.
//!
//! # Architecture
//!
//! - **Types**: [`Board`] snapshots of [`Square`]s holding [`Mark`]s, addressed by [`Position`]
//! - **Rules**: [`winner_of`] judges a single snapshot against the eight lines
//! - **History**: [`GameHistory`] records every snapshot, a cursor and the move-list order
//! - **Controller**: [`reduce`] applies an [`Action`]; [`GameController`] adds notification
//!
//! # Example
//!
//! ```
//! use rewind_tictactoe::{GameHistory, Mark, Position};
//!
//! let mut history = GameHistory::new();
//! history.play(Position::Center);
//! history.play(Position::TopLeft);
//! history.jump_to(1).unwrap();
//! assert_eq!(history.next_mark(), Mark::O);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod controller;
mod history;
mod position;
pub mod rules;
mod types;

pub use action::{HistoryError, IgnoredReason, Move, PlayOutcome};
pub use controller::{Action, GameController, GameEvent, StateObserver, reduce};
pub use history::{GameHistory, MoveEntry, SortOrder};
pub use position::Position;
pub use rules::{winner_of, winning_line};
pub use types::{Board, GameStatus, Mark, Square};
