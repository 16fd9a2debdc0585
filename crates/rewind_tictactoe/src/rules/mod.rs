//! Game rules for tic-tac-toe.
//!
//! Pure functions over a single board snapshot. Rules are kept apart from
//! history storage so every snapshot can be judged on its own.

pub mod win;

pub use win::{LINES, winner_of, winning_line};
