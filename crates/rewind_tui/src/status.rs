//! Event line shown under the board.

use rewind_tictactoe::{GameEvent, GameHistory, StateObserver};
use tracing::{debug, info};

/// Remembers the most recent game event for display.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    last: Option<String>,
    changes: usize,
}

impl StatusLine {
    /// Description of the last event, if any.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Number of events that changed the state.
    pub fn changes(&self) -> usize {
        self.changes
    }
}

impl StateObserver for StatusLine {
    fn state_changed(&mut self, state: &GameHistory, event: &GameEvent) {
        if event.changed_state() {
            self.changes += 1;
            info!(%event, cursor = state.cursor(), len = state.len(), "State changed");
        } else {
            debug!(%event, "Action had no effect");
        }
        self.last = Some(event.to_string());
    }
}
