//! Application state and key handling.

use crate::input::{digit_position, move_cursor};
use crate::status::StatusLine;
use crossterm::event::{KeyCode, KeyEvent};
use rewind_tictactoe::{Action, GameController, GameEvent, GameHistory, Position, SortOrder};
use tracing::{debug, instrument};

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Arrow keys move the board cursor.
    #[default]
    Board,
    /// Arrow keys move through the move list.
    Moves,
}

impl Focus {
    /// Switches to the other panel.
    pub fn toggle(self) -> Self {
        match self {
            Focus::Board => Focus::Moves,
            Focus::Moves => Focus::Board,
        }
    }
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep running.
    Stay,
    /// Leave the application.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    controller: GameController<StatusLine>,
    cursor: Position,
    focus: Focus,
    selected: usize,
}

impl App {
    /// Creates a new application with an empty game.
    #[instrument]
    pub fn new(sort_order: SortOrder) -> Self {
        Self {
            controller: GameController::new(
                GameHistory::with_sort_order(sort_order),
                StatusLine::default(),
            ),
            cursor: Position::Center,
            focus: Focus::default(),
            selected: 0,
        }
    }

    /// The game being played.
    pub fn history(&self) -> &GameHistory {
        self.controller.state()
    }

    /// Last event line.
    pub fn status_line(&self) -> &StatusLine {
        self.controller.observer()
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Focused panel.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Selected move-list slot.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Transition::Quit,
            KeyCode::Tab => {
                self.focus = self.focus.toggle();
                self.selected = self.history().current_slot();
                debug!(focus = ?self.focus, "Focus changed");
            }
            KeyCode::Char('s') => {
                self.dispatch(Action::ToggleSort);
            }
            KeyCode::Char('r') => {
                self.dispatch(Action::Restart);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(position) = digit_position(c) {
                    self.cursor = position;
                    self.dispatch(Action::Play(position));
                }
            }
            code => match self.focus {
                Focus::Board => self.handle_board_key(code),
                Focus::Moves => self.handle_moves_key(code),
            },
        }
        Transition::Stay
    }

    fn handle_board_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.dispatch(Action::Play(self.cursor));
            }
            code => self.cursor = move_cursor(self.cursor, code),
        }
    }

    fn handle_moves_key(&mut self, code: KeyCode) {
        let last = self.history().len() - 1;
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.dispatch(Action::JumpTo(self.selected));
            }
            _ => {}
        }
    }

    /// Applies an action and re-reads the state the list selection depends on.
    fn dispatch(&mut self, action: Action) {
        let event: GameEvent = self.controller.dispatch(action);
        self.selected = self.history().current_slot();
        debug!(%event, selected = self.selected, "Dispatched");
    }
}
