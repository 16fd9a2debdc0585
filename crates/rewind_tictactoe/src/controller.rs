//! Actions, events and the controller that applies them.
//!
//! [`reduce`] is the pure transition: it takes the state record by value
//! and hands back the next one with a [`GameEvent`] describing what
//! happened. [`GameController`] wraps it for front ends that want to own a
//! single mutable game and be told when it changes.

use super::action::{HistoryError, IgnoredReason, PlayOutcome};
use super::history::{GameHistory, SortOrder};
use super::rules::winning_line;
use super::{Mark, Position};
use tracing::{debug, instrument};

/// A request from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place the next mark.
    Play(Position),
    /// Jump to the entry at this slot of the displayed move list.
    JumpTo(usize),
    /// Flip the move-list order.
    ToggleSort,
    /// Start over with an empty board.
    Restart,
}

/// What an [`Action`] did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameEvent {
    /// A mark was placed without completing a line.
    #[display("Move {}: {} played {}", move_number + 1, mark, position)]
    MovePlayed {
        /// Where the mark went.
        position: Position,
        /// Which mark was placed.
        mark: Mark,
        /// History index of the new snapshot.
        move_number: usize,
    },
    /// A mark was placed and completed a line.
    #[display("{} wins with {}, {}, {}", mark, line[0], line[1], line[2])]
    GameWon {
        /// Winning mark.
        mark: Mark,
        /// The completed line.
        line: [Position; 3],
    },
    /// The play request changed nothing.
    #[display("Ignored: {}", _0)]
    MoveIgnored(IgnoredReason),
    /// The cursor moved.
    #[display("Jumped to move {}", move_number + 1)]
    Jumped {
        /// History index now active.
        move_number: usize,
    },
    /// The jump target did not exist.
    #[display("Jump rejected: {}", _0)]
    JumpRejected(HistoryError),
    /// The move-list order changed.
    #[display("Move list sorted {}", _0)]
    SortToggled(SortOrder),
    /// The history was cleared.
    #[display("New game")]
    Restarted,
}

impl GameEvent {
    /// Whether the event changed the state record.
    pub fn changed_state(&self) -> bool {
        !matches!(self, GameEvent::MoveIgnored(_) | GameEvent::JumpRejected(_))
    }
}

/// Applies `action` to `state`, returning the next state and what happened.
#[instrument(skip(state), fields(cursor = state.cursor(), len = state.len()))]
pub fn reduce(mut state: GameHistory, action: Action) -> (GameHistory, GameEvent) {
    let event = match action {
        Action::Play(position) => match state.play(position) {
            PlayOutcome::Played { played, winner } => match winner.and(winning_line(state.current())) {
                Some((mark, line)) => GameEvent::GameWon { mark, line },
                None => GameEvent::MovePlayed {
                    position: *played.position(),
                    mark: *played.mark(),
                    move_number: state.cursor(),
                },
            },
            PlayOutcome::Ignored(reason) => GameEvent::MoveIgnored(reason),
        },
        Action::JumpTo(slot) => match state.jump_to(slot) {
            Ok(move_number) => GameEvent::Jumped { move_number },
            Err(e) => GameEvent::JumpRejected(e),
        },
        Action::ToggleSort => GameEvent::SortToggled(state.toggle_sort()),
        Action::Restart => {
            state.reset();
            GameEvent::Restarted
        }
    };

    debug!(%event, "Action reduced");
    (state, event)
}

/// Receives a notification after every dispatched action.
pub trait StateObserver {
    /// Called with the new state and the event that produced it.
    fn state_changed(&mut self, state: &GameHistory, event: &GameEvent);
}

impl StateObserver for () {
    fn state_changed(&mut self, _state: &GameHistory, _event: &GameEvent) {}
}

/// Records every event, oldest first.
impl StateObserver for Vec<GameEvent> {
    fn state_changed(&mut self, _state: &GameHistory, event: &GameEvent) {
        self.push(*event);
    }
}

/// Owns a game and notifies an observer as actions are applied.
#[derive(Debug, Clone, Default)]
pub struct GameController<O = ()> {
    state: GameHistory,
    observer: O,
}

impl<O: StateObserver> GameController<O> {
    /// Creates a controller over `state`.
    pub fn new(state: GameHistory, observer: O) -> Self {
        Self { state, observer }
    }

    /// The current state record.
    pub fn state(&self) -> &GameHistory {
        &self.state
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Applies `action`, notifies the observer and returns the event.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, action: Action) -> GameEvent {
        let (next, event) = reduce(std::mem::take(&mut self.state), action);
        self.state = next;
        self.observer.state_changed(&self.state, &event);
        event
    }

    /// Consumes the controller, returning the state and observer.
    pub fn into_parts(self) -> (GameHistory, O) {
        (self.state, self.observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_play_and_win() {
        let mut state = GameHistory::new();
        let mut events = Vec::new();
        for cell in [0, 1, 4, 2, 8] {
            let (next, event) = reduce(state, Action::Play(Position::from_index(cell).unwrap()));
            state = next;
            events.push(event);
        }

        assert_eq!(
            events[0],
            GameEvent::MovePlayed {
                position: Position::TopLeft,
                mark: Mark::X,
                move_number: 1
            }
        );
        assert_eq!(
            events[4],
            GameEvent::GameWon {
                mark: Mark::X,
                line: [Position::TopLeft, Position::Center, Position::BottomRight]
            }
        );
    }

    #[test]
    fn test_reduce_rejected_jump_keeps_state() {
        let state = GameHistory::new();
        let (next, event) = reduce(state.clone(), Action::JumpTo(3));
        assert_eq!(next, state);
        assert!(!event.changed_state());
        assert_eq!(
            event.to_string(),
            "Jump rejected: Move list slot 3 is out of range (1 entries)"
        );
    }

    #[test]
    fn test_controller_notifies_observer() {
        let mut controller = GameController::new(GameHistory::new(), Vec::new());
        controller.dispatch(Action::Play(Position::Center));
        controller.dispatch(Action::Play(Position::Center));
        controller.dispatch(Action::ToggleSort);
        controller.dispatch(Action::JumpTo(1));
        controller.dispatch(Action::Restart);

        let (state, events) = controller.into_parts();
        assert_eq!(
            events,
            [
                GameEvent::MovePlayed {
                    position: Position::Center,
                    mark: Mark::X,
                    move_number: 1
                },
                GameEvent::MoveIgnored(IgnoredReason::SquareOccupied(Position::Center)),
                GameEvent::SortToggled(SortOrder::Descending),
                GameEvent::Jumped { move_number: 0 },
                GameEvent::Restarted,
            ]
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.sort_order(), SortOrder::Descending);
    }

    #[test]
    fn test_event_descriptions() {
        let event = GameEvent::MovePlayed {
            position: Position::Center,
            mark: Mark::O,
            move_number: 2,
        };
        assert_eq!(event.to_string(), "Move 3: O played Center");
        assert_eq!(
            GameEvent::Jumped { move_number: 0 }.to_string(),
            "Jumped to move 1"
        );
        assert_eq!(
            GameEvent::SortToggled(SortOrder::Descending).to_string(),
            "Move list sorted descending"
        );
    }

    #[test]
    fn test_played_event_matches_move_list_number() {
        let mut controller = GameController::new(GameHistory::new(), Vec::new());
        controller.dispatch(Action::Play(Position::TopLeft));

        let (state, events) = controller.into_parts();
        assert_eq!(events[0].to_string(), "Move 2: X played Top-left");

        let current = state
            .moves()
            .into_iter()
            .find(|entry| *entry.is_current())
            .unwrap();
        assert_eq!(current.label(), "Current move: 2");
    }
}
