//! Behavioural tests for the history and win rules.

use rewind_tictactoe::{
    Board, GameHistory, GameStatus, IgnoredReason, Mark, PlayOutcome, Position, SortOrder, Square,
    winner_of,
};

fn pos(cell: usize) -> Position {
    Position::from_index(cell).expect("cell on board")
}

fn play_all(history: &mut GameHistory, cells: &[usize]) -> Vec<PlayOutcome> {
    cells.iter().map(|&cell| history.play(pos(cell))).collect()
}

/// Decodes `code` as nine base-3 digits: 0 empty, 1 X, 2 O.
fn board_from_code(mut code: u32) -> Board {
    let mut squares = [Square::Empty; 9];
    for square in squares.iter_mut() {
        *square = match code % 3 {
            0 => Square::Empty,
            1 => Square::Occupied(Mark::X),
            _ => Square::Occupied(Mark::O),
        };
        code /= 3;
    }
    Board::from_squares(squares)
}

#[test]
fn test_winner_of_every_board() {
    const TRIPLES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];

    for code in 0..3u32.pow(9) {
        let board = board_from_code(code);
        let squares = board.squares();
        let expected = TRIPLES.iter().find_map(|&[a, b, c]| match squares[a] {
            Square::Occupied(mark) if squares[b] == squares[a] && squares[c] == squares[a] => {
                Some(mark)
            }
            _ => None,
        });
        assert_eq!(winner_of(&board), expected, "board:\n{}", board);
    }
}

#[test]
fn test_occupied_play_keeps_length() {
    let mut history = GameHistory::new();
    play_all(&mut history, &[0, 4]);

    for cell in [0, 4] {
        let outcome = history.play(pos(cell));
        assert_eq!(
            outcome,
            PlayOutcome::Ignored(IgnoredReason::SquareOccupied(pos(cell)))
        );
        assert_eq!(history.len(), 3);
    }
}

#[test]
fn test_each_play_changes_exactly_one_cell() {
    let mut history = GameHistory::new();
    for cell in [4, 0, 8, 2, 6, 3] {
        let before = *history.current();
        let mark = history.next_mark();
        assert!(history.play(pos(cell)).is_played());

        let after = history.current();
        let changed: Vec<usize> = (0..9)
            .filter(|&i| before.get(pos(i)) != after.get(pos(i)))
            .collect();
        assert_eq!(changed, [cell]);
        assert_eq!(after.get(pos(cell)), Square::Occupied(mark));
    }
    assert!(history.is_consistent());
}

#[test]
fn test_jump_then_play_truncates() {
    let mut history = GameHistory::new();
    play_all(&mut history, &[0, 1, 2, 3]);
    assert_eq!(history.len(), 5);

    history.jump_to(2).expect("slot in range");
    assert!(history.play(pos(8)).is_played());

    assert_eq!(history.len(), 4);
    assert_eq!(history.cursor(), 3);
}

#[test]
fn test_turns_alternate() {
    let mut history = GameHistory::new();
    let outcomes = play_all(&mut history, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    let marks: Vec<Mark> = outcomes
        .iter()
        .map(|outcome| match outcome {
            PlayOutcome::Played { played, .. } => *played.mark(),
            PlayOutcome::Ignored(reason) => panic!("unexpected ignore: {}", reason),
        })
        .collect();
    let expected: Vec<Mark> = (0..9).map(Mark::for_move).collect();
    assert_eq!(marks, expected);
}

#[test]
fn test_full_board_without_line_never_reports_a_result() {
    // X O X / X O O / O X X
    let mut history = GameHistory::new();
    play_all(&mut history, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(history.current().occupied(), 9);
    assert_eq!(history.winner(), None);
    assert_eq!(history.status().to_string(), "Next player: O");
}

#[test]
fn test_listed_sequence_has_no_winner() {
    // X on 0, 8, 2 and O on 4, 1: no line is complete.
    let mut history = GameHistory::new();
    let outcomes = play_all(&mut history, &[0, 4, 8, 1, 2]);

    assert!(outcomes.iter().all(PlayOutcome::is_played));
    assert_eq!(history.winner(), None);
    assert_eq!(history.status(), GameStatus::InProgress { next: Mark::O });
}

#[test]
fn test_main_diagonal_win_ends_play() {
    let mut history = GameHistory::new();
    let outcomes = play_all(&mut history, &[0, 1, 4, 2, 8]);

    assert_eq!(
        outcomes[4],
        PlayOutcome::Played {
            played: rewind_tictactoe::Move::new(Mark::X, Position::BottomRight),
            winner: Some(Mark::X),
        }
    );
    assert_eq!(winner_of(history.current()), Some(Mark::X));
    assert_eq!(history.status().to_string(), "Winner: X");

    let len = history.len();
    assert_eq!(
        history.play(pos(5)),
        PlayOutcome::Ignored(IgnoredReason::GameOver { winner: Mark::X })
    );
    assert_eq!(history.len(), len);

    // Earlier snapshots stay reachable and playable.
    history.jump_to(3).expect("slot in range");
    assert_eq!(history.winner(), None);
    assert!(history.play(pos(5)).is_played());
    assert_eq!(history.len(), 5);
    assert_eq!(history.winner(), None);
}

#[test]
fn test_toggle_sort_only_reorders() {
    let mut history = GameHistory::new();
    play_all(&mut history, &[0, 1, 4, 2, 8]);
    history.jump_to(2).expect("slot in range");

    let snapshots = history.snapshots().to_vec();
    let cursor = history.cursor();
    let winner = history.winner();
    let ascending: Vec<usize> = history.moves().iter().map(|e| *e.index()).collect();

    assert_eq!(history.toggle_sort(), SortOrder::Descending);

    assert_eq!(history.snapshots(), snapshots.as_slice());
    assert_eq!(history.cursor(), cursor);
    assert_eq!(history.winner(), winner);
    let descending: Vec<usize> = history.moves().iter().map(|e| *e.index()).collect();
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);

    assert_eq!(history.toggle_sort(), SortOrder::Ascending);
    let again: Vec<usize> = history.moves().iter().map(|e| *e.index()).collect();
    assert_eq!(again, ascending);
}

#[test]
fn test_exactly_one_current_entry() {
    let mut history = GameHistory::new();
    play_all(&mut history, &[4, 0, 8]);
    history.jump_to(1).expect("slot in range");

    for order in [SortOrder::Ascending, SortOrder::Descending] {
        if history.sort_order() != order {
            history.toggle_sort();
        }
        let current: Vec<usize> = history
            .moves()
            .iter()
            .filter(|e| *e.is_current())
            .map(|e| *e.index())
            .collect();
        assert_eq!(current, [1]);
    }
}

const EMPTY_BOARD: &str = r#"
[[snapshots]]
squares = ["Empty", "Empty", "Empty", "Empty", "Empty", "Empty", "Empty", "Empty", "Empty"]
"#;

#[test]
fn test_deserialize_rejects_history_without_snapshots() {
    let doc = "snapshots = []\ncursor = 3\nsort_order = \"ascending\"\n";
    assert!(toml::from_str::<GameHistory>(doc).is_err());
}

#[test]
fn test_deserialize_rejects_cursor_past_last_snapshot() {
    let doc = format!("cursor = 1\n{EMPTY_BOARD}");
    let err = toml::from_str::<GameHistory>(&doc).unwrap_err();
    assert!(err.to_string().contains("Inconsistent history"));
}

#[test]
fn test_deserialize_rejects_skipped_turn() {
    let doc = format!(
        "cursor = 1\n{EMPTY_BOARD}\n[[snapshots]]\nsquares = [{{ Occupied = \"O\" }}, \"Empty\", \"Empty\", \"Empty\", \"Empty\", \"Empty\", \"Empty\", \"Empty\", \"Empty\"]\n"
    );
    assert!(toml::from_str::<GameHistory>(&doc).is_err());
}

#[test]
fn test_deserialize_accepts_fresh_history() {
    let doc = format!("cursor = 0\n{EMPTY_BOARD}");
    let mut history: GameHistory = toml::from_str(&doc).expect("valid history");
    assert_eq!(history, GameHistory::new());
    assert!(history.play(Position::Center).is_played());
    assert_eq!(history.len(), 2);
}
