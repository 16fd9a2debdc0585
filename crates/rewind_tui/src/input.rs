//! Keyboard mapping helpers.

use crossterm::event::KeyCode;
use rewind_tictactoe::Position;

/// Moves the board cursor with arrow keys or `hjkl`, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (d_row, d_col) = match key {
        KeyCode::Up | KeyCode::Char('k') => (-1, 0),
        KeyCode::Down | KeyCode::Char('j') => (1, 0),
        KeyCode::Left | KeyCode::Char('h') => (0, -1),
        KeyCode::Right | KeyCode::Char('l') => (0, 1),
        _ => return cursor,
    };
    cursor.offset(d_row, d_col).unwrap_or(cursor)
}

/// Maps the digit keys 1-9 onto the board, row-major from the top-left.
pub fn digit_position(c: char) -> Option<Position> {
    let digit = c.to_digit(10)? as usize;
    Position::from_index(digit.checked_sub(1)?)
}
