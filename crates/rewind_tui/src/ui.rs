//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use rewind_tictactoe::{
    Board, GameHistory, GameStatus, Mark, MoveEntry, Position, SortOrder, Square, winning_line,
};

use crate::app::{App, Focus};

const HELP: &str = "1-9/Enter: Play | Arrows: Move | Tab: Switch Panel | s: Sort | r: Restart | q: Quit";

/// Renders the whole application.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(13),   // Board and moves
            Constraint::Length(3), // Last event
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Rewind - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(28)])
        .split(chunks[1]);

    draw_board_panel(frame, body[0], app);
    draw_info_panel(frame, body[1], app);

    let events = app.status_line();
    let event = events.last().unwrap_or("Press 1-9 to place a mark");
    let event_line = Paragraph::new(event)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!("Changes: {}", events.changes()))
                .borders(Borders::ALL),
        );
    frame.render_widget(event_line, chunks[2]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}

fn draw_board_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel("Board", app.focus() == Focus::Board);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let board = app.history().current();
    let line = winning_line(board).map(|(_, line)| line);
    let cursor = (app.focus() == Focus::Board).then_some(app.cursor());

    let board_area = center_rect(inner, 40, 11);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], board, row, cursor, line);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    row: usize,
    cursor: Option<Position>,
    line: Option<[Position; 3]>,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::from_row_col(row, col) {
            let highlight = CellHighlight {
                cursor: cursor == Some(pos),
                winning: line.is_some_and(|line| line.contains(&pos)),
            };
            draw_cell(frame, cols[col * 2], board, pos, highlight);
        }
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CellHighlight {
    cursor: bool,
    winning: bool,
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, pos: Position, highlight: CellHighlight) {
    let (symbol, base_style) = match board.get(pos) {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(mark) => (mark.to_string(), mark_style(mark)),
    };

    let style = if highlight.cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else if highlight.winning {
        base_style.bg(Color::Green).fg(Color::Black)
    } else {
        base_style
    };

    // Vertically centre within the three-line cell.
    let text = vec![
        Line::default(),
        Line::from(Span::styled(format!(" {} ", symbol), style)),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn mark_style(mark: Mark) -> Style {
    let color = match mark {
        Mark::X => Color::Blue,
        Mark::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); 3]).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_info_panel(frame: &mut Frame, area: Rect, app: &App) {
    let history = app.history();
    let focused = app.focus() == Focus::Moves;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let status = status_line(history);
    let checkbox = match history.sort_order() {
        SortOrder::Descending => "[x] Sort descending",
        SortOrder::Ascending => "[ ] Sort descending",
    };
    let header = Paragraph::new(vec![status, Line::from(checkbox)])
        .block(Block::default().title("Status").borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = history.moves().iter().map(move_item).collect();
    let list = List::new(items)
        .block(panel("Moves", focused))
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default().with_selected(focused.then_some(app.selected()));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn status_line(history: &GameHistory) -> Line<'static> {
    let status = history.status();
    let style = match status {
        GameStatus::Won(mark) => mark_style(mark).bg(Color::Green),
        GameStatus::InProgress { next } => mark_style(next),
    };
    Line::from(Span::styled(status.to_string(), style))
}

fn move_item(entry: &MoveEntry) -> ListItem<'static> {
    let mut spans = vec![if *entry.is_current() {
        Span::styled(
            entry.label(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(entry.label())
    }];
    if let Some(played) = entry.played() {
        spans.push(Span::styled(
            format!("  ({})", played),
            Style::default().fg(Color::DarkGray),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
