use crate::game::{GameEngine, GameStatus, Player, Position};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    engine: &GameEngine,
    selected_column: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, engine, chunks[0]);
    render_board(frame, engine, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, engine.is_terminal(), chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, engine: &GameEngine, area: ratatui::layout::Rect) {
    let (status, color) = match engine.status() {
        GameStatus::InProgress => {
            let player = engine.active_player();
            (
                format!("Current Player: {}", player.name()),
                player_color(player),
            )
        }
        GameStatus::Won(player) => (
            format!("{} won the game!", player.name()),
            player_color(player),
        ),
        GameStatus::Tied => ("It's a tie!".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    engine: &GameEngine,
    selected_column: usize,
    area: ratatui::layout::Rect,
) {
    let cols = engine.cols();
    let winning_run = match engine.status() {
        GameStatus::Won(player) => engine.winning_run(player),
        _ => None,
    };
    let is_winning = |row: usize, col: usize| {
        winning_run.is_some_and(|run| run.contains(&Position::new(row, col)))
    };

    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..cols {
        let label = format!("{:^3}", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(cols * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..engine.rows() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..cols {
            let cell = engine.cell(row, col);
            let (symbol, color) = match cell.player() {
                None => (" . ", Color::DarkGray),
                Some(player) => (" ● ", player_color(player)),
            };
            let mut style = Style::default().fg(color);
            if !cell.is_empty() && is_winning(row, col) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..cols {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, game_over: bool, area: ratatui::layout::Rect) {
    // Restart is only advertised once the game has ended
    let line = if game_over {
        Line::from(vec![
            Span::styled(
                "R: Restart",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  Q: Quit"),
        ])
    } else {
        Line::from("←/→: Move  |  Enter/1-9: Drop  |  Q: Quit")
    };

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
