use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::game::{GameEngine, GameStatus, MoveRejected, Placement};

/// Terminal UI tuning, loadable from the `[ui]` config section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long to wait for a key press before redrawing
    pub poll_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            poll_interval_ms: 100,
        }
    }
}

pub struct App {
    engine: GameEngine,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    poll_interval: Duration,
}

impl App {
    pub fn new(engine: GameEngine, config: &UiConfig) -> Self {
        let selected_column = engine.cols() / 2; // Start in middle
        App {
            engine,
            selected_column,
            should_quit: false,
            message: None,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.engine.cols() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < self.engine.cols() {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.engine.reset();
                self.selected_column = self.engine.cols() / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.engine.drop_piece(self.selected_column) {
            Ok(Placement { status, .. }) => {
                self.message = match status {
                    GameStatus::Won(player) => Some(format!("{} won the game!", player.name())),
                    GameStatus::Tied => Some("It's a tie!".to_string()),
                    GameStatus::InProgress => None,
                };
            }
            Err(MoveRejected::ColumnFull) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveRejected::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            // The selector never leaves the board
            Err(MoveRejected::ColumnOutOfRange) => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.engine, self.selected_column, &self.message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(GameEngine::new(), &UiConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, GameStatus, Player};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Modifier;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    /// Drop into a zero-based column using the digit shortcut
    fn press_column(app: &mut App, col: usize) {
        let key = char::from_digit(col as u32 + 1, 10).unwrap();
        press(app, KeyCode::Char(key));
    }

    fn render_buffer(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(app: &App) -> String {
        render_buffer(app)
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    /// Modifiers of the piece or dot drawn for each board cell, indexed
    /// [row][col]
    fn board_cell_modifiers(buffer: &Buffer) -> Vec<Vec<Modifier>> {
        let width = buffer.area.width as usize;
        let lines: Vec<_> = buffer.content().chunks(width).collect();
        let top = lines
            .iter()
            .position(|line| line.iter().any(|cell| cell.symbol() == "╔"))
            .expect("board top border is drawn");

        lines[top + 1..]
            .iter()
            .take_while(|line| !line.iter().any(|cell| cell.symbol() == "╚"))
            .map(|line| {
                line.iter()
                    .filter(|cell| matches!(cell.symbol(), "●" | "."))
                    .map(|cell| cell.modifier)
                    .collect()
            })
            .collect()
    }

    /// Column order that fills the board, alternating players, with no four
    /// in a row anywhere
    fn drawn_game_columns() -> Vec<usize> {
        let mut columns = Vec::new();
        for (a, b) in [(0, 2), (1, 3), (4, 6)] {
            columns.push(a);
            columns.extend([b; 6]);
            columns.extend([a; 5]);
        }
        columns.extend([5; 6]);
        columns
    }

    #[test]
    fn test_starts_in_middle_column() {
        let app = App::default();
        assert_eq!(app.selected_column(), 3);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_selector_is_clamped() {
        let mut app = App::default();
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column(), 0);
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column(), 6);
    }

    #[test]
    fn test_enter_drops_into_selected_column() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.engine().cell(5, 3), Cell::One);
        assert_eq!(app.engine().active_player(), Player::Two);
    }

    #[test]
    fn test_digit_selects_and_drops() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.selected_column(), 0);
        assert_eq!(app.engine().cell(5, 0), Cell::One);

        // Column 8 does not exist on a 7-wide board
        press(&mut app, KeyCode::Char('8'));
        assert_eq!(app.selected_column(), 0);
        assert_eq!(app.engine().move_count(), 1);
    }

    #[test]
    fn test_full_column_message() {
        let mut app = App::default();
        for _ in 0..6 {
            press(&mut app, KeyCode::Char(' '));
        }
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.message(), Some("Column is full!"));
        assert_eq!(app.engine().move_count(), 6);
    }

    #[test]
    fn test_win_is_announced_and_further_drops_refused() {
        let mut app = App::default();
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('1'));
            press(&mut app, KeyCode::Char('2'));
        }
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.message(), Some("Player 1 won the game!"));

        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.message(), Some("Game over! Press 'r' to restart."));
        assert_eq!(app.engine().move_count(), 7);
    }

    #[test]
    fn test_restart_resets_engine() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('r'));

        assert_eq!(app.message(), Some("New game started!"));
        assert_eq!(app.engine().move_count(), 0);
        assert_eq!(app.engine().active_player(), Player::One);
        assert_eq!(app.selected_column(), 3);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = App::default();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_shows_turn_and_result() {
        let mut app = App::default();
        assert!(screen_text(&app).contains("Current Player: Player 1"));

        for _ in 0..3 {
            press(&mut app, KeyCode::Char('1'));
            press(&mut app, KeyCode::Char('2'));
        }
        press(&mut app, KeyCode::Char('1'));
        let text = screen_text(&app);
        assert!(text.contains("Player 1 won the game!"));
        assert!(text.contains("R: Restart"));
    }

    #[test]
    fn test_tie_is_announced() {
        let mut app = App::default();
        let columns = drawn_game_columns();
        for &col in &columns[..41] {
            press_column(&mut app, col);
            assert!(!app.engine().is_terminal());
            assert_eq!(app.message(), None);
        }

        press_column(&mut app, columns[41]);
        assert_eq!(app.engine().status(), GameStatus::Tied);
        assert_eq!(app.message(), Some("It's a tie!"));

        let text = screen_text(&app);
        assert!(text.contains("It's a tie!"));
        assert!(text.contains("R: Restart"));
    }

    #[test]
    fn test_winning_run_is_highlighted() {
        let mut app = App::default();
        for _ in 0..3 {
            press_column(&mut app, 0);
            press_column(&mut app, 1);
        }

        let before = board_cell_modifiers(&render_buffer(&app));
        assert_eq!(before.len(), 6);
        assert!(before
            .iter()
            .flatten()
            .all(|modifier| !modifier.contains(Modifier::REVERSED)));

        press_column(&mut app, 0);
        let after = board_cell_modifiers(&render_buffer(&app));
        assert_eq!(after.len(), 6);
        for row in &after {
            assert_eq!(row.len(), 7);
        }

        for row in 2..6 {
            assert!(after[row][0].contains(Modifier::REVERSED), "row {row} col 0");
        }
        for row in 3..6 {
            assert!(!after[row][1].contains(Modifier::REVERSED), "row {row} col 1");
        }
        assert!(!after[1][0].contains(Modifier::REVERSED));
    }
}
