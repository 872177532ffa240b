use tracing::{debug, info};

use super::board::{DEFAULT_COLS, DEFAULT_ROWS, RUN_LENGTH};
use super::{Board, Cell, Player, Position};

/// Board dimensions, loadable from the `[board]` config section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
}

/// Why a drop was refused. Refusals leave the engine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejected {
    ColumnFull,
    ColumnOutOfRange,
    GameOver,
}

/// An accepted drop: where the piece landed, who placed it, and the status
/// the game moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    pub player: Player,
    pub status: GameStatus,
}

/// Owns the grid and turn state of a single game.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    active_player: Player,
    status: GameStatus,
    move_count: usize,
}

impl GameEngine {
    /// New game on a 6x7 board, player 1 to move
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// New game on a `rows` x `cols` board. Panics if either is zero.
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        GameEngine {
            board: Board::with_dimensions(rows, cols),
            active_player: Player::One,
            status: GameStatus::InProgress,
            move_count: 0,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::with_dimensions(config.rows, config.cols)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    /// Cell at (row, col). Panics if the position is off the board.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.board.get(row, col)
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Accepted drops since the last reset
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Lowest empty row in `column`, or `None` when it is full
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        self.board.landing_row(column)
    }

    /// Drop the active player's piece into `column` and advance the game.
    ///
    /// The win check for the mover runs before the tie check, so a move that
    /// both completes a run and fills the board is a win. The turn only passes
    /// to the other player while the game stays in progress.
    pub fn drop_piece(&mut self, column: usize) -> Result<Placement, MoveRejected> {
        if self.is_terminal() {
            return Err(self.reject(column, MoveRejected::GameOver));
        }
        if column >= self.cols() {
            return Err(self.reject(column, MoveRejected::ColumnOutOfRange));
        }
        let Some(row) = self.landing_row(column) else {
            return Err(self.reject(column, MoveRejected::ColumnFull));
        };

        let mover = self.active_player;
        let position = Position::new(row, column);
        self.board.place(position, mover.to_cell());
        self.move_count += 1;
        debug!(player = mover.id(), row, column, "piece placed");

        self.status = if self.check_win(mover) {
            info!(player = mover.id(), moves = self.move_count, "game won");
            GameStatus::Won(mover)
        } else if self.is_board_full() {
            info!(moves = self.move_count, "game tied");
            GameStatus::Tied
        } else {
            self.switch_active_player();
            GameStatus::InProgress
        };

        Ok(Placement {
            position,
            player: mover,
            status: self.status,
        })
    }

    fn reject(&self, column: usize, reason: MoveRejected) -> MoveRejected {
        debug!(column, ?reason, "drop rejected");
        reason
    }

    /// Whether `player` has four in a row anywhere on the board
    pub fn check_win(&self, player: Player) -> bool {
        self.board.check_win(player)
    }

    /// The run to highlight once `player` has won
    pub fn winning_run(&self, player: Player) -> Option<[Position; RUN_LENGTH]> {
        self.board.winning_run(player)
    }

    pub fn is_board_full(&self) -> bool {
        self.board.is_full()
    }

    pub fn switch_active_player(&mut self) {
        self.active_player = self.active_player.other();
    }

    /// Start over: empty board, player 1 to move, game in progress
    pub fn reset(&mut self) {
        self.board.clear();
        self.active_player = Player::One;
        self.status = GameStatus::InProgress;
        self.move_count = 0;
        info!("game reset");
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
