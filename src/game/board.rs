use super::Player;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Number of same-player cells in a line that wins the game
pub const RUN_LENGTH: usize = 4;

/// Row/column steps for the four run directions, all starting from the run's
/// first cell: rightward, downward, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The player occupying this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Grid of cells stored row-major. Row 0 is the top, column 0 the leftmost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty 6x7 board
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Create an empty board of the given size.
    ///
    /// Panics if either dimension is zero.
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get the cell at a specific position.
    ///
    /// Panics if the position is off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Lowest empty row in a column, or `None` if the column is full or
    /// out of range
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.get(row, col).is_empty())
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Write a cell. Callers pick the position with `landing_row`.
    pub(crate) fn place(&mut self, pos: Position, cell: Cell) {
        debug_assert!(self.get(pos.row, pos.col).is_empty(), "cell already occupied");
        self.cells[pos.row * self.cols + pos.col] = cell;
    }

    /// Empty every cell
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Check whether `player` owns four cells in a line anywhere on the board
    pub fn check_win(&self, player: Player) -> bool {
        self.winning_run(player).is_some()
    }

    /// First run of four cells owned by `player`, scanning start cells top to
    /// bottom, left to right
    pub fn winning_run(&self, player: Player) -> Option<[Position; RUN_LENGTH]> {
        let target = player.to_cell();

        for row in 0..self.rows {
            for col in 0..self.cols {
                for &direction in &DIRECTIONS {
                    let Some(run) = self.run_from(row, col, direction) else {
                        continue;
                    };
                    if run.iter().all(|pos| self.get(pos.row, pos.col) == target) {
                        return Some(run);
                    }
                }
            }
        }

        None
    }

    /// Coordinates of the run starting at (row, col), or `None` if any of
    /// them falls off the board
    fn run_from(
        &self,
        row: usize,
        col: usize,
        (d_row, d_col): (isize, isize),
    ) -> Option<[Position; RUN_LENGTH]> {
        let mut run = [Position::new(row, col); RUN_LENGTH];

        for (step, slot) in run.iter_mut().enumerate() {
            let r = row.checked_add_signed(d_row * step as isize)?;
            let c = col.checked_add_signed(d_col * step as isize)?;
            if !self.in_bounds(r, c) {
                return None;
            }
            *slot = Position::new(r, c);
        }

        Some(run)
    }

    /// Build a board from text rows, top row first. `.` is empty, `1` and
    /// `2` are the players.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let cols = rows[0].len();
        let mut board = Board::with_dimensions(rows.len(), cols);
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), cols, "ragged row {row}");
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    '1' => Cell::One,
                    '2' => Cell::Two,
                    other => panic!("unexpected cell '{other}'"),
                };
                board.cells[row * cols + col] = cell;
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
