//! Core Connect Four game logic: board representation, player types, and the
//! engine that runs the turn protocol.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, Position, DEFAULT_COLS, DEFAULT_ROWS, RUN_LENGTH};
pub use engine::{BoardConfig, GameEngine, GameStatus, MoveRejected, Placement};
pub use player::Player;
