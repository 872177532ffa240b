//! # Connect Four
//!
//! Two-player Connect Four played in the terminal. The game engine owns the
//! grid and turn state; the Ratatui front end only renders what the engine
//! reports and forwards column choices to it.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, engine and turn protocol
//! - [`ui`]: Terminal UI: board view, key handling
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
