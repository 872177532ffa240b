//! Terminal UI: renders the board and routes key presses into the game engine.

mod app;
mod game_view;

pub use app::{App, UiConfig};
