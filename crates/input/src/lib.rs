//! Terminal input module (shell-facing).
//!
//! Maps `crossterm` key events into [`Command`]s for the application shell.
//! The same key can mean different things on the level menu and on the board,
//! so mapping takes an [`InputContext`].

pub mod map;

pub use tui_pairs_types as types;

pub use map::{map_key, should_quit, Command, Direction, InputContext};
