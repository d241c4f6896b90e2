//! TUI Pairs (workspace facade crate).
//!
//! Re-exports the member crates as `tui_pairs::{core,input,term,types}` and
//! hosts the application shell that sits between them: the level menu,
//! unlock progress and the terminal configuration.

pub mod app;
pub mod config;

pub use tui_pairs_core as core;
pub use tui_pairs_input as input;
pub use tui_pairs_term as term;
pub use tui_pairs_types as types;

pub use app::{App, Screen};
pub use config::{AppConfig, Args};
