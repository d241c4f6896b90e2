//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, tests).
//!
//! # Board Layout
//!
//! A board is a `rows × cols` grid of [`Cell`] values. The outermost ring of
//! cells is always empty so connection paths can route around the playfield;
//! tiles only ever occupy the interior `(rows - 2) × (cols - 2)` region.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval of the terminal loop |
//! | `CLOCK_TICK_MS` | 1000 | One countdown step of the level clock |
//! | `MATCH_RESOLVE_MS` | 250 | Delay between a successful match and tile removal |
//! | `HINT_DISPLAY_MS` | 2000 | How long a revealed hint stays visible |
//! | `COMBO_WINDOW_MS` | 2500 | Inactivity window that keeps a combo alive |
//! | `FINISH_GRACE_MS` | 500 | Delay between clearing the board and winning |
//!
//! # Scoring
//!
//! A match is worth `10 + 2 × path_len + 5 × combo`, where `combo` is the
//! combo count *before* the match increments it. Hints cost 20 points and
//! shuffles 30, never taking the score below zero.
//!
//! # Examples
//!
//! ```
//! use tui_pairs_types::{Intent, Position, EMPTY};
//!
//! let p = Position::new(1, 2);
//! assert_eq!(p.row, 1);
//! assert_eq!(p.col, 2);
//!
//! let intent = Intent::Select(p);
//! assert_eq!(intent, Intent::Select(Position::new(1, 2)));
//! assert_eq!(EMPTY, 0);
//! ```

use std::fmt;

/// Fixed timestep interval of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// One countdown step of the level clock
pub const CLOCK_TICK_MS: u32 = 1000;

/// Delay between a successful match and the removal of both tiles
pub const MATCH_RESOLVE_MS: u32 = 250;

/// How long a revealed hint pair stays highlighted
pub const HINT_DISPLAY_MS: u32 = 2000;

/// A further match inside this window keeps the combo growing
pub const COMBO_WINDOW_MS: u32 = 2500;

/// Grace delay between removing the last pair and declaring the level won
pub const FINISH_GRACE_MS: u32 = 500;

/// The low-time warning fires on every clock tick at or below this many seconds
pub const TIME_LOW_THRESHOLD_SECS: u32 = 10;

/// Base points for any successful match
pub const MATCH_BASE_SCORE: u32 = 10;

/// Points per point of the connecting path
pub const PATH_LEN_MULTIPLIER: u32 = 2;

/// Points per combo step already reached
pub const COMBO_MULTIPLIER: u32 = 5;

/// Score deducted when a hint is used
pub const HINT_PENALTY: u32 = 20;

/// Score deducted when a manual shuffle is used
pub const SHUFFLE_PENALTY: u32 = 30;

/// Hint credits granted at the start of every attempt
pub const HINT_QUOTA: u8 = 3;

/// Shuffle credits granted at the start of every attempt
pub const SHUFFLE_QUOTA: u8 = 3;

/// Extra shuffles a manual shuffle may perform looking for a playable board
pub const MANUAL_SHUFFLE_RETRIES: u32 = 10;

/// Upper bound on consecutive silent shuffles within one liveness check
pub const SILENT_SHUFFLE_LIMIT: u32 = 64;

/// Number of distinct tile types the presentation layer can draw
pub const MAX_TILE_TYPES: u8 = 16;

/// A cell on the board
///
/// - `0` ([`EMPTY`]): nothing here, paths may pass through
/// - `1..=16`: a tile of that type
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// A `(row, col)` coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Player intents accepted by a play session
///
/// Starting, retrying and leaving a level are handled by the application
/// shell, which owns the session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Click a cell
    Select(Position),
    /// Spend a hint credit to reveal a connectable pair
    Hint,
    /// Spend a shuffle credit to redistribute the remaining tiles
    Shuffle,
}

/// Lifecycle of one level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Board generated, clock not yet running
    #[default]
    Init,
    /// Accepting intents and clock ticks
    Playing,
    /// Board cleared (terminal)
    Won,
    /// Clock ran out (terminal)
    Lost,
}

/// Why the board was replaced wholesale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShuffleKind {
    /// Automatic redistribution after a deadlock, free of charge
    Silent,
    /// Player-requested redistribution, costs a credit and points
    Manual,
}
