//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. Views draw into a plain
//! framebuffer and [`TerminalRenderer`] flushes only what changed between
//! frames. No widget toolkit is involved.
//!
//! Goals:
//! - Keep `core` deterministic and free of terminal concerns
//! - Make every view testable without a terminal
//! - Control the cell aspect ratio (3 columns per board cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_pairs_core as core;
pub use tui_pairs_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{
    tile_color, tile_glyph, GameView, GlyphMode, MenuEntry, MenuView, Viewport,
};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
