//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board rules and the per-level session state machine.
//! It has **no dependencies** on terminal, input, or I/O code:
//!
//! - **Deterministic**: randomness comes from an injected [`TileRng`]; the same seed replays the same session
//! - **Testable**: every rule is a plain function or a method driven by explicit time steps
//! - **Portable**: the terminal front end is just one consumer of [`SessionEvent`]s
//!
//! # Module Structure
//!
//! - [`board`]: grid of typed cells with an empty border ring
//! - [`path`]: connection search with at most two turns
//! - [`generator`]: initial layouts from level parameters
//! - [`shuffle`]: occupancy-preserving redistribution, with a retrying variant
//! - [`hint`]: connectable-pair scan and deadlock detection
//! - [`scoring`]: match rewards, time bonus, penalties
//! - [`timers`]: delayed effects keyed by purpose
//! - [`session`]: selection, combo, clock, credits and win/loss
//! - [`catalog`]: the ordered level list
//!
//! # Example
//!
//! ```
//! use tui_pairs_core::{LevelCatalog, Session, SimpleRng};
//! use tui_pairs_types::{Intent, Phase};
//!
//! let catalog = LevelCatalog::builtin();
//! let level = catalog.get(1).unwrap().clone();
//!
//! let mut session = Session::new(level, SimpleRng::new(12345));
//! session.start();
//! assert_eq!(session.phase(), Phase::Playing);
//!
//! // A hint always finds something: the session never sits on a dead board.
//! assert!(session.apply_intent(Intent::Hint));
//! assert!(session.hint().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`] every frame with the elapsed milliseconds. The
//! countdown drops one second per accumulated 1000ms; matched tiles leave the
//! board 250ms after the match, hints last 2s, a combo survives 2.5s of
//! inactivity and a cleared board is declared won after a 500ms grace.

pub mod board;
pub mod catalog;
pub mod generator;
pub mod hint;
pub mod path;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod snapshot;
pub mod timers;

pub use tui_pairs_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{CatalogError, LevelCatalog, LevelConfig};
pub use generator::generate;
pub use hint::{find_connectable_pair, is_deadlocked};
pub use path::{connect, Path};
pub use rng::{SimpleRng, TileRng};
pub use scoring::{apply_penalty, combo_pitch_index, match_score, time_bonus_secs};
pub use session::{Session, SessionEvent};
pub use shuffle::{shuffle, shuffle_until_playable, ShuffleOutcome};
pub use snapshot::SessionSnapshot;
pub use timers::{Deferred, Timers};
