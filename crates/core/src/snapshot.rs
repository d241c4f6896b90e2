//! Read-only view of a session for presentation layers

use crate::board::Board;
use crate::path::Path;
use crate::types::{Phase, Position};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub level_id: u32,
    pub level_label: String,
    pub time_limit_secs: u32,
    pub board: Board,
    pub phase: Phase,
    pub selection: Option<Position>,
    pub hint: Option<(Position, Position)>,
    /// Connection being resolved, empty when none
    pub path: Path,
    pub score: u32,
    pub combo: u32,
    pub time_left_secs: u32,
    pub tiles_left: usize,
    pub hints_left: u8,
    pub shuffles_left: u8,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Whether the low-time warning styling applies
    pub fn time_low(&self) -> bool {
        self.time_left_secs < crate::types::TIME_LOW_THRESHOLD_SECS
    }

    pub fn is_hinted(&self, pos: Position) -> bool {
        matches!(self.hint, Some((a, b)) if a == pos || b == pos)
    }
}
