//! Scoring module - match rewards, time bonuses and penalties

use crate::types::{COMBO_MULTIPLIER, MATCH_BASE_SCORE, PATH_LEN_MULTIPLIER};

/// Number of distinct feedback pitches for rising combos
pub const COMBO_PITCHES: u32 = 6;

/// Points for a match whose path has `path_len` points, made while the
/// combo counter stood at `combo` (before this match increments it).
pub fn match_score(path_len: usize, combo: u32) -> u32 {
    MATCH_BASE_SCORE
        .saturating_add(PATH_LEN_MULTIPLIER.saturating_mul(path_len as u32))
        .saturating_add(COMBO_MULTIPLIER.saturating_mul(combo))
}

/// Seconds added to the clock per match. Shrinks every three levels, never below 1.
pub fn time_bonus_secs(level_id: u32) -> u32 {
    3u32.saturating_sub(level_id / 3).max(1)
}

/// Deduct `penalty` from `score`, flooring at zero.
pub fn apply_penalty(score: u32, penalty: u32) -> u32 {
    score.saturating_sub(penalty)
}

/// Index into a rising scale of feedback notes for a combo count
pub fn combo_pitch_index(combo: u32) -> u32 {
    combo.min(COMBO_PITCHES - 1)
}
