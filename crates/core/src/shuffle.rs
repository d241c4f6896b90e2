//! Shuffle module - redistributes the remaining tiles
//!
//! A shuffle never changes which cells are occupied, only which type sits in
//! each occupied cell.

use log::{debug, warn};

use crate::board::Board;
use crate::hint::find_connectable_pair;
use crate::rng::TileRng;

/// Permute the remaining tile values over the same occupied cells.
///
/// A board with no tiles is returned unchanged.
pub fn shuffle<R: TileRng>(board: &Board, rng: &mut R) -> Board {
    let occupied = board.occupied();
    if occupied.is_empty() {
        return board.clone();
    }

    let mut values: Vec<_> = occupied.iter().map(|&(_, v)| v).collect();
    rng.shuffle(&mut values);

    let mut next = board.clone();
    for (&(pos, _), value) in occupied.iter().zip(values) {
        next.set(pos, value);
    }
    next
}

/// Result of a retrying shuffle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOutcome {
    pub board: Board,
    /// Shuffles performed, including the first
    pub attempts: u32,
    /// Whether the final board has at least one connectable pair
    pub playable: bool,
}

/// Shuffle once, then keep reshuffling up to `max_retries` more times until
/// a connectable pair exists. The last attempt is kept either way.
pub fn shuffle_until_playable<R: TileRng>(
    board: &Board,
    rng: &mut R,
    max_retries: u32,
) -> ShuffleOutcome {
    let mut next = shuffle(board, rng);
    let mut attempts = 1;
    let mut playable = find_connectable_pair(&next).is_some();

    while !playable && attempts <= max_retries {
        next = shuffle(&next, rng);
        attempts += 1;
        playable = find_connectable_pair(&next).is_some();
    }

    if playable {
        debug!("shuffle found a playable board after {} attempt(s)", attempts);
    } else {
        warn!(
            "shuffle gave up after {} attempts with {} tiles left",
            attempts,
            next.tile_count()
        );
    }

    ShuffleOutcome {
        board: next,
        attempts,
        playable,
    }
}
