//! Generator module - builds the initial tile layout for a level
//!
//! Pairs are dealt round-robin over the tile types, permuted with the
//! injected RNG, and laid out row-major in the interior. Solvability is not
//! checked here; the session's liveness check repairs dead boards.
//!
//! When the interior has an odd number of cells the layout is padded with a
//! single extra tile of type 1. That tile can never be cleared, so such a
//! level cannot be won. The builtin catalog only uses even interiors.

use log::debug;

use crate::board::Board;
use crate::rng::TileRng;
use crate::types::Cell;

/// The flat, unshuffled tile list for an interior of `count` cells
pub fn deal_tiles(count: usize, tile_types: u8) -> Vec<Cell> {
    let types = tile_types.max(1) as usize;
    let mut tiles = Vec::with_capacity(count);
    for i in 0..count / 2 {
        let kind = (i % types) as Cell + 1;
        tiles.push(kind);
        tiles.push(kind);
    }
    while tiles.len() < count {
        tiles.push(1);
    }
    tiles
}

/// Generate a board of `rows × cols` (border included) holding
/// `(rows - 2) × (cols - 2)` tiles of up to `tile_types` kinds.
pub fn generate<R: TileRng>(rows: usize, cols: usize, tile_types: u8, rng: &mut R) -> Board {
    let mut board = Board::new(rows, cols);
    let mut tiles = deal_tiles(board.interior_len(), tile_types);
    rng.shuffle(&mut tiles);

    let slots: Vec<_> = board.interior_positions().collect();
    for (pos, kind) in slots.into_iter().zip(tiles) {
        board.set(pos, kind);
    }

    debug!(
        "generated {}x{} board with {} tiles of {} types",
        rows,
        cols,
        board.tile_count(),
        tile_types
    );
    board
}
