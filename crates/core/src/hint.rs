//! Hint module - exhaustive search for a connectable pair
//!
//! The same scan answers two questions: "what can the player match?" (hints)
//! and "can the player match anything at all?" (deadlock detection). It runs
//! O(N²) path searches over N tiles, so callers only use it on state
//! transitions, never per frame.

use crate::board::Board;
use crate::path::connect;
use crate::types::Position;

/// First connectable pair in scan order, or `None` if the board is dead.
///
/// Tiles are listed row-major; pairs are tried as `(i, j)` with `i < j`.
pub fn find_connectable_pair(board: &Board) -> Option<(Position, Position)> {
    let tiles = board.occupied();
    for (i, &(a, ta)) in tiles.iter().enumerate() {
        for &(b, tb) in &tiles[i + 1..] {
            if ta == tb && connect(board, a, b).is_some() {
                return Some((a, b));
            }
        }
    }
    None
}

/// Whether the board has tiles but no legal move
pub fn is_deadlocked(board: &Board) -> bool {
    board.tile_count() > 0 && find_connectable_pair(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u8]]) -> Board {
        Board::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_finds_first_pair_in_scan_order() {
        let b = board(&[
            &[0, 0, 0, 0, 0],
            &[0, 2, 1, 2, 0],
            &[0, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        // (1,1)=2 is scanned first and reaches (1,3)=2 over the top border.
        assert_eq!(
            find_connectable_pair(&b),
            Some((Position::new(1, 1), Position::new(1, 3)))
        );
    }

    #[test]
    fn test_deadlock_checkerboard() {
        // Diagonal twins: going around the other type needs three turns.
        let b = board(&[
            &[0, 0, 0, 0],
            &[0, 1, 2, 0],
            &[0, 2, 1, 0],
            &[0, 0, 0, 0],
        ]);
        assert!(is_deadlocked(&b));
    }

    #[test]
    fn test_single_tile_is_deadlocked() {
        let b = board(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]);
        assert!(is_deadlocked(&b));
        assert_eq!(find_connectable_pair(&b), None);
    }

    #[test]
    fn test_empty_board_is_not_deadlocked() {
        assert!(!is_deadlocked(&Board::new(4, 4)));
    }
}
