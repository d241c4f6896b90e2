//! Path module - bounded-turn connection search
//!
//! Two tiles connect when a polyline of at most three straight segments (two
//! turns) joins them through empty cells. The search is read-only and fully
//! deterministic: rules are tried in a fixed order and the first hit wins.
//!
//! 1. **Zero turns**: same row or column with nothing in between.
//! 2. **One turn**: through the corner `(a.row, b.col)`, then `(b.row, a.col)`.
//! 3. **Two turns**: slide from `a` along its column to every empty row
//!    (top to bottom), then along its row to every empty column (left to
//!    right), and try a one-turn connection from there to `b`.
//!
//! Border rows and columns are part of the grid, so paths may run around the
//! outside of the tiles.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Position, EMPTY};

/// A connection polyline: endpoints plus up to two turn points
pub type Path = ArrayVec<Position, 4>;

/// Whether `a` and `b` share a row or column and every cell strictly
/// between them is empty. Endpoints are not inspected.
pub fn is_line_clear(board: &Board, a: Position, b: Position) -> bool {
    if a.row == b.row {
        let (lo, hi) = (a.col.min(b.col), a.col.max(b.col));
        ((lo + 1)..hi).all(|col| board.is_empty_at(Position::new(a.row, col)))
    } else if a.col == b.col {
        let (lo, hi) = (a.row.min(b.row), a.row.max(b.row));
        ((lo + 1)..hi).all(|row| board.is_empty_at(Position::new(row, a.col)))
    } else {
        false
    }
}

/// One-turn link from `from` to `to` through `corner`
fn corner_links(board: &Board, from: Position, corner: Position, to: Position) -> bool {
    board.is_empty_at(corner)
        && is_line_clear(board, from, corner)
        && is_line_clear(board, corner, to)
}

fn path_of(points: &[Position]) -> Path {
    points.iter().copied().collect()
}

/// Try to connect `a` and `b`.
///
/// Returns the connecting path, or `None` if either cell is empty, the types
/// differ, or no path with at most two turns exists.
pub fn connect(board: &Board, a: Position, b: Position) -> Option<Path> {
    let ta = board.get(a)?;
    let tb = board.get(b)?;
    if ta == EMPTY || ta != tb || a == b {
        return None;
    }

    if is_line_clear(board, a, b) {
        return Some(path_of(&[a, b]));
    }

    for corner in [Position::new(a.row, b.col), Position::new(b.row, a.col)] {
        if corner_links(board, a, corner, b) {
            return Some(path_of(&[a, corner, b]));
        }
    }

    // Slide along a's column. The second corner keeps a's column, which is the
    // extension's column too; see the row slide below for the other branch.
    for row in 0..board.rows() {
        let ext = Position::new(row, a.col);
        if row == a.row || !board.is_empty_at(ext) || !is_line_clear(board, a, ext) {
            continue;
        }
        for corner in [Position::new(ext.row, b.col), Position::new(b.row, ext.col)] {
            if corner_links(board, ext, corner, b) {
                return Some(path_of(&[a, ext, corner, b]));
            }
        }
    }

    for col in 0..board.cols() {
        let ext = Position::new(a.row, col);
        if col == a.col || !board.is_empty_at(ext) || !is_line_clear(board, a, ext) {
            continue;
        }
        for corner in [Position::new(ext.row, b.col), Position::new(b.row, ext.col)] {
            if corner_links(board, ext, corner, b) {
                return Some(path_of(&[a, ext, corner, b]));
            }
        }
    }

    None
}

/// Number of direction changes along a path
pub fn turn_count(path: &[Position]) -> usize {
    path.len().saturating_sub(2)
}

/// Every cell a path passes through, endpoints included, in travel order.
///
/// Consecutive duplicate points (a zero-length segment) are skipped.
pub fn cells_along(path: &[Position]) -> Vec<Position> {
    let mut out: Vec<Position> = Vec::new();
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if out.last() != Some(&from) {
            out.push(from);
        }
        if from.row == to.row {
            let step: isize = if to.col >= from.col { 1 } else { -1 };
            let mut col = from.col as isize;
            while col != to.col as isize {
                col += step;
                out.push(Position::new(from.row, col as usize));
            }
        } else {
            let step: isize = if to.row >= from.row { 1 } else { -1 };
            let mut row = from.row as isize;
            while row != to.row as isize {
                row += step;
                out.push(Position::new(row as usize, from.col));
            }
        }
    }
    out.dedup();
    out
}
