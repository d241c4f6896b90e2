//! Board module - manages the tile grid
//!
//! The board is a `rows × cols` grid where each cell is empty (`0`) or holds a tile type.
//! Uses a flat vector in row-major order for cache locality.
//! Coordinates: (row, col) with row 0 at the top. The outermost ring is always
//! empty; tiles live in the interior only.

use crate::types::{Cell, Position, EMPTY};

/// The playfield, including its empty border ring
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board. `rows` and `cols` include the border.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    /// Build a board from explicit rows (border included).
    ///
    /// Returns `None` if the rows are empty or ragged.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            cols,
            cells: rows.concat(),
        })
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of playable (non-border) cells
    pub fn interior_len(&self) -> usize {
        self.rows.saturating_sub(2) * self.cols.saturating_sub(2)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Whether `pos` lies in the playable interior
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.row >= 1 && pos.col >= 1 && pos.row + 1 < self.rows && pos.col + 1 < self.cols
    }

    /// Get cell at `pos`, `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at `pos`. Returns false if out of bounds.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Some(EMPTY)
    }

    /// In bounds and holding a tile
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(c) if c != EMPTY)
    }

    /// Interior positions in row-major order
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (rows, cols) = (self.rows, self.cols);
        (1..rows.saturating_sub(1))
            .flat_map(move |row| (1..cols.saturating_sub(1)).map(move |col| Position::new(row, col)))
    }

    /// Occupied interior cells with their types, row-major
    pub fn occupied(&self) -> Vec<(Position, Cell)> {
        self.interior_positions()
            .filter_map(|pos| match self.get(pos) {
                Some(c) if c != EMPTY => Some((pos, c)),
                _ => None,
            })
            .collect()
    }

    /// Number of tiles in the interior. Border cells never count.
    pub fn tile_count(&self) -> usize {
        self.interior_positions()
            .filter(|&pos| self.is_occupied(pos))
            .count()
    }

    /// True when the border ring holds nothing
    pub fn border_is_empty(&self) -> bool {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| Position::new(row, col)))
            .filter(|&pos| !self.is_interior(pos))
            .all(|pos| self.is_empty_at(pos))
    }

    /// Flat cell storage, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy out as nested rows (for display and tests)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols.max(1)).map(<[Cell]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(4, 5);
        assert_eq!(board.index(Position::new(0, 0)), Some(0));
        assert_eq!(board.index(Position::new(0, 4)), Some(4));
        assert_eq!(board.index(Position::new(1, 0)), Some(5));
        assert_eq!(board.index(Position::new(3, 4)), Some(19));
        assert_eq!(board.index(Position::new(4, 0)), None);
        assert_eq!(board.index(Position::new(0, 5)), None);
    }

    #[test]
    fn test_interior_positions_skip_border() {
        let board = Board::new(4, 5);
        let interior: Vec<_> = board.interior_positions().collect();
        assert_eq!(interior.len(), 6);
        assert_eq!(interior.first(), Some(&Position::new(1, 1)));
        assert_eq!(interior.last(), Some(&Position::new(2, 3)));
        assert_eq!(board.interior_len(), 6);
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = vec![vec![0, 0, 0], vec![0, 2, 0], vec![0, 0, 0]];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.to_rows(), rows);
        assert_eq!(board.tile_count(), 1);
        assert!(board.is_occupied(Position::new(1, 1)));
    }

    #[test]
    fn test_tile_count_ignores_border() {
        let board = Board::from_rows(&[
            vec![3, 0, 0],
            vec![0, 2, 0],
            vec![0, 0, 3],
        ])
        .unwrap();
        assert_eq!(board.tile_count(), 1);
        assert_eq!(board.tile_count(), board.occupied().len());
        assert!(!board.border_is_empty());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Board::from_rows(&[vec![0, 0], vec![0]]).is_none());
        assert!(Board::from_rows(&[]).is_none());
    }

    #[test]
    fn test_occupied_is_row_major() {
        let rows = vec![
            vec![0, 0, 0, 0],
            vec![0, 3, 0, 1],
            vec![0, 2, 0, 0],
            vec![0, 0, 0, 0],
        ];
        let board = Board::from_rows(&rows).unwrap();
        // (1,3) sits on the right border column of a 4-wide board and is ignored.
        assert_eq!(
            board.occupied(),
            vec![(Position::new(1, 1), 3), (Position::new(2, 1), 2)]
        );
        assert!(!board.border_is_empty());
    }
}
