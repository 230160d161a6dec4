// grid.rs - Binary cell grid for the cellular automaton

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::SimError;

// Default board size
pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLS: usize = 30;

/// Offsets of the 8 neighbours around a cell.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Fixed-size `rows x cols` board of live/dead cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Grid {
    /// All-dead grid. A zero dimension yields an empty board.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![false; rows * cols] }
    }

    pub fn try_new(rows: usize, cols: usize) -> Result<Self, SimError> {
        if rows == 0 || cols == 0 {
            return Err(SimError::EmptyDimensions { width: cols, height: rows });
        }
        Ok(Self::empty(rows, cols))
    }

    /// Builds a grid from rows of 0/1 values; ragged input is padded with dead cells.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = Self::empty(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                grid.set(r, c, v != 0);
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = alive;
        }
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        if row < self.rows && col < self.cols {
            let idx = row * self.cols + col;
            self.cells[idx] = !self.cells[idx];
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Live cells among the 8 neighbours; cells past the edge do not count.
    pub fn live_neighbours(&self, row: usize, col: usize) -> usize {
        NEIGHBOURS
            .iter()
            .filter(|&&(dr, dc)| {
                match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                    (Some(r), Some(c)) => self.get(r, c),
                    _ => false,
                }
            })
            .count()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Hash of the cell contents, used for repeat detection.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_ignore_cells_past_the_edge() {
        let grid = Grid::from_rows(&[
            &[1, 1, 0],
            &[1, 0, 0],
            &[0, 0, 1],
        ]);
        assert_eq!(grid.live_neighbours(0, 0), 2);
        assert_eq!(grid.live_neighbours(1, 1), 4);
        assert_eq!(grid.live_neighbours(2, 2), 0);
    }

    #[test]
    fn out_of_range_access_is_ignored() {
        let mut grid = Grid::empty(2, 2);
        grid.set(5, 5, true);
        grid.toggle(2, 0);
        assert_eq!(grid.live_count(), 0);
        assert!(!grid.get(9, 9));
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(Grid::try_new(0, 4).is_err());
        assert!(Grid::try_new(3, 3).is_ok());
    }

    #[test]
    fn fingerprint_tracks_contents() {
        let mut a = Grid::empty(4, 4);
        let b = Grid::empty(4, 4);
        assert_eq!(a.fingerprint(), b.fingerprint());
        a.toggle(1, 2);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
