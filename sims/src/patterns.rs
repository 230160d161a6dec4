// patterns.rs - Named seed patterns for the cellular automaton

use crate::grid::Grid;

/// A seed shape, as live-cell offsets from its own top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Lightweight spaceship",
        cells: &[(0, 1), (0, 4), (1, 0), (2, 0), (2, 4), (3, 0), (3, 1), (3, 2), (3, 3)],
    },
];

impl Pattern {
    /// Bounding box as `(height, width)`.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }
}

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Clears the grid and stamps `pattern` in the middle of it.
/// Cells that land off the board are dropped.
pub fn apply_pattern(grid: &mut Grid, pattern: &Pattern) {
    grid.clear();

    let (height, width) = pattern.extent();
    let top = grid.rows().saturating_sub(height) / 2;
    let left = grid.cols().saturating_sub(width) / 2;

    for &(row, col) in pattern.cells {
        grid.set(top + row, left + col, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_centred() {
        let mut grid = Grid::empty(5, 5);
        apply_pattern(&mut grid, find("blinker").unwrap());
        assert!(grid.get(2, 1) && grid.get(2, 2) && grid.get(2, 3));
        assert_eq!(grid.live_count(), 3);
    }

    #[test]
    fn oversized_pattern_is_clipped() {
        let mut grid = Grid::empty(6, 6);
        let pulsar = find("Pulsar").unwrap();
        apply_pattern(&mut grid, pulsar);
        assert!(grid.live_count() < pulsar.cells.len());
        assert!(grid.live_count() > 0);
    }

    #[test]
    fn extents_match_shapes() {
        assert_eq!(find("Pulsar").unwrap().extent(), (13, 13));
        assert_eq!(find("Glider").unwrap().extent(), (3, 3));
    }
}
