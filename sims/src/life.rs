// life.rs - Conway's Game of Life on a bounded grid

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::Simulation;
use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS, Grid};
use crate::patterns::{self, Pattern};

pub const STEP_INTERVAL: Duration = Duration::from_millis(100);
const HISTORY_LEN: usize = 10;

#[derive(Clone, Copy, Debug)]
pub struct LifeParams {
    /// Chance of a cell starting alive when randomizing.
    pub alive_probability: f64,
    /// Report when the board returns to one of the last few states.
    pub detect_repeats: bool,
}

impl Default for LifeParams {
    fn default() -> Self {
        Self {
            alive_probability: 0.3,
            detect_repeats: false,
        }
    }
}

/// Next state of one cell from its current state and live-neighbour count.
pub fn next_state(alive: bool, neighbours: usize) -> bool {
    match (alive, neighbours) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3)            => true, // Birth
        _                     => false, // Death or stays dead
    }
}

/// Computes the following generation of `grid` without touching it.
pub fn next_generation(grid: &Grid) -> Grid {
    let mut next = Grid::empty(grid.rows(), grid.cols());
    write_next_generation(grid, &mut next);
    next
}

fn write_next_generation(current: &Grid, next: &mut Grid) {
    for row in 0..current.rows() {
        for col in 0..current.cols() {
            let alive = next_state(current.get(row, col), current.live_neighbours(row, col));
            next.set(row, col, alive);
        }
    }
}

pub struct Life {
    current: Grid,
    next: Grid,
    generation: u64,
    pub params: LifeParams,
    history: [u64; HISTORY_LEN],
    history_count: usize,
    repeated: bool,
    rng: StdRng,
}

impl Life {
    /// Randomly seeded 30x30 board.
    pub fn new() -> Self {
        Self::build(DEFAULT_ROWS, DEFAULT_COLS, StdRng::from_entropy())
    }

    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Self {
        Self::build(rows, cols, StdRng::seed_from_u64(seed))
    }

    /// Starts from an explicit board instead of a random one.
    pub fn from_grid(grid: Grid) -> Self {
        let next = Grid::empty(grid.rows(), grid.cols());
        Self {
            current: grid,
            next,
            generation: 0,
            params: LifeParams::default(),
            history: [0; HISTORY_LEN],
            history_count: 0,
            repeated: false,
            rng: StdRng::from_entropy(),
        }
    }

    fn build(rows: usize, cols: usize, rng: StdRng) -> Self {
        let mut life = Self {
            current: Grid::empty(rows, cols),
            next: Grid::empty(rows, cols),
            generation: 0,
            params: LifeParams::default(),
            history: [0; HISTORY_LEN],
            history_count: 0,
            repeated: false,
            rng,
        };
        life.randomize();
        life
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn live_count(&self) -> usize {
        self.current.live_count()
    }

    /// Whether the last step produced a recently seen board.
    pub fn repeated(&self) -> bool {
        self.repeated
    }

    /// Advances one generation. Returns true when repeat detection is on and
    /// the new board matches one of the last ten.
    pub fn step(&mut self) -> bool {
        write_next_generation(&self.current, &mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;

        self.repeated = self.params.detect_repeats && self.check_for_repeat();
        if self.repeated {
            debug!(generation = self.generation, "board repeated a recent state");
        }
        self.repeated
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        self.current.toggle(row, col);
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.restart_history();
    }

    pub fn randomize(&mut self) {
        let p = self.params.alive_probability.clamp(0.0, 1.0);
        for row in 0..self.current.rows() {
            for col in 0..self.current.cols() {
                let alive = self.rng.gen_bool(p);
                self.current.set(row, col, alive);
            }
        }
        self.restart_history();
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        patterns::apply_pattern(&mut self.current, pattern);
        self.restart_history();
    }

    fn check_for_repeat(&mut self) -> bool {
        let hash = self.current.fingerprint();
        let seen = self.history[..self.history_count.min(HISTORY_LEN)].contains(&hash);
        self.history[self.history_count % HISTORY_LEN] = hash;
        self.history_count += 1;
        seen
    }

    fn restart_history(&mut self) {
        self.generation = 0;
        self.history = [0; HISTORY_LEN];
        self.history_count = 0;
        self.repeated = false;
    }
}

impl Default for Life {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Life {
    fn tick(&mut self) {
        self.step();
    }

    fn reset(&mut self) {
        self.randomize();
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn blinker_oscillates() {
        let horizontal = Grid::from_rows(&[
            &[0, 0, 0],
            &[1, 1, 1],
            &[0, 0, 0],
        ]);
        let vertical = Grid::from_rows(&[
            &[0, 1, 0],
            &[0, 1, 0],
            &[0, 1, 0],
        ]);
        assert_eq!(next_generation(&horizontal), vertical);
        assert_eq!(next_generation(&vertical), horizontal);
    }

    #[test]
    fn block_is_still_life() {
        let block = Grid::from_rows(&[
            &[0, 0, 0, 0],
            &[0, 1, 1, 0],
            &[0, 1, 1, 0],
            &[0, 0, 0, 0],
        ]);
        let mut life = Life::from_grid(block.clone());
        life.step();
        life.step();
        assert_eq!(life.grid(), &block);
        assert_eq!(life.generation(), 2);
    }

    #[test]
    fn edges_do_not_wrap() {
        // A toroidal board would keep this corner block alive via wrap-around births.
        let grid = Grid::from_rows(&[
            &[1, 0, 0, 1],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[1, 0, 0, 1],
        ]);
        assert_eq!(next_generation(&grid).live_count(), 0);
    }

    #[test]
    fn repeat_detection_reports_oscillators() {
        let mut life = Life::from_grid(Grid::from_rows(&[
            &[0, 0, 0],
            &[1, 1, 1],
            &[0, 0, 0],
        ]));
        life.params.detect_repeats = true;
        assert!(!life.step());
        assert!(!life.step());
        assert!(life.step());
    }

    #[test]
    fn repeats_ignored_unless_enabled() {
        let mut life = Life::from_grid(Grid::from_rows(&[&[1, 1, 1]]));
        for _ in 0..5 {
            assert!(!life.step());
        }
    }

    #[test]
    fn toggle_and_clear() {
        let mut life = Life::with_seed(8, 8, 7);
        life.clear();
        assert_eq!(life.live_count(), 0);
        life.toggle(3, 4);
        assert!(life.grid().get(3, 4));
        life.toggle(3, 4);
        assert!(!life.grid().get(3, 4));
    }

    #[test]
    fn seeded_randomize_is_reproducible() {
        let a = Life::with_seed(20, 20, 99);
        let b = Life::with_seed(20, 20, 99);
        assert_eq!(a.grid(), b.grid());
        assert!(a.live_count() > 0);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| {
            proptest::collection::vec(any::<bool>(), rows * cols).prop_map(move |cells| {
                let mut grid = Grid::empty(rows, cols);
                for (i, alive) in cells.into_iter().enumerate() {
                    grid.set(i / cols, i % cols, alive);
                }
                grid
            })
        })
    }

    proptest! {
        #[test]
        fn every_cell_follows_the_rules(grid in arb_grid()) {
            let next = next_generation(&grid);
            prop_assert_eq!(next.rows(), grid.rows());
            prop_assert_eq!(next.cols(), grid.cols());
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    let n = grid.live_neighbours(row, col);
                    let expected = if grid.get(row, col) { n == 2 || n == 3 } else { n == 3 };
                    prop_assert_eq!(next.get(row, col), expected);
                }
            }
        }
    }
}
