// snake.rs - Snake on a bounded board

use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::Simulation;

pub const BOARD_ROWS: i32 = 20;
pub const BOARD_COLS: i32 = 20;
pub const STEP_INTERVAL: Duration = Duration::from_millis(150);

const START_FOOD: Cell = Cell { row: 5, col: 5 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    fn offset(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self::new(self.row + dr, self.col + dc)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(row, col)` step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (-1, 0),
            Direction::Down  => (1, 0),
            Direction::Left  => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Waiting for the first start.
    Ready,
    Playing,
    GameOver,
    /// Every cell is covered by the snake.
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Crashed(Collision),
    /// Nothing happened because the game is not in play.
    Idle,
}

pub struct Snake {
    rows: i32,
    cols: i32,
    /// Tail at the front, head at the back.
    body: VecDeque<Cell>,
    /// Direction of the last move actually taken.
    heading: Direction,
    /// Direction the next move will take.
    pending: Direction,
    food: Cell,
    score: u32,
    moves: u64,
    status: Status,
    rng: StdRng,
}

impl Snake {
    pub fn new() -> Self {
        Self::build(BOARD_ROWS, BOARD_COLS, StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::build(BOARD_ROWS, BOARD_COLS, StdRng::seed_from_u64(seed))
    }

    pub fn with_board(rows: i32, cols: i32, seed: u64) -> Self {
        Self::build(rows.max(1), cols.max(1), StdRng::seed_from_u64(seed))
    }

    fn build(rows: i32, cols: i32, rng: StdRng) -> Self {
        let start = Cell::new(rows / 2, cols / 2);
        let mut snake = Self {
            rows,
            cols,
            body: VecDeque::from([start]),
            heading: Direction::Right,
            pending: Direction::Right,
            food: START_FOOD,
            score: 0,
            moves: 0,
            status: Status::Ready,
            rng,
        };
        if !snake.in_bounds(START_FOOD) || start == START_FOOD {
            snake.food = snake.free_cell().unwrap_or(start);
        }
        snake
    }

    /// Centre of the board, where every run begins.
    fn start(&self) -> Cell {
        Cell::new(self.rows / 2, self.cols / 2)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body.back().copied().unwrap_or_else(|| self.start())
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.pending
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Puts the snake back at the start, heading right, with fresh food, and starts play.
    pub fn restart(&mut self) {
        self.body = VecDeque::from([self.start()]);
        self.heading = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.moves = 0;
        match self.free_cell() {
            Some(cell) => {
                self.food = cell;
                self.status = Status::Playing;
                info!("snake game started");
            }
            // A one-cell board is already full
            None => {
                self.food = self.start();
                self.status = Status::Won;
            }
        }
    }

    /// Requests a new direction. A 180 degree turn relative to the last move
    /// is refused and returns false.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if dir == self.heading.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Places food at an explicit cell.
    pub fn set_food(&mut self, cell: Cell) {
        self.food = cell;
    }

    pub fn step(&mut self) -> StepOutcome {
        if self.status != Status::Playing {
            return StepOutcome::Idle;
        }

        let new_head = self.head().offset(self.pending);

        if !self.in_bounds(new_head) {
            return self.crash(Collision::Wall);
        }
        if self.body.contains(&new_head) {
            return self.crash(Collision::Body);
        }

        self.heading = self.pending;
        self.moves += 1;
        self.body.push_back(new_head);

        if new_head == self.food {
            self.score += 1;
            match self.free_cell() {
                Some(cell) => self.food = cell,
                None => {
                    info!(score = self.score, "snake filled the board");
                    self.status = Status::Won;
                }
            }
            StepOutcome::Ate
        } else {
            self.body.pop_front();
            StepOutcome::Moved
        }
    }

    fn crash(&mut self, collision: Collision) -> StepOutcome {
        info!(score = self.score, ?collision, "snake game over");
        self.status = Status::GameOver;
        StepOutcome::Crashed(collision)
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.rows).contains(&cell.row) && (0..self.cols).contains(&cell.col)
    }

    /// Uniform pick among the cells the body does not cover.
    fn free_cell(&mut self) -> Option<Cell> {
        let free: Vec<Cell> = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| Cell::new(row, col)))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Snake {
    fn tick(&mut self) {
        self.step();
    }

    fn reset(&mut self) {
        self.restart();
    }

    fn generation(&self) -> u64 {
        self.moves
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn playing(seed: u64) -> Snake {
        let mut snake = Snake::with_seed(seed);
        snake.restart();
        snake.set_food(Cell::new(0, 0));
        snake
    }

    #[test]
    fn head_moves_by_direction() {
        let mut snake = playing(1);
        assert_eq!(snake.head(), Cell::new(10, 10));
        assert_eq!(snake.step(), StepOutcome::Moved);
        assert_eq!(snake.head(), Cell::new(10, 11));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn eating_grows_by_one_without_removing_the_tail() {
        let mut snake = playing(2);
        snake.set_food(Cell::new(10, 11));
        assert_eq!(snake.step(), StepOutcome::Ate);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.score(), 1);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), [Cell::new(10, 10), Cell::new(10, 11)]);
        assert!(!snake.occupies(snake.food()));

        snake.set_food(Cell::new(0, 0));
        snake.step();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Cell::new(10, 12));
    }

    #[test]
    fn reversal_is_refused() {
        let mut snake = playing(3);
        assert!(!snake.turn(Direction::Left));
        assert!(snake.turn(Direction::Up));
        // Still heading right until the next step, so Left stays refused.
        assert!(!snake.turn(Direction::Left));
        snake.step();
        assert!(snake.turn(Direction::Left));
    }

    #[test]
    fn wall_ends_the_run() {
        let mut snake = playing(4);
        let mut outcome = StepOutcome::Moved;
        for _ in 0..20 {
            outcome = snake.step();
            if outcome != StepOutcome::Moved {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::Crashed(Collision::Wall));
        assert_eq!(snake.status(), Status::GameOver);
        assert_eq!(snake.head(), Cell::new(10, 19));
        assert_eq!(snake.step(), StepOutcome::Idle);
    }

    #[test]
    fn running_into_the_body_ends_the_run() {
        let mut snake = playing(5);
        // Grow to length 5 heading right.
        for col in 11..15 {
            snake.set_food(Cell::new(10, col));
            assert_eq!(snake.step(), StepOutcome::Ate);
        }
        snake.set_food(Cell::new(0, 0));
        assert!(snake.turn(Direction::Down));
        snake.step();
        assert!(snake.turn(Direction::Left));
        snake.step();
        assert!(snake.turn(Direction::Up));
        assert_eq!(snake.step(), StepOutcome::Crashed(Collision::Body));
    }

    #[test]
    fn idle_until_started() {
        let mut snake = Snake::with_seed(6);
        assert_eq!(snake.status(), Status::Ready);
        assert_eq!(snake.step(), StepOutcome::Idle);
        assert_eq!(snake.food(), Cell::new(5, 5));
    }

    #[test]
    fn filling_the_board_wins() {
        let mut snake = Snake::with_board(1, 2, 7);
        snake.restart();
        assert_eq!(snake.head(), Cell::new(0, 1));
        assert!(!snake.turn(Direction::Left));
        assert_eq!(snake.food(), Cell::new(0, 0));

        let mut snake = Snake::with_board(2, 2, 7);
        snake.restart();
        assert_eq!(snake.head(), Cell::new(1, 1));
        let mut outcomes = Vec::new();
        for dir in [Direction::Up, Direction::Left, Direction::Down] {
            let food = snake.head().offset(dir);
            snake.set_food(food);
            assert!(snake.turn(dir));
            outcomes.push(snake.step());
        }
        assert_eq!(outcomes, [StepOutcome::Ate; 3]);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.status(), Status::Won);
    }

    #[test]
    fn one_cell_board_is_won_at_once() {
        let mut snake = Snake::with_board(1, 1, 3);
        snake.restart();
        assert_eq!(snake.status(), Status::Won);
        assert_eq!(snake.food(), Cell::new(0, 0));
        assert_eq!(snake.step(), StepOutcome::Idle);
    }

    #[test]
    fn food_lands_on_the_only_free_cell() {
        for seed in 0..32 {
            let mut snake = Snake::with_board(1, 3, seed);
            snake.restart();
            assert_eq!(snake.head(), Cell::new(0, 1));
            snake.set_food(Cell::new(0, 2));
            assert_eq!(snake.step(), StepOutcome::Ate);
            assert_eq!(snake.food(), Cell::new(0, 0));
            assert_eq!(snake.status(), Status::Playing);
        }
    }

    #[test]
    fn food_spreads_over_every_free_cell() {
        let mut seen = HashSet::new();
        for seed in 0..64 {
            let mut snake = Snake::with_board(1, 3, seed);
            snake.restart();
            assert!(!snake.occupies(snake.food()));
            seen.insert(snake.food());
        }
        assert_eq!(seen, HashSet::from([Cell::new(0, 0), Cell::new(0, 2)]));
    }
}
