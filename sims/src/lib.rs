//! Tick-driven simulations behind the interactive demos: Game of Life, Snake,
//! a perceptron classifier, a genetic traveling-salesman solver and an image
//! convolution lab.
//!
//! Nothing here depends on a GUI. Randomized state is seeded through
//! `with_seed` constructors so runs can be replayed.

pub mod convolution;
pub mod error;
pub mod genetic;
pub mod grid;
pub mod life;
pub mod patterns;
pub mod perceptron;
pub mod snake;
pub mod ticker;

pub use error::SimError;
pub use ticker::Ticker;

/// A simulation advanced one discrete step per timer tick.
pub trait Simulation {
    fn tick(&mut self);

    /// Returns to a fresh initial state.
    fn reset(&mut self);

    /// Steps taken since the last reset.
    fn generation(&self) -> u64;
}
