// perceptron.rs - Two-input perceptron trained on labelled points

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Simulation;

pub const LEARNING_RATE: f64 = 0.05;
pub const STEP_INTERVAL: Duration = Duration::from_millis(50);
pub const INITIAL_POINTS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    pub fn value(self) -> f64 {
        match self {
            Label::Positive => 1.0,
            Label::Negative => -1.0,
        }
    }
}

/// A point in `[-1, 1]²` with its class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabeledPoint {
    pub x: f64,
    pub y: f64,
    pub label: Label,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Perceptron {
    pub weights: [f64; 2],
    pub bias: f64,
    pub learning_rate: f64,
}

impl Perceptron {
    pub fn new(weights: [f64; 2], bias: f64) -> Self {
        Self { weights, bias, learning_rate: LEARNING_RATE }
    }

    /// Weights and bias drawn uniformly from `[-1, 1]`.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(
            [rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)],
            rng.gen_range(-1.0..=1.0),
        )
    }

    pub fn weighted_sum(&self, inputs: [f64; 2]) -> f64 {
        self.bias + inputs[0] * self.weights[0] + inputs[1] * self.weights[1]
    }

    pub fn predict(&self, inputs: [f64; 2]) -> Label {
        if self.weighted_sum(inputs) >= 0.0 {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    /// One update: `w += rate * (target - guess) * input`, same for the bias
    /// with an input of 1. Correct guesses leave the model unchanged.
    pub fn train(&mut self, inputs: [f64; 2], target: Label) {
        let error = target.value() - self.predict(inputs).value();
        for (w, input) in self.weights.iter_mut().zip(inputs) {
            *w += self.learning_rate * error * input;
        }
        self.bias += self.learning_rate * error;
    }

    /// The decision line `w0*x + w1*y + b = 0` solved for `y`.
    /// `None` when the line is vertical.
    pub fn boundary_y(&self, x: f64) -> Option<f64> {
        (self.weights[1] != 0.0).then(|| -(self.weights[0] * x + self.bias) / self.weights[1])
    }
}

/// A perceptron plus the point set it trains on, one epoch per tick.
pub struct PerceptronLab {
    model: Perceptron,
    points: Vec<LabeledPoint>,
    epochs: u64,
    rng: StdRng,
}

impl PerceptronLab {
    pub fn new() -> Self {
        Self::build(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::build(StdRng::seed_from_u64(seed))
    }

    fn build(mut rng: StdRng) -> Self {
        let model = Perceptron::random(&mut rng);
        let mut lab = Self { model, points: Vec::new(), epochs: 0, rng };
        lab.add_random_points(INITIAL_POINTS);
        lab
    }

    pub fn model(&self) -> &Perceptron {
        &self.model
    }

    pub fn points(&self) -> &[LabeledPoint] {
        &self.points
    }

    pub fn add_point(&mut self, x: f64, y: f64, label: Label) {
        self.points.push(LabeledPoint { x, y, label });
    }

    /// Uniform positions with coin-flip labels, so the set is usually not separable.
    pub fn add_random_points(&mut self, count: usize) {
        for _ in 0..count {
            let x = self.rng.gen_range(-1.0..=1.0);
            let y = self.rng.gen_range(-1.0..=1.0);
            let label = if self.rng.gen_bool(0.5) { Label::Positive } else { Label::Negative };
            self.add_point(x, y, label);
        }
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    /// One pass over every point in insertion order.
    pub fn train_epoch(&mut self) {
        for p in &self.points {
            self.model.train([p.x, p.y], p.label);
        }
        self.epochs += 1;
    }

    pub fn is_correct(&self, point: &LabeledPoint) -> bool {
        self.model.predict([point.x, point.y]) == point.label
    }

    /// Fraction of points classified correctly; 1.0 for an empty set.
    pub fn accuracy(&self) -> f64 {
        if self.points.is_empty() {
            return 1.0;
        }
        let correct = self.points.iter().filter(|p| self.is_correct(p)).count();
        correct as f64 / self.points.len() as f64
    }
}

impl Default for PerceptronLab {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for PerceptronLab {
    fn tick(&mut self) {
        self.train_epoch();
    }

    fn reset(&mut self) {
        self.model = Perceptron::random(&mut self.rng);
        self.clear_points();
        self.add_random_points(INITIAL_POINTS);
        self.epochs = 0;
    }

    fn generation(&self) -> u64 {
        self.epochs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_rule_moves_weights_toward_target() {
        let mut p = Perceptron::new([0.0, 0.0], -0.5);
        assert_eq!(p.predict([1.0, 1.0]), Label::Negative);

        p.train([1.0, 0.5], Label::Positive);
        // error = 2, rate = 0.05
        assert!((p.weights[0] - 0.1).abs() < 1e-12);
        assert!((p.weights[1] - 0.05).abs() < 1e-12);
        assert!((p.bias - -0.4).abs() < 1e-12);

        // Still wrong for (1, 1), so a second update follows.
        let before = p.clone();
        p.train([1.0, 1.0], Label::Positive);
        assert_ne!(p, before);
    }

    #[test]
    fn correct_guess_leaves_model_alone() {
        let mut p = Perceptron::new([1.0, 1.0], 0.0);
        let before = p.clone();
        p.train([0.5, 0.5], Label::Positive);
        assert_eq!(p, before);
    }

    #[test]
    fn zero_sum_predicts_positive() {
        let p = Perceptron::new([0.0, 0.0], 0.0);
        assert_eq!(p.predict([0.3, -0.7]), Label::Positive);
    }

    #[test]
    fn boundary_line() {
        let p = Perceptron::new([1.0, 2.0], 0.5);
        assert_eq!(p.boundary_y(1.5), Some(-1.0));
        assert_eq!(Perceptron::new([1.0, 0.0], 0.0).boundary_y(0.0), None);
    }

    #[test]
    fn separable_data_converges() {
        let mut lab = PerceptronLab::with_seed(11);
        lab.clear_points();

        // Points above or below the line y = x, keeping a margin around it.
        let mut rng = StdRng::seed_from_u64(12);
        while lab.points().len() < 60 {
            let x: f64 = rng.gen_range(-1.0..=1.0);
            let y: f64 = rng.gen_range(-1.0..=1.0);
            if (y - x).abs() < 0.2 {
                continue;
            }
            let label = if y > x { Label::Positive } else { Label::Negative };
            lab.add_point(x, y, label);
        }

        let mut passes = 0;
        while lab.accuracy() < 1.0 && passes < 5000 {
            lab.tick();
            passes += 1;
        }
        assert_eq!(lab.accuracy(), 1.0);
        assert_eq!(lab.generation(), passes);
    }

    #[test]
    fn reset_restores_initial_points() {
        let mut lab = PerceptronLab::with_seed(3);
        lab.add_random_points(10);
        lab.tick();
        assert_eq!(lab.points().len(), 30);

        lab.reset();
        assert_eq!(lab.points().len(), INITIAL_POINTS);
        assert_eq!(lab.generation(), 0);
        assert_eq!(PerceptronLab::with_seed(3).points(), PerceptronLab::with_seed(3).points());
    }
}
