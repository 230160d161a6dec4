// genetic.rs - Genetic algorithm for an open traveling-salesman path

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::Simulation;

pub const POPULATION_SIZE: usize = 100;
pub const MUTATION_RATE: f64 = 0.05;
pub const CITY_COUNT: usize = 15;

// Playing field the cities are scattered over
pub const FIELD_WIDTH: f64 = 600.0;
pub const FIELD_HEIGHT: f64 = 400.0;
const FIELD_MARGIN: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Visiting order, as indices into the city list.
pub type Tour = Vec<usize>;

/// Length of the path through `tour`, without a return leg.
pub fn path_length(tour: &[usize], cities: &[Point]) -> f64 {
    tour.windows(2)
        .map(|pair| cities[pair[0]].distance(cities[pair[1]]))
        .sum()
}

/// Higher is better; the `+ 1` keeps a zero-length path finite.
pub fn fitness(length: f64) -> f64 {
    1.0 / (length + 1.0)
}

/// `a[start..end]` followed by the cities of `b` not in that slice, in `b`'s order.
pub fn ordered_crossover(a: &[usize], b: &[usize], start: usize, end: usize) -> Tour {
    let end = end.min(a.len());
    let start = start.min(end);
    let slice = &a[start..end];

    let mut taken = vec![false; a.len().max(b.len())];
    for &city in slice {
        taken[city] = true;
    }

    let mut child = Vec::with_capacity(a.len());
    child.extend_from_slice(slice);
    child.extend(b.iter().copied().filter(|&city| !taken[city]));
    child
}

pub fn swap_mutation(tour: &mut [usize], i: usize, j: usize) {
    if i < tour.len() && j < tour.len() {
        tour.swap(i, j);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scored {
    pub tour: Tour,
    pub length: f64,
    pub fitness: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct EvolutionParams {
    pub population_size: usize,
    pub mutation_rate: f64,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            mutation_rate: MUTATION_RATE,
        }
    }
}

pub struct Evolution {
    cities: Vec<Point>,
    population: Vec<Tour>,
    generation: u64,
    best: Option<Scored>,
    best_ever: Option<Scored>,
    pub params: EvolutionParams,
    rng: StdRng,
}

impl Evolution {
    pub fn new() -> Self {
        Self::build(StdRng::from_entropy(), EvolutionParams::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::build(StdRng::seed_from_u64(seed), EvolutionParams::default())
    }

    pub fn with_params(seed: u64, params: EvolutionParams) -> Self {
        Self::build(StdRng::seed_from_u64(seed), params)
    }

    fn build(rng: StdRng, params: EvolutionParams) -> Self {
        let mut evolution = Self {
            cities: Vec::new(),
            population: Vec::new(),
            generation: 0,
            best: None,
            best_ever: None,
            params,
            rng,
        };
        evolution.reset_cities(CITY_COUNT);
        evolution
    }

    /// Scatters `count` new cities over the field and seeds a population of
    /// random shuffles.
    pub fn reset_cities(&mut self, count: usize) {
        let cities: Vec<Point> = (0..count)
            .map(|_| Point {
                x: self.rng.gen_range(FIELD_MARGIN..FIELD_WIDTH - FIELD_MARGIN),
                y: self.rng.gen_range(FIELD_MARGIN..FIELD_HEIGHT - FIELD_MARGIN),
            })
            .collect();
        self.set_cities(cities);
    }

    /// Uses a fixed city set and seeds a population of random shuffles.
    pub fn set_cities(&mut self, cities: Vec<Point>) {
        self.cities = cities;
        let base: Tour = (0..self.cities.len()).collect();
        self.population = (0..self.params.population_size)
            .map(|_| {
                let mut tour = base.clone();
                tour.shuffle(&mut self.rng);
                tour
            })
            .collect();
        self.generation = 0;
        self.best = None;
        self.best_ever = None;
    }

    pub fn cities(&self) -> &[Point] {
        &self.cities
    }

    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Fittest member of the last evaluated population.
    pub fn best(&self) -> Option<&Scored> {
        self.best.as_ref()
    }

    /// Shortest tour seen since the cities were placed.
    pub fn best_ever(&self) -> Option<&Scored> {
        self.best_ever.as_ref()
    }

    /// Scores the current population, records the best, then replaces the
    /// whole population with children of fitness-weighted parents.
    pub fn step(&mut self) {
        if self.population.is_empty() {
            return;
        }

        let lengths: Vec<f64> = self
            .population
            .iter()
            .map(|tour| path_length(tour, &self.cities))
            .collect();
        let fitnesses: Vec<f64> = lengths.iter().map(|&len| fitness(len)).collect();

        let (best_idx, _) = fitnesses
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &f)| if f > acc.1 { (i, f) } else { acc });
        let best = Scored {
            tour: self.population[best_idx].clone(),
            length: lengths[best_idx],
            fitness: fitnesses[best_idx],
        };
        if self.best_ever.as_ref().is_none_or(|b| best.length < b.length) {
            self.best_ever = Some(best.clone());
        }
        self.best = Some(best);

        let picker = match WeightedIndex::new(&fitnesses) {
            Ok(picker) => picker,
            Err(err) => {
                warn!(%err, "cannot weight population for selection");
                return;
            }
        };

        let size = self.params.population_size;
        let mut next = Vec::with_capacity(size);
        for _ in 0..size {
            let parent_a = &self.population[picker.sample(&mut self.rng)];
            let parent_b = &self.population[picker.sample(&mut self.rng)];

            let n = parent_a.len();
            let (start, end) = if n == 0 {
                (0, 0)
            } else {
                let start = self.rng.gen_range(0..n);
                (start, self.rng.gen_range(start..n))
            };
            let mut child = ordered_crossover(parent_a, parent_b, start, end);

            if n > 0 && self.rng.gen_bool(self.params.mutation_rate.clamp(0.0, 1.0)) {
                let i = self.rng.gen_range(0..n);
                let j = self.rng.gen_range(0..n);
                swap_mutation(&mut child, i, j);
            }
            next.push(child);
        }

        self.population = next;
        self.generation += 1;
    }
}

impl Default for Evolution {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Evolution {
    fn tick(&mut self) {
        self.step();
    }

    fn reset(&mut self) {
        self.reset_cities(CITY_COUNT);
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
