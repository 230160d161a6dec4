// ui/mod.rs - Demo panels and the shared step runner

use std::time::{Duration, Instant};

use portfolio_sims::{Simulation, Ticker};

pub mod genetic;
pub mod image_lab;
pub mod life;
pub mod perceptron;
pub mod snake;

/// A simulation paired with the ticker that paces it.
pub struct Runner<S: Simulation> {
    pub sim: S,
    pub ticker: Ticker,
}

impl<S: Simulation> Runner<S> {
    pub fn new(sim: S, interval: Duration) -> Self {
        Self { sim, ticker: Ticker::new(interval) }
    }

    /// Starts immediately, for demos that animate as soon as they are shown.
    pub fn running(sim: S, interval: Duration) -> Self {
        let mut runner = Self::new(sim, interval);
        runner.ticker.start(Instant::now());
        runner
    }

    /// Steps once if the interval has elapsed and schedules the next repaint.
    /// Returns whether a step ran.
    pub fn advance(&mut self, ctx: &egui::Context) -> bool {
        let now = Instant::now();
        let stepped = self.ticker.due(now);
        if stepped {
            self.sim.tick();
        }
        if let Some(wait) = self.ticker.until_next(now) {
            ctx.request_repaint_after(wait);
        }
        stepped
    }

    pub fn toggle(&mut self) {
        self.ticker.toggle(Instant::now());
    }

    pub fn start(&mut self) {
        self.ticker.start(Instant::now());
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Speed slider in steps per second, bounded by `range`.
    pub fn speed_slider(&mut self, ui: &mut egui::Ui, range: std::ops::RangeInclusive<f32>, suffix: &str) {
        let mut speed = 1000.0 / self.ticker.interval().as_millis().max(1) as f32;
        if ui.add(egui::Slider::new(&mut speed, range).suffix(suffix)).changed() {
            self.ticker.set_interval(Duration::from_millis((1000.0 / speed) as u64));
        }
    }
}

/// Play/pause button label.
pub fn run_label(running: bool, lang: crate::settings::Language) -> &'static str {
    if running {
        lang.pick("⏸ Pause", "⏸ Pause")
    } else {
        lang.pick("▶ Démarrer", "▶ Start")
    }
}
