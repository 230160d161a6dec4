// ui/genetic.rs - Traveling-salesman genetic algorithm panel

use std::time::Duration;

use egui::{Color32, Pos2, Sense, Shape, Stroke, Vec2};
use portfolio_sims::genetic::{self, Evolution};
use portfolio_sims::Simulation;

use super::{Runner, run_label};
use crate::settings::Language;

/// One generation per frame.
const FRAME_INTERVAL: Duration = Duration::ZERO;

pub struct GeneticDemo {
    runner: Runner<Evolution>,
    show_best_ever: bool,
}

impl Default for GeneticDemo {
    fn default() -> Self {
        Self {
            runner: Runner::running(Evolution::new(), FRAME_INTERVAL),
            show_best_ever: false,
        }
    }
}

impl GeneticDemo {
    pub fn show(&mut self, ui: &mut egui::Ui, lang: Language) {
        self.runner.advance(ui.ctx());

        ui.heading(lang.pick(
            "Voyageur de Commerce (Algorithme Génétique)",
            "Traveling Salesman (Genetic Algorithm)",
        ));
        ui.label(lang.pick(
            "Une population de trajets évolue par croisement et mutation pour minimiser la distance totale.",
            "A population of paths evolves through crossover and mutation to minimise the total distance.",
        ));

        let sim = &self.runner.sim;
        if let Some(best) = sim.best() {
            let ever = sim.best_ever().map_or(best.length, |b| b.length);
            ui.label(format!(
                "{}: {} | Distance: {:.0} | {}: {:.0}",
                lang.pick("Génération", "Generation"),
                sim.generation(),
                best.length,
                lang.pick("Meilleur absolu", "Best ever"),
                ever,
            ));
        }

        ui.horizontal(|ui| {
            if ui.button(run_label(self.runner.is_running(), lang)).clicked() {
                self.runner.toggle();
            }
            if ui.button(lang.pick("🔄 Nouvelles villes", "🔄 New cities")).clicked() {
                self.runner.sim.reset();
                self.runner.start();
            }
            ui.separator();
            ui.add(
                egui::Slider::new(&mut self.runner.sim.params.mutation_rate, 0.0..=0.5)
                    .text(lang.pick("mutation", "mutation rate")),
            );
            ui.checkbox(&mut self.show_best_ever, lang.pick("Meilleur absolu", "Best ever"));
        });

        ui.separator();
        self.draw_canvas(ui);
    }

    fn draw_canvas(&self, ui: &mut egui::Ui) {
        let size = Vec2::new(genetic::FIELD_WIDTH as f32, genetic::FIELD_HEIGHT as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min;
        painter.rect_filled(response.rect, 4.0, Color32::from_rgb(15, 23, 42));

        let sim = &self.runner.sim;
        let to_screen = |i: usize| {
            let city = sim.cities()[i];
            origin + Vec2::new(city.x as f32, city.y as f32)
        };

        for i in 0..sim.cities().len() {
            painter.circle_filled(to_screen(i), 6.0, Color32::from_rgb(148, 163, 184));
        }

        let shown = if self.show_best_ever { sim.best_ever() } else { sim.best() };
        if let Some(best) = shown {
            let points: Vec<Pos2> = best.tour.iter().map(|&i| to_screen(i)).collect();
            painter.add(Shape::line(points, Stroke::new(2.0, Color32::from_rgb(129, 140, 248))));
        }
    }
}
