// ui/perceptron.rs - Perceptron classification panel

use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};
use portfolio_sims::perceptron::{self, Label, PerceptronLab};
use portfolio_sims::Simulation;

use super::Runner;
use crate::settings::Language;

const CANVAS: Vec2 = Vec2::new(600.0, 400.0);
const RANDOM_BATCH: usize = 10;

pub struct PerceptronDemo {
    runner: Runner<PerceptronLab>,
}

impl Default for PerceptronDemo {
    fn default() -> Self {
        Self { runner: Runner::running(PerceptronLab::new(), perceptron::STEP_INTERVAL) }
    }
}

/// `[-1, 1]²` with y pointing up, mapped onto `rect`.
fn to_screen(rect: Rect, x: f64, y: f64) -> Pos2 {
    Pos2::new(
        rect.min.x + (x as f32 + 1.0) * rect.width() / 2.0,
        rect.min.y + (1.0 - y as f32) * rect.height() / 2.0,
    )
}

fn to_model(rect: Rect, pos: Pos2) -> (f64, f64) {
    let x = (pos.x - rect.min.x) / rect.width() * 2.0 - 1.0;
    let y = -((pos.y - rect.min.y) / rect.height() * 2.0 - 1.0);
    (x as f64, y as f64)
}

impl PerceptronDemo {
    pub fn show(&mut self, ui: &mut egui::Ui, lang: Language) {
        self.runner.advance(ui.ctx());

        ui.heading(lang.pick(
            "Apprentissage du Perceptron (Classification)",
            "Perceptron Learning (Classification)",
        ));
        ui.label(lang.pick(
            "Clic : point vert. Maj+Clic ou clic droit : point rouge.",
            "Click: green point. Shift+Click or right click: red point.",
        ));

        ui.horizontal(|ui| {
            if ui.button(lang.pick("🗑 Effacer", "🗑 Clear")).clicked() {
                self.runner.sim.clear_points();
            }
            if ui.button(lang.pick("🔀 Données aléatoires", "🔀 Add random data")).clicked() {
                self.runner.sim.add_random_points(RANDOM_BATCH);
            }
            ui.separator();
            ui.label(format!("Epoch: {}", self.runner.sim.generation()));
            ui.label(format!("Accuracy: {:.0}%", self.runner.sim.accuracy() * 100.0));
        });

        ui.separator();
        self.draw_canvas(ui);
    }

    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(CANVAS, Sense::click());
        let rect = response.rect;
        painter.rect_filled(rect, 4.0, Color32::from_rgb(15, 23, 42));

        let model = self.runner.sim.model();
        let line = match (model.boundary_y(-1.0), model.boundary_y(1.0)) {
            (Some(y0), Some(y1)) => Some([to_screen(rect, -1.0, y0), to_screen(rect, 1.0, y1)]),
            // Vertical boundary: w0*x + b = 0
            _ if model.weights[0] != 0.0 => {
                let x = -model.bias / model.weights[0];
                Some([to_screen(rect, x, -1.0), to_screen(rect, x, 1.0)])
            }
            _ => None,
        };
        if let Some(points) = line {
            painter.with_clip_rect(rect).line_segment(points, Stroke::new(2.0, Color32::WHITE));
        }

        for point in self.runner.sim.points() {
            let center = to_screen(rect, point.x, point.y);
            let fill = match point.label {
                Label::Positive => Color32::from_rgb(74, 222, 128),
                Label::Negative => Color32::from_rgb(248, 113, 113),
            };
            painter.circle_filled(center, 6.0, fill);
            if !self.runner.sim.is_correct(point) {
                painter.circle_stroke(center, 6.0, Stroke::new(2.0, Color32::from_rgb(251, 191, 36)));
            }
        }

        let negative = response.secondary_clicked()
            || (response.clicked() && ui.input(|i| i.modifiers.shift));
        if response.clicked() || response.secondary_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = to_model(rect, pos);
                let label = if negative { Label::Negative } else { Label::Positive };
                self.runner.sim.add_point(x, y, label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_mapping_round_trips() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), CANVAS);
        assert_eq!(to_screen(rect, -1.0, 1.0), rect.min);
        assert_eq!(to_screen(rect, 1.0, -1.0), rect.max);

        let (x, y) = to_model(rect, to_screen(rect, 0.25, -0.5));
        assert!((x - 0.25).abs() < 1e-5);
        assert!((y + 0.5).abs() < 1e-5);
    }
}
