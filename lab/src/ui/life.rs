// ui/life.rs - Game of Life panel

use egui::{Color32, Rect, Sense, Stroke, Vec2};
use portfolio_sims::life::{self, Life};
use portfolio_sims::patterns::PATTERNS;
use portfolio_sims::Simulation;

use super::{Runner, run_label};
use crate::settings::Language;

const BOX_SIZE: f32 = 18.0;
const SPACING: f32 = 1.0;

pub struct LifeDemo {
    runner: Runner<Life>,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
}

impl Default for LifeDemo {
    fn default() -> Self {
        Self {
            runner: Runner::new(Life::new(), life::STEP_INTERVAL),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
        }
    }
}

impl LifeDemo {
    pub fn show(&mut self, ui: &mut egui::Ui, lang: Language) {
        if self.runner.advance(ui.ctx()) && self.runner.sim.repeated() {
            self.runner.ticker.pause();
        }

        ui.heading(lang.pick("Jeu de la Vie (Conway)", "Conway's Game of Life"));
        ui.label(lang.pick(
            "Un automate cellulaire : chaque cellule naît, vit ou meurt selon ses voisins. Cliquez sur la grille pour modifier l'état.",
            "A cellular automaton: each cell is born, lives, or dies based on its neighbors. Click on the grid to toggle state.",
        ));

        // Controls
        ui.horizontal(|ui| {
            if ui.button(run_label(self.runner.is_running(), lang)).clicked() {
                self.runner.toggle();
            }

            if ui.button(lang.pick("🎲 Aléatoire", "🎲 Random")).clicked() {
                self.runner.sim.randomize();
            }

            if ui.button(lang.pick("⏹ Effacer", "⏹ Clear")).clicked() {
                self.runner.ticker.pause();
                self.runner.sim.clear();
            }

            ui.separator();

            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button(lang.pick("Appliquer", "Apply pattern")).clicked() {
                self.runner.ticker.pause();
                self.runner.sim.apply_pattern(&PATTERNS[self.selected_pattern]);
            }

            ui.separator();
            ui.label(format!("Generation: {}", self.runner.sim.generation()));
        });

        ui.horizontal(|ui| {
            ui.label(lang.pick("Vitesse :", "Speed:"));
            self.runner.speed_slider(ui, 0.5..=30.0, " gen/s");

            ui.separator();
            ui.checkbox(
                &mut self.runner.sim.params.detect_repeats,
                lang.pick("Pause si répétition", "Pause on repeat"),
            );

            ui.separator();
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });

        ui.separator();
        self.draw_grid(ui);
        ui.separator();

        let grid = self.runner.sim.grid();
        let total = grid.rows() * grid.cols();
        let live = grid.live_count();
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {live}"));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total.max(1) as f32 * 100.0));
            if self.runner.sim.repeated() {
                ui.label(lang.pick("État déjà vu, pause.", "Repeated state, paused."));
            }
        });
    }

    fn draw_grid(&mut self, ui: &mut egui::Ui) {
        let (rows, cols) = (self.runner.sim.grid().rows(), self.runner.sim.grid().cols());
        let pitch = BOX_SIZE + SPACING;
        let total_size = Vec2::new(pitch * cols as f32 - SPACING, pitch * rows as f32 - SPACING);

        let (response, painter) = ui.allocate_painter(total_size, Sense::click());
        let origin = response.rect.min;
        painter.rect_filled(response.rect, 0.0, Color32::BLACK);

        let grid = self.runner.sim.grid();
        for row in 0..rows {
            for col in 0..cols {
                let rect = Rect::from_min_size(
                    origin + Vec2::new(col as f32 * pitch, row as f32 * pitch),
                    Vec2::splat(BOX_SIZE),
                );
                let color = if grid.get(row, col) { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, color);
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
            }
        }

        // Toggling works whether or not the simulation is running
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - origin;
                let (col, row) = ((offset.x / pitch) as usize, (offset.y / pitch) as usize);
                self.runner.sim.toggle(row, col);
            }
        }
    }
}
