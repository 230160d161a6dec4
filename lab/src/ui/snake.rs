// ui/snake.rs - Snake panel

use egui::{Align2, Color32, FontId, Key, Rect, Sense, Vec2};
use portfolio_sims::snake::{self, Cell, Direction, Snake, Status};

use super::Runner;
use crate::settings::Language;

const CELL_SIZE: f32 = 22.0;

const KEYS: [(Key, Direction); 4] = [
    (Key::ArrowUp, Direction::Up),
    (Key::ArrowDown, Direction::Down),
    (Key::ArrowLeft, Direction::Left),
    (Key::ArrowRight, Direction::Right),
];

pub struct SnakeDemo {
    runner: Runner<Snake>,
}

impl Default for SnakeDemo {
    fn default() -> Self {
        Self { runner: Runner::new(Snake::new(), snake::STEP_INTERVAL) }
    }
}

impl SnakeDemo {
    pub fn show(&mut self, ui: &mut egui::Ui, lang: Language) {
        if self.runner.sim.status() == Status::Playing {
            for (key, dir) in KEYS {
                if ui.input(|i| i.key_pressed(key)) {
                    self.runner.sim.turn(dir);
                }
            }
        }

        self.runner.advance(ui.ctx());
        if self.runner.sim.status() != Status::Playing {
            self.runner.ticker.pause();
        }

        ui.heading(lang.pick("Snake (Mini-Jeu)", "Snake (Mini-Game)"));
        ui.label(format!("Score: {}", self.runner.sim.score()));

        ui.horizontal(|ui| match self.runner.sim.status() {
            Status::Ready => {
                if ui.button(lang.pick("▶ Jouer", "▶ Play")).clicked() {
                    self.restart();
                }
            }
            Status::GameOver | Status::Won => {
                let title = if self.runner.sim.status() == Status::Won {
                    lang.pick("Gagné !", "You win!")
                } else {
                    "Game Over"
                };
                ui.label(egui::RichText::new(title).strong());
                ui.label(format!("{} {}", lang.pick("Score final :", "Final score:"), self.runner.sim.score()));
                if ui.button(lang.pick("🔄 Rejouer", "🔄 Play again")).clicked() {
                    self.restart();
                }
            }
            Status::Playing => {
                ui.label(lang.pick(
                    "Utilisez les flèches du clavier pour vous déplacer",
                    "Use arrow keys to move",
                ));
            }
        });

        ui.separator();
        self.draw_board(ui, lang);
    }

    fn restart(&mut self) {
        self.runner.sim.restart();
        self.runner.start();
    }

    fn draw_board(&self, ui: &mut egui::Ui, lang: Language) {
        let sim = &self.runner.sim;
        let size = Vec2::new(sim.cols() as f32, sim.rows() as f32) * CELL_SIZE;
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min;
        painter.rect_filled(response.rect, 4.0, Color32::from_rgb(15, 23, 42));

        let cell_rect = |cell: Cell| {
            Rect::from_min_size(
                origin + Vec2::new(cell.col as f32, cell.row as f32) * CELL_SIZE,
                Vec2::splat(CELL_SIZE - 1.0),
            )
        };

        let food = sim.food();
        painter.circle_filled(cell_rect(food).center(), CELL_SIZE * 0.4, Color32::from_rgb(248, 113, 113));

        let head = sim.head();
        for &cell in sim.body() {
            let color = if cell == head {
                Color32::from_rgb(134, 239, 172)
            } else {
                Color32::from_rgb(74, 222, 128)
            };
            painter.rect_filled(cell_rect(cell), 3.0, color);
        }

        if matches!(sim.status(), Status::GameOver | Status::Won) {
            painter.rect_filled(response.rect, 4.0, Color32::from_black_alpha(160));
            painter.text(
                response.rect.center(),
                Align2::CENTER_CENTER,
                lang.pick("Partie terminée", "Game Over"),
                FontId::proportional(32.0),
                Color32::WHITE,
            );
        }
    }
}
