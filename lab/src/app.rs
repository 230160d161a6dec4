// app.rs - Window shell: demo tabs and the language switch

use tracing::{info, warn};

use crate::error::LabError;
use crate::settings::{Language, Settings, SettingsStore};
use crate::ui::genetic::GeneticDemo;
use crate::ui::image_lab::ImageLabDemo;
use crate::ui::life::LifeDemo;
use crate::ui::perceptron::PerceptronDemo;
use crate::ui::snake::SnakeDemo;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    Life,
    ImageLab,
    Snake,
    Perceptron,
    Genetic,
}

impl Demo {
    pub const ALL: [Demo; 5] = [
        Demo::Life,
        Demo::ImageLab,
        Demo::Snake,
        Demo::Perceptron,
        Demo::Genetic,
    ];

    pub fn title(self, lang: Language) -> &'static str {
        match self {
            Demo::Life       => lang.pick("Jeu de la Vie", "Game of Life"),
            Demo::ImageLab   => lang.pick("Vision", "Computer Vision"),
            Demo::Snake      => "Snake",
            Demo::Perceptron => "Perceptron",
            Demo::Genetic    => lang.pick("Algo génétique", "Genetic Algorithm"),
        }
    }
}

pub struct LabApp {
    store: SettingsStore,
    settings: Settings,
    active: Demo,
    life: LifeDemo,
    image_lab: ImageLabDemo,
    snake: SnakeDemo,
    perceptron: PerceptronDemo,
    genetic: GeneticDemo,
}

impl LabApp {
    pub fn new(store: SettingsStore, settings: Settings) -> Result<Self, LabError> {
        Ok(Self {
            store,
            settings,
            active: Demo::Life,
            life: LifeDemo::default(),
            image_lab: ImageLabDemo::new()?,
            snake: SnakeDemo::default(),
            perceptron: PerceptronDemo::default(),
            genetic: GeneticDemo::default(),
        })
    }

    fn toggle_language(&mut self) {
        self.settings.language = self.settings.language.toggled();
        info!(language = ?self.settings.language, "language switched");
        if let Err(err) = self.store.save(&self.settings) {
            warn!(%err, "could not save settings");
        }
    }
}

impl eframe::App for LabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let lang = self.settings.language;

        egui::TopBottomPanel::top("demo_tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for demo in Demo::ALL {
                    ui.selectable_value(&mut self.active, demo, demo.title(lang));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(lang.toggled().code()).clicked() {
                        self.toggle_language();
                    }
                });
            });
        });

        // Only the visible demo advances
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.active {
                    Demo::Life       => self.life.show(ui, lang),
                    Demo::ImageLab   => self.image_lab.show(ui, lang),
                    Demo::Snake      => self.snake.show(ui, lang),
                    Demo::Perceptron => self.perceptron.show(ui, lang),
                    Demo::Genetic    => self.genetic.show(ui, lang),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_demo_has_titles_in_both_languages() {
        for demo in Demo::ALL {
            assert!(!demo.title(Language::Fr).is_empty());
            assert!(!demo.title(Language::En).is_empty());
        }
        assert_ne!(Demo::Life.title(Language::Fr), Demo::Life.title(Language::En));
    }

    #[test]
    fn language_switch_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("settings.json"));
        let mut app = LabApp::new(store.clone(), Settings::default()).unwrap();

        app.toggle_language();
        assert_eq!(store.load().language, Language::En);
        app.toggle_language();
        assert_eq!(store.load().language, Language::Fr);
    }
}
