// ui/image_lab.rs - Convolution filter panel

use std::path::PathBuf;

use egui::{ColorImage, TextureHandle, TextureOptions};
use portfolio_sims::convolution::{ImageLab, KernelPreset, PixelBuffer};
use tracing::warn;

use crate::error::LabError;
use crate::loader::{ImageLoader, ImageSource};
use crate::settings::Language;

pub struct ImageLabDemo {
    lab: ImageLab,
    loader: ImageLoader,
    path_input: String,
    texture: Option<TextureHandle>,
}

impl ImageLabDemo {
    pub fn new() -> Result<Self, LabError> {
        Ok(Self {
            lab: ImageLab::new(),
            loader: ImageLoader::new()?,
            path_input: String::new(),
            texture: None,
        })
    }

    pub fn show(&mut self, ui: &mut egui::Ui, lang: Language) {
        self.receive_dropped_files(ui.ctx());
        self.receive_loaded_image(ui.ctx());

        ui.heading(lang.pick("Laboratoire de Vision", "Computer Vision Lab"));
        ui.label(lang.pick(
            "Explorez les convolutions : appliquez des filtres pour détecter des contours ou flouter une image.",
            "Explore convolutions: apply filters to detect edges or blur an image.",
        ));

        ui.horizontal(|ui| {
            ui.label(lang.pick("Image :", "Image:"));
            let edit = ui.text_edit_singleline(&mut self.path_input);
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button(lang.pick("📂 Charger", "📂 Load")).clicked() || submitted {
                let path = PathBuf::from(self.path_input.trim());
                if !path.as_os_str().is_empty() {
                    self.loader.request(ImageSource::Path(path), ui.ctx().clone());
                }
            }
            if self.loader.is_loading() {
                ui.spinner();
            }
        });

        // Filter buttons only exist once an image decoded successfully
        if self.lab.is_loaded() {
            ui.horizontal(|ui| {
                for preset in KernelPreset::ALL {
                    let active = self.lab.active() == Some(preset);
                    if ui.selectable_label(active, preset.name()).clicked() && !active {
                        self.lab.apply(preset);
                        self.refresh_texture(ui.ctx());
                    }
                }
            });
        }

        ui.separator();

        match &self.texture {
            Some(texture) => {
                ui.image((texture.id(), texture.size_vec2()));
            }
            None => {
                ui.label(lang.pick(
                    "Aucune image chargée (glissez un fichier ici)",
                    "No image loaded (drop a file here)",
                ));
            }
        }
    }

    fn receive_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };
        if let Some(path) = file.path {
            self.path_input = path.display().to_string();
            self.loader.request(ImageSource::Path(path), ctx.clone());
        } else if let Some(bytes) = file.bytes {
            self.loader.request(ImageSource::Bytes(bytes), ctx.clone());
        }
    }

    fn receive_loaded_image(&mut self, ctx: &egui::Context) {
        match self.loader.poll() {
            Some(Ok(buffer)) => {
                self.lab.load(buffer);
                self.refresh_texture(ctx);
            }
            // Unusable files are ignored: the previous image, if any, stays.
            Some(Err(err)) => warn!(%err, "image ignored"),
            None => {}
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(output) = self.lab.output() else {
            return;
        };
        let image = to_color_image(output);
        if let Some(texture) = &mut self.texture {
            texture.set(image, TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("image-lab", image, TextureOptions::LINEAR));
        }
    }
}

fn to_color_image(buffer: &PixelBuffer) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(buffer.dimensions(), buffer.as_rgba())
}
