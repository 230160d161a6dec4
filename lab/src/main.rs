// main.rs - Desktop lab hosting the simulation demos

use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;      // Tabs and language switch
mod error;    // Error types
mod loader;   // Async image loading
mod settings; // Persisted preferences
mod ui;       // One panel per demo

use app::LabApp;
use error::LabError;
use settings::SettingsStore;

fn main() -> Result<(), LabError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = SettingsStore::in_config_dir();
    if let Some(path) = store.path() {
        info!(path = %path.display(), "settings file");
    }
    let settings = store.load();
    let app = LabApp::new(store, settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Simulation Lab",
        options,
        Box::new(|_cc| Box::new(app)),
    )?;
    Ok(())
}
