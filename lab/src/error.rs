use std::path::PathBuf;

use portfolio_sims::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("window error: {0}")]
    Window(#[from] eframe::Error),

    #[error("settings file error: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}

/// Failures while turning a user-supplied file into a pixel buffer.
/// Crosses the loader's thread boundary, so it must stay `Send`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("decoded image is unusable: {0}")]
    Buffer(#[from] SimError),

    #[error("image loader stopped before delivering a result")]
    LoaderGone,
}
