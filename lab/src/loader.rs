// loader.rs - Off-thread image reading and decoding

use std::path::PathBuf;
use std::sync::Arc;

use image::imageops::FilterType;
use portfolio_sims::convolution::PixelBuffer;
use tokio::runtime::Runtime;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info};

use crate::error::{LabError, LoadError};

/// Images wider than this are scaled down before filtering.
pub const MAX_WIDTH: u32 = 600;

pub enum ImageSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

type LoadResult = Result<PixelBuffer, LoadError>;

/// Runs one load at a time on a small tokio runtime; the UI polls for the
/// result every frame.
pub struct ImageLoader {
    runtime: Runtime,
    pending: Option<oneshot::Receiver<LoadResult>>,
}

impl ImageLoader {
    pub fn new() -> Result<Self, LabError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("image-loader")
            .enable_all()
            .build()
            .map_err(LabError::Runtime)?;
        Ok(Self { runtime, pending: None })
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts loading `source`, replacing any load still in flight.
    /// `ctx` is asked to repaint once the result is ready.
    pub fn request(&mut self, source: ImageSource, ctx: egui::Context) {
        let (tx, rx) = oneshot::channel();
        self.pending = Some(rx);
        self.runtime.spawn(async move {
            let result = load(source).await;
            // Receiver gone means a newer request superseded this one.
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// The finished load, if one completed since the last call.
    pub fn poll(&mut self) -> Option<LoadResult> {
        let rx = self.pending.as_mut()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(LoadError::LoaderGone),
        };
        self.pending = None;
        Some(result)
    }
}

async fn load(source: ImageSource) -> LoadResult {
    let bytes: Arc<[u8]> = match source {
        ImageSource::Path(path) => {
            debug!(?path, "reading image");
            match tokio::fs::read(&path).await {
                Ok(bytes) => bytes.into(),
                Err(source) => return Err(LoadError::Read { path, source }),
            }
        }
        ImageSource::Bytes(bytes) => bytes,
    };

    tokio::task::spawn_blocking(move || decode(&bytes))
        .await
        .map_err(|_| LoadError::LoaderGone)?
}

/// Decodes any format the `image` crate knows into RGBA, capped at [`MAX_WIDTH`].
pub fn decode(bytes: &[u8]) -> LoadResult {
    let mut img = image::load_from_memory(bytes)?;

    if img.width() > MAX_WIDTH {
        let height = (u64::from(img.height()) * u64::from(MAX_WIDTH) / u64::from(img.width())).max(1);
        img = img.resize_exact(MAX_WIDTH, height as u32, FilterType::Triangle);
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    info!(width, height, "image decoded");
    Ok(PixelBuffer::from_rgba(width as usize, height as usize, rgba.into_raw())?)
}
