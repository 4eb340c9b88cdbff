//! The sticker collection manager.
//!
//! [`StickerTool`] owns the sticker being edited (the *current* sticker) and
//! a cached list of every sticker in the catalog directory. The cache is
//! rebuilt from disk on construction, [`refresh`](StickerTool::refresh),
//! [`navigate`](StickerTool::navigate), [`delete`](StickerTool::delete) and
//! [`delete_all`](StickerTool::delete_all). Writing a sticker with
//! [`perform_pipeline`](StickerTool::perform_pipeline) does *not* refresh the
//! list; call `refresh` afterwards to see the new file.
//!
//! ## Pipeline
//!
//! ```text
//! current image ──fit_within(max_side)──▶ current image (in place)
//!                                           │ encode(format)
//!                                           ▼
//!                      <temp_dir>/<generated name>.<png|jpeg>
//!                                           │
//!                                           ▼
//!                            current.location = that path
//! ```
//!
//! ## Threading
//!
//! Every method is synchronous and expects one caller driving the tool.
//! Nothing locks the catalog directory; concurrent writers from other
//! processes are only noticed on the next scan. Gallery export is the one
//! background operation; see [`gallery`](crate::gallery).
//!
//! ## Subscriptions
//!
//! [`subscribe`](StickerTool::subscribe) returns the current list plus a
//! channel that receives the full list after every rescan.

use crate::config::{ConfigError, StickerConfig, effective_threads};
use crate::gallery::{self, DirectoryLibrary, ExportHandle, GalleryError, PhotoLibrary};
use crate::imaging::{
    self, BackendError, FilterKind, ImageBackend, RustBackend, StickerImage, operations,
};
use crate::naming::sticker_file_name;
use crate::scan::{self, ScanError};
use crate::sticker::Sticker;
use crate::types::{ExportFormat, NavigationDirection};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StickerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Gallery export failed: {0}")]
    Gallery(#[from] GalleryError),
    #[error("No photo to perform")]
    NoCurrentImage,
    #[error("Sticker has no file location")]
    NoLocation,
    #[error("Invalid maximum side: {0}")]
    InvalidSize(u32),
    #[error("Not a sticker format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Cannot build decode pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, StickerError>;

/// Encoded image ready to hand to a share sheet or clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
}

impl SharePayload {
    /// Suggested file name for the receiving side.
    pub fn file_name_hint(&self) -> String {
        format!("sticker.{}", self.format.extension())
    }
}

/// Outcome of [`StickerTool::delete_all`].
#[derive(Debug, Default)]
pub struct DeleteSummary {
    pub removed: usize,
    pub failed: Vec<(PathBuf, std::io::Error)>,
}

impl DeleteSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct StickerTool<B: ImageBackend = RustBackend> {
    backend: B,
    config: StickerConfig,
    temp_dir: PathBuf,
    current: Sticker,
    all: Vec<Sticker>,
    subscribers: Vec<Sender<Vec<Sticker>>>,
    library: Arc<dyn PhotoLibrary>,
    pool: rayon::ThreadPool,
}

impl StickerTool<RustBackend> {
    /// Tool with no current image, catalog loaded from `config.temp_dir()`.
    pub fn new(config: StickerConfig) -> Result<Self> {
        Self::with_backend(RustBackend::new(), config, None)
    }

    /// Tool editing `image`, catalog loaded from `config.temp_dir()`.
    pub fn with_image(config: StickerConfig, image: StickerImage) -> Result<Self> {
        Self::with_backend(RustBackend::new(), config, Some(image))
    }
}

impl<B: ImageBackend> StickerTool<B> {
    /// Tool on an explicit backend.
    ///
    /// Validates `config`, creates the catalog directory if needed, and
    /// scans it.
    pub fn with_backend(backend: B, config: StickerConfig, image: Option<StickerImage>) -> Result<Self> {
        config
            .validate()
            .inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;
        let temp_dir = config.temp_dir();
        std::fs::create_dir_all(&temp_dir).inspect_err(|e| {
            tracing::error!(dir = %temp_dir.display(), error = %e, "Cannot create temporary directory")
        })?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(effective_threads(&config.processing))
            .build()
            .inspect_err(|e| tracing::error!(error = %e, "Cannot build decode pool"))?;
        let library: Arc<dyn PhotoLibrary> = Arc::new(DirectoryLibrary::new(config.gallery_dir()));
        let current = match image {
            Some(image) => Sticker::with_image(image),
            None => Sticker::new(),
        };

        let mut tool = Self {
            backend,
            config,
            temp_dir,
            current,
            all: Vec::new(),
            subscribers: Vec::new(),
            library,
            pool,
        };
        // Construction tolerates an unreadable catalog; the error is logged
        let _ = tool.refresh();
        Ok(tool)
    }

    /// Replace the photo library used by gallery exports.
    pub fn with_photo_library(mut self, library: Arc<dyn PhotoLibrary>) -> Self {
        self.library = library;
        self
    }

    pub fn config(&self) -> &StickerConfig {
        &self.config
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    // =========================================================================
    // Current sticker
    // =========================================================================

    pub fn current(&self) -> &Sticker {
        &self.current
    }

    /// Start editing a new image. The current sticker keeps its identity but
    /// forgets any previous location.
    pub fn set_current_image(&mut self, image: StickerImage) {
        self.current.image = Some(image);
        self.current.location = None;
    }

    fn current_image(&self) -> Result<&StickerImage> {
        self.current.image.as_ref().ok_or_else(|| {
            tracing::warn!("No photo to perform");
            StickerError::NoCurrentImage
        })
    }

    /// Step the current image's orientation tag.
    pub fn rotate_current(&mut self) -> Result<&StickerImage> {
        let image = self.current_image()?;
        let rotated = imaging::change_orientation(image, image.orientation());
        Ok(self.current.image.insert(rotated))
    }

    /// Apply an effect to the current image.
    pub fn apply_filter(&mut self, filter: FilterKind) -> Result<&StickerImage> {
        let filtered = imaging::apply_filter(&self.backend, self.current_image()?, filter)
            .inspect_err(|e| tracing::error!(filter = %filter, error = %e, "Error applying filter"))?;
        Ok(self.current.image.insert(filtered))
    }

    /// Apply an effect by canonical name.
    ///
    /// Names outside the eight canonical ones return
    /// [`BackendError::UnknownFilter`] and leave the current image untouched.
    pub fn apply_filter_named(&mut self, name: &str) -> Result<&StickerImage> {
        let filtered = imaging::apply_filter_named(&self.backend, self.current_image()?, name)
            .inspect_err(|e| tracing::warn!(name, error = %e, "Filter not found"))?;
        Ok(self.current.image.insert(filtered))
    }

    /// Shrink the current image in place so neither side exceeds `max_side`.
    fn fit_current(&mut self, max_side: u32) -> Result<()> {
        if max_side == 0 {
            tracing::warn!(max_side, "Invalid maximum side");
            return Err(StickerError::InvalidSize(max_side));
        }
        let fitted = imaging::fit_within(&self.backend, self.current_image()?, max_side)
            .inspect_err(|e| tracing::error!(max_side, error = %e, "Error resizing image"))?;
        self.current.image = Some(fitted);
        Ok(())
    }

    fn encode_current(&self, format: ExportFormat) -> Result<Vec<u8>> {
        self.encode_image(self.current_image()?, format)
    }

    fn encode_image(&self, image: &StickerImage, format: ExportFormat) -> Result<Vec<u8>> {
        let bytes = operations::encode(&self.backend, image, format, self.config.jpeg_quality())
            .inspect_err(|e| tracing::error!(format = ?format, error = %e, "Error encoding image"))?;
        Ok(bytes)
    }

    /// Resize, encode and write the current image to the catalog directory.
    ///
    /// On success the new path is recorded on the current sticker and
    /// returned. On an encode or write failure the location is left as it
    /// was; the in-place resize is kept.
    pub fn perform_pipeline(&mut self, format: ExportFormat, max_side: u32) -> Result<PathBuf> {
        self.fit_current(max_side)?;
        let bytes = self.encode_current(format)?;

        let path = self.temp_dir.join(sticker_file_name(format));
        if let Err(e) = std::fs::write(&path, &bytes) {
            tracing::error!(path = %path.display(), error = %e, "Error saving image");
            return Err(e.into());
        }
        tracing::info!(path = %path.display(), size = bytes.len(), "Image saved to temporary directory");

        self.current.location = Some(path.clone());
        Ok(path)
    }

    /// Resize the current image in place and encode it without touching disk.
    pub fn share_payload(&mut self, format: ExportFormat, max_side: u32) -> Result<SharePayload> {
        self.fit_current(max_side)?;
        let bytes = self.encode_current(format)?;
        Ok(SharePayload { bytes, format })
    }

    /// Encode a sticker's in-memory image for sharing.
    pub fn sticker_share_payload(&self, sticker: &Sticker, format: ExportFormat) -> Result<SharePayload> {
        let image = sticker.image().ok_or_else(|| {
            tracing::warn!(sticker = %sticker.id(), "No photo to share");
            StickerError::NoCurrentImage
        })?;
        let bytes = self.encode_image(image, format)?;
        Ok(SharePayload { bytes, format })
    }

    // =========================================================================
    // Gallery export
    // =========================================================================

    /// Encode the current image and hand it to the photo library in the
    /// background.
    pub fn export_to_gallery(&self, format: ExportFormat) -> Result<ExportHandle> {
        let bytes = self.encode_current(format)?;
        Ok(gallery::submit(Arc::clone(&self.library), bytes, format))
    }

    /// Send a stored sticker's file, byte for byte, to the photo library in
    /// the background.
    pub fn export_sticker_to_gallery(&self, sticker: &Sticker) -> Result<ExportHandle> {
        let path = sticker.location().ok_or_else(|| {
            tracing::warn!(sticker = %sticker.id(), "Error with image: no file location");
            StickerError::NoLocation
        })?;
        let format = ExportFormat::from_path(path).ok_or_else(|| {
            tracing::warn!(path = %path.display(), "Error with image: not a sticker format");
            StickerError::UnsupportedFormat(path.to_path_buf())
        })?;
        let bytes = std::fs::read(path)
            .inspect_err(|e| tracing::error!(path = %path.display(), error = %e, "Error with image"))?;
        Ok(gallery::submit(Arc::clone(&self.library), bytes, format))
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Stickers found by the last scan.
    pub fn all_stickers(&self) -> &[Sticker] {
        &self.all
    }

    /// Rescan the catalog directory and publish the new list.
    ///
    /// On failure the list is emptied (and published) before the error is
    /// returned.
    pub fn refresh(&mut self) -> Result<&[Sticker]> {
        let scanned = self.pool.install(|| {
            scan::scan(&self.backend, &self.temp_dir, self.config.listing.order)
        });
        let outcome = match scanned {
            Ok(stickers) => {
                self.all = stickers;
                Ok(())
            }
            Err(e) => {
                tracing::error!(dir = %self.temp_dir.display(), error = %e, "Error getting contents of the temporary directory");
                self.all.clear();
                Err(e.into())
            }
        };
        self.publish();
        outcome.map(|()| self.all.as_slice())
    }

    /// Current list plus a channel that receives the list after every rescan.
    pub fn subscribe(&mut self) -> (Vec<Sticker>, Receiver<Vec<Sticker>>) {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        (self.all.clone(), rx)
    }

    fn publish(&mut self) {
        let snapshot = &self.all;
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    /// Rescan, find `from` by location, and step `direction`.
    ///
    /// `None` when `from` was never written, is no longer on disk, or the
    /// step leaves the list.
    pub fn navigate(&mut self, from: &Sticker, direction: NavigationDirection) -> Option<Sticker> {
        let _ = self.refresh();
        let location = from.location()?;
        let index = self.all.iter().position(|s| s.location() == Some(location))?;
        let target = index.checked_add_signed(direction.offset())?;
        self.all.get(target).cloned()
    }

    /// Remove a sticker's file, then rescan.
    ///
    /// The rescan happens whether or not the removal worked.
    pub fn delete(&mut self, sticker: &Sticker) -> Result<()> {
        let removed = match sticker.location() {
            Some(path) => match std::fs::remove_file(path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "File deleted successfully");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Error deleting file");
                    Err(StickerError::Io(e))
                }
            },
            None => {
                tracing::warn!(sticker = %sticker.id(), "Cannot delete a sticker with no file location");
                Err(StickerError::NoLocation)
            }
        };
        let _ = self.refresh();
        removed
    }

    /// Remove every file in the current list (no rescan first), then rescan
    /// once. Failures are logged and collected; the rest still go.
    pub fn delete_all(&mut self) -> DeleteSummary {
        let mut summary = DeleteSummary::default();
        for path in self.all.iter().filter_map(Sticker::location) {
            match std::fs::remove_file(path) {
                Ok(()) => summary.removed += 1,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Error deleting file");
                    summary.failed.push((path.to_path_buf(), e));
                }
            }
        }
        tracing::info!(removed = summary.removed, failed = summary.failed.len(), "Stickers deleted");
        let _ = self.refresh();
        summary
    }
}
