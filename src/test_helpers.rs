//! Shared test utilities for the sticker-tool test suite.
//!
//! Provides synthetic image builders, fixture writers, small extractors
//! for asserting on catalog contents, and a log capture.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_png(&tmp.path().join("a.png"), 40, 20);
//! let tool = StickerTool::new(StickerConfig::with_temp_dir(tmp.path())).unwrap();
//! assert_eq!(sticker_file_names(tool.all_stickers()), vec!["a.png"]);
//! ```

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::imaging::StickerImage;
use crate::sticker::Sticker;

// =========================================================================
// Synthetic images
// =========================================================================

/// Opaque gradient so filters and encoders have something to chew on.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    }))
}

pub fn sticker_image(width: u32, height: u32) -> StickerImage {
    StickerImage::new(gradient(width, height))
}

// =========================================================================
// Fixture writers
// =========================================================================

pub fn write_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageRgb8(gradient(width, height).to_rgb8())
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap();
}

// =========================================================================
// Extractors
// =========================================================================

/// Bare file names, in order.
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

/// File names of the stickers' locations, in order. Panics on a sticker
/// that was never written.
pub fn sticker_file_names(stickers: &[Sticker]) -> Vec<String> {
    let paths: Vec<PathBuf> = stickers
        .iter()
        .map(|s| {
            s.location
                .clone()
                .unwrap_or_else(|| panic!("sticker {} has no location", s.id()))
        })
        .collect();
    file_names(&paths)
}

/// Catalog files actually on disk, sorted.
pub fn files_on_disk(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =========================================================================
// Log capture
// =========================================================================

/// Shared buffer the fmt subscriber writes into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a plain-text subscriber on this thread and return its
/// result together with everything logged meanwhile.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
