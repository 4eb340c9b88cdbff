//! Catalog directory scanning.
//!
//! The catalog has no index file: the directory listing *is* the catalog.
//! A scan lists the top level of the directory, keeps entries whose
//! extension is `png` or `jpeg` (any case), orders them, and decodes each
//! into a fresh [`Sticker`].
//!
//! ```text
//! $TMPDIR/
//! ├── 20261019153012_1234567890000.png    ✓ sticker
//! ├── 20261019153013_0004521120001.jpeg   ✓ sticker
//! ├── HOLIDAY.PNG                         ✓ sticker (case-insensitive)
//! ├── scan.jpg                            ✗ not a sticker extension
//! ├── notes.txt                           ✗
//! └── nested/                             ✗ subdirectories are not walked
//! ```
//!
//! Files that cannot be read or decoded still become stickers, with a
//! location and no image. Decoding runs in parallel with rayon; the output
//! order is the listing order regardless.

use crate::config::ListingOrder;
use crate::imaging::{ImageBackend, StickerImage};
use crate::naming::is_sticker_file;
use crate::sticker::Sticker;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot list catalog directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Catalog files in `dir`, in `order`.
pub fn sticker_paths(dir: &Path, order: ListingOrder) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() || !is_sticker_file(entry.path()) {
            continue;
        }
        paths.push(entry.into_path());
    }

    match order {
        ListingOrder::Name => paths.sort(),
        ListingOrder::Modified => paths.sort_by_cached_key(|p| (modified_time(p), p.clone())),
        ListingOrder::Directory => {}
    }
    Ok(paths)
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Read and decode one catalog file. Failures are logged and yield `None`.
pub fn decode_file(backend: &impl ImageBackend, path: &Path) -> Option<StickerImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot read sticker file");
            return None;
        }
    };
    match backend.decode(&bytes) {
        Ok(bitmap) => Some(StickerImage::new(bitmap)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot decode sticker file");
            None
        }
    }
}

/// Build a fresh sticker for every path, decoding in parallel.
pub fn load_stickers(backend: &impl ImageBackend, paths: &[PathBuf]) -> Vec<Sticker> {
    paths
        .par_iter()
        .map(|path| Sticker::from_file(path.clone(), decode_file(backend, path)))
        .collect()
}

/// List and decode the catalog in `dir`.
pub fn scan(
    backend: &impl ImageBackend,
    dir: &Path,
    order: ListingOrder,
) -> Result<Vec<Sticker>, ScanError> {
    let paths = sticker_paths(dir, order)?;
    let stickers = load_stickers(backend, &paths);
    tracing::debug!(dir = %dir.display(), count = stickers.len(), "Catalog scanned");
    Ok(stickers)
}
