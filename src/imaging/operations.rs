//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They take
//! [`StickerImage`]s, resolve orientation tags, and call the backend on
//! upright bitmaps. Results are always tagged [`Orientation::Up`] except for
//! [`change_orientation`], which only re-tags.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{bounded_dimensions, fitted_dimensions};
use super::params::{FilterKind, Quality, Side};
use super::picture::{Orientation, StickerImage};
use crate::types::ExportFormat;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Tag `image` with the orientation one step after `current`.
///
/// Pixels are shared with the input, never resampled.
pub fn change_orientation(image: &StickerImage, current: Orientation) -> StickerImage {
    image.with_orientation(current.next_clockwise())
}

/// Apply a named effect.
pub fn apply_filter(
    backend: &impl ImageBackend,
    image: &StickerImage,
    filter: FilterKind,
) -> Result<StickerImage> {
    let filtered = backend.apply_effect(&image.to_upright(), filter)?;
    Ok(StickerImage::new(filtered))
}

/// Apply an effect by canonical name.
///
/// Names must match exactly (`"Chrome"`, not `"chrome"`); anything else is
/// [`BackendError::UnknownFilter`].
pub fn apply_filter_named(
    backend: &impl ImageBackend,
    image: &StickerImage,
    name: &str,
) -> Result<StickerImage> {
    let filter: FilterKind = name.parse()?;
    apply_filter(backend, image, filter)
}

/// Resize so that `side` measures exactly `target` pixels, the other side
/// scaled by the same factor.
pub fn resize_to_fit(
    backend: &impl ImageBackend,
    image: &StickerImage,
    side: Side,
    target: u32,
) -> Result<StickerImage> {
    let size = fitted_dimensions(image.dimensions(), side, target);
    let resized = backend.resize(&image.to_upright(), size.width, size.height)?;
    Ok(StickerImage::new(resized))
}

/// Shrink so that neither side exceeds `max_side`, in one resample.
///
/// Images that already fit come back untouched (same pixels, same tag).
pub fn fit_within(
    backend: &impl ImageBackend,
    image: &StickerImage,
    max_side: u32,
) -> Result<StickerImage> {
    match bounded_dimensions(image.dimensions(), max_side) {
        Some(size) => {
            let resized = backend.resize(&image.to_upright(), size.width, size.height)?;
            Ok(StickerImage::new(resized))
        }
        None => Ok(image.clone()),
    }
}

/// Encode the upright rendering of `image`.
pub fn encode(
    backend: &impl ImageBackend,
    image: &StickerImage,
    format: ExportFormat,
    quality: Quality,
) -> Result<Vec<u8>> {
    backend.encode(&image.to_upright(), format, quality)
}
