//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG) | `image::load_from_memory` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the given quality |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Photo effects | in-crate colour recipes ([`effects`](super::effects)) |

use super::backend::{BackendError, ImageBackend};
use super::effects;
use super::params::{FilterKind, Quality};
use crate::types::ExportFormat;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
        image::load_from_memory(bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: ExportFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, BackendError> {
        let mut bytes = Vec::new();
        let written = match format {
            ExportFormat::Png => image.write_with_encoder(PngEncoder::new(&mut bytes)),
            ExportFormat::Jpeg => {
                // JPEG has no alpha channel; flatten before encoding
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.value() as u8);
                rgb.write_with_encoder(encoder)
            }
        };
        written.map_err(|e| BackendError::Encode(format!("{format:?}: {e}")))?;
        Ok(bytes)
    }

    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, BackendError> {
        if width == 0 || height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Cannot resize to {width}x{height}"
            )));
        }
        Ok(image.resize_exact(width, height, FilterType::Lanczos3))
    }

    fn apply_effect(
        &self,
        image: &DynamicImage,
        filter: FilterKind,
    ) -> Result<DynamicImage, BackendError> {
        Ok(effects::apply(image, filter))
    }
}
