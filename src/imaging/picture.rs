//! In-memory sticker bitmap with an orientation tag.
//!
//! A [`StickerImage`] keeps the decoded pixels behind an `Arc`, so cloning
//! or re-tagging the orientation never copies or resamples pixel data. The
//! tag is only rendered into pixels by [`StickerImage::to_upright`], which
//! effects, resizes and encoders go through.

use image::DynamicImage;
use std::sync::Arc;

use super::backend::Dimensions;

/// Display orientation of the stored pixels.
///
/// - `Up`: displayed as stored
/// - `Left`: displayed rotated 90° counter-clockwise
/// - `Down`: displayed rotated 180°
/// - `Right`: displayed rotated 90° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Up,
    Left,
    Down,
    Right,
}

impl Orientation {
    /// Next tag in the `Up → Left → Down → Right → Up` cycle.
    pub fn next_clockwise(self) -> Self {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }

    /// Whether displaying this orientation swaps width and height.
    pub fn is_transposed(self) -> bool {
        matches!(self, Orientation::Left | Orientation::Right)
    }
}

#[derive(Debug, Clone)]
pub struct StickerImage {
    bitmap: Arc<DynamicImage>,
    orientation: Orientation,
}

impl StickerImage {
    pub fn new(bitmap: DynamicImage) -> Self {
        Self {
            bitmap: Arc::new(bitmap),
            orientation: Orientation::Up,
        }
    }

    /// Same pixels, different tag.
    pub fn with_orientation(&self, orientation: Orientation) -> Self {
        Self {
            bitmap: Arc::clone(&self.bitmap),
            orientation,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Stored pixels, before the orientation tag is applied.
    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    /// Displayed size: stored size with width and height swapped for
    /// `Left`/`Right`.
    pub fn dimensions(&self) -> Dimensions {
        let (width, height) = (self.bitmap.width(), self.bitmap.height());
        if self.orientation.is_transposed() {
            Dimensions {
                width: height,
                height: width,
            }
        } else {
            Dimensions { width, height }
        }
    }

    /// Render the orientation tag into pixels.
    pub fn to_upright(&self) -> DynamicImage {
        match self.orientation {
            Orientation::Up => self.bitmap.as_ref().clone(),
            Orientation::Left => self.bitmap.rotate270(),
            Orientation::Down => self.bitmap.rotate180(),
            Orientation::Right => self.bitmap.rotate90(),
        }
    }

    /// True when both handles point at the same pixel buffer.
    pub fn shares_pixels_with(&self, other: &StickerImage) -> bool {
        Arc::ptr_eq(&self.bitmap, &other.bitmap)
    }
}

impl From<DynamicImage> for StickerImage {
    fn from(bitmap: DynamicImage) -> Self {
        Self::new(bitmap)
    }
}
