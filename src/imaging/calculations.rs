//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::Side;

/// Scale `value` and round to the nearest whole pixel, never below 1.
fn scaled(value: u32, scale: f64) -> u32 {
    ((value as f64 * scale).round() as u32).max(1)
}

/// Proportional size with one side pinned to `target` pixels.
///
/// A single scale factor, derived from the pinned side, is applied to both
/// sides so the aspect ratio is kept up to rounding of the free side.
///
/// # Examples
/// ```
/// # use sticker_tool::imaging::{Dimensions, Side, fitted_dimensions};
/// let src = Dimensions { width: 2000, height: 1000 };
/// assert_eq!(
///     fitted_dimensions(src, Side::Width, 500),
///     Dimensions { width: 500, height: 250 }
/// );
/// assert_eq!(
///     fitted_dimensions(src, Side::Height, 500),
///     Dimensions { width: 1000, height: 500 }
/// );
/// ```
pub fn fitted_dimensions(source: Dimensions, side: Side, target: u32) -> Dimensions {
    let target = target.max(1);
    match side {
        Side::Width => {
            let scale = target as f64 / source.width.max(1) as f64;
            Dimensions {
                width: target,
                height: scaled(source.height, scale),
            }
        }
        Side::Height => {
            let scale = target as f64 / source.height.max(1) as f64;
            Dimensions {
                width: scaled(source.width, scale),
                height: target,
            }
        }
    }
}

/// Largest proportional size with both sides at most `max_side`.
///
/// `scale = min(max_side / width, max_side / height, 1)`, so images that
/// already fit are returned unchanged and nothing is ever upscaled. Returns
/// `None` when no resize is needed.
pub fn bounded_dimensions(source: Dimensions, max_side: u32) -> Option<Dimensions> {
    let max_side = max_side.max(1);
    if source.width <= max_side && source.height <= max_side {
        return None;
    }

    let scale = (max_side as f64 / source.width as f64)
        .min(max_side as f64 / source.height as f64)
        .min(1.0);

    Some(Dimensions {
        width: scaled(source.width, scale).min(max_side),
        height: scaled(source.height, scale).min(max_side),
    })
}
