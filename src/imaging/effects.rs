//! Colour recipes for the eight named photo effects.
//!
//! Each [`FilterKind`] maps to a fixed [`Recipe`]: an optional conversion to
//! luminance, a saturation factor, a contrast factor around mid-grey, and a
//! per-channel gain and offset. The recipes approximate the classic camera-app
//! looks; callers only rely on the names, never on the exact numbers.
//!
//! | Effect | Look |
//! |---|---|
//! | Chrome | punchy colour, extra contrast |
//! | Fade | washed-out colour, lifted blacks |
//! | Instant | warm, slightly faded print |
//! | Mono | plain luminance greyscale |
//! | Noir | high-contrast greyscale |
//! | Process | cool cross-processed tint |
//! | Tonal | flat, low-contrast greyscale |
//! | Transfer | warm vintage transfer |

use super::params::FilterKind;
use image::{DynamicImage, Rgba, RgbaImage};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Recipe {
    monochrome: bool,
    saturation: f32,
    contrast: f32,
    gain: [f32; 3],
    offset: [f32; 3],
}

impl Recipe {
    const NEUTRAL: Recipe = Recipe {
        monochrome: false,
        saturation: 1.0,
        contrast: 1.0,
        gain: [1.0, 1.0, 1.0],
        offset: [0.0, 0.0, 0.0],
    };

    pub(crate) fn for_filter(filter: FilterKind) -> Recipe {
        match filter {
            FilterKind::Chrome => Recipe {
                saturation: 1.35,
                contrast: 1.12,
                ..Recipe::NEUTRAL
            },
            FilterKind::Fade => Recipe {
                saturation: 0.55,
                contrast: 0.8,
                offset: [18.0, 18.0, 18.0],
                ..Recipe::NEUTRAL
            },
            FilterKind::Instant => Recipe {
                saturation: 0.85,
                contrast: 0.92,
                gain: [1.08, 1.02, 0.88],
                offset: [12.0, 6.0, 0.0],
                ..Recipe::NEUTRAL
            },
            FilterKind::Mono => Recipe {
                monochrome: true,
                ..Recipe::NEUTRAL
            },
            FilterKind::Noir => Recipe {
                monochrome: true,
                contrast: 1.5,
                ..Recipe::NEUTRAL
            },
            FilterKind::Process => Recipe {
                saturation: 0.9,
                contrast: 1.1,
                gain: [0.92, 1.04, 1.1],
                offset: [0.0, 4.0, 16.0],
                ..Recipe::NEUTRAL
            },
            FilterKind::Tonal => Recipe {
                monochrome: true,
                contrast: 0.75,
                ..Recipe::NEUTRAL
            },
            FilterKind::Transfer => Recipe {
                saturation: 0.9,
                contrast: 0.95,
                gain: [1.06, 1.0, 0.9],
                offset: [14.0, 6.0, -8.0],
                ..Recipe::NEUTRAL
            },
        }
    }

    fn apply(&self, pixel: &mut Rgba<u8>) {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let luma = 0.299 * r + 0.587 * g + 0.114 * b;

        let rgb = if self.monochrome {
            [luma, luma, luma]
        } else {
            [
                luma + (r - luma) * self.saturation,
                luma + (g - luma) * self.saturation,
                luma + (b - luma) * self.saturation,
            ]
        };

        let mut out = [0u8; 4];
        for i in 0..3 {
            let contrasted = (rgb[i] - 128.0) * self.contrast + 128.0;
            out[i] = (contrasted * self.gain[i] + self.offset[i])
                .round()
                .clamp(0.0, 255.0) as u8;
        }
        out[3] = a;
        pixel.0 = out;
    }
}

/// Apply `filter` to an upright bitmap. Alpha is preserved and the extent is
/// unchanged.
pub(crate) fn apply(image: &DynamicImage, filter: FilterKind) -> DynamicImage {
    let recipe = Recipe::for_filter(filter);
    let mut buf: RgbaImage = image.to_rgba8();
    for pixel in buf.pixels_mut() {
        recipe.apply(pixel);
    }
    DynamicImage::ImageRgba8(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn gradient() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(16, 8, |x, y| {
            Rgba([(x * 16) as u8, (y * 32) as u8, 200, 128])
        }))
    }

    #[test]
    fn monochrome_effects_produce_grey() {
        for filter in [FilterKind::Mono, FilterKind::Noir, FilterKind::Tonal] {
            let out = apply(&gradient(), filter);
            for (_, _, p) in out.pixels() {
                assert_eq!(p[0], p[1], "{filter} left colour in a pixel");
                assert_eq!(p[1], p[2], "{filter} left colour in a pixel");
            }
        }
    }

    #[test]
    fn effects_preserve_extent_and_alpha() {
        let src = gradient();
        for filter in FilterKind::ALL {
            let out = apply(&src, filter);
            assert_eq!(out.dimensions(), src.dimensions());
            assert!(out.pixels().all(|(_, _, p)| p[3] == 128));
        }
    }

    #[test]
    fn mono_uses_luminance_weights() {
        let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255])));
        let out = apply(&src, FilterKind::Mono);
        // 0.299 * 255 = 76.2
        assert_eq!(out.get_pixel(0, 0), Rgba([76, 76, 76, 255]));
    }

    #[test]
    fn noir_has_more_contrast_than_tonal() {
        let dark = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([60, 60, 60, 255])));
        let noir = apply(&dark, FilterKind::Noir).get_pixel(0, 0)[0];
        let tonal = apply(&dark, FilterKind::Tonal).get_pixel(0, 0)[0];
        assert!(noir < tonal);
    }

    #[test]
    fn fade_lifts_black() {
        let black = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])));
        let out = apply(&black, FilterKind::Fade).get_pixel(0, 0);
        assert!(out[0] > 0 && out[1] > 0 && out[2] > 0);
    }

    #[test]
    fn every_effect_changes_a_colourful_image() {
        let src = gradient();
        for filter in FilterKind::ALL {
            let out = apply(&src, filter);
            assert_ne!(
                out.to_rgba8().into_raw(),
                src.to_rgba8().into_raw(),
                "{filter} was a no-op"
            );
        }
    }
}
