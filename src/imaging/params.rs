//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! and the [`backend`](super::backend) that does the pixel work.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 80). Clamped on construction.
//! - [`FilterKind`]: The closed set of eight named photo effects.
//! - [`Side`]: Which side a proportional resize pins to the target size.

use std::fmt;
use std::str::FromStr;

use super::backend::BackendError;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    /// JPEG stickers are written at 0.8 of full quality.
    fn default() -> Self {
        Self(80)
    }
}

/// Named photo effect.
///
/// Parsing is exact and case-sensitive against the canonical names
/// (`"Chrome"`, `"Fade"`, ...). Anything else is
/// [`BackendError::UnknownFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Chrome,
    Fade,
    Instant,
    Mono,
    Noir,
    Process,
    Tonal,
    Transfer,
}

impl FilterKind {
    pub const ALL: [FilterKind; 8] = [
        FilterKind::Chrome,
        FilterKind::Fade,
        FilterKind::Instant,
        FilterKind::Mono,
        FilterKind::Noir,
        FilterKind::Process,
        FilterKind::Tonal,
        FilterKind::Transfer,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            FilterKind::Chrome => "Chrome",
            FilterKind::Fade => "Fade",
            FilterKind::Instant => "Instant",
            FilterKind::Mono => "Mono",
            FilterKind::Noir => "Noir",
            FilterKind::Process => "Process",
            FilterKind::Tonal => "Tonal",
            FilterKind::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for FilterKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.canonical_name() == s)
            .ok_or_else(|| BackendError::UnknownFilter(s.to_string()))
    }
}

/// The side a proportional resize pins to the requested pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Width,
    Height,
}
