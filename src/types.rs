//! Shared value types used by the imaging layer and the sticker collection.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Encoding used when a sticker leaves memory.
///
/// PNG is lossless. JPEG is written at the configured quality
/// (0.8 by default, see [`Quality`](crate::imaging::Quality)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// File extension written for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    /// Format of a catalog file, judged by its extension (case-insensitive).
    ///
    /// Only `png` and `jpeg` qualify; `jpg` is not a sticker extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("png") {
            Some(ExportFormat::Png)
        } else if ext.eq_ignore_ascii_case("jpeg") {
            Some(ExportFormat::Jpeg)
        } else {
            None
        }
    }
}

/// Step through the sticker list relative to a known sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Next,
    Previous,
}

impl NavigationDirection {
    pub fn offset(self) -> isize {
        match self {
            NavigationDirection::Next => 1,
            NavigationDirection::Previous => -1,
        }
    }
}
