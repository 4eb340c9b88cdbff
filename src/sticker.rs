//! The sticker value: identity, optional pixels, optional backing file.

use crate::imaging::StickerImage;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Process-unique sticker identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StickerId(Uuid);

impl StickerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One image asset, in memory and/or on disk.
///
/// Equality and hashing use the id only. Two stickers built from the same
/// file are different stickers; a clone is the same sticker.
///
/// Lifecycle: created in memory without a location, given a location once
/// written, rediscovered by a directory scan as a *new* sticker (new id,
/// same location), and stale once its file is deleted.
#[derive(Debug, Clone)]
pub struct Sticker {
    id: StickerId,
    pub image: Option<StickerImage>,
    pub location: Option<PathBuf>,
}

impl Sticker {
    pub fn new() -> Self {
        Self {
            id: StickerId::new(),
            image: None,
            location: None,
        }
    }

    pub fn with_image(image: StickerImage) -> Self {
        Self {
            image: Some(image),
            ..Self::new()
        }
    }

    /// Sticker rediscovered on disk. `image` is `None` when decoding failed.
    pub fn from_file(location: PathBuf, image: Option<StickerImage>) -> Self {
        Self {
            image,
            location: Some(location),
            ..Self::new()
        }
    }

    pub fn id(&self) -> StickerId {
        self.id
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn image(&self) -> Option<&StickerImage> {
        self.image.as_ref()
    }
}

impl Default for Sticker {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Sticker {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sticker {}

impl Hash for Sticker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
