//! # Sticker Tool
//!
//! Turn photos into stickers: rotate them, give them a look, shrink them to a
//! sticker-sized square budget, and keep them as plain image files in a
//! catalog directory you can browse, share, export and clear out.
//!
//! # Architecture: Edit, Write, Rescan
//!
//! ```text
//! 1. Edit     current image  →  current image   (orientation, effect, fit)
//! 2. Write    current image  →  <temp_dir>/…    (PNG or JPEG, generated name)
//! 3. Rescan   <temp_dir>/    →  sticker list    (directory listing is the catalog)
//! ```
//!
//! The catalog directory is the single source of truth. There is no index
//! file and no database; every scan mints fresh [`sticker::Sticker`] values
//! from whatever `*.png` / `*.jpeg` files are present.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tool`] | [`tool::StickerTool`]: current sticker, pipeline, listing, navigation, deletion |
//! | [`imaging`] | Orientation tags, named effects, proportional resize, PNG/JPEG codecs |
//! | [`sticker`] | The `Sticker` value and its identity |
//! | [`scan`] | Catalog directory listing and parallel decoding |
//! | [`gallery`] | Background export to a photo library |
//! | [`naming`] | Collision-free timestamped file names |
//! | [`config`] | `sticker.toml` loading, stock defaults, validation |
//! | [`types`] | Small shared enums: export format, navigation direction |
//!
//! # Design Decisions
//!
//! ## Identity Is Not Content
//!
//! Two stickers are equal only when they are the same sticker: the id is
//! minted once and never derived from pixels or paths. Rescanning the same
//! file yields a new, unequal sticker. Navigation therefore matches stickers
//! by location, not by equality.
//!
//! ## Orientation Is a Tag
//!
//! Rotating a sticker only changes its [`imaging::Orientation`]. Pixels are
//! turned upright lazily, when an effect, resize or encode actually needs
//! them, and the result is tagged `Up`.
//!
//! ## Failures Are Values
//!
//! Every operation that can fail returns a typed error and logs it with
//! `tracing`. Nothing fails silently: exporting without an image, deleting an
//! unsaved sticker, or asking for an unknown effect all come back as errors.

pub mod config;
pub mod gallery;
pub mod imaging;
pub mod naming;
pub mod scan;
pub mod sticker;
pub mod tool;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
