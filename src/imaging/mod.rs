//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` PNG + JPEG codecs |
//! | **Orientation** | tag change only, rendered on demand |
//! | **Named effects** | in-crate colour recipes |
//! | **Resize** | Lanczos3, single scale factor |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Picture**: [`StickerImage`] and its [`Orientation`] tag
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
mod effects;
pub mod operations;
mod params;
pub mod picture;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{bounded_dimensions, fitted_dimensions};
pub use operations::{
    apply_filter, apply_filter_named, change_orientation, fit_within, resize_to_fit,
};
pub use params::{FilterKind, Quality, Side};
pub use picture::{Orientation, StickerImage};
pub use rust_backend::RustBackend;
