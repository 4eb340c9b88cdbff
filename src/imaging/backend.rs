//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four operations every backend must
//! support: decode, encode, resize, and apply_effect.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): pure Rust, built on the
//! `image` crate. Tests swap in a recording mock.

use super::params::{FilterKind, Quality};
use crate::types::ExportFormat;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Unknown filter: {0:?}")]
    UnknownFilter(String),
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Backends see plain upright bitmaps; orientation tags are resolved by the
/// [`operations`](super::operations) layer before calling in.
pub trait ImageBackend: Sync {
    /// Decode PNG or JPEG bytes.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError>;

    /// Encode to `format`. `quality` applies to JPEG only.
    fn encode(
        &self,
        image: &DynamicImage,
        format: ExportFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, BackendError>;

    /// Resample to exactly `width` x `height`.
    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, BackendError>;

    /// Apply a named photo effect.
    fn apply_effect(
        &self,
        image: &DynamicImage,
        filter: FilterKind,
    ) -> Result<DynamicImage, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records operations instead of touching pixels.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockBackend {
        /// Size of every image `decode` hands out.
        pub decoded_size: Option<Dimensions>,
        pub fail_encode: bool,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(usize),
        Encode {
            format: ExportFormat,
            quality: u32,
            width: u32,
            height: u32,
        },
        Resize {
            width: u32,
            height: u32,
        },
        Effect(FilterKind),
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn decoding_to(width: u32, height: u32) -> Self {
            Self {
                decoded_size: Some(Dimensions { width, height }),
                ..Self::default()
            }
        }

        pub fn failing_encode() -> Self {
            Self {
                fail_encode: true,
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
            self.record(RecordedOp::Decode(bytes.len()));
            self.decoded_size
                .map(|d| DynamicImage::new_rgba8(d.width, d.height))
                .ok_or_else(|| BackendError::Decode("No mock dimensions".to_string()))
        }

        fn encode(
            &self,
            image: &DynamicImage,
            format: ExportFormat,
            quality: Quality,
        ) -> Result<Vec<u8>, BackendError> {
            self.record(RecordedOp::Encode {
                format,
                quality: quality.value(),
                width: image.width(),
                height: image.height(),
            });
            if self.fail_encode {
                return Err(BackendError::Encode("mock encoder refused".to_string()));
            }
            Ok(format.extension().as_bytes().to_vec())
        }

        fn resize(
            &self,
            _image: &DynamicImage,
            width: u32,
            height: u32,
        ) -> Result<DynamicImage, BackendError> {
            self.record(RecordedOp::Resize { width, height });
            Ok(DynamicImage::new_rgba8(width, height))
        }

        fn apply_effect(
            &self,
            image: &DynamicImage,
            filter: FilterKind,
        ) -> Result<DynamicImage, BackendError> {
            self.record(RecordedOp::Effect(filter));
            Ok(image.clone())
        }
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();
        let out = backend
            .resize(&DynamicImage::new_rgba8(10, 10), 4, 3)
            .unwrap();

        assert_eq!((out.width(), out.height()), (4, 3));
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Resize {
                width: 4,
                height: 3
            }]
        );
    }

    #[test]
    fn mock_decode_without_dimensions_fails() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.decode(b"bytes"),
            Err(BackendError::Decode(_))
        ));
        assert_eq!(backend.get_operations(), vec![RecordedOp::Decode(5)]);
    }

    #[test]
    fn mock_records_encode_quality() {
        let backend = MockBackend::new();
        let bytes = backend
            .encode(
                &DynamicImage::new_rgba8(8, 6),
                ExportFormat::Jpeg,
                Quality::new(80),
            )
            .unwrap();

        assert_eq!(bytes, b"jpeg");
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Encode {
                format: ExportFormat::Jpeg,
                quality: 80,
                width: 8,
                height: 6,
            }
        ));
    }
}
