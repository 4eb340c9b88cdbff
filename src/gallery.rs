//! Photo-library export.
//!
//! A [`PhotoLibrary`] accepts encoded image bytes and stores them as a new
//! asset. [`submit`] runs the write on a background thread and hands back an
//! [`ExportHandle`]; the outcome arrives on a one-shot channel, so a caller
//! can block on it, poll it, wait with a timeout, or drop the handle and let
//! the write finish detached. Success and failure are also logged.
//!
//! [`DirectoryLibrary`] is the bundled library: every asset becomes a file
//! with a generated name under one root directory.

use crate::naming::sticker_file_name;
use crate::types::ExportFormat;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Photo library rejected the asset: {0}")]
    Rejected(String),
    #[error("Export worker stopped without reporting a result")]
    Disconnected,
}

/// Destination for exported stickers.
pub trait PhotoLibrary: Send + Sync {
    /// Store `bytes` as a new photo asset encoded as `format`.
    fn write_asset(&self, bytes: &[u8], format: ExportFormat) -> Result<(), GalleryError>;
}

/// Photo library backed by a plain directory.
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PhotoLibrary for DirectoryLibrary {
    fn write_asset(&self, bytes: &[u8], format: ExportFormat) -> Result<(), GalleryError> {
        if bytes.is_empty() {
            return Err(GalleryError::Rejected("empty asset".into()));
        }
        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(sticker_file_name(format));
        std::fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), "Asset written to directory library");
        Ok(())
    }
}

/// Pending gallery export.
#[derive(Debug)]
pub struct ExportHandle {
    receiver: Receiver<Result<(), GalleryError>>,
}

impl ExportHandle {
    /// Block until the library reports back.
    pub fn wait(self) -> Result<(), GalleryError> {
        self.receiver
            .recv()
            .unwrap_or(Err(GalleryError::Disconnected))
    }

    /// Outcome if it has arrived, without blocking.
    pub fn try_result(&self) -> Option<Result<(), GalleryError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(GalleryError::Disconnected)),
        }
    }

    /// Block for at most `timeout`. `None` means still running.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<(), GalleryError>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(GalleryError::Disconnected)),
        }
    }
}

/// Write `bytes` to `library` on a background thread.
pub fn submit(library: Arc<dyn PhotoLibrary>, bytes: Vec<u8>, format: ExportFormat) -> ExportHandle {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let result = library.write_asset(&bytes, format);
        match &result {
            Ok(()) => tracing::info!(format = ?format, size = bytes.len(), "Image saved to photo library"),
            Err(e) => tracing::error!(format = ?format, error = %e, "Error saving image to photo library"),
        }
        // Receiver may be gone if the caller detached
        let _ = tx.send(result);
    });
    ExportHandle { receiver: rx }
}
