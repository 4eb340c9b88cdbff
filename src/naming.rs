//! Sticker file naming and catalog membership.
//!
//! ## Generated names
//!
//! Every written sticker gets a fixed-width, digits-only name with a single
//! `_` separator:
//!
//! ```text
//! 20261019153012_1234567890007.png
//! └── UTC time ──┘└ nanos ┘└seq┘
//! ```
//!
//! - 14 digits of UTC time (`YYYYMMDDHHMMSS`)
//! - 9 digits of sub-second nanoseconds
//! - 4 digits of a process-wide sequence number
//!
//! Fixed width means lexical order is creation order, which is what the
//! default listing order relies on. UTC keeps that true across daylight
//! saving changes. The sequence number keeps names apart when the clock does
//! not advance between two calls.
//!
//! ## Catalog membership
//!
//! A file belongs to the catalog when its extension is `png` or `jpeg`,
//! compared case-insensitively. Nothing else is inspected.

use crate::types::ExportFormat;
use chrono::{DateTime, Timelike, Utc};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Build a name stem from a timestamp and a sequence number.
fn stem_at(time: DateTime<Utc>, sequence: u32) -> String {
    format!(
        "{}_{:09}{:04}",
        time.format("%Y%m%d%H%M%S"),
        time.nanosecond() % 1_000_000_000,
        sequence % 10_000
    )
}

/// Fresh file name (stem + extension) for a sticker in `format`.
pub fn sticker_file_name(format: ExportFormat) -> String {
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}.{}", stem_at(Utc::now(), sequence), format.extension())
}

/// Whether `path` names a catalog file.
pub fn is_sticker_file(path: &Path) -> bool {
    ExportFormat::from_path(path).is_some()
}
