//! Sticker tool configuration.
//!
//! Handles loading, validating, and merging `sticker.toml`. Stock defaults are
//! overridden by an optional user file, so a host only writes the keys it
//! cares about.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # temp_dir = "/tmp"            # Sticker catalog (default: system temp dir)
//! # gallery_dir = "~/Pictures/Stickers"  # Directory photo library root
//!
//! [export]
//! jpeg_quality = 80              # JPEG quality (1-100), PNG is lossless
//!
//! [listing]
//! order = "name"                 # "name" | "modified" | "directory"
//!
//! [processing]
//! max_threads = 4                # Max decode workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::imaging::Quality;

/// File name looked up by [`load_config`].
pub const CONFIG_FILENAME: &str = "sticker.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `sticker.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StickerConfig {
    /// Directory holding sticker files. `None` means the system temp dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
    /// Root of the directory-backed photo library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_dir: Option<PathBuf>,
    /// Encoding settings.
    pub export: ExportConfig,
    /// Catalog ordering.
    pub listing: ListingConfig,
    /// Decode parallelism.
    pub processing: ProcessingConfig,
}

impl StickerConfig {
    /// Config rooted at a specific catalog directory, everything else default.
    pub fn with_temp_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.export.jpeg_quality) {
            return Err(ConfigError::Validation(
                "export.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Effective catalog directory.
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Effective photo library root: configured, else `<Pictures>/Stickers`,
    /// else `sticker-gallery` inside the catalog directory.
    pub fn gallery_dir(&self) -> PathBuf {
        if let Some(dir) = &self.gallery_dir {
            return dir.clone();
        }
        match dirs::picture_dir() {
            Some(pictures) => pictures.join("Stickers"),
            None => self.temp_dir().join("sticker-gallery"),
        }
    }

    pub fn jpeg_quality(&self) -> Quality {
        Quality::new(self.export.jpeg_quality)
    }
}

/// Encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// JPEG quality, 1-100. 80 matches a 0.8 compression factor.
    pub jpeg_quality: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: Quality::default().value(),
        }
    }
}

/// How the catalog directory is ordered when listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Lexical file name; creation order for generated names.
    #[default]
    Name,
    /// Modification time, oldest first, ties broken by name.
    Modified,
    /// Whatever the filesystem returns. Not stable across platforms.
    Directory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    pub order: ListingOrder,
}

/// Parallel decode settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel decode workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_threads
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(StickerConfig::default())?)
}

/// Lay `overlay` over `base`: tables merge per key, anything else in the
/// overlay wins outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    let (mut merged, overrides) = match (base, overlay) {
        (toml::Value::Table(merged), toml::Value::Table(overrides)) => (merged, overrides),
        (_, overlay) => return overlay,
    };
    for (key, value) in overrides {
        let value = match merged.remove(&key) {
            Some(existing) => merge_toml(existing, value),
            None => value,
        };
        merged.insert(key, value);
    }
    toml::Value::Table(merged)
}

/// Load `sticker.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<StickerConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: StickerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `sticker.toml` in the given directory.
///
/// A missing file yields the validated stock defaults.
pub fn load_config(dir: &Path) -> Result<StickerConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `sticker.toml` with all keys and
/// explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# Sticker Tool Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory holding sticker files. Every .png / .jpeg file in it is part
# of the catalog. Defaults to the system temporary directory.
# temp_dir = "/tmp"

# Root of the directory-backed photo library used for gallery exports.
# Defaults to <Pictures>/Stickers.
# gallery_dir = "/home/me/Pictures/Stickers"

# ---------------------------------------------------------------------------
# Encoding
# ---------------------------------------------------------------------------
[export]
# JPEG encoding quality (1 = worst, 100 = best). PNG is always lossless.
jpeg_quality = 80

# ---------------------------------------------------------------------------
# Catalog listing
# ---------------------------------------------------------------------------
[listing]
# Order used for the sticker list and for next/previous navigation.
#   "name"      - by file name (creation order for generated names)
#   "modified"  - by modification time, oldest first
#   "directory" - raw filesystem order (not stable)
order = "name"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel decode workers when scanning the catalog.
# Omit for auto (number of CPU cores). Values above the core count are
# clamped down.
# max_threads = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = StickerConfig::default();
        assert_eq!(config.temp_dir, None);
        assert_eq!(config.export.jpeg_quality, 80);
        assert_eq!(config.listing.order, ListingOrder::Name);
        assert_eq!(config.processing.max_threads, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn temp_dir_defaults_to_system_temp() {
        assert_eq!(StickerConfig::default().temp_dir(), std::env::temp_dir());
        assert_eq!(
            StickerConfig::with_temp_dir("/srv/stickers").temp_dir(),
            PathBuf::from("/srv/stickers")
        );
    }

    #[test]
    fn gallery_dir_prefers_configured_value() {
        let config = StickerConfig {
            gallery_dir: Some(PathBuf::from("/srv/gallery")),
            ..StickerConfig::default()
        };
        assert_eq!(config.gallery_dir(), PathBuf::from("/srv/gallery"));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[listing]
order = "modified"
"##;
        let config: StickerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.listing.order, ListingOrder::Modified);
        // Untouched sections keep defaults
        assert_eq!(config.export.jpeg_quality, 80);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<StickerConfig, _> = toml::from_str("[export]\npng_level = 3\n");
        assert!(result.is_err());
        let result: Result<StickerConfig, _> = toml::from_str("tmp_dir = \"/tmp\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_bad_quality() {
        let mut config = StickerConfig::default();
        config.export.jpeg_quality = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.export.jpeg_quality = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_threads() {
        let mut config = StickerConfig::default();
        config.processing.max_threads = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn effective_threads_clamps_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
        let capped = ProcessingConfig {
            max_threads: Some(usize::MAX),
        };
        assert_eq!(effective_threads(&capped), cores);
        let one = ProcessingConfig {
            max_threads: Some(1),
        };
        assert_eq!(effective_threads(&one), 1);
    }

    // =========================================================================
    // merge / load tests
    // =========================================================================

    #[test]
    fn merge_overlay_wins_and_base_survives() {
        let base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 3\nz = 4\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(3));
        assert_eq!(merged["t"]["z"].as_integer(), Some(4));
    }

    #[test]
    fn merge_replaces_when_shapes_differ() {
        let base: toml::Value = toml::from_str("[t]\nx = 1\nk = 5\n").unwrap();
        let overlay: toml::Value = toml::from_str("t = 7\nk = [1, 2]\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["t"].as_integer(), Some(7));
        assert_eq!(merged["k"].as_array().map(Vec::len), Some(2));

        let scalar = toml::Value::Integer(1);
        let table: toml::Value = toml::from_str("x = 2\n").unwrap();
        assert_eq!(merge_toml(scalar, table.clone()), table);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, StickerConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r##"
temp_dir = "/var/tmp/stickers"

[export]
jpeg_quality = 65
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.temp_dir, Some(PathBuf::from("/var/tmp/stickers")));
        assert_eq!(config.jpeg_quality().value(), 65);
        assert_eq!(config.listing.order, ListingOrder::Name);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[export]\njpeg_quality = 250\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: StickerConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, StickerConfig::default());
    }
}
