//! Configuration structures for the masking and segmentation tools.
//!
//! Both tools run with built-in defaults. A JSON file can override them,
//! and command-line flags override the file:
//!
//! ```no_run
//! use colorcrop::Config;
//! use std::path::Path;
//!
//! // Load from file
//! let config = Config::from_json_file(Path::new("colorcrop.json"))?;
//!
//! // Or use defaults
//! let config = Config::default();
//! # Ok::<(), colorcrop::ColorCropError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`MaskerConfig`]: circle geometry, output encoding, discovery filter
//! - [`SegmenterConfig`]: HSV band table and discovery filter

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::{BandTable, ColorRange};
use crate::constants::{circle, segment};
use crate::mask::OutputFormat;
use crate::{ColorCropError, Result};

/// Complete configuration for both tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Circular masker settings
    #[serde(default)]
    pub masker: MaskerConfig,

    /// Color segmenter settings
    #[serde(default)]
    pub segmenter: SegmenterConfig,
}

/// Circular masker parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskerConfig {
    /// Circle center column; may lie outside the image
    pub center_x: i64,

    /// Circle center row; may lie outside the image
    pub center_y: i64,

    /// Circle radius in pixels
    pub radius: u32,

    /// Output encoding selection
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Input extensions, compared case-insensitively
    pub extensions: Vec<String>,

    /// Where masked images go; next to the input when absent
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for MaskerConfig {
    fn default() -> Self {
        Self {
            center_x: circle::CENTER_X,
            center_y: circle::CENTER_Y,
            radius: circle::RADIUS,
            output_format: OutputFormat::Auto,
            extensions: to_strings(circle::INPUT_EXTENSIONS),
            output_dir: None,
        }
    }
}

/// Color segmenter parameters.
///
/// Bands sharing a name are merged; report columns follow the order in
/// which each name first appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Input extensions, compared case-insensitively
    pub extensions: Vec<String>,

    /// HSV band table
    pub bands: Vec<ColorRange>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            extensions: to_strings(segment::INPUT_EXTENSIONS),
            bands: BandTable::default().ranges().to_vec(),
        }
    }
}

impl SegmenterConfig {
    /// Build the immutable band table described by this configuration
    pub fn band_table(&self) -> Result<BandTable> {
        BandTable::new(self.bands.clone())
    }
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ColorCropError::config(format!("cannot read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ColorCropError::config(format!("cannot parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ColorCropError::config("cannot serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            ColorCropError::config(format!("cannot write {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Reject settings neither tool can run with
    pub fn validate(&self) -> Result<()> {
        if self.masker.radius == 0 {
            return Err(ColorCropError::invalid("masker.radius", 0));
        }
        if self.masker.extensions.is_empty() {
            return Err(ColorCropError::invalid("masker.extensions", "[]"));
        }
        if self.segmenter.extensions.is_empty() {
            return Err(ColorCropError::invalid("segmenter.extensions", "[]"));
        }
        self.segmenter.band_table()?;
        Ok(())
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
