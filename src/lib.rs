//! # colorcrop
//!
//! Batch tools for still images:
//! - **Circular masking**: keep a disc of each image and write it with a
//!   black or transparent background
//! - **Color segmentation**: classify pixels into named HSV bands and
//!   report each band's share of the matched pixels
//!
//! ## Example
//!
//! ```rust,no_run
//! use colorcrop::analyze_colors;
//! use std::path::Path;
//!
//! let composition = analyze_colors(Path::new("photo.jpg"))?;
//! for share in &composition.shares {
//!     println!("{}: {:.2}%", share.name, share.percent);
//! }
//! # Ok::<(), colorcrop::ColorCropError>(())
//! ```

use std::path::{Path, PathBuf};

pub mod batch;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod mask;
pub mod report;

pub use batch::{BatchSummary, ErrorPolicy};
pub use color::{BandTable, ColorComposition, ColorRange, ColorSegmenter, Hsv8};
pub use config::{Config, MaskerConfig, SegmenterConfig};
pub use error::{ColorCropError, Result};
pub use mask::{CircleMask, OutputFormat};

/// Band composition of one image file using the default band table
///
/// # Errors
///
/// Returns `ColorCropError::ImageLoadError` if the image cannot be opened
/// or decoded.
pub fn analyze_colors(image_path: &Path) -> Result<ColorComposition> {
    ColorSegmenter::default().analyze_path(image_path)
}

/// Mask one image file with the given settings and return the output path
///
/// # Errors
///
/// Returns an error if the image cannot be loaded or the result cannot be
/// written.
pub fn crop_circle(image_path: &Path, config: &MaskerConfig) -> Result<PathBuf> {
    batch::mask_file(image_path, config)
}
