//! Color conversion and band classification module
//!
//! This module converts RGB images to 8-bit HSV, holds the named range
//! table, and computes per-band pixel composition.

pub mod analysis;
pub mod conversion;
pub mod range;

pub use analysis::{BandCount, BandShare, ColorComposition, ColorSegmenter, PixelClassification};
pub use conversion::{ColorConverter, Hsv8, HsvImage};
pub use range::{BandTable, ColorRange};
