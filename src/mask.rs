//! Circular crop masks
//!
//! A [`CircleMask`] keeps the pixels whose center lies within `radius` of
//! the circle center (boundary included). Everything else is either set to
//! black ([`MaskedOutput::Rgb`]) or made transparent through an alpha
//! channel ([`MaskedOutput::Rgba`]). The center may lie outside the image,
//! in which case only the overlapping part of the disc survives.

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::circle::{JPEG_EXTENSION, OUTPUT_SUFFIX, PNG_EXTENSION};
use crate::constants::mask::{OPAQUE, TRANSPARENT};
use crate::image_loader::ImageFormat;
use crate::{ColorCropError, Result};

/// Which encoding the masker writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PNG with alpha when the input is a PNG, JPEG with black background otherwise
    #[default]
    Auto,
    /// JPEG, outside pixels black
    Jpeg,
    /// PNG, outside pixels transparent
    Png,
}

impl OutputFormat {
    /// Pick the concrete encoding for a given input file
    pub fn resolve(self, input: &Path) -> Encoding {
        match self {
            OutputFormat::Jpeg => Encoding::BlackJpeg,
            OutputFormat::Png => Encoding::TransparentPng,
            OutputFormat::Auto => match ImageFormat::from_extension(input) {
                Some(ImageFormat::Png) => Encoding::TransparentPng,
                _ => Encoding::BlackJpeg,
            },
        }
    }
}

/// Concrete output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    BlackJpeg,
    TransparentPng,
}

impl Encoding {
    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::BlackJpeg => JPEG_EXTENSION,
            Encoding::TransparentPng => PNG_EXTENSION,
        }
    }

    pub fn format(&self) -> ImageFormat {
        match self {
            Encoding::BlackJpeg => ImageFormat::Jpeg,
            Encoding::TransparentPng => ImageFormat::Png,
        }
    }

    /// `<stem>_cropped.<ext>` in `output_dir`, or next to the input
    pub fn output_path(&self, input: &Path, output_dir: Option<&Path>) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!("{}{}.{}", stem, OUTPUT_SUFFIX, self.extension());
        match output_dir {
            Some(dir) => dir.join(name),
            None => input.with_file_name(name),
        }
    }
}

/// Filled circle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleMask {
    center_x: i64,
    center_y: i64,
    radius: u32,
}

impl CircleMask {
    pub fn new(center_x: i64, center_y: i64, radius: u32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    pub fn center(&self) -> (i64, i64) {
        (self.center_x, self.center_y)
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// True if pixel `(x, y)` lies inside the circle or on its boundary
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        // squared distances fit in u128 for any i64 center
        let dx = (x as i128 - self.center_x as i128).unsigned_abs();
        let dy = (y as i128 - self.center_y as i128).unsigned_abs();
        let r = self.radius as u128;
        dx * dx + dy * dy <= r * r
    }

    /// Single-channel mask covering `width` x `height`
    pub fn to_luma(&self, width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([if self.contains(x, y) { OPAQUE } else { TRANSPARENT }])
        })
    }

    /// Zero every channel outside the circle
    pub fn apply_black(&self, image: &RgbImage) -> RgbImage {
        RgbImage::from_fn(image.width(), image.height(), |x, y| {
            if self.contains(x, y) {
                *image.get_pixel(x, y)
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    /// Keep RGB unchanged and use the mask as alpha
    pub fn apply_alpha(&self, image: &RgbImage) -> RgbaImage {
        RgbaImage::from_fn(image.width(), image.height(), |x, y| {
            let Rgb([r, g, b]) = *image.get_pixel(x, y);
            let alpha = if self.contains(x, y) { OPAQUE } else { TRANSPARENT };
            Rgba([r, g, b, alpha])
        })
    }

    /// Mask an image for the given encoding
    pub fn mask_image(&self, image: &RgbImage, encoding: Encoding) -> MaskedOutput {
        match encoding {
            Encoding::BlackJpeg => MaskedOutput::Rgb(self.apply_black(image)),
            Encoding::TransparentPng => MaskedOutput::Rgba(self.apply_alpha(image)),
        }
    }
}

/// Result of masking, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub enum MaskedOutput {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl MaskedOutput {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            MaskedOutput::Rgb(image) => image.dimensions(),
            MaskedOutput::Rgba(image) => image.dimensions(),
        }
    }

    /// Encode to `path` using `format`; RGBA needs a format with alpha
    pub fn save(&self, path: &Path, format: ImageFormat) -> Result<()> {
        if matches!(self, MaskedOutput::Rgba(_)) && !format.supports_alpha() {
            return Err(ColorCropError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
        let saved = match self {
            MaskedOutput::Rgb(image) => image.save_with_format(path, format.codec()),
            MaskedOutput::Rgba(image) => image.save_with_format(path, format.codec()),
        };
        saved.map_err(|e| {
            ColorCropError::image_write(format!("Failed to save {}", path.display()), e)
        })
    }
}
