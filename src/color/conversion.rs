//! Color space conversion utilities
//!
//! Converts 8-bit sRGB pixels to the 8-bit HSV layout used by the band
//! table (the OpenCV convention):
//! - hue stored as degrees / 2, range `0..180`
//! - saturation scaled to `0..=255`
//! - value equal to the largest RGB channel

use image::RgbImage;
use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use crate::constants::hsv;

/// One pixel in 8-bit HSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsv8 {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv8 {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl From<[u8; 3]> for Hsv8 {
    fn from(channels: [u8; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }
}

/// Row-major HSV image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsvImage {
    width: u32,
    height: u32,
    pixels: Vec<Hsv8>,
}

impl HsvImage {
    /// Wrap a pixel buffer; `None` if its length is not `width * height`
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Hsv8>) -> Option<Self> {
        if pixels.len() as u64 != width as u64 * height as u64 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image of a single repeated pixel
    pub fn filled(width: u32, height: u32, pixel: Hsv8) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Hsv8] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Hsv8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// RGB to HSV converter
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to 8-bit HSV
    pub fn rgb_to_hsv8(&self, r: u8, g: u8, b: u8) -> Hsv8 {
        let color: Hsv = Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());

        let mut hue = (color.hue.into_positive_degrees() / 2.0).round() as u16;
        if hue >= hsv::HUE_MAX as u16 {
            hue -= hsv::HUE_MAX as u16;
        }
        let saturation = (color.saturation * hsv::SATURATION_MAX as f32)
            .round()
            .clamp(0.0, hsv::SATURATION_MAX as f32) as u8;

        Hsv8::new(hue as u8, saturation, r.max(g).max(b))
    }

    /// Convert a whole RGB image
    pub fn to_hsv_image(&self, image: &RgbImage) -> HsvImage {
        let pixels = image
            .pixels()
            .map(|p| self.rgb_to_hsv8(p[0], p[1], p[2]))
            .collect();
        HsvImage {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }
}
