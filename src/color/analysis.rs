//! HSV band classification and percentage composition
//!
//! Counts, for every band of a [`BandTable`], the pixels falling inside any
//! of the band's ranges. Ranges sharing a name are OR-merged so a pixel is
//! counted at most once per band, while a pixel matching two different
//! bands counts toward both.
//!
//! Percentages are relative to the sum of the per-band counts, so they add
//! up to 100 whenever at least one pixel matched, and are all zero otherwise.

use image::{GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{BandTable, ColorConverter, HsvImage};
use crate::constants::mask::{OPAQUE, TRANSPARENT};
use crate::{image_loader, Result};

/// Pixel count for one band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCount {
    pub name: String,
    pub count: u64,
}

/// Percentage share of one band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandShare {
    pub name: String,
    pub percent: f64,
}

/// Per-band pixel counts of one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelClassification {
    /// Number of pixels in the image
    pub total_pixels: u64,
    /// Counts in band order
    pub counts: Vec<BandCount>,
}

impl PixelClassification {
    /// Sum of all band counts; overlapping bands are counted once each
    pub fn valid_pixels(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    pub fn count(&self, name: &str) -> Option<u64> {
        self.counts.iter().find(|c| c.name == name).map(|c| c.count)
    }

    /// Share of each band among valid pixels, 0 when nothing matched
    pub fn percentages(&self) -> Vec<BandShare> {
        let total = self.valid_pixels();
        self.counts
            .iter()
            .map(|c| BandShare {
                name: c.name.clone(),
                percent: if total > 0 {
                    c.count as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}

/// Band composition of one named image, ready to be reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorComposition {
    /// Image identifier, normally the file name
    pub image: String,
    pub classification: PixelClassification,
    pub shares: Vec<BandShare>,
}

impl ColorComposition {
    pub fn new(image: impl Into<String>, classification: PixelClassification) -> Self {
        let shares = classification.percentages();
        Self {
            image: image.into(),
            classification,
            shares,
        }
    }

    pub fn percent(&self, name: &str) -> Option<f64> {
        self.shares.iter().find(|s| s.name == name).map(|s| s.percent)
    }
}

/// Classifies pixels against an immutable band table
#[derive(Debug, Clone, Default)]
pub struct ColorSegmenter {
    table: BandTable,
    converter: ColorConverter,
}

impl ColorSegmenter {
    pub fn new(table: BandTable) -> Self {
        Self {
            table,
            converter: ColorConverter::new(),
        }
    }

    pub fn table(&self) -> &BandTable {
        &self.table
    }

    /// Count pixels per band, OR-merging ranges that share a name
    pub fn classify(&self, image: &HsvImage) -> PixelClassification {
        let mut counts = vec![0u64; self.table.band_count()];
        let mut hit = vec![false; self.table.band_count()];

        for &pixel in image.pixels() {
            hit.iter_mut().for_each(|h| *h = false);
            for (band, range) in self.table.indexed_ranges() {
                if !hit[band] && range.contains(pixel) {
                    hit[band] = true;
                    counts[band] += 1;
                }
            }
        }

        let counts: Vec<BandCount> = self
            .table
            .names()
            .iter()
            .zip(counts)
            .map(|(name, count)| BandCount {
                name: name.clone(),
                count,
            })
            .collect();

        for c in &counts {
            log::debug!("band {}: {} pixels", c.name, c.count);
        }

        PixelClassification {
            total_pixels: image.len() as u64,
            counts,
        }
    }

    /// Binary mask of a band (255 inside, 0 outside); `None` for unknown names
    pub fn band_mask(&self, image: &HsvImage, name: &str) -> Option<GrayImage> {
        let band = self.table.band_index(name)?;
        Some(GrayImage::from_fn(image.width(), image.height(), |x, y| {
            let inside = image
                .get(x, y)
                .is_some_and(|pixel| self.table.band_contains(band, pixel));
            Luma([if inside { OPAQUE } else { TRANSPARENT }])
        }))
    }

    /// Classify an already converted image
    pub fn analyze_hsv(&self, name: impl Into<String>, image: &HsvImage) -> ColorComposition {
        ColorComposition::new(name, self.classify(image))
    }

    /// Convert and classify an RGB image
    pub fn analyze_image(&self, name: impl Into<String>, image: &RgbImage) -> ColorComposition {
        self.analyze_hsv(name, &self.converter.to_hsv_image(image))
    }

    /// Load, convert and classify an image file
    pub fn analyze_path(&self, path: &Path) -> Result<ColorComposition> {
        let image = image_loader::load_rgb(path)?;
        Ok(self.analyze_image(image_loader::display_name(path), &image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorRange, Hsv8};
    use approx::assert_abs_diff_eq;
    use image::Rgb;

    fn shares_sum(shares: &[BandShare]) -> f64 {
        shares.iter().map(|s| s.percent).sum()
    }

    #[test]
    fn test_pixels_outside_every_band_give_zero() {
        // dark gray: too dark for White, unsaturated for the rest
        let image = HsvImage::filled(4, 4, Hsv8::new(90, 0, 40));
        let result = ColorSegmenter::default().classify(&image);

        assert_eq!(result.total_pixels, 16);
        assert_eq!(result.valid_pixels(), 0);
        for share in result.percentages() {
            assert_eq!(share.percent, 0.0);
        }
    }

    #[test]
    fn test_single_band_image_is_full_share() {
        let image = HsvImage::filled(5, 5, Hsv8::new(32, 200, 200));
        let shares = ColorSegmenter::default().classify(&image).percentages();

        for share in &shares {
            if share.name == "Yellow" {
                assert_abs_diff_eq!(share.percent, 100.0);
            } else {
                assert_eq!(share.percent, 0.0, "{}", share.name);
            }
        }
    }

    #[test]
    fn test_red_subranges_merge_into_one_band() {
        let pixels = vec![
            Hsv8::new(3, 200, 200),   // low red
            Hsv8::new(175, 200, 200), // high red
            Hsv8::new(90, 200, 200),  // no band
        ];
        let image = HsvImage::from_pixels(3, 1, pixels).unwrap();
        let result = ColorSegmenter::default().classify(&image);

        assert_eq!(result.count("Red"), Some(2));
        assert_eq!(result.valid_pixels(), 2);
        assert_eq!(result.counts.len(), 6);
    }

    #[test]
    fn test_overlapping_aliases_count_once() {
        let table = BandTable::new(vec![
            ColorRange::new("Red", Hsv8::new(0, 0, 0), Hsv8::new(20, 255, 255)),
            ColorRange::new("Red", Hsv8::new(10, 0, 0), Hsv8::new(30, 255, 255)),
            ColorRange::new("Any", Hsv8::new(0, 0, 0), Hsv8::new(179, 255, 255)),
        ])
        .unwrap();
        let image = HsvImage::filled(2, 2, Hsv8::new(15, 100, 100));
        let result = ColorSegmenter::new(table).classify(&image);

        assert_eq!(result.count("Red"), Some(4));
        // distinct bands still double count
        assert_eq!(result.count("Any"), Some(4));
        assert_eq!(result.valid_pixels(), 8);

        let shares = result.percentages();
        assert_abs_diff_eq!(shares[0].percent, 50.0);
        assert_abs_diff_eq!(shares_sum(&shares), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mixed_image_percentages_sum_to_hundred() {
        let mut image = RgbImage::new(10, 10);
        for (x, _, pixel) in image.enumerate_pixels_mut() {
            *pixel = match x % 4 {
                0 => Rgb([255, 0, 0]),
                1 => Rgb([255, 255, 255]),
                2 => Rgb([240, 200, 0]),
                _ => Rgb([10, 10, 10]),
            };
        }

        let composition = ColorSegmenter::default().analyze_image("mixed.jpg", &image);
        assert_eq!(composition.image, "mixed.jpg");
        assert_abs_diff_eq!(shares_sum(&composition.shares), 100.0, epsilon = 0.01);
        assert!(composition.percent("Red").unwrap() > 0.0);
        assert!(composition.percent("White").unwrap() > 0.0);
        assert_eq!(composition.percent("Blue"), None);
    }

    #[test]
    fn test_band_mask_marks_members() {
        let pixels = vec![Hsv8::new(3, 200, 200), Hsv8::new(90, 200, 200)];
        let image = HsvImage::from_pixels(2, 1, pixels).unwrap();
        let segmenter = ColorSegmenter::default();

        let mask = segmenter.band_mask(&image, "Red").unwrap();
        assert_eq!(mask.get_pixel(0, 0)[0], OPAQUE);
        assert_eq!(mask.get_pixel(1, 0)[0], TRANSPARENT);
        assert!(segmenter.band_mask(&image, "Blue").is_none());
    }
}
