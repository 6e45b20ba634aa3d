//! Named HSV ranges and the band table built from them

use serde::{Deserialize, Serialize};

use super::Hsv8;
use crate::constants::segment;
use crate::{ColorCropError, Result};

/// Inclusive HSV box with a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub name: String,
    pub lower: Hsv8,
    pub upper: Hsv8,
}

impl ColorRange {
    pub fn new(name: impl Into<String>, lower: Hsv8, upper: Hsv8) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
        }
    }

    /// True if every channel lies within `[lower, upper]`
    #[inline]
    pub fn contains(&self, pixel: Hsv8) -> bool {
        (self.lower.h..=self.upper.h).contains(&pixel.h)
            && (self.lower.s..=self.upper.s).contains(&pixel.s)
            && (self.lower.v..=self.upper.v).contains(&pixel.v)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ColorCropError::invalid("band.name", "\"\""));
        }
        let channels = [
            ("h", self.lower.h, self.upper.h),
            ("s", self.lower.s, self.upper.s),
            ("v", self.lower.v, self.upper.v),
        ];
        for (channel, lower, upper) in channels {
            if lower > upper {
                return Err(ColorCropError::invalid(
                    format!("{}.{}", self.name, channel),
                    format!("{} > {}", lower, upper),
                ));
            }
        }
        Ok(())
    }
}

/// Immutable, ordered table of color ranges.
///
/// Ranges sharing a name form one band. Band order is the order in which
/// each name first appears in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTable {
    ranges: Vec<ColorRange>,
    names: Vec<String>,
    // band index for each range
    band_of: Vec<usize>,
}

impl BandTable {
    pub fn new(ranges: Vec<ColorRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(ColorCropError::invalid("bands", "[]"));
        }

        for range in &ranges {
            range.validate()?;
        }
        let (names, band_of) = index_bands(&ranges);

        Ok(Self {
            ranges,
            names,
            band_of,
        })
    }

    pub fn ranges(&self) -> &[ColorRange] {
        &self.ranges
    }

    /// Distinct band names in report order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn band_count(&self) -> usize {
        self.names.len()
    }

    pub fn band_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Ranges paired with the index of the band they belong to
    pub fn indexed_ranges(&self) -> impl Iterator<Item = (usize, &ColorRange)> {
        self.band_of.iter().copied().zip(self.ranges.iter())
    }

    /// True if any range of band `index` contains the pixel
    pub fn band_contains(&self, index: usize, pixel: Hsv8) -> bool {
        self.indexed_ranges()
            .any(|(band, range)| band == index && range.contains(pixel))
    }
}

impl Default for BandTable {
    fn default() -> Self {
        let ranges: Vec<ColorRange> = segment::DEFAULT_BANDS
            .iter()
            .map(|(name, lower, upper)| {
                ColorRange::new(*name, Hsv8::from(*lower), Hsv8::from(*upper))
            })
            .collect();
        let (names, band_of) = index_bands(&ranges);
        Self {
            ranges,
            names,
            band_of,
        }
    }
}

fn index_bands(ranges: &[ColorRange]) -> (Vec<String>, Vec<usize>) {
    let mut names: Vec<String> = Vec::new();
    let band_of = ranges
        .iter()
        .map(|range| match names.iter().position(|n| *n == range.name) {
            Some(index) => index,
            None => {
                names.push(range.name.clone());
                names.len() - 1
            }
        })
        .collect();
    (names, band_of)
}
