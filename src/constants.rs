//! Fixed parameters for circular masking and HSV color segmentation
//!
//! This module contains compile-time constants shared by the masker,
//! the segmenter and their configuration defaults.

/// OpenCV-style 8-bit HSV channel limits
pub mod hsv {
    /// Hue is stored as degrees / 2, so valid values are `0..HUE_MAX`
    pub const HUE_MAX: u8 = 180;

    /// Maximum saturation value
    pub const SATURATION_MAX: u8 = u8::MAX;
}

/// Circular masker defaults
pub mod circle {
    /// Horizontal center of the crop circle in pixels
    pub const CENTER_X: i64 = 2000;

    /// Vertical center of the crop circle in pixels
    pub const CENTER_Y: i64 = 1350;

    /// Radius of the crop circle in pixels
    pub const RADIUS: u32 = 600;

    /// Suffix appended to the input stem for masked outputs
    pub const OUTPUT_SUFFIX: &str = "_cropped";

    /// Extension used for the black-background branch
    pub const JPEG_EXTENSION: &str = "JPG";

    /// Extension used for the transparent-background branch
    pub const PNG_EXTENSION: &str = "png";

    /// Extensions discovered by default (compared case-insensitively)
    pub const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
}

/// Values of single-channel masks and alpha channels
pub mod mask {
    /// Pixel kept: inside the circle, or member of the band
    pub const OPAQUE: u8 = u8::MAX;

    /// Pixel dropped
    pub const TRANSPARENT: u8 = 0;
}

/// Color segmenter defaults
pub mod segment {
    /// First column of every report row
    pub const IMAGE_COLUMN: &str = "Image";

    /// Extensions discovered by default (compared case-insensitively)
    pub const INPUT_EXTENSIONS: &[&str] = &["jpg"];

    /// Decimal places used for percentages in the report
    pub const PERCENT_PRECISION: usize = 2;

    /// Default band table: (name, lower HSV, upper HSV).
    ///
    /// Red is split in two around the hue wrap-around; both halves share the
    /// display name and are merged before counting.
    pub const DEFAULT_BANDS: &[(&str, [u8; 3], [u8; 3])] = &[
        ("Red", [0, 50, 50], [15, 255, 255]),
        ("Red", [170, 50, 50], [195, 255, 255]),
        ("Yellow", [25, 15, 100], [40, 255, 255]),
        ("Magenta", [140, 100, 100], [170, 255, 255]),
        ("Pink", [120, 15, 100], [160, 80, 255]),
        ("White", [0, 0, 200], [180, 17, 255]),
        ("Orange", [15, 15, 100], [26, 255, 255]),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band_bounds_ordered() {
        for (name, lower, upper) in segment::DEFAULT_BANDS {
            for channel in 0..3 {
                assert!(
                    lower[channel] <= upper[channel],
                    "{} channel {} inverted",
                    name,
                    channel
                );
            }
        }
    }

    #[test]
    fn test_red_is_split_around_wraparound() {
        let reds: Vec<_> = segment::DEFAULT_BANDS
            .iter()
            .filter(|(name, _, _)| *name == "Red")
            .collect();
        assert_eq!(reds.len(), 2);
        assert_eq!(reds[0].1[0], 0);
        assert!(reds[1].2[0] >= hsv::HUE_MAX);
    }
}
