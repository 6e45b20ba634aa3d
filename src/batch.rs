//! Directory-level drivers for both tools
//!
//! Images are handled one at a time in sorted order. Under
//! [`ErrorPolicy::Abort`] the first per-image failure ends the run; under
//! [`ErrorPolicy::Skip`] the image is logged, left out of the output, and
//! recorded in the returned [`BatchSummary`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::color::{ColorConverter, ColorSegmenter, HsvImage};
use crate::config::{MaskerConfig, SegmenterConfig};
use crate::constants::circle::OUTPUT_SUFFIX;
use crate::image_loader::{self, ImageFormat};
use crate::mask::{CircleMask, MaskedOutput};
use crate::report::ReportWriter;
use crate::{ColorCropError, Result};

/// What to do when a single image fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the whole batch
    #[default]
    Abort,
    /// Log the failure and continue with the next image
    Skip,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Outputs produced, one per successful input
    pub processed: Vec<PathBuf>,
    /// Inputs that failed under `ErrorPolicy::Skip`
    pub failed: Vec<(PathBuf, ColorCropError)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    /// `Err(BatchFailed)` if any image was skipped
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(ColorCropError::BatchFailed {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }

    fn record(
        &mut self,
        policy: ErrorPolicy,
        input: &Path,
        outcome: Result<PathBuf>,
    ) -> Result<()> {
        match outcome {
            Ok(output) => {
                self.processed.push(output);
                Ok(())
            }
            Err(err) if policy == ErrorPolicy::Skip && err.is_recoverable() => {
                log::warn!("Skipping {}: {}", input.display(), err);
                self.failed.push((input.to_path_buf(), err));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// True for files a previous masker run wrote
fn is_masker_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Mask one file and write the result; returns the output path
pub fn mask_file(input: &Path, config: &MaskerConfig) -> Result<PathBuf> {
    let image = image_loader::load_rgb(input)?;
    let mask = CircleMask::new(config.center_x, config.center_y, config.radius);
    let encoding = config.output_format.resolve(input);
    let output = encoding.output_path(input, config.output_dir.as_deref());

    let masked: MaskedOutput = mask.mask_image(&image, encoding);
    masked.save(&output, encoding.format())?;
    Ok(output)
}

/// Mask every matching image in `dir`
pub fn run_masker(dir: &Path, config: &MaskerConfig, policy: ErrorPolicy) -> Result<BatchSummary> {
    if let Some(out) = &config.output_dir {
        fs::create_dir_all(out).map_err(|e| ColorCropError::directory(out, e))?;
    }

    let inputs: Vec<PathBuf> = image_loader::find_images(dir, &config.extensions)?
        .into_iter()
        .filter(|p| !is_masker_output(p))
        .collect();
    log::info!("Found {} image files in {}", inputs.len(), dir.display());

    let mut summary = BatchSummary::default();
    for input in &inputs {
        let outcome = mask_file(input, config);
        if let Ok(output) = &outcome {
            log::info!("Processed and saved: {}", image_loader::display_name(output));
        }
        summary.record(policy, input, outcome)?;
    }
    Ok(summary)
}

/// Write one mask per band, named `<stem>_<band>_mask.png`
pub fn write_band_masks(
    segmenter: &ColorSegmenter,
    hsv: &HsvImage,
    stem: &str,
    debug_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for name in segmenter.table().names() {
        let Some(mask) = segmenter.band_mask(hsv, name) else {
            continue;
        };
        let path = debug_dir.join(format!("{}_{}_mask.png", stem, name.to_lowercase()));
        mask.save_with_format(&path, ImageFormat::Png.codec())
            .map_err(|e| {
                ColorCropError::image_write(format!("Failed to save {}", path.display()), e)
            })?;
        log::debug!("Saved band mask {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn segment_file(
    segmenter: &ColorSegmenter,
    report: &ReportWriter,
    input: &Path,
    debug_dir: Option<&Path>,
) -> Result<PathBuf> {
    let image = image_loader::load_rgb(input)?;
    let hsv = ColorConverter::new().to_hsv_image(&image);
    let composition = segmenter.analyze_hsv(image_loader::display_name(input), &hsv);

    if let Some(debug) = debug_dir {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        write_band_masks(segmenter, &hsv, &stem, debug)?;
    }

    // the row goes last so a failed image never leaves one behind
    report.append(&composition)?;
    Ok(input.to_path_buf())
}

/// Classify every matching image in `dir` and write the report to `output`
pub fn run_segmenter(
    dir: &Path,
    output: &Path,
    config: &SegmenterConfig,
    debug_dir: Option<&Path>,
    policy: ErrorPolicy,
) -> Result<BatchSummary> {
    let segmenter = ColorSegmenter::new(config.band_table()?);
    let inputs = image_loader::find_images(dir, &config.extensions)?;
    let report = ReportWriter::create(output, segmenter.table().names())?;
    if let Some(debug) = debug_dir {
        fs::create_dir_all(debug).map_err(|e| ColorCropError::directory(debug, e))?;
    }
    log::info!("Found {} image files in {}", inputs.len(), dir.display());

    let mut summary = BatchSummary::default();
    for input in &inputs {
        let outcome = segment_file(&segmenter, &report, input, debug_dir);
        if outcome.is_ok() {
            log::info!("Processed: {}", image_loader::display_name(input));
        }
        summary.record(policy, input, outcome)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masker_outputs_recognized() {
        assert!(is_masker_output(Path::new("plate_cropped.JPG")));
        assert!(is_masker_output(Path::new("dir/plate_cropped.png")));
        assert!(!is_masker_output(Path::new("cropped_plate.jpg")));
    }

    #[test]
    fn test_summary_result() {
        let summary = BatchSummary::default();
        assert!(summary.into_result().is_ok());

        let mut summary = BatchSummary::default();
        summary.processed.push(PathBuf::from("a.jpg"));
        summary.failed.push((
            PathBuf::from("b.jpg"),
            ColorCropError::ImageLoadError {
                message: "bad".into(),
                source: None,
            },
        ));
        match summary.into_result() {
            Err(ColorCropError::BatchFailed { failed, total }) => {
                assert_eq!((failed, total), (1, 2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_record_respects_policy() {
        let input = Path::new("x.jpg");
        let failure = || {
            Err(ColorCropError::ImageLoadError {
                message: "bad".into(),
                source: None,
            })
        };

        let mut summary = BatchSummary::default();
        assert!(summary.record(ErrorPolicy::Abort, input, failure()).is_err());

        assert!(summary.record(ErrorPolicy::Skip, input, failure()).is_ok());
        assert_eq!(summary.failed.len(), 1);

        let fatal = Err(ColorCropError::invalid("radius", 0));
        assert!(summary.record(ErrorPolicy::Skip, input, fatal).is_err());
    }
}
