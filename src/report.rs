//! Comma-separated color composition report
//!
//! The report is truncated and given its header once, then every image
//! appends a single row. The file is reopened for each row and closed
//! again right after, so an interrupted batch leaves every finished row
//! on disk.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::color::ColorComposition;
use crate::constants::segment::{IMAGE_COLUMN, PERCENT_PRECISION};
use crate::{ColorCropError, Result};

const LINE_END: &str = "\r\n";

/// Append-per-row writer for the composition report
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
    columns: Vec<String>,
}

impl ReportWriter {
    /// Create (or truncate) the report and write the header row
    pub fn create(path: &Path, columns: &[String]) -> Result<Self> {
        let writer = Self {
            path: path.to_path_buf(),
            columns: columns.to_vec(),
        };
        let mut file = File::create(path).map_err(|e| ColorCropError::report(path, e))?;
        file.write_all(writer.header().as_bytes())
            .map_err(|e| ColorCropError::report(path, e))?;
        Ok(writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Header line including the terminator
    pub fn header(&self) -> String {
        let mut cells = vec![IMAGE_COLUMN.to_string()];
        cells.extend(self.columns.iter().map(|c| escape_cell(c)));
        cells.join(",") + LINE_END
    }

    /// Format one row; band shares must follow the report's column order
    pub fn format_row(&self, composition: &ColorComposition) -> Result<String> {
        let names = composition.shares.iter().map(|s| &s.name);
        if !names.eq(self.columns.iter()) {
            return Err(ColorCropError::invalid(
                "report columns",
                format!("{} does not match the report header", composition.image),
            ));
        }

        let mut row = escape_cell(&composition.image);
        for share in &composition.shares {
            row.push(',');
            row.push_str(&format!("{:.*}", PERCENT_PRECISION, share.percent));
        }
        row.push_str(LINE_END);
        Ok(row)
    }

    /// Open the report in append mode, write one row, close it
    pub fn append(&self, composition: &ColorComposition) -> Result<()> {
        let row = self.format_row(composition)?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| ColorCropError::report(&self.path, e))?;
        file.write_all(row.as_bytes())
            .map_err(|e| ColorCropError::report(&self.path, e))
    }
}

/// Quote a cell if it would otherwise break the row
fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BandCount, PixelClassification};

    fn default_columns() -> Vec<String> {
        ["Red", "Yellow", "Magenta", "Pink", "White", "Orange"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn composition(image: &str, counts: &[u64]) -> ColorComposition {
        let counts = default_columns()
            .into_iter()
            .zip(counts)
            .map(|(name, &count)| BandCount { name, count })
            .collect();
        ColorComposition::new(
            image,
            PixelClassification {
                total_pixels: 100,
                counts,
            },
        )
    }

    fn temp_report(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("colorcrop-report-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_header_and_rows() {
        let path = temp_report("rows.csv");
        let writer = ReportWriter::create(&path, &default_columns()).unwrap();
        writer.append(&composition("white.jpg", &[0, 0, 0, 0, 100, 0])).unwrap();
        writer.append(&composition("mix.jpg", &[1, 0, 0, 0, 2, 0])).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("\r\n").count(), 3);
        assert!(content.ends_with("0.00\r\n"));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Image,Red,Yellow,Magenta,Pink,White,Orange",
                "white.jpg,0.00,0.00,0.00,0.00,100.00,0.00",
                "mix.jpg,33.33,0.00,0.00,0.00,66.67,0.00",
            ]
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_create_truncates_existing_report() {
        let path = temp_report("truncate.csv");
        std::fs::write(&path, "old,data\nmore\n").unwrap();

        ReportWriter::create(&path, &default_columns()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Image,Red,Yellow,Magenta,Pink,White,Orange\r\n");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_zero_valid_pixels_row() {
        let path = temp_report("zero.csv");
        let writer = ReportWriter::create(&path, &default_columns()).unwrap();
        let row = writer.format_row(&composition("dark.jpg", &[0; 6])).unwrap();
        assert_eq!(row, "dark.jpg,0.00,0.00,0.00,0.00,0.00,0.00\r\n");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let path = temp_report("mismatch.csv");
        let writer = ReportWriter::create(&path, &default_columns()[..3]).unwrap();
        let err = writer.format_row(&composition("a.jpg", &[1; 6])).unwrap_err();
        assert!(matches!(err, ColorCropError::InvalidParameter { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_cells_with_separators_are_quoted() {
        assert_eq!(escape_cell("plain.jpg"), "plain.jpg");
        assert_eq!(escape_cell("a,b.jpg"), "\"a,b.jpg\"");
        assert_eq!(escape_cell("say \"hi\".jpg"), "\"say \"\"hi\"\".jpg\"");
    }

    #[test]
    fn test_missing_directory_is_report_error() {
        let err = ReportWriter::create(Path::new("/nonexistent/dir/out.csv"), &default_columns())
            .unwrap_err();
        assert!(matches!(err, ColorCropError::ReportError { .. }));
    }
}
