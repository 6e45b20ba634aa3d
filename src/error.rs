//! Error types for the colorcrop library

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for colorcrop operations
pub type Result<T> = std::result::Result<T, ColorCropError>;

/// Error types for masking and color segmentation runs
#[derive(Error, Debug)]
pub enum ColorCropError {
    /// Image file could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Output image could not be encoded or written
    #[error("Failed to write image: {message}")]
    ImageWriteError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input directory missing or unreadable
    #[error("Cannot read directory {}: {source}", .path.display())]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report file could not be created or appended
    #[error("Report error for {}: {source}", .path.display())]
    ReportError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Output format cannot hold the masked image (e.g. alpha in JPEG)
    #[error("Unsupported output format for {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// One or more files failed during a batch run that was allowed to continue
    #[error("{failed} of {total} images failed")]
    BatchFailed { failed: usize, total: usize },
}

impl ColorCropError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an image write error with context
    pub fn image_write<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageWriteError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn directory(path: &Path, source: std::io::Error) -> Self {
        Self::DirectoryError {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn report(path: &Path, source: std::io::Error) -> Self {
        Self::ReportError {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error only concerns a single file of a batch
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ColorCropError::ImageLoadError { .. }
                | ColorCropError::ImageWriteError { .. }
                | ColorCropError::UnsupportedFormat { .. }
        )
    }

    /// Get user-friendly error description for command-line display
    pub fn user_message(&self) -> String {
        match self {
            ColorCropError::ImageLoadError { .. } => {
                "Could not load an image. Check that the file is a valid picture, or pass --keep-going to skip it.".to_string()
            }
            ColorCropError::ImageWriteError { .. } => {
                "Could not write the output image. Check that the output directory is writable.".to_string()
            }
            ColorCropError::DirectoryError { path, .. } => {
                format!("Input directory {} does not exist or cannot be read.", path.display())
            }
            ColorCropError::ReportError { path, .. } => {
                format!("Cannot write the report to {}.", path.display())
            }
            ColorCropError::ConfigError { .. } | ColorCropError::InvalidParameter { .. } => {
                "The configuration is invalid. Regenerate it with colorcrop-config.".to_string()
            }
            ColorCropError::BatchFailed { failed, .. } => {
                format!("{} image(s) were skipped; see the log for details.", failed)
            }
            _ => "Processing failed.".to_string(),
        }
    }
}
