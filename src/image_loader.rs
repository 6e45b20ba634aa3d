//! Image loading and directory discovery
//!
//! All decoding goes through the `image` crate. Inputs are flattened to
//! 8-bit RGB: alpha is dropped and grayscale is expanded, so every tool
//! sees the same three-channel layout regardless of the file format.
//!
//! Discovery is flat (no recursion) and returns paths sorted by name so
//! that batch output order does not depend on the filesystem.

use image::{ImageReader, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ColorCropError, Result};

/// Formats the masker can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Detect format from file extension (case-insensitive)
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Whether the encoded file can carry an alpha channel
    pub fn supports_alpha(&self) -> bool {
        matches!(self, ImageFormat::Png)
    }

    /// Matching `image` crate format for encoding
    pub fn codec(&self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// Load an image from disk as 8-bit RGB
///
/// # Errors
///
/// Returns `ColorCropError::ImageLoadError` if the file cannot be opened
/// or decoded.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path).map_err(|e| {
        ColorCropError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    // content sniffing first, extension as fallback
    let reader = reader.with_guessed_format().map_err(|e| {
        ColorCropError::image_load(format!("Failed to read image file: {}", path.display()), e)
    })?;

    let img = reader.decode().map_err(|e| {
        ColorCropError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(img.to_rgb8())
}

/// File name used to identify an image in logs and reports
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Check a path's extension against a list, ignoring case
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// List the regular files in `dir` whose extension is in `extensions`
///
/// Not recursive. Results are sorted by path.
pub fn find_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ColorCropError::directory(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ColorCropError::directory(dir, e))?.path();
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.PNG")),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("photo.xyz")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("photo.bmp")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("photo")), None);
    }

    #[test]
    fn test_alpha_support() {
        assert!(ImageFormat::Png.supports_alpha());
        assert!(!ImageFormat::Jpeg.supports_alpha());
    }

    #[test]
    fn test_has_extension_ignores_case() {
        let jpg = exts(&["jpg", "jpeg"]);
        assert!(has_extension(Path::new("a.JPG"), &jpg));
        assert!(has_extension(Path::new("a.Jpeg"), &jpg));
        assert!(!has_extension(Path::new("a.png"), &jpg));
        assert!(!has_extension(Path::new("jpg"), &jpg));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/dir/red.jpg")), "red.jpg");
    }

    #[test]
    fn test_find_images_sorted_and_filtered() {
        let dir = std::env::temp_dir().join(format!("colorcrop-find-{}", std::process::id()));
        fs::create_dir_all(dir.join("nested.jpg")).unwrap();
        for name in ["b.jpg", "A.JPG", "c.png", "notes.txt"] {
            fs::write(dir.join(name), b"").unwrap();
        }

        let found = find_images(&dir, &exts(&["jpg"])).unwrap();
        let names: Vec<String> = found.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["A.JPG", "b.jpg"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_find_images_missing_directory() {
        let err = find_images(Path::new("/nonexistent/colorcrop"), &exts(&["jpg"])).unwrap_err();
        assert!(matches!(err, ColorCropError::DirectoryError { .. }));
    }

    #[test]
    fn test_load_rgb_rejects_garbage() {
        let dir = std::env::temp_dir().join(format!("colorcrop-load-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.jpg");
        fs::write(&path, b"not an image").unwrap();

        let err = load_rgb(&path).unwrap_err();
        assert!(matches!(err, ColorCropError::ImageLoadError { .. }));
        assert!(err.is_recoverable());

        fs::remove_dir_all(&dir).ok();
    }
}
