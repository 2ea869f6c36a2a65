//! Image decoding and directory scanning

use crate::BatchError;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use texture_engine::GrayscaleMatrix;
use tracing::debug;

/// Convert a decoded image to an 8-bit grayscale matrix.
///
/// Single-channel 8-bit images are used as-is; anything else goes through
/// RGB and the luminance formula 0.299*R + 0.587*G + 0.114*B.
pub fn to_grayscale(image: &DynamicImage) -> Result<GrayscaleMatrix, BatchError> {
    if let Some(gray) = image.as_luma8() {
        let (width, height) = gray.dimensions();
        return Ok(GrayscaleMatrix::from_luma(
            width as usize,
            height as usize,
            gray.as_raw().clone(),
        )?);
    }

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut luma = Vec::with_capacity(width as usize * height as usize);
    for pixel in rgb.as_raw().chunks_exact(3) {
        let y = pixel[0] as f32 * 0.299 + pixel[1] as f32 * 0.587 + pixel[2] as f32 * 0.114;
        luma.push(y.round().min(255.0) as u8);
    }

    Ok(GrayscaleMatrix::from_luma(width as usize, height as usize, luma)?)
}

/// Decode the image at `path` into a grayscale matrix
pub fn load_grayscale(path: &Path) -> Result<GrayscaleMatrix, BatchError> {
    let image = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(source) => BatchError::Io {
            path: path.to_path_buf(),
            source,
        },
        source => BatchError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let gray = to_grayscale(&image)?;
    debug!("Loaded {} ({}x{})", path.display(), gray.cols(), gray.rows());
    Ok(gray)
}

/// Whether `path` ends in one of `extensions` (case-insensitive, leading dot optional)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// List image files directly inside `dir`, sorted by path
pub fn scan_directory(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, BatchError> {
    let io_error = |source| BatchError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && has_extension(&path, extensions) {
            paths.push(path);
        }
    }
    paths.sort();

    debug!("Found {} images in {}", paths.len(), dir.display());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn extensions() -> Vec<String> {
        vec!["jpg".into(), ".PNG".into()]
    }

    #[test]
    fn test_luminance_weights() {
        let mut rgb = RgbImage::new(3, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));

        let gray = to_grayscale(&DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(gray.shape(), (1, 3));
        assert_eq!(gray.get(0, 0), Some(76));
        assert_eq!(gray.get(0, 1), Some(150));
        assert_eq!(gray.get(0, 2), Some(29));
    }

    #[test]
    fn test_gray_image_passthrough() {
        let gray = GrayImage::from_fn(4, 2, |x, y| Luma([(x * 10 + y) as u8]));
        let matrix = to_grayscale(&DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(matrix.shape(), (2, 4));
        assert_eq!(matrix.get(1, 3), Some(31));
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        GrayImage::from_fn(5, 3, |x, _| Luma([x as u8 * 40])).save(&path).unwrap();

        let matrix = load_grayscale(&path).unwrap();
        assert_eq!(matrix.shape(), (3, 5));
        assert_eq!(matrix.get(2, 4), Some(160));
    }

    #[test]
    fn test_load_failures() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.png");
        assert!(matches!(load_grayscale(&missing), Err(BatchError::Io { .. })));

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"not an image").unwrap();
        assert!(matches!(load_grayscale(&garbage), Err(BatchError::Decode { .. })));
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b.jpg"), &extensions()));
        assert!(has_extension(Path::new("a/b.JPG"), &extensions()));
        assert!(has_extension(Path::new("b.png"), &extensions()));
        assert!(!has_extension(Path::new("b.jpeg"), &extensions()));
        assert!(!has_extension(Path::new("README"), &extensions()));
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let paths = scan_directory(dir.path(), &extensions()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            scan_directory(&missing, &extensions()),
            Err(BatchError::Io { .. })
        ));
    }
}
