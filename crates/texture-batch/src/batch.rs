//! Directory batch processing

use crate::loader::{load_grayscale, scan_directory};
use crate::{AnalysisConfig, BatchError};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use texture_engine::{CoOccurrenceMatrix, Displacement, FeatureExtractor, FeatureRecord};
use tracing::{info, warn};

/// An image that could not be analyzed
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    /// Image path
    pub path: PathBuf,
    /// Rendered error
    pub error: String,
}

/// Outcome of analyzing a set of images
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Co-occurrence displacement every record was computed at
    pub displacement: Displacement,
    /// Gray levels every record was computed with
    pub gray_levels: usize,
    /// Records of successfully analyzed images, in input order
    pub records: Vec<FeatureRecord>,
    /// Skipped images, in input order
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of images attempted
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Runs the feature extractor over image files
pub struct BatchProcessor {
    extractor: FeatureExtractor,
    extensions: Vec<String>,
    parallel: bool,
}

impl BatchProcessor {
    /// Create a new batch processor
    pub fn new(extractor: FeatureExtractor, extensions: Vec<String>, parallel: bool) -> Self {
        Self {
            extractor,
            extensions,
            parallel,
        }
    }

    /// Create a batch processor from configuration
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, BatchError> {
        Ok(Self::new(
            config.extractor()?,
            config.extensions.clone(),
            config.parallel,
        ))
    }

    /// Extractor used for every image
    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Analyze a single image file
    pub fn process_file(&self, path: &Path) -> Result<FeatureRecord, BatchError> {
        let image = load_grayscale(path)?;
        Ok(self.extractor.extract(path.display().to_string(), &image)?)
    }

    /// Analyze a single image file, also returning its co-occurrence matrix
    pub fn process_file_with_matrix(
        &self,
        path: &Path,
    ) -> Result<(FeatureRecord, CoOccurrenceMatrix), BatchError> {
        let image = load_grayscale(path)?;
        let glcm = self.extractor.co_occurrence(&image)?;
        let record = self.extractor.extract(path.display().to_string(), &image)?;
        Ok((record, glcm))
    }

    /// Analyze every path; failures are logged and collected, never fatal
    pub fn process_paths(&self, paths: &[PathBuf]) -> BatchReport {
        let results: Vec<(&PathBuf, Result<FeatureRecord, BatchError>)> = if self.parallel {
            paths
                .par_iter()
                .map(|path| (path, self.process_file(path)))
                .collect()
        } else {
            paths
                .iter()
                .map(|path| (path, self.process_file(path)))
                .collect()
        };

        let mut report = BatchReport {
            displacement: self.extractor.displacement(),
            gray_levels: self.extractor.gray_levels(),
            ..Default::default()
        };
        for (path, result) in results {
            match result {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    report.failures.push(BatchFailure {
                        path: path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        report
    }

    /// Analyze every matching image directly inside `dir`.
    ///
    /// Only failing to list the directory is an error.
    pub fn process_directory(&self, dir: &Path) -> Result<BatchReport, BatchError> {
        let paths = scan_directory(dir, &self.extensions)?;
        info!("Processing {} images from {}", paths.len(), dir.display());

        let report = self.process_paths(&paths);
        info!(
            "Finished {}: {} analyzed, {} skipped",
            dir.display(),
            report.records.len(),
            report.failures.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn write_images(dir: &Path) {
        // Vertical stripes of width 1
        GrayImage::from_fn(8, 8, |x, _| Luma([if x % 2 == 0 { 0 } else { 255 }]))
            .save(dir.join("striped.png"))
            .unwrap();
        // Flat
        GrayImage::from_pixel(8, 8, Luma([128]))
            .save(dir.join("flat.png"))
            .unwrap();
        // Color image, converted on load
        RgbImage::from_pixel(4, 4, Rgb([10, 200, 30]))
            .save(dir.join("green.png"))
            .unwrap();
        std::fs::write(dir.join("broken.png"), b"corrupt").unwrap();
        std::fs::write(dir.join("ignored.txt"), b"text").unwrap();
    }

    fn processor(parallel: bool) -> BatchProcessor {
        let config = AnalysisConfig {
            parallel,
            ..Default::default()
        };
        BatchProcessor::from_config(&config).unwrap()
    }

    #[test]
    fn test_directory_skips_broken_images() {
        let dir = tempfile::tempdir().unwrap();
        write_images(dir.path());

        let report = processor(false).process_directory(dir.path()).unwrap();
        assert_eq!(report.attempted(), 4);
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("broken.png"));
    }

    #[test]
    fn test_records_reflect_texture() {
        let dir = tempfile::tempdir().unwrap();
        write_images(dir.path());
        let report = processor(false).process_directory(dir.path()).unwrap();

        let find = |name: &str| {
            report
                .records
                .iter()
                .find(|r| r.source.ends_with(name))
                .unwrap()
                .clone()
        };

        let flat = find("flat.png");
        assert_eq!(flat.texture.contrast, 0.0);
        assert_eq!(flat.texture.energy, 1.0);
        assert_eq!(flat.moments.median, 128.0);
        assert_eq!(flat.moments.variance, 0.0);

        let striped = find("striped.png");
        assert!((striped.texture.contrast - 255.0 * 255.0).abs() < 1e-6);
        assert!(striped.texture.homogeneity < 1e-3);
        assert!((striped.moments.variance - 127.5 * 127.5).abs() < 1e-6);

        let green = find("green.png");
        // 0.299*10 + 0.587*200 + 0.114*30 = 123.81
        assert_eq!(green.moments.median, 124.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        write_images(dir.path());

        let sequential = processor(false).process_directory(dir.path()).unwrap();
        let parallel = processor(true).process_directory(dir.path()).unwrap();
        assert_eq!(sequential.records, parallel.records);
        assert_eq!(sequential.failures.len(), parallel.failures.len());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = processor(false).process_directory(&dir.path().join("absent"));
        assert!(matches!(result, Err(BatchError::Io { .. })));
    }

    #[test]
    fn test_out_of_range_gray_levels_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_images(dir.path());

        let config = AnalysisConfig {
            gray_levels: 16,
            parallel: false,
            ..Default::default()
        };
        let report = BatchProcessor::from_config(&config)
            .unwrap()
            .process_directory(dir.path())
            .unwrap();

        // Every decodable image has intensities above 15
        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 4);
    }

    #[test]
    fn test_report_carries_parameters() {
        let dir = tempfile::tempdir().unwrap();
        write_images(dir.path());

        let config = AnalysisConfig {
            distance: 2,
            angle_degrees: 90.0,
            parallel: false,
            ..Default::default()
        };
        let report = BatchProcessor::from_config(&config)
            .unwrap()
            .process_directory(dir.path())
            .unwrap();
        assert_eq!(report.displacement, Displacement::new(2, 90.0).unwrap());
        assert_eq!(report.gray_levels, 256);
    }

    #[test]
    fn test_file_with_matrix() {
        let dir = tempfile::tempdir().unwrap();
        write_images(dir.path());
        let path = dir.path().join("striped.png");

        let (record, glcm) = processor(false).process_file_with_matrix(&path).unwrap();
        assert_eq!(record, processor(false).process_file(&path).unwrap());
        // Horizontal neighbors of 1-wide stripes always differ
        let cells = glcm.nonzero_cells();
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|&(a, b, _)| a != b));
        assert_eq!(glcm.pair_count(), 8 * 7);
    }

    #[test]
    fn test_oversized_gray_levels_fail_fast() {
        let config = AnalysisConfig {
            gray_levels: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            BatchProcessor::from_config(&config),
            Err(BatchError::Texture(texture_engine::TextureError::TooManyGrayLevels { .. }))
        ));
    }
}
