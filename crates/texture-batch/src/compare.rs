//! Population comparison
//!
//! Summaries are the numbers a box plot is drawn from: extremes, quartiles
//! and median, plus the mean.

use crate::batch::{BatchFailure, BatchReport};
use serde::Serialize;
use texture_engine::FeatureRecord;

/// Distribution summary of one feature over a population
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSummary {
    /// Number of finite values
    pub count: usize,
    pub min: f64,
    /// First quartile
    pub q1: f64,
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

impl FeatureSummary {
    /// Summarize the finite entries of `values`; `None` when there are none.
    ///
    /// Quartiles interpolate linearly between order statistics.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Some(Self {
            count,
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[count - 1],
            mean,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Quantile `q` of non-empty sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// One feature summarized over two populations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureComparison {
    pub feature: &'static str,
    pub left: Option<FeatureSummary>,
    pub right: Option<FeatureSummary>,
}

impl FeatureComparison {
    /// `right.median - left.median`, when both populations have values
    pub fn median_shift(&self) -> Option<f64> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => Some(right.median - left.median),
            _ => None,
        }
    }
}

/// Summarize every feature over `records`, in [`FeatureRecord::FEATURE_NAMES`] order
pub fn summarize(records: &[FeatureRecord]) -> Vec<(&'static str, Option<FeatureSummary>)> {
    let rows: Vec<[f64; texture_engine::FEATURE_COUNT]> =
        records.iter().map(FeatureRecord::values).collect();

    FeatureRecord::FEATURE_NAMES
        .iter()
        .enumerate()
        .map(|(idx, &name)| {
            let column: Vec<f64> = rows.iter().map(|row| row[idx]).collect();
            (name, FeatureSummary::from_values(&column))
        })
        .collect()
}

/// Compare two populations feature by feature
pub fn compare_populations(left: &[FeatureRecord], right: &[FeatureRecord]) -> Vec<FeatureComparison> {
    summarize(left)
        .into_iter()
        .zip(summarize(right))
        .map(|((feature, left), (_, right))| FeatureComparison {
            feature,
            left,
            right,
        })
        .collect()
}

/// How much of one population made it into a comparison
#[derive(Debug, Clone, Serialize)]
pub struct PopulationOutcome {
    pub attempted: usize,
    pub analyzed: usize,
    pub failures: Vec<BatchFailure>,
}

impl From<&BatchReport> for PopulationOutcome {
    fn from(report: &BatchReport) -> Self {
        Self {
            attempted: report.attempted(),
            analyzed: report.records.len(),
            failures: report.failures.clone(),
        }
    }
}

/// Feature comparison of two batch reports, with what each side skipped
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub left: PopulationOutcome,
    pub right: PopulationOutcome,
    pub comparisons: Vec<FeatureComparison>,
}

/// Compare the records of two batch reports
pub fn compare_reports(left: &BatchReport, right: &BatchReport) -> ComparisonReport {
    ComparisonReport {
        left: left.into(),
        right: right.into(),
        comparisons: compare_populations(&left.records, &right.records),
    }
}
