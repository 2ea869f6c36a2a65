//! Plain-text report rendering

use std::fmt::Write;
use texture_batch::{BatchFailure, FeatureComparison, FeatureSummary};
use texture_engine::{CoOccurrenceMatrix, FeatureRecord};

/// Render one record as `name: value` lines
pub fn render_record(record: &FeatureRecord) -> String {
    let mut out = format!("{}\n", record.source);
    for (name, value) in FeatureRecord::FEATURE_NAMES.iter().zip(record.values()) {
        let _ = writeln!(out, "  {:<12} {:.4}", name, value);
    }
    if !record.moments.shape_defined() {
        out.push_str("  (constant intensity: asymmetry and kurtosis undefined, reported as 0)\n");
    }
    out
}

/// Render records as a table, one image per row
pub fn render_records(records: &[FeatureRecord]) -> String {
    let mut out = format!("{:<40}", "image");
    for name in FeatureRecord::FEATURE_NAMES {
        let _ = write!(out, " {:>12}", name);
    }
    out.push('\n');

    for record in records {
        let _ = write!(out, "{:<40}", record.source);
        for value in record.values() {
            let _ = write!(out, " {:>12.4}", value);
        }
        out.push('\n');
    }
    out
}

/// Render skipped images
pub fn render_failures(failures: &[BatchFailure]) -> String {
    let mut out = String::new();
    if failures.is_empty() {
        return out;
    }
    let _ = writeln!(out, "Skipped {} image(s):", failures.len());
    for failure in failures {
        let _ = writeln!(out, "  {}: {}", failure.path.display(), failure.error);
    }
    out
}

/// Render the non-zero cells of a co-occurrence matrix, one `a b p` per line
pub fn render_matrix(glcm: &CoOccurrenceMatrix) -> String {
    let cells = glcm.nonzero_cells();
    let mut out = format!(
        "co-occurrence {}x{}, {} pairs, {} non-zero cells\n",
        glcm.levels(),
        glcm.levels(),
        glcm.pair_count(),
        cells.len()
    );
    for (a, b, p) in cells {
        let _ = writeln!(out, "  {:>5} {:>5}  {:.6}", a, b, p);
    }
    out
}

fn render_summary(summary: Option<&FeatureSummary>) -> String {
    match summary {
        Some(s) => format!(
            "n={:<4} min={:.4} q1={:.4} med={:.4} q3={:.4} max={:.4}",
            s.count, s.min, s.q1, s.median, s.q3, s.max
        ),
        None => "no data".to_string(),
    }
}

/// Render a two-population comparison, one block per feature
pub fn render_comparison(comparisons: &[FeatureComparison], left: &str, right: &str) -> String {
    let mut out = String::new();
    for comparison in comparisons {
        let _ = writeln!(out, "{}", comparison.feature);
        let _ = writeln!(out, "  {:<24} {}", left, render_summary(comparison.left.as_ref()));
        let _ = writeln!(out, "  {:<24} {}", right, render_summary(comparison.right.as_ref()));
        if let Some(shift) = comparison.median_shift() {
            let _ = writeln!(out, "  median shift {:+.4}", shift);
        }
    }
    out
}
