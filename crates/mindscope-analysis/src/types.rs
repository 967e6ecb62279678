//! Shared result types produced by the pipeline stages.

use serde::{Deserialize, Serialize};

/// Null count for a single column. Only columns with a positive count
/// appear in a missing-value report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCount {
    pub column: String,
    pub count: usize,
}

/// What the cleaning stage did to the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Number of rows before cleaning.
    pub rows_before: usize,
    /// Number of rows after cleaning.
    pub rows_after: usize,
    /// Duplicate student records removed (keep-first by Student ID).
    pub duplicates_removed: usize,
    /// Per-column null counts observed before any fill ran.
    pub missing_report: Vec<MissingCount>,
    /// Human-readable action lines, one per action taken.
    pub actions: Vec<String>,
}

impl CleaningSummary {
    /// Number of columns that had at least one missing value.
    pub fn columns_with_missing(&self) -> usize {
        self.missing_report.len()
    }
}

/// Scalar aggregates for the key-metrics section of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// Mean Mental Stress Level (1-10 scale).
    pub avg_stress: f64,
    /// Mean derived Wellness Score (0-10 scale).
    pub avg_wellness: f64,
    /// Percentage of students above the high-stress threshold.
    pub high_stress_pct: f64,
    /// Mean Sleep Duration in hours per night.
    pub avg_sleep: f64,
}
