//! Configuration for the analysis pipeline.
//!
//! Uses the builder pattern for ergonomic setup and validates values at
//! build time.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the survey analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] for a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use mindscope_analysis::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .overview_rows(5)
///     .output_dir("./results")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of leading rows shown in the data-overview table.
    /// Default: 10
    pub overview_rows: usize,

    /// Threshold above which a stress level counts as "high" for the
    /// key-metrics percentage. Default: 8.0 (strictly greater than)
    pub high_stress_threshold: f64,

    /// Output directory for generated reports.
    /// Default: "outputs"
    pub output_dir: PathBuf,

    /// Custom report file name (without extension).
    /// If None, the input file stem is used.
    pub output_name: Option<String>,

    /// Whether to write the JSON report to disk.
    /// Default: false (the rendered document is the primary output)
    pub emit_report: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            overview_rows: 10,
            high_stress_threshold: 8.0,
            output_dir: PathBuf::from("outputs"),
            output_name: None,
            emit_report: false,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.overview_rows == 0 {
            return Err(ConfigValidationError::InvalidOverviewRows(
                self.overview_rows,
            ));
        }

        if !(0.0..=10.0).contains(&self.high_stress_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "high_stress_threshold".to_string(),
                value: self.high_stress_threshold,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be on the 0-10 stress scale)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid overview row count: {0} (must be at least 1)")]
    InvalidOverviewRows(usize),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    overview_rows: Option<usize>,
    high_stress_threshold: Option<f64>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
    emit_report: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the number of rows shown in the data-overview table.
    pub fn overview_rows(mut self, rows: usize) -> Self {
        self.overview_rows = Some(rows);
        self
    }

    /// Set the strictly-greater-than threshold for "high stress".
    pub fn high_stress_threshold(mut self, threshold: f64) -> Self {
        self.high_stress_threshold = Some(threshold);
        self
    }

    /// Set the output directory for reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set a custom report file name (without extension).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Enable or disable writing the JSON report to disk.
    pub fn emit_report(mut self, emit: bool) -> Self {
        self.emit_report = Some(emit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            overview_rows: self.overview_rows.unwrap_or(10),
            high_stress_threshold: self.high_stress_threshold.unwrap_or(8.0),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("outputs")),
            output_name: self.output_name,
            emit_report: self.emit_report.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}
