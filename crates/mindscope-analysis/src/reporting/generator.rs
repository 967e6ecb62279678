use crate::insights;
use crate::pipeline::AnalysisOutcome;
use crate::stats::CorrelationMatrix;
use crate::types::{CleaningSummary, KeyMetrics};
use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Machine-readable summary of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated.
    pub generated_at: String,
    /// Path to the input file.
    pub input_file: String,
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_after: usize,
    pub cleaning: CleaningSummary,
    pub derivation_steps: Vec<String>,
    pub key_metrics: KeyMetrics,
    pub correlation: CorrelationMatrix,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Writes analysis reports into an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    /// Build a report from a finished pipeline run.
    pub fn build_report(input_file: &str, outcome: &AnalysisOutcome) -> AnalysisReport {
        AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            rows_before: outcome.cleaning.rows_before,
            rows_after: outcome.cleaning.rows_after,
            columns_after: outcome.table.width(),
            cleaning: outcome.cleaning.clone(),
            derivation_steps: outcome.derivation_steps.clone(),
            key_metrics: outcome.metrics,
            correlation: outcome.correlation.clone(),
            findings: outcome.findings.clone(),
            recommendations: insights::recommendations()
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }

    /// Write a report as pretty JSON to `<base_name>_report.json` in the
    /// output directory, creating the directory if needed.
    pub fn write_report_to_file(
        &self,
        report: &AnalysisReport,
        base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let file_name = self
            .output_name
            .as_deref()
            .unwrap_or(base_name);
        let report_path = self.output_dir.join(format!("{}_report.json", file_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::pipeline::AnalysisPipeline;
    use crate::schema;
    use polars::prelude::*;

    fn outcome() -> AnalysisOutcome {
        let df = df![
            schema::STUDENT_ID => ["S1", "S2"],
            schema::AGE => [19.0, 22.0],
            schema::GENDER => ["Male", "Female"],
            schema::MENTAL_STRESS_LEVEL => [9.0, 4.0],
            schema::GPA => [3.0, 3.6],
            schema::STUDY_HOURS => [10.0, 20.0],
            schema::SLEEP_DURATION => [5.0, 7.0],
            schema::PHYSICAL_EXERCISE => [1.0, 5.0],
            schema::DIET_QUALITY => [2.0, 4.0],
            schema::FINANCIAL_STRESS => [4.0, 2.0],
            schema::PEER_PRESSURE => [3.0, 2.0],
            schema::RELATIONSHIP_STRESS => [4.0, 1.0],
            schema::COGNITIVE_DISTORTIONS => [5.0, 2.0],
            schema::SOCIAL_MEDIA_USAGE => [6.0, 3.0],
        ]
        .unwrap();
        AnalysisPipeline::new(AnalysisConfig::default())
            .run(df)
            .unwrap()
    }

    #[test]
    fn test_build_report_mirrors_outcome() {
        let outcome = outcome();
        let report = ReportGenerator::build_report("survey.csv", &outcome);

        assert_eq!(report.input_file, "survey.csv");
        assert_eq!(report.rows_before, 2);
        assert_eq!(report.rows_after, 2);
        assert_eq!(report.findings.len(), 4);
        assert_eq!(report.recommendations.len(), 5);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = ReportGenerator::build_report("survey.csv", &outcome());
        let json = serde_json::to_string_pretty(&report).unwrap();

        assert!(json.contains("key_metrics"));
        assert!(json.contains("correlation"));
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = std::env::temp_dir().join("mindscope_report_test");
        let generator = ReportGenerator::new(dir.clone(), None);
        let report = ReportGenerator::build_report("survey.csv", &outcome());

        let path = generator.write_report_to_file(&report, "survey").unwrap();
        assert!(path.ends_with("survey_report.json"));
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("generated_at"));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_write_report_honors_output_name() {
        let dir = std::env::temp_dir().join("mindscope_report_named_test");
        let generator = ReportGenerator::new(dir.clone(), Some("custom".to_string()));
        let report = ReportGenerator::build_report("survey.csv", &outcome());

        let path = generator.write_report_to_file(&report, "survey").unwrap();
        assert!(path.ends_with("custom_report.json"));

        std::fs::remove_dir_all(dir).ok();
    }
}
