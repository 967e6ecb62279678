//! The end-to-end analysis pipeline.
//!
//! Stages run strictly top-to-bottom: overview, cleaning, feature
//! derivation, key metrics, charts, insights. The table is threaded
//! through as an immutable-then-rebound value; once the features are
//! appended it is only read.

use crate::charts::{self, ChartSpec};
use crate::cleaner::DataCleaner;
use crate::config::AnalysisConfig;
use crate::features::FeatureDeriver;
use crate::insights;
use crate::render::{self, Document};
use crate::schema;
use crate::stats::{CorrelationMatrix, compute_key_metrics};
use crate::types::{CleaningSummary, KeyMetrics};
use anyhow::{Result, anyhow};
use polars::prelude::*;
use tracing::info;

/// Everything one pipeline run produces.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// The dashboard document, in display order.
    pub document: Document,
    /// The cleaned, feature-enriched table.
    pub table: DataFrame,
    pub cleaning: CleaningSummary,
    pub derivation_steps: Vec<String>,
    pub metrics: KeyMetrics,
    pub correlation: CorrelationMatrix,
    pub findings: Vec<String>,
}

/// Runs the full analysis over a loaded survey table.
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(AnalysisConfig::default())
    }

    /// Run every stage and assemble the dashboard document.
    pub fn run(&self, df: DataFrame) -> Result<AnalysisOutcome> {
        let mut doc = Document::new();

        doc.heading(1, "Student Mental Health Dashboard");
        doc.paragraph(
            "This is an interactive dashboard that explores the relationship between student \
             mental health and various factors such as lifestyle factors, stress levels and \
             coping mechanisms.",
        );

        // Data overview, over the table as loaded.
        doc.heading(3, "Data Overview");
        doc.paragraph(format!(
            "The dataset contains {} student records with {} features.",
            df.height(),
            df.width()
        ));
        doc.directives.push(render::dataframe_table(
            &df.head(Some(self.config.overview_rows)),
        )?);

        // Cleaning.
        doc.heading(3, "Data Cleaning");
        let (df, cleaning) = DataCleaner::clean(df)?;
        doc.paragraph(format!(
            "The dataset contains {} columns with missing values.",
            cleaning.columns_with_missing()
        ));
        if !cleaning.missing_report.is_empty() {
            doc.table(
                vec!["Column".to_string(), "Missing Count".to_string()],
                cleaning
                    .missing_report
                    .iter()
                    .map(|m| vec![m.column.clone(), m.count.to_string()])
                    .collect(),
            );
        }
        for action in &cleaning.actions {
            doc.paragraph(format!("- {}", action));
        }

        // Feature derivation.
        doc.heading(3, "Feature Engineering");
        doc.paragraph("Creating derived features to enhance analysis:");
        let (df, derivation_steps) = FeatureDeriver::derive_all(df)?;
        for step in &derivation_steps {
            doc.paragraph(format!("- {}", step));
        }

        // Key metrics.
        doc.heading(3, "Key Mental Health Metrics");
        let metrics = compute_key_metrics(&df, self.config.high_stress_threshold)?;
        doc.paragraph(format!(
            "- **Average Mental Stress Level**: {:.2}/10",
            metrics.avg_stress
        ));
        doc.paragraph(format!(
            "- **Average Wellness Score**: {:.2}/10",
            metrics.avg_wellness
        ));
        doc.paragraph(format!(
            "- **Students with High Stress (>{})**: {:.2}%",
            self.config.high_stress_threshold, metrics.high_stress_pct
        ));
        doc.paragraph(format!(
            "- **Average Sleep Duration**: {:.2} hours per night",
            metrics.avg_sleep
        ));

        // Charts and correlation.
        let correlation = CorrelationMatrix::compute(&df, &schema::CORRELATION_COLUMNS)?;
        let [histogram, age_bar, heatmap, sleep_scatter, exercise_scatter, social_box, gpa_box]: [ChartSpec; 7] =
            charts::standard_charts(&df, &correlation)?
                .try_into()
                .map_err(|_| anyhow!("chart catalog changed size"))?;

        doc.chart(histogram);
        doc.chart(age_bar);

        doc.heading(3, "Factor Correlation Analysis");
        doc.paragraph("Examining relationships between lifestyle factors and mental stress.");
        doc.chart(heatmap);

        doc.paragraph("Key Factor Relationships");
        doc.chart(sleep_scatter);
        doc.chart(exercise_scatter);
        doc.chart(social_box);
        doc.chart(gpa_box);

        // Insights.
        doc.heading(2, "Key Insights & Recommendations");
        doc.heading(3, "Primary Findings");
        let findings = insights::primary_findings(&df, &correlation)?;
        for (i, finding) in findings.iter().enumerate() {
            doc.paragraph(format!("{}. {}", i + 1, finding));
        }

        doc.heading(3, "Recommended Interventions");
        for (i, recommendation) in insights::recommendations().iter().enumerate() {
            doc.paragraph(format!("{}. {}", i + 1, recommendation));
        }

        info!(
            "Analysis complete: {} rows, {} directives",
            df.height(),
            doc.len()
        );

        Ok(AnalysisOutcome {
            document: doc,
            table: df,
            cleaning,
            derivation_steps,
            metrics,
            correlation,
            findings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Directive;

    fn survey_df() -> DataFrame {
        df![
            schema::STUDENT_ID => ["S1", "S2", "S2", "S3"],
            schema::AGE => [Some(19.0), Some(22.0), Some(22.0), None],
            schema::GENDER => [Some("Male"), Some("Female"), Some("Female"), None],
            schema::MENTAL_STRESS_LEVEL => [9.0, 4.0, 4.0, 2.0],
            schema::GPA => [3.0, 3.6, 3.6, 3.9],
            schema::STUDY_HOURS => [10.0, 0.0, 0.0, 25.0],
            schema::SLEEP_DURATION => [5.0, 7.0, 7.0, 8.0],
            schema::PHYSICAL_EXERCISE => [1.0, 5.0, 5.0, 7.0],
            schema::DIET_QUALITY => [2.0, 4.0, 4.0, 5.0],
            schema::FINANCIAL_STRESS => [4.0, 2.0, 2.0, 1.0],
            schema::PEER_PRESSURE => [3.0, 2.0, 2.0, 1.0],
            schema::RELATIONSHIP_STRESS => [4.0, 1.0, 1.0, 1.0],
            schema::COGNITIVE_DISTORTIONS => [5.0, 2.0, 2.0, 1.0],
            schema::SOCIAL_MEDIA_USAGE => [6.0, 3.0, 3.0, 1.0],
        ]
        .unwrap()
    }

    #[test]
    fn test_run_produces_enriched_table() {
        let outcome = AnalysisPipeline::with_defaults().run(survey_df()).unwrap();

        assert_eq!(outcome.table.height(), 3);
        assert!(outcome.table.column(schema::WELLNESS_SCORE).is_ok());
        assert_eq!(outcome.cleaning.duplicates_removed, 1);
        assert_eq!(outcome.derivation_steps.len(), 5);
    }

    #[test]
    fn test_run_document_contains_all_sections() {
        let outcome = AnalysisPipeline::with_defaults().run(survey_df()).unwrap();

        let headings: Vec<&str> = outcome
            .document
            .directives
            .iter()
            .filter_map(|d| match d {
                Directive::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(
            headings,
            vec![
                "Student Mental Health Dashboard",
                "Data Overview",
                "Data Cleaning",
                "Feature Engineering",
                "Key Mental Health Metrics",
                "Factor Correlation Analysis",
                "Key Insights & Recommendations",
                "Primary Findings",
                "Recommended Interventions",
            ]
        );
    }

    #[test]
    fn test_run_emits_seven_charts() {
        let outcome = AnalysisPipeline::with_defaults().run(survey_df()).unwrap();
        let chart_count = outcome
            .document
            .directives
            .iter()
            .filter(|d| matches!(d, Directive::Chart { .. }))
            .count();
        assert_eq!(chart_count, 7);
    }

    #[test]
    fn test_run_skips_missing_table_when_clean() {
        let mut df = survey_df();
        // Patch the nulls away so no column has missing values.
        df = df
            .drop(schema::AGE)
            .and_then(|d| d.drop(schema::GENDER))
            .unwrap();
        df.with_column(Series::new(schema::AGE.into(), [19.0, 22.0, 23.0, 25.0]))
            .unwrap();
        df.with_column(Series::new(
            schema::GENDER.into(),
            ["Male", "Female", "Female", "Male"],
        ))
        .unwrap();

        let outcome = AnalysisPipeline::with_defaults().run(df).unwrap();
        let tables = outcome
            .document
            .directives
            .iter()
            .filter(|d| matches!(d, Directive::Table { .. }))
            .count();

        // Only the overview head table; the missing-value table is absent.
        assert_eq!(tables, 1);
        assert_eq!(outcome.cleaning.columns_with_missing(), 0);
    }

    #[test]
    fn test_run_correlation_is_symmetric_with_unit_diagonal() {
        let outcome = AnalysisPipeline::with_defaults().run(survey_df()).unwrap();
        let corr = &outcome.correlation;

        for i in 0..corr.len() {
            assert_eq!(corr.values[i][i], 1.0);
            for j in 0..corr.len() {
                let a = corr.values[i][j];
                let b = corr.values[j][i];
                assert!(a == b || (a.is_nan() && b.is_nan()));
            }
        }
    }
}
