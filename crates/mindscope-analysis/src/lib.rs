//! Student Mental-Health Survey Analysis Library
//!
//! A Polars-based analysis pipeline for student mental-health survey
//! data.
//!
//! # Overview
//!
//! The pipeline runs a fixed sequence of stages over a loaded CSV:
//!
//! - **Loading**: CSV ingestion with fallback strategies and column-name
//!   trimming
//! - **Cleaning**: missing-value reporting, duplicate removal by Student
//!   ID, median/mode imputation
//! - **Feature Derivation**: age/stress buckets and the Study Efficiency,
//!   Wellness Score and Stress Factor Score composites
//! - **Reporting**: key metrics, a Pearson correlation matrix, and a JSON
//!   report
//! - **Visualization**: declarative chart descriptors for an external
//!   renderer
//! - **Insights**: narrative findings and recommendations
//! - **Query**: a named-source registry with a SELECT...WHERE filter
//!   interface
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mindscope_analysis::{AnalysisPipeline, loader};
//! use mindscope_analysis::render::{Renderer, TextRenderer};
//! use std::path::Path;
//!
//! let df = loader::load_survey_csv(Path::new("survey.csv"))?;
//! let outcome = AnalysisPipeline::with_defaults().run(df)?;
//!
//! TextRenderer::new(std::io::stdout().lock()).render(&outcome.document)?;
//! println!("Average stress: {:.2}", outcome.metrics.avg_stress);
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to customize the run:
//!
//! ```rust,ignore
//! use mindscope_analysis::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::builder()
//!     .overview_rows(5)
//!     .output_dir("./results")
//!     .emit_report(true)
//!     .build()?;
//! ```

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod features;
pub mod insights;
pub mod loader;
pub mod pipeline;
pub mod query;
pub mod render;
pub mod reporting;
pub mod schema;
pub mod stats;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::{ChartData, ChartKind, ChartOptions, ChartSpec, standard_charts};
pub use cleaner::DataCleaner;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use features::FeatureDeriver;
pub use pipeline::{AnalysisOutcome, AnalysisPipeline};
pub use query::SourceRegistry;
pub use render::{Directive, Document, Renderer, TextRenderer};
pub use reporting::{AnalysisReport, ReportGenerator};
pub use stats::{CorrelationMatrix, compute_key_metrics, group_means, mean_where};
pub use types::{CleaningSummary, KeyMetrics, MissingCount};
