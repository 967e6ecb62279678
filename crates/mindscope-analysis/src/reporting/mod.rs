//! JSON report generation.
//!
//! A report is the machine-readable counterpart of the rendered
//! dashboard: the same numbers, none of the layout.

mod generator;

pub use generator::{AnalysisReport, ReportGenerator};
