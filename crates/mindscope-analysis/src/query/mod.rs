//! Named-source registry with a single-filter query interface.
//!
//! Sources are registered under a name and queried with a SQL-like
//! statement; the WHERE conjunction has standard relational semantics
//! (a comparison against a null value is false).

mod predicate;

use crate::error::{AnalysisError, Result};
use crate::utils::numeric_values;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Registry of named in-memory tables.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, DataFrame>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under a name, replacing any previous source with
    /// the same name.
    pub fn register(&mut self, name: impl Into<String>, df: DataFrame) {
        let name = name.into();
        debug!("Registered source '{}' ({} rows)", name, df.height());
        self.sources.insert(name, df);
    }

    /// Names of all registered sources, sorted.
    pub fn source_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run a `SELECT * FROM <table> WHERE ...` statement and return the
    /// matching rows.
    pub fn query(&self, sql: &str) -> Result<DataFrame> {
        let parsed = predicate::parse_select(sql)?;
        let df = self
            .sources
            .get(&parsed.table)
            .ok_or_else(|| AnalysisError::UnknownTable(parsed.table.clone()))?;

        let mut keep = vec![true; df.height()];
        for comparison in &parsed.comparisons {
            let column = df
                .column(&comparison.column)
                .map_err(|_| AnalysisError::ColumnNotFound(comparison.column.clone()))?;
            let values = numeric_values(column.as_materialized_series())?;

            for (flag, value) in keep.iter_mut().zip(values.iter()) {
                *flag = *flag
                    && match value {
                        Some(v) => comparison.op.eval(*v, comparison.value),
                        None => false,
                    };
            }
        }

        let mask = Series::new("keep".into(), keep);
        Ok(df.filter(mask.bool()?)?)
    }
}
