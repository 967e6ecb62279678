//! Data cleaning for survey tables.
//!
//! Cleaning runs in a fixed order:
//! 1. report missing values (observational, before any mutation)
//! 2. remove duplicate student records, keeping the first per Student ID
//! 3. fill missing numeric values with the column median
//! 4. fill missing values in the fixed categorical set with the mode
//!
//! The order matters: medians are computed after deduplication, per
//! column, at fill time. Cleaning an already-clean table is a no-op.

mod imputers;

use crate::schema;
use crate::types::{CleaningSummary, MissingCount};
use anyhow::Result;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info};

/// Data cleaner for survey datasets.
pub struct DataCleaner;

impl DataCleaner {
    /// Count missing values per column, keeping only positive counts.
    pub fn missing_value_report(df: &DataFrame) -> Vec<MissingCount> {
        df.get_columns()
            .iter()
            .filter(|col| col.null_count() > 0)
            .map(|col| MissingCount {
                column: col.name().to_string(),
                count: col.null_count(),
            })
            .collect()
    }

    /// Clean the table and describe what was done.
    ///
    /// Takes the table by value and returns the rebound result; the input
    /// is never mutated in place across stage boundaries.
    pub fn clean(df: DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        let missing_report = Self::missing_value_report(&df);
        let rows_before = df.height();
        let mut actions = Vec::new();

        info!("Cleaning dataset ({} rows)...", rows_before);

        let mut df = Self::drop_duplicate_students(df, &mut actions)?;
        let duplicates_removed = rows_before - df.height();

        imputers::fill_numeric_medians(&mut df, &mut actions)?;
        imputers::fill_categorical_modes(&mut df, &schema::CATEGORICAL_FILL_COLUMNS, &mut actions)?;

        let summary = CleaningSummary {
            rows_before,
            rows_after: df.height(),
            duplicates_removed,
            missing_report,
            actions,
        };

        info!(
            "Cleaning complete: {} -> {} rows, {} columns had missing values",
            summary.rows_before,
            summary.rows_after,
            summary.columns_with_missing()
        );

        Ok((df, summary))
    }

    /// Remove duplicate records, keeping the first occurrence per Student ID.
    fn drop_duplicate_students(df: DataFrame, actions: &mut Vec<String>) -> Result<DataFrame> {
        let id_col = df.column(schema::STUDENT_ID)?;
        let series = id_col.as_materialized_series();

        let mut seen: HashSet<String> = HashSet::with_capacity(series.len());
        let mut keep = Vec::with_capacity(series.len());
        for i in 0..series.len() {
            let key = format!("{}", series.get(i)?);
            keep.push(seen.insert(key));
        }

        let mask = Series::new("keep".into(), keep);
        let before = df.height();
        let deduped = df.filter(mask.bool()?)?;
        let removed = before - deduped.height();

        if removed > 0 {
            actions.push(format!("Removed {} duplicate student records", removed));
            debug!("Removed {} duplicate student records", removed);
        } else {
            debug!("No duplicate student records found");
        }

        Ok(deduped)
    }
}
