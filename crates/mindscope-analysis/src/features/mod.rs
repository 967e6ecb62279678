//! Derived features appended to the cleaned survey table.
//!
//! All five columns are pure functions of existing columns, appended
//! once. The table is treated as read-only afterwards.

mod buckets;
mod scores;

pub use buckets::{AGE_BUCKETS, Bucket, STRESS_BUCKETS, bucket_label};

use crate::schema;
use crate::utils::numeric_values;
use anyhow::Result;
use polars::prelude::*;
use tracing::{debug, info};

/// Derives the composite metrics and category buckets.
pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Append Age Group, Stress Category, Study Efficiency, Wellness
    /// Score and Stress Factor Score to the table.
    ///
    /// Returns the enriched table and one step line per derived feature.
    pub fn derive_all(df: DataFrame) -> Result<(DataFrame, Vec<String>)> {
        let mut df = df;
        let mut steps = Vec::new();

        info!("Deriving composite features...");

        let ages = numeric_values(df.column(schema::AGE)?.as_materialized_series())?;
        df.with_column(buckets::bucket_column(
            schema::AGE_GROUP,
            &ages,
            &buckets::AGE_BUCKETS,
        ))?;
        steps.push("Bucketed 'Age' into 'Age Group'".to_string());

        let stress = numeric_values(
            df.column(schema::MENTAL_STRESS_LEVEL)?
                .as_materialized_series(),
        )?;
        df.with_column(buckets::bucket_column(
            schema::STRESS_CATEGORY,
            &stress,
            &buckets::STRESS_BUCKETS,
        ))?;
        steps.push("Bucketed 'Mental Stress Level' into 'Stress Category'".to_string());

        df.with_column(scores::study_efficiency(&df)?)?;
        steps.push("Created 'Study Efficiency' metric (GPA per study hour)".to_string());

        df.with_column(scores::wellness_score(&df)?)?;
        steps.push("Created 'Wellness Score' based on Sleep, Exercise, and Diet Quality".to_string());

        df.with_column(scores::stress_factor_score(&df)?)?;
        steps.push("Created cumulative 'Stress Factor Score'".to_string());

        debug!("Derived {} feature columns", steps.len());

        Ok((df, steps))
    }
}
