//! Scalar aggregates and conditional group means.

use crate::error::AnalysisError;
use crate::schema;
use crate::types::KeyMetrics;
use crate::utils::numeric_values;
use anyhow::Result;
use polars::prelude::*;

/// Compute the key-metrics block of the dashboard.
///
/// `high_stress_threshold` is strictly-greater-than, matching the
/// "students with stress > 8" phrasing of the rendered metric.
pub fn compute_key_metrics(df: &DataFrame, high_stress_threshold: f64) -> Result<KeyMetrics> {
    let stress_series = df
        .column(schema::MENTAL_STRESS_LEVEL)?
        .as_materialized_series();
    let avg_stress = stress_series
        .mean()
        .ok_or_else(|| AnalysisError::NoValidValues(schema::MENTAL_STRESS_LEVEL.to_string()))?;

    let avg_wellness = df
        .column(schema::WELLNESS_SCORE)?
        .as_materialized_series()
        .mean()
        .ok_or_else(|| AnalysisError::NoValidValues(schema::WELLNESS_SCORE.to_string()))?;

    let avg_sleep = df
        .column(schema::SLEEP_DURATION)?
        .as_materialized_series()
        .mean()
        .ok_or_else(|| AnalysisError::NoValidValues(schema::SLEEP_DURATION.to_string()))?;

    let stress_values = numeric_values(stress_series)?;
    let total = stress_values.iter().flatten().count();
    let high = stress_values
        .iter()
        .flatten()
        .filter(|v| **v > high_stress_threshold)
        .count();
    let high_stress_pct = if total == 0 {
        0.0
    } else {
        high as f64 / total as f64 * 100.0
    };

    Ok(KeyMetrics {
        avg_stress,
        avg_wellness,
        high_stress_pct,
        avg_sleep,
    })
}

/// Mean of `value_col` per distinct label of `group_col`, sorted by
/// label. Rows with a null label or null value are skipped.
pub fn group_means(df: &DataFrame, group_col: &str, value_col: &str) -> Result<Vec<(String, f64)>> {
    let groups = df.column(group_col)?.as_materialized_series().clone();
    let values = numeric_values(df.column(value_col)?.as_materialized_series())?;

    let mut sums: Vec<(String, f64, usize)> = Vec::new();
    for i in 0..groups.len() {
        let label_value = groups.get(i)?;
        if matches!(label_value, AnyValue::Null) {
            continue;
        }
        let Some(value) = values[i] else {
            continue;
        };
        let label = crate::utils::any_value_display(&label_value);
        match sums.iter_mut().find(|(l, _, _)| *l == label) {
            Some((_, sum, count)) => {
                *sum += value;
                *count += 1;
            }
            None => sums.push((label, value, 1)),
        }
    }

    let mut means: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(label, sum, count)| (label, sum / count as f64))
        .collect();
    means.sort_by(|(a, _), (b, _)| a.cmp(b));

    Ok(means)
}

/// Mean of `value_col` over the rows where `filter_col` satisfies the
/// predicate. `None` when no row matches.
pub fn mean_where<F>(
    df: &DataFrame,
    filter_col: &str,
    predicate: F,
    value_col: &str,
) -> Result<Option<f64>>
where
    F: Fn(f64) -> bool,
{
    let filters = numeric_values(df.column(filter_col)?.as_materialized_series())?;
    let values = numeric_values(df.column(value_col)?.as_materialized_series())?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for (f, v) in filters.iter().zip(values.iter()) {
        if let (Some(f), Some(v)) = (f, v)
            && predicate(*f)
        {
            sum += v;
            count += 1;
        }
    }

    Ok((count > 0).then(|| sum / count as f64))
}
