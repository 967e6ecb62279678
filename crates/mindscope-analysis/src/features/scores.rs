//! Composite metric formulas.

use crate::error::AnalysisError;
use crate::schema;
use crate::utils::{median_of, numeric_values};
use anyhow::Result;
use polars::prelude::*;

/// Study Efficiency = GPA / Study Hours Per Week.
///
/// Two-pass derivation: the raw ratio is computed for every row, then
/// every non-finite or missing ratio is replaced by the median of the
/// finite ones, so the resulting column is finite everywhere. Zero study
/// hours is the anticipated failure mode here, not an error.
pub(crate) fn study_efficiency(df: &DataFrame) -> Result<Series> {
    let gpa = numeric_values(df.column(schema::GPA)?.as_materialized_series())?;
    let hours = numeric_values(df.column(schema::STUDY_HOURS)?.as_materialized_series())?;

    let raw: Vec<Option<f64>> = gpa
        .iter()
        .zip(hours.iter())
        .map(|(g, h)| match (g, h) {
            (Some(g), Some(h)) => Some(g / h),
            _ => None,
        })
        .collect();

    let finite: Vec<f64> = raw
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    let median = median_of(&finite)
        .ok_or_else(|| AnalysisError::NoValidValues(schema::STUDY_EFFICIENCY.to_string()))?;

    let values: Vec<f64> = raw
        .iter()
        .map(|v| match v {
            Some(x) if x.is_finite() => *x,
            _ => median,
        })
        .collect();

    Ok(Series::new(schema::STUDY_EFFICIENCY.into(), values))
}

/// Wellness Score on a 0-10 scale, weighted over normalized sleep,
/// exercise and diet quality. Not clamped; inputs outside their expected
/// domains produce scores outside 0-10.
pub(crate) fn wellness_score(df: &DataFrame) -> Result<Series> {
    let sleep = numeric_values(df.column(schema::SLEEP_DURATION)?.as_materialized_series())?;
    let exercise = numeric_values(df.column(schema::PHYSICAL_EXERCISE)?.as_materialized_series())?;
    let diet = numeric_values(df.column(schema::DIET_QUALITY)?.as_materialized_series())?;

    let values: Vec<Option<f64>> = sleep
        .iter()
        .zip(exercise.iter())
        .zip(diet.iter())
        .map(|((s, e), d)| match (s, e, d) {
            (Some(s), Some(e), Some(d)) => {
                Some((s / 8.0 * 0.4 + e / 10.0 * 0.3 + d / 5.0 * 0.3) * 10.0)
            }
            _ => None,
        })
        .collect();

    Ok(Series::new(schema::WELLNESS_SCORE.into(), values))
}

/// Cumulative Stress Factor Score over the four stress-related columns.
///
/// A missing addend propagates: the row's score is null rather than a
/// partial sum.
pub(crate) fn stress_factor_score(df: &DataFrame) -> Result<Series> {
    let mut columns = Vec::with_capacity(schema::STRESS_FACTOR_COLUMNS.len());
    for name in schema::STRESS_FACTOR_COLUMNS {
        columns.push(numeric_values(df.column(name)?.as_materialized_series())?);
    }

    let height = df.height();
    let mut values: Vec<Option<f64>> = Vec::with_capacity(height);
    for i in 0..height {
        let mut sum = Some(0.0);
        for col in &columns {
            sum = match (sum, col[i]) {
                (Some(acc), Some(v)) => Some(acc + v),
                _ => None,
            };
        }
        values.push(sum);
    }

    Ok(Series::new(schema::STRESS_FACTOR_SCORE.into(), values))
}
