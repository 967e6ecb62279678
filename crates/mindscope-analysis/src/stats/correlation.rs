//! Pearson correlation matrix over the fixed numeric column subset.

use crate::utils::numeric_values;
use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Square, symmetric correlation table with an exact 1.0 diagonal.
///
/// Cells for zero-variance pairs are NaN (serialized as JSON null);
/// they are never coerced to a synthetic value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Compute the matrix over the columns of `subset` present in the
    /// table. Absent columns are skipped; rows with a null in either
    /// column of a pair are dropped for that pair only.
    pub fn compute(df: &DataFrame, subset: &[&str]) -> Result<CorrelationMatrix> {
        let existing: Vec<&str> = subset
            .iter()
            .copied()
            .filter(|name| df.column(name).is_ok())
            .collect();

        let mut series_values = Vec::with_capacity(existing.len());
        for name in &existing {
            series_values.push(numeric_values(df.column(name)?.as_materialized_series())?);
        }

        let n = existing.len();
        let mut values = vec![vec![0.0f64; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson(&series_values[i], &series_values[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            columns: existing.into_iter().map(String::from).collect(),
            values,
        })
    }

    /// Correlation between two named columns, `None` when either is not
    /// part of the matrix.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Number of columns in the matrix.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pearson correlation over pairwise-complete observations.
///
/// NaN when fewer than two complete pairs exist or either side has zero
/// variance.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some((*x, *y)),
            _ => None,
        })
        .collect();

    let n = pairs.len() as f64;
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}
