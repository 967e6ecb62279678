//! Shared utilities for the survey analysis pipeline.

use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Extract a column as `f64` values, nulls preserved as `None`.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    let ca = float_series.f64()?;
    Ok(ca.into_iter().collect())
}

/// Median of a slice of finite values. `None` on an empty slice.
pub fn median_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Fill null values in a numeric Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(val.try_extract::<f64>()?));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value.to_string()));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(any_value_display(&val)));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Calculate the mode (most frequent value) of a string Series.
///
/// Ties resolve to the value seen first in the column.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = match non_null.cast(&DataType::String) {
        Ok(s) => s,
        Err(_) => return None,
    };

    let str_chunked = match str_series.str() {
        Ok(s) => s,
        Err(_) => return None,
    };

    // Track first-seen order so ties break toward the earliest value.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for val in str_chunked.into_iter().flatten() {
        match counts.iter_mut().find(|(v, _)| v == val) {
            Some((_, c)) => *c += 1,
            None => counts.push((val.to_string(), 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (val, count) in counts {
        match &best {
            Some((_, best_count)) if *best_count >= count => {}
            _ => best = Some((val, count)),
        }
    }
    best.map(|(val, _)| val)
}

/// Render an AnyValue for display, without the quotes polars puts around
/// string values and with nulls as an empty cell.
pub fn any_value_display(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => format!("{}", other),
    }
}
