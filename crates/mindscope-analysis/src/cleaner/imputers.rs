//! Median and mode fills used by the cleaner.

use crate::utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, string_mode};
use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

/// Fill every numeric column that has nulls with that column's median.
///
/// The median is recomputed per column at fill time, so earlier fills
/// never influence later ones.
pub(crate) fn fill_numeric_medians(df: &mut DataFrame, actions: &mut Vec<String>) -> Result<()> {
    let column_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for col_name in &column_names {
        let (median, series_clone) = {
            let col = df.column(col_name)?;
            let series = col.as_materialized_series();
            if !is_numeric_dtype(series.dtype()) || series.null_count() == 0 {
                continue;
            }
            (series.median(), series.clone())
        };

        if let Some(median_val) = median {
            let filled = fill_numeric_nulls(&series_clone, median_val)?;
            df.replace(col_name, filled)?;

            actions.push(format!(
                "Filled missing values in '{}' with median {:.2}",
                col_name, median_val
            ));
            debug!("Median filled '{}' with {:.2}", col_name, median_val);
        }
    }

    Ok(())
}

/// Fill nulls in the given categorical columns with the column mode.
///
/// Columns not present in the table are skipped. Ties resolve to the
/// first mode.
pub(crate) fn fill_categorical_modes(
    df: &mut DataFrame,
    columns: &[&str],
    actions: &mut Vec<String>,
) -> Result<()> {
    for col_name in columns {
        let (mode, series_clone) = {
            let Ok(col) = df.column(col_name) else {
                continue;
            };
            let series = col.as_materialized_series();
            if series.null_count() == 0 {
                continue;
            }
            (string_mode(series), series.clone())
        };

        if let Some(mode_val) = mode {
            let filled = fill_string_nulls(&series_clone, &mode_val)?;
            df.replace(col_name, filled)?;

            actions.push(format!(
                "Filled missing values in '{}' with mode '{}'",
                col_name, mode_val
            ));
            debug!("Mode filled '{}' with '{}'", col_name, mode_val);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_numeric_medians_basic() {
        let mut df = df![
            "values" => [Some(1.0), None, Some(3.0), None, Some(5.0)],
            "label" => ["a", "b", "c", "d", "e"],
        ]
        .unwrap();
        let mut actions = Vec::new();

        fill_numeric_medians(&mut df, &mut actions).unwrap();

        let values = df.column("values").unwrap();
        assert_eq!(values.null_count(), 0);

        // Median of [1, 3, 5] = 3
        let series = values.as_materialized_series();
        assert_eq!(series.get(1).unwrap().try_extract::<f64>().unwrap(), 3.0);
        assert_eq!(series.get(3).unwrap().try_extract::<f64>().unwrap(), 3.0);

        assert_eq!(actions.len(), 1);
        assert!(actions[0].contains("median"));
    }

    #[test]
    fn test_fill_numeric_medians_skips_full_columns() {
        let mut df = df![
            "values" => [1.0, 2.0, 3.0],
        ]
        .unwrap();
        let mut actions = Vec::new();

        fill_numeric_medians(&mut df, &mut actions).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_fill_numeric_medians_all_null_left_alone() {
        let mut df = df![
            "values" => [Option::<f64>::None, None, None],
        ]
        .unwrap();
        let mut actions = Vec::new();

        // No median exists, so no fill happens and no action is logged.
        fill_numeric_medians(&mut df, &mut actions).unwrap();
        assert!(actions.is_empty());
        assert_eq!(df.column("values").unwrap().null_count(), 3);
    }

    #[test]
    fn test_fill_categorical_modes_basic() {
        let mut df = df![
            "Gender" => [Some("Male"), Some("Female"), Some("Male"), None],
        ]
        .unwrap();
        let mut actions = Vec::new();

        fill_categorical_modes(&mut df, &["Gender"], &mut actions).unwrap();

        let gender = df.column("Gender").unwrap();
        assert_eq!(gender.null_count(), 0);
        assert!(
            gender
                .as_materialized_series()
                .get(3)
                .unwrap()
                .to_string()
                .contains("Male")
        );
        assert!(actions[0].contains("mode"));
    }

    #[test]
    fn test_fill_categorical_modes_missing_column_skipped() {
        let mut df = df![
            "Other" => ["x", "y"],
        ]
        .unwrap();
        let mut actions = Vec::new();

        fill_categorical_modes(&mut df, &["Gender"], &mut actions).unwrap();
        assert!(actions.is_empty());
    }
}
