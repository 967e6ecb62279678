//! CSV loading for survey datasets.
//!
//! Survey exports come with inconsistent quoting and padded headers, so
//! loading tries progressively more forgiving strategies and always trims
//! column names afterwards.

use crate::error::Result;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Load a survey CSV into a DataFrame, trimming column-name whitespace.
///
/// A missing or unreadable source propagates the error unchanged; there
/// is no retry and no partial load.
pub fn load_survey_csv(path: &Path) -> Result<DataFrame> {
    let df = load_csv_with_fallbacks(path)?;
    Ok(trim_column_names(df)?)
}

/// Load CSV with multiple fallback strategies.
fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: pre-clean content
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cleaned = clean_csv_content(&content);
            use std::io::Cursor;
            let cursor = Cursor::new(cleaned);

            Ok(CsvReadOptions::default()
                .with_infer_schema_length(Some(100))
                .with_has_header(true)
                .into_reader_with_file_handle(cursor)
                .finish()?)
        }
        Err(e) => {
            error!("Could not read file: {}", e);
            Err(e.into())
        }
    }
}

/// Strip stray escaped quotes and blank lines before parsing.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip leading/trailing whitespace from every column name.
pub fn trim_column_names(mut df: DataFrame) -> PolarsResult<DataFrame> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .filter(|name| name.trim() != name)
        .map(|name| (name.clone(), name.trim().to_string()))
        .collect();

    for (old, new) in renames {
        df.rename(&old, new.as_str().into())?;
    }

    Ok(df)
}
