//! Narrative insights derived from the correlation matrix and a few
//! conditional group means.
//!
//! The sentence templates are fixed; only the numbers are recomputed.
//! A correlation cell missing from the matrix falls back to 0, matching
//! the guarded lookups the dashboard always shipped with.

use crate::schema;
use crate::stats::{CorrelationMatrix, mean_where};
use anyhow::Result;
use polars::prelude::*;

/// The four primary findings, in dashboard order.
pub fn primary_findings(df: &DataFrame, corr: &CorrelationMatrix) -> Result<Vec<String>> {
    let mut findings = Vec::with_capacity(4);

    let sleep_corr = corr
        .get(schema::SLEEP_DURATION, schema::MENTAL_STRESS_LEVEL)
        .unwrap_or(0.0);
    let short_sleep = mean_where(
        df,
        schema::SLEEP_DURATION,
        |s| s < 6.0,
        schema::MENTAL_STRESS_LEVEL,
    )?
    .unwrap_or(0.0);
    let long_sleep = mean_where(
        df,
        schema::SLEEP_DURATION,
        |s| s >= 7.0,
        schema::MENTAL_STRESS_LEVEL,
    )?
    .unwrap_or(0.0);
    findings.push(format!(
        "**Sleep Impact**: Analysis shows a correlation of {:.2} between sleep duration and \
         stress levels. Students with less than 6 hours of sleep have {:.1} points higher \
         stress on average.",
        sleep_corr,
        short_sleep - long_sleep
    ));

    let exercise_corr = corr
        .get(schema::PHYSICAL_EXERCISE, schema::MENTAL_STRESS_LEVEL)
        .unwrap_or(0.0);
    let low_exercise = mean_where(
        df,
        schema::PHYSICAL_EXERCISE,
        |e| e < 3.0,
        schema::MENTAL_STRESS_LEVEL,
    )?
    .unwrap_or(0.0);
    let high_exercise = mean_where(
        df,
        schema::PHYSICAL_EXERCISE,
        |e| e >= 5.0,
        schema::MENTAL_STRESS_LEVEL,
    )?
    .unwrap_or(0.0);
    findings.push(format!(
        "**Exercise Benefit**: Regular physical exercise shows a correlation of {:.2} with \
         stress levels. Students with 5+ hours weekly exercise show {:.1} points lower stress.",
        exercise_corr,
        low_exercise - high_exercise
    ));

    let social_corr = corr
        .get(schema::SOCIAL_MEDIA_USAGE, schema::MENTAL_STRESS_LEVEL)
        .unwrap_or(0.0);
    let avg_social = df
        .column(schema::SOCIAL_MEDIA_USAGE)
        .ok()
        .and_then(|col| col.as_materialized_series().mean())
        .unwrap_or(0.0);
    findings.push(format!(
        "**Social Media Usage**: Higher social media usage has a correlation of {:.2} with \
         stress levels. Students using social media {:.1}+ hours daily show significantly \
         higher stress.",
        social_corr, avg_social
    ));

    let study_corr = corr
        .get(schema::STUDY_EFFICIENCY, schema::MENTAL_STRESS_LEVEL)
        .unwrap_or(0.0);
    findings.push(format!(
        "**Study Efficiency**: Study efficiency has a correlation of {:.2} with stress \
         levels, suggesting quality of study time may be more important than quantity.",
        study_corr
    ));

    Ok(findings)
}

/// The five fixed intervention recommendations.
pub fn recommendations() -> [&'static str; 5] {
    [
        "**Sleep Education Program**: Implement workshops on sleep hygiene and its impact on mental health.",
        "**Physical Activity Initiative**: Develop accessible fitness programs targeting high-stress students.",
        "**Digital Wellness Campaign**: Create awareness about healthy social media usage patterns.",
        "**Academic Support**: Design interventions focusing on study efficiency rather than just study hours.",
        "**Mental Health Resources**: Expand counseling services, especially for students with family history of mental health issues.",
    ]
}
