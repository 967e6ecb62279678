//! Declarative chart descriptors for the dashboard.
//!
//! A [`ChartSpec`] names what to draw — kind, fields, title, styling —
//! and never draws anything itself; an external renderer consumes the
//! serialized descriptors. Aggregated charts (bar, heatmap) inline their
//! derived data so the renderer needs no access to the table.

use crate::schema;
use crate::stats::{CorrelationMatrix, group_means};
use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Bar,
    Scatter,
    Box,
    Heatmap,
}

/// Relabeling of one field on a chart axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub field: String,
    pub label: String,
}

/// Kind-specific styling options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Marginal distribution plot alongside the main chart ("box").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marginal: Option<String>,
    /// Gap between histogram/bar groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_gap: Option<f64>,
    /// Overlay every underlying point on a box plot.
    pub show_all_points: bool,
    /// Continuous color scale name for heatmaps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<String>,
    /// Write each cell value onto a heatmap.
    pub annotate_cells: bool,
}

/// Mean value for one category of a grouped chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub label: String,
    pub value: f64,
}

/// Data binding of a chart: raw table fields, pre-aggregated groups, or
/// an inline matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "binding", rename_all = "snake_case")]
pub enum ChartData {
    Fields {
        x: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        y: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Grouped {
        x: String,
        y: String,
        groups: Vec<GroupMean>,
    },
    Matrix {
        columns: Vec<String>,
        values: Vec<Vec<f64>>,
    },
}

/// A single chart of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub data: ChartData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axis_labels: Vec<AxisLabel>,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartSpec {
    fn new(kind: ChartKind, title: impl Into<String>, data: ChartData) -> Self {
        Self {
            kind,
            title: title.into(),
            data,
            axis_labels: Vec::new(),
            options: ChartOptions::default(),
        }
    }

    fn relabel(mut self, field: &str, label: &str) -> Self {
        self.axis_labels.push(AxisLabel {
            field: field.to_string(),
            label: label.to_string(),
        });
        self
    }

    fn options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }
}

/// Build the fixed chart sequence of the dashboard.
pub fn standard_charts(df: &DataFrame, corr: &CorrelationMatrix) -> Result<Vec<ChartSpec>> {
    let mut charts = Vec::with_capacity(7);

    charts.push(
        ChartSpec::new(
            ChartKind::Histogram,
            "Distribution of Mental Stress Level",
            ChartData::Fields {
                x: schema::MENTAL_STRESS_LEVEL.to_string(),
                y: None,
                color: Some(schema::GENDER.to_string()),
            },
        )
        .relabel(schema::MENTAL_STRESS_LEVEL, "Stress Level(1-10)")
        .options(ChartOptions {
            marginal: Some("box".to_string()),
            bar_gap: Some(0.1),
            ..Default::default()
        }),
    );

    let age_means = group_means(df, schema::AGE_GROUP, schema::MENTAL_STRESS_LEVEL)?;
    charts.push(ChartSpec::new(
        ChartKind::Bar,
        "Average Stress by Age Group",
        ChartData::Grouped {
            x: schema::AGE_GROUP.to_string(),
            y: schema::MENTAL_STRESS_LEVEL.to_string(),
            groups: age_means
                .into_iter()
                .map(|(label, value)| GroupMean { label, value })
                .collect(),
        },
    ));

    charts.push(
        ChartSpec::new(
            ChartKind::Heatmap,
            "Correlation Matrix of Mental Health Factors",
            ChartData::Matrix {
                columns: corr.columns.clone(),
                values: corr.values.clone(),
            },
        )
        .options(ChartOptions {
            color_scale: Some("RdBu_r".to_string()),
            annotate_cells: true,
            ..Default::default()
        }),
    );

    charts.push(
        ChartSpec::new(
            ChartKind::Scatter,
            "Sleep Duration vs Mental Stress Level",
            ChartData::Fields {
                x: schema::SLEEP_DURATION.to_string(),
                y: Some(schema::MENTAL_STRESS_LEVEL.to_string()),
                color: Some(schema::GENDER.to_string()),
            },
        )
        .relabel(schema::SLEEP_DURATION, "Sleep Hours")
        .relabel(schema::MENTAL_STRESS_LEVEL, "Stress Level(1-10)"),
    );

    charts.push(
        ChartSpec::new(
            ChartKind::Scatter,
            "Exercise vs Mental Stress",
            ChartData::Fields {
                x: schema::PHYSICAL_EXERCISE.to_string(),
                y: Some(schema::MENTAL_STRESS_LEVEL.to_string()),
                color: Some(schema::GENDER.to_string()),
            },
        )
        .relabel(schema::PHYSICAL_EXERCISE, "Exercise Hours Per Week")
        .relabel(schema::MENTAL_STRESS_LEVEL, "Stress Level(1-10)"),
    );

    charts.push(
        ChartSpec::new(
            ChartKind::Box,
            "Mental Stress Level by Social Media Usage",
            ChartData::Fields {
                x: schema::SOCIAL_MEDIA_USAGE.to_string(),
                y: Some(schema::MENTAL_STRESS_LEVEL.to_string()),
                color: Some(schema::GENDER.to_string()),
            },
        )
        .relabel(schema::SOCIAL_MEDIA_USAGE, "Social Media Hours per Day")
        .relabel(schema::MENTAL_STRESS_LEVEL, "Stress Level (1-10)")
        .options(ChartOptions {
            show_all_points: true,
            ..Default::default()
        }),
    );

    charts.push(
        ChartSpec::new(
            ChartKind::Box,
            "Mental Stress Level by Academic Performance (GPA)",
            ChartData::Fields {
                x: schema::GPA.to_string(),
                y: Some(schema::MENTAL_STRESS_LEVEL.to_string()),
                color: Some(schema::GENDER.to_string()),
            },
        )
        .relabel(schema::GPA, "GPA (0-4.0)")
        .relabel(schema::MENTAL_STRESS_LEVEL, "Stress Level (1-10)")
        .options(ChartOptions {
            show_all_points: true,
            ..Default::default()
        }),
    );

    Ok(charts)
}
