//! Display directives and their renderers.
//!
//! The pipeline produces a [`Document`] — an ordered sequence of
//! headings, paragraphs, tables and chart descriptors. What a directive
//! looks like on screen is the renderer's business; [`TextRenderer`]
//! writes plain text for the terminal, and the whole document serializes
//! to JSON for any other surface.

use crate::charts::ChartSpec;
use crate::utils::any_value_display;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// One display instruction for the rendering surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "directive", rename_all = "snake_case")]
pub enum Directive {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Chart { spec: ChartSpec },
}

/// The ordered dashboard document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub directives: Vec<Directive>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, level: u8, text: impl Into<String>) {
        self.directives.push(Directive::Heading {
            level,
            text: text.into(),
        });
    }

    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.directives.push(Directive::Paragraph { text: text.into() });
    }

    pub fn table(&mut self, headers: Vec<String>, rows: Vec<Vec<String>>) {
        self.directives.push(Directive::Table { headers, rows });
    }

    pub fn chart(&mut self, spec: ChartSpec) {
        self.directives.push(Directive::Chart { spec });
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Turn a DataFrame into a table directive, cell values rendered as
/// display strings and nulls as empty cells.
pub fn dataframe_table(df: &DataFrame) -> PolarsResult<Directive> {
    let headers: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let mut row = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            let value = col.as_materialized_series().get(i)?;
            row.push(any_value_display(&value));
        }
        rows.push(row);
    }

    Ok(Directive::Table { headers, rows })
}

/// A consumer of dashboard documents.
pub trait Renderer {
    fn render(&mut self, document: &Document) -> io::Result<()>;
}

/// Plain-text renderer for terminal output.
pub struct TextRenderer<W: Write> {
    writer: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn render_table(&mut self, headers: &[String], rows: &[Vec<String>]) -> io::Result<()> {
        const MAX_CELL: usize = 24;

        let mut widths: Vec<usize> = headers.iter().map(|h| truncate(h, MAX_CELL).len()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(truncate(cell, MAX_CELL).len());
                }
            }
        }

        let header_line: Vec<String> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:<width$}", truncate(h, MAX_CELL), width = widths[i]))
            .collect();
        writeln!(self.writer, "{}", header_line.join("  "))?;

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(self.writer, "{}", "-".repeat(total))?;

        for row in rows {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    format!("{:<width$}", truncate(cell, MAX_CELL), width = widths[i])
                })
                .collect();
            writeln!(self.writer, "{}", line.join("  "))?;
        }

        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, document: &Document) -> io::Result<()> {
        for directive in &document.directives {
            match directive {
                Directive::Heading { level, text } => {
                    writeln!(self.writer)?;
                    writeln!(self.writer, "{} {}", "#".repeat(*level as usize), text)?;
                    writeln!(self.writer)?;
                }
                Directive::Paragraph { text } => {
                    writeln!(self.writer, "{}", text)?;
                }
                Directive::Table { headers, rows } => {
                    self.render_table(headers, rows)?;
                    writeln!(self.writer)?;
                }
                Directive::Chart { spec } => {
                    writeln!(self.writer, "[chart:{:?}] {}", spec.kind, spec.title)?;
                }
            }
        }
        self.writer.flush()
    }
}

/// Truncate a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartData, ChartKind};

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.heading(1, "Student Mental Health Dashboard");
        doc.paragraph("The dataset contains 3 student records with 2 features.");
        doc.table(
            vec!["Column".to_string(), "Missing Count".to_string()],
            vec![vec!["Age".to_string(), "2".to_string()]],
        );
        doc.chart(ChartSpec {
            kind: ChartKind::Histogram,
            title: "Distribution of Mental Stress Level".to_string(),
            data: ChartData::Fields {
                x: "Mental Stress Level".to_string(),
                y: None,
                color: None,
            },
            axis_labels: Vec::new(),
            options: Default::default(),
        });
        doc
    }

    #[test]
    fn test_document_builders_preserve_order() {
        let doc = sample_document();
        assert_eq!(doc.len(), 4);
        assert!(matches!(doc.directives[0], Directive::Heading { level: 1, .. }));
        assert!(matches!(doc.directives[3], Directive::Chart { .. }));
    }

    #[test]
    fn test_text_renderer_output() {
        let mut buffer = Vec::new();
        TextRenderer::new(&mut buffer)
            .render(&sample_document())
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("# Student Mental Health Dashboard"));
        assert!(output.contains("Missing Count"));
        assert!(output.contains("[chart:Histogram] Distribution of Mental Stress Level"));
    }

    #[test]
    fn test_dataframe_table_nulls_render_empty() {
        let df = df![
            "Age" => [Some(19i64), None],
            "Gender" => ["Male", "Female"],
        ]
        .unwrap();

        let Directive::Table { headers, rows } = dataframe_table(&df).unwrap() else {
            panic!("expected a table directive");
        };
        assert_eq!(headers, vec!["Age".to_string(), "Gender".to_string()]);
        assert_eq!(rows[1][0], "");
        assert_eq!(rows[1][1], "Female");
    }

    #[test]
    fn test_document_serializes_with_directive_tags() {
        let json = serde_json::to_string(&sample_document()).unwrap();
        assert!(json.contains("\"directive\":\"heading\""));
        assert!(json.contains("\"directive\":\"chart\""));
    }

    #[test]
    fn test_truncate_long_cells() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(
            truncate("a very long header that keeps going", 10),
            "a very ..."
        );
    }
}
