//! CLI entry point for the survey analysis pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use mindscope_analysis::render::{Renderer, TextRenderer};
use mindscope_analysis::reporting::ReportGenerator;
use mindscope_analysis::{AnalysisConfig, AnalysisPipeline, SourceRegistry, loader};
use std::path::Path;
use tracing::{debug, info, warn};

/// The screening query the dashboard has always shipped with. It targets
/// a `student_mental_health` source whose columns do not exist in the
/// survey schema; see DESIGN.md for why this is preserved as-is.
const DEFAULT_SCREENING_QUERY: &str =
    "SELECT * FROM student_mental_health WHERE depression_score > 50 AND anxiety_score > 40";

#[derive(Parser, Debug)]
#[command(
    author = "Mindscope Team",
    version,
    about = "Student mental-health survey analysis dashboard",
    long_about = "Analyzes a student mental-health survey CSV: cleans the data, derives \
                  composite metrics, and renders the dashboard document.\n\n\
                  EXAMPLES:\n  \
                  # Render the dashboard to the terminal\n  \
                  mindscope-analysis -i survey.csv\n\n  \
                  # Machine-readable document on stdout\n  \
                  mindscope-analysis -i survey.csv --json\n\n  \
                  # Also write outputs/survey_report.json\n  \
                  mindscope-analysis -i survey.csv --emit-report"
)]
struct Args {
    /// Path to the survey CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Custom report file name (without extension)
    ///
    /// If not specified, the input file stem is used
    #[arg(long)]
    output_name: Option<String>,

    /// Number of rows shown in the data-overview table
    #[arg(long, default_value = "10")]
    head: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the dashboard document as JSON to stdout
    ///
    /// Disables all logging; only the JSON document is written.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Override the screening query run after the analysis
    #[arg(long)]
    screening_query: Option<String>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let raw = loader::load_survey_csv(Path::new(&args.input))?;
    info!("Dataset loaded successfully: {:?}", raw.shape());

    // Sources are registered as loaded, before any cleaning, under the
    // input file stem.
    let stem = extract_file_stem(&args.input);
    let mut registry = SourceRegistry::new();
    registry.register(stem.clone(), raw.clone());

    let config = AnalysisConfig::builder()
        .overview_rows(args.head)
        .output_dir(args.output.as_str())
        .emit_report(args.emit_report)
        .build()
        .map_err(|e| anyhow!("{}", e))?;

    let outcome = AnalysisPipeline::new(config).run(raw)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.document)?);
    } else {
        let stdout = std::io::stdout();
        TextRenderer::new(stdout.lock()).render(&outcome.document)?;
    }

    if args.emit_report {
        let generator = ReportGenerator::new(
            std::path::PathBuf::from(&args.output),
            args.output_name.clone(),
        );
        let report = ReportGenerator::build_report(&args.input, &outcome);
        let report_path = generator.write_report_to_file(&report, &stem)?;
        info!("Report written to: {}", report_path.display());
    }

    // The screening query runs against the registry, not the cleaned
    // table; its result is informational only.
    let sql = args
        .screening_query
        .as_deref()
        .unwrap_or(DEFAULT_SCREENING_QUERY);
    match registry.query(sql) {
        Ok(matched) => {
            debug!("Screening query matched {} rows", matched.height());
        }
        Err(e) => {
            warn!(
                "Screening query failed: {} (registered sources: {:?})",
                e,
                registry.source_names()
            );
        }
    }

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("survey")
        .to_string()
}
