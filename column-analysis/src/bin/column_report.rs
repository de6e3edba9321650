//! Column Report
//!
//! Loads a CSV or TSV file and analyzes the requested columns against a label
//! column.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use column_analysis::analyzers::{AnalysisKind, AnalysisRunner, AnalyzerError, ColumnAnalysis};
use column_analysis::background::{AnalysisJob, BackgroundTask, Completion};
use column_analysis::config::AnalysisConfig;
use column_analysis::dataset::Dataset;
use column_analysis::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ResultFormatter,
};
use column_analysis::logging::setup::{init_logging, LoggingConfig};
use column_analysis::sources::{CsvOptions, CsvSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
    Markdown,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Delimited file to analyze
    #[arg(long, short)]
    input: PathBuf,

    /// Label column, by header name or zero-based index
    #[arg(long, short)]
    label: String,

    /// Column to analyze, by header name or index (default: every other column)
    #[arg(long = "column", short = 'c')]
    columns: Vec<String>,

    /// Analysis to run (default: all of them)
    #[arg(long = "analysis", short = 'a', value_parser = parse_analysis)]
    analyses: Vec<AnalysisKind>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Read tab separated values
    #[arg(long)]
    tsv: bool,

    /// The first line holds data, not column names
    #[arg(long)]
    no_header: bool,

    /// JSON file with analysis settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop at the first failing analysis
    #[arg(long)]
    fail_fast: bool,

    /// Include metadata and list every spread point
    #[arg(long)]
    detailed: bool,

    /// Log debug details to stderr
    #[arg(long, short)]
    verbose: bool,

    /// Log in JSON format
    #[arg(long)]
    json_logs: bool,
}

fn parse_analysis(value: &str) -> Result<AnalysisKind, AnalyzerError> {
    value.parse()
}

/// Builds the runner for the requested columns and analyses.
fn build_runner(
    args: &Args,
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> column_analysis::Result<AnalysisRunner> {
    let label = dataset.resolve_column(&args.label)?;

    let columns: Vec<usize> = if args.columns.is_empty() {
        let width = dataset
            .headers()
            .len()
            .max(dataset.rows().first().map_or(0, Vec::len));
        (0..width).filter(|&c| c != label).collect()
    } else {
        args.columns
            .iter()
            .map(|c| dataset.resolve_column(c))
            .collect::<Result<_, _>>()?
    };

    let analyses: &[AnalysisKind] = if args.analyses.is_empty() {
        &AnalysisKind::ALL
    } else {
        &args.analyses
    };

    let mut runner = AnalysisRunner::new(label)
        .continue_on_error(config.continue_on_error && !args.fail_fast)
        .with_dataset_name(args.input.display().to_string());
    for &column in &columns {
        for &kind in analyses {
            runner = runner.add(
                ColumnAnalysis::from_kind(kind, config)?,
                column,
                dataset.column_name(column),
            );
        }
    }
    Ok(runner)
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    let options = if args.tsv {
        CsvOptions::tsv()
    } else {
        CsvOptions::csv()
    }
    .with_header(!args.no_header);
    let dataset = Arc::new(CsvSource::with_options(&args.input, options).load()?);

    let runner = build_runner(&args, &dataset, &config)?;
    info!(requests = runner.request_count(), "Running analyses");

    let task = BackgroundTask::new(
        |completion: Completion| {
            if !completion.success {
                error!(error = ?completion.error, "Analysis did not complete");
            }
        },
        AnalysisJob::new(runner, dataset),
    );
    let Some(report) = task.join().await? else {
        return Err("analysis failed".into());
    };

    let formatter_config = if args.detailed {
        FormatterConfig::detailed().with_colors(false)
    } else {
        FormatterConfig::default()
    };
    let output = match args.format {
        OutputFormat::Human => HumanFormatter::with_config(formatter_config).format(&report)?,
        OutputFormat::Json => JsonFormatter::with_config(formatter_config).format(&report)?,
        OutputFormat::Markdown => {
            MarkdownFormatter::with_config(formatter_config).format(&report)?
        }
    };
    println!("{output}");

    if report.has_errors() {
        return Err(format!(
            "{} of {} analyses failed",
            report.errors().len(),
            report.errors().len() + report.reports().len()
        )
        .into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let logging = if args.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::default()
    }
    .with_json_format(args.json_logs);
    if let Err(e) = init_logging(logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
