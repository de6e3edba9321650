//! Integration tests for loading files and running several analyses over them.

use std::io::Write;
use std::sync::{Arc, Mutex};

use column_analysis::analyzers::{AnalysisKind, AnalysisRunner, AnalyzerError, ColumnAnalysis};
use column_analysis::background::{AnalysisJob, BackgroundTask, Completion};
use column_analysis::config::AnalysisConfig;
use column_analysis::formatters::{JsonFormatter, ResultFormatter};
use column_analysis::prelude::*;
use column_analysis::render::RenderKind;
use tempfile::NamedTempFile;

const IRIS: &str = "\
sepal_width,petal_flag,species
3.5,0,setosa
3.0,0,setosa
3.2,1,versicolor
,1,versicolor
2.8,1,virginica
3.0,0,virginica
";

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn full_runner(dataset: &Dataset, config: &AnalysisConfig) -> AnalysisRunner {
    let label = dataset.column_index("species").unwrap();
    let mut runner = AnalysisRunner::new(label).with_dataset_name("iris");
    for column in ["sepal_width", "petal_flag"] {
        let index = dataset.column_index(column).unwrap();
        for kind in AnalysisKind::ALL {
            runner = runner.add(ColumnAnalysis::from_kind(kind, config).unwrap(), index, column);
        }
    }
    runner
}

#[test]
fn test_csv_file_through_runner() {
    let file = write_file(IRIS);
    let dataset = CsvSource::new(file.path()).load().unwrap();
    assert_eq!(dataset.len(), 6);

    let report = full_runner(&dataset, &AnalysisConfig::default())
        .run(dataset.rows())
        .unwrap();
    assert_eq!(report.reports().len(), 6);
    assert!(!report.has_errors());

    let width = report
        .get_analysis("sepal_width", AnalysisKind::Spread)
        .unwrap();
    let spread = width.result.as_continuous_spread().unwrap();
    // 3.5 + 3.0 + 3.2 + 2.8 + 3.0 = 15.5 over 5 parsed values
    assert!((spread.mean - 3.1).abs() < 1e-12);
    assert_eq!(spread.high.len(), 2);
    assert_eq!(spread.low.len(), 3);

    let flag = report
        .get_analysis("petal_flag", AnalysisKind::Spread)
        .unwrap();
    assert!(matches!(
        RenderPlan::for_result(&flag.title, &flag.result).kind,
        RenderKind::StackedBar { .. }
    ));

    let width_dist = report
        .get_analysis("sepal_width", AnalysisKind::Distribution)
        .unwrap();
    let dist = width_dist.result.as_distribution().unwrap();
    // The blank field is a category of its own.
    assert_eq!(dist.count_of(""), Some(1));
    assert_eq!(dist.categories[0].name, "3.0");
    assert_eq!(dist.total(), 6);

    let summary = report.summary();
    assert_eq!(summary.total_reports, 6);
    assert_eq!(summary.empty_results, 0);
}

#[test]
fn test_tsv_config_file_and_alphabetical_order() {
    let data = write_file("b\tx\na\ty\nb\tz\nc\tx\n");
    let config_file = write_file(r#"{"category_order": "alphabetical", "others_label": "rest"}"#);
    let config = AnalysisConfig::from_json_file(config_file.path()).unwrap();

    let options = CsvOptions::tsv().with_header(false);
    let dataset = CsvSource::with_options(data.path(), options).load().unwrap();
    let analysis = ColumnAnalysis::from_kind(AnalysisKind::Distribution, &config).unwrap();
    let result = analysis.analyze(dataset.rows(), 1, 0).unwrap();

    let names: Vec<_> = result
        .as_distribution()
        .unwrap()
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_ragged_file_fails_only_the_affected_requests() {
    let file = write_file("v,w,label\n1,2,a\n3,b\n5,6,c\n");
    let dataset = CsvSource::new(file.path()).load().unwrap();

    // Label at index 1 fits every row, column 2 does not.
    let report = AnalysisRunner::new(1)
        .add(ColumnAnalysis::from(AnalysisKind::Statistics), 0, "v")
        .add(ColumnAnalysis::from(AnalysisKind::Statistics), 2, "label")
        .run(dataset.rows())
        .unwrap();

    assert_eq!(report.reports().len(), 1);
    assert_eq!(report.errors().len(), 1);
    assert!(report.errors()[0].error.contains("Row 1"));

    let fail_fast = AnalysisRunner::new(1)
        .add(ColumnAnalysis::from(AnalysisKind::Statistics), 2, "label")
        .continue_on_error(false)
        .run(dataset.rows());
    assert!(matches!(fail_fast, Err(AnalyzerError::Execution(_))));
}

#[test]
fn test_report_json_round_trip() {
    let file = write_file(IRIS);
    let dataset = CsvSource::new(file.path()).load().unwrap();
    let report = full_runner(&dataset, &AnalysisConfig::default())
        .run(dataset.rows())
        .unwrap();

    let json = JsonFormatter::new().format(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 6);
    assert_eq!(results[0]["analysis"], "distribution");
    assert_eq!(results[0]["result"]["type"], "frequency_distribution");
    assert_eq!(value["metadata"]["dataset_name"], "iris");
}

#[tokio::test]
async fn test_background_job_reports_success() {
    let file = write_file(IRIS);
    let dataset = Arc::new(CsvSource::new(file.path()).load().unwrap());
    let runner = full_runner(&dataset, &AnalysisConfig::default());

    let completions = Arc::new(Mutex::new(Vec::new()));
    let sink = completions.clone();
    let report = BackgroundTask::new(
        move |c: Completion| sink.lock().unwrap().push(c),
        AnalysisJob::new(runner, dataset),
    )
    .spawn()
    .await
    .unwrap()
    .unwrap();

    assert_eq!(report.reports().len(), 6);
    assert_eq!(*completions.lock().unwrap(), vec![Completion::succeeded()]);
}

#[tokio::test]
async fn test_background_job_reports_failure() {
    let dataset = Arc::new(Dataset::new(vec![vec!["1".to_string()]]));
    let runner = AnalysisRunner::new(0)
        .add(ColumnAnalysis::from(AnalysisKind::Spread), 3, "missing")
        .continue_on_error(false);

    let completions = Arc::new(Mutex::new(Vec::new()));
    let sink = completions.clone();
    let output = BackgroundTask::new(
        move |c: Completion| sink.lock().unwrap().push(c),
        AnalysisJob::new(runner, dataset),
    )
    .spawn()
    .await
    .unwrap();

    assert!(output.is_none());
    let completions = completions.lock().unwrap();
    assert_eq!(completions.len(), 1);
    assert!(!completions[0].success);
    assert!(completions[0].error.as_deref().unwrap().contains("missing"));
}
