//! End-to-end tests: input file in, summary file and charts out

use data_validator::cli::commands::{RunOptions, execute};
use data_validator::app::services::reporters::OutputFormat;
use data_validator::{Config, ValidationSummary, validate_file};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SURVEY: &str = "\
ID,Age,Income,Name,Email
P1,30,50000,x,a@b.com
P2,150,50000,x,a@b.com
P3,30,-5,x,bad
";

fn write_input(dir: &Path, contents: &str) -> Config {
    let input = dir.join("survey_data.csv");
    fs::write(&input, contents).unwrap();
    Config::default()
        .with_input_path(input)
        .with_output_dir(dir.join("reports"))
}

fn csv_options() -> RunOptions {
    RunOptions {
        format: OutputFormat::Csv,
        show_progress: false,
    }
}

#[test]
fn test_reference_survey_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_input(temp_dir.path(), SURVEY);

    let report = execute(&config, &csv_options()).unwrap();

    let summary = report.summary.clone().unwrap();
    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.valid_rows, 1);
    assert_eq!(summary.invalid_rows, 2);
    assert_eq!(summary.rule_error_count("Age"), Some(1));
    assert_eq!(summary.rule_error_count("Income"), Some(1));
    assert_eq!(summary.rule_error_count("Email"), Some(1));
    assert_eq!(report.exit_code(), 0);

    let contents = fs::read_to_string(config.output.summary_path()).unwrap();
    assert_eq!(
        contents,
        "Metric,Count,Percentage\n\
         Total Rows Processed,3,100%\n\
         Valid Rows,1,33.3%\n\
         Invalid Rows,2,66.7%\n\
         Age Errors,1,33.3%\n\
         Income Errors,1,33.3%\n\
         Email Errors,1,33.3%\n"
    );

    let validity = image::open(config.output.validity_chart_path()).unwrap();
    assert_eq!(validity.to_rgba8().dimensions(), (400, 300));
    let errors = image::open(config.output.error_chart_path()).unwrap();
    assert_eq!(errors.to_rgba8().dimensions(), (400, 300));
    assert_eq!(report.written.len(), 3);
}

#[test]
fn test_header_only_file_skips_validity_chart() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_input(temp_dir.path(), "ID,Age,Income,Name,Email\n\n");

    let report = execute(&config, &csv_options()).unwrap();

    let summary = report.summary.clone().unwrap();
    assert_eq!(summary.total_rows, 0);
    assert!(summary.is_consistent());

    let contents = fs::read_to_string(config.output.summary_path()).unwrap();
    assert!(contents.contains("Valid Rows,0,0.0%\n"));

    assert!(!config.output.validity_chart_path().exists());
    assert!(config.output.error_chart_path().exists());
    assert_eq!(report.skipped, vec![config.output.validity_chart_path()]);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_unwritable_output_reports_failures_but_keeps_summary() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = write_input(temp_dir.path(), SURVEY);
    // A regular file where the output directory should be
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    config.output.output_dir = blocker;

    let report = execute(&config, &csv_options()).unwrap();

    assert_eq!(report.summary.as_ref().unwrap().total_rows, 3);
    assert_eq!(report.failures.len(), 3);
    assert_eq!(report.exit_code(), 2);
}

#[test]
fn test_header_resolution_with_reordered_columns() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_input(
        temp_dir.path(),
        "Email;ID;Income;Age\na@b.com;P1;100;40\nnobody;P2;0;40\n",
    )
    .with_delimiter(';')
    .with_header_resolution()
    .without_charts();

    let summary: ValidationSummary =
        validate_file(&config.source, &config.validation).unwrap();

    assert_eq!(summary.valid_rows, 1);
    assert_eq!(summary.invalid_rows, 1);
    assert_eq!(summary.rule_error_count("Age"), Some(0));
    assert_eq!(summary.rule_error_count("Income"), Some(1));
    assert_eq!(summary.rule_error_count("Email"), Some(1));
}

#[test]
fn test_repeated_runs_produce_identical_summaries() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_input(temp_dir.path(), SURVEY).without_charts();

    let first = execute(&config, &csv_options()).unwrap();
    let second = execute(&config, &csv_options()).unwrap();

    assert_eq!(first.summary, second.summary);
}
