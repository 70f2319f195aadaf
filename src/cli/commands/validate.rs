//! Validate command implementation
//!
//! Runs one validation pass over the input file and then the output stages
//! in order: console summary, summary file, validity chart, error chart.
//! Output stages are independent; a failure is reported and the next stage
//! still runs.

use super::shared::{
    RunReport, create_row_spinner, load_configuration, prepare_output_dir, setup_logging,
};
use crate::app::models::RuleSet;
use crate::app::services::record_source::RecordSource;
use crate::app::services::reporters::{
    ChartOutcome, ChartRenderer, OutputFormat, print_summary, write_summary_csv,
};
use crate::app::services::row_validator::{RowValidator, validate_source_with};
use crate::app::services::summary::ValidationSummary;
use crate::cli::args::Args;
use crate::config::Config;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanDuration;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How results are presented on the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub show_progress: bool,
}

impl RunOptions {
    fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

/// Entry point for the command line
pub fn run_validate(args: Args) -> Result<RunReport> {
    setup_logging(&args)?;
    debug!("Arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;

    let options = RunOptions {
        format: args.format,
        show_progress: args.show_progress(),
    };
    execute(&config, &options)
}

/// Validate the configured input and produce every enabled output
///
/// Only a fatal source problem returns an error. An input without any rows
/// ends the run early with no outputs and no summary.
pub fn execute(config: &Config, options: &RunOptions) -> Result<RunReport> {
    let start_time = Instant::now();

    if options.is_human() {
        println!("{}", "=== Data Validation Tool ===".bold());
    }

    let summary = match run_pass(config, options.show_progress) {
        Ok(summary) => summary,
        Err(Error::EmptySource { path }) => {
            warn!("No data found in {}", path.display());
            if options.is_human() {
                println!("No data found. Exiting program.");
            }
            return Ok(RunReport {
                processing_time: start_time.elapsed(),
                ..RunReport::default()
            });
        }
        Err(e) => return Err(e),
    };

    let mut report = RunReport {
        summary: Some(summary.clone()),
        ..RunReport::default()
    };

    print_summary(&summary, options.format)?;

    if let Err(e) = prepare_output_dir(config) {
        warn!("{}", e);
    }

    if config.output.write_summary {
        let path = config.output.summary_path();
        match write_summary_csv(&summary, &path) {
            Ok(()) => {
                if options.is_human() {
                    println!("\nValidation summary saved as '{}'.", path.display());
                }
                report.written.push(path);
            }
            Err(e) => report.record_failure(e),
        }
    } else {
        debug!("Summary file disabled");
    }

    if config.output.render_charts {
        let charts = write_charts(config, &summary, &mut report);
        if options.is_human() && !charts.is_empty() {
            let names: Vec<String> = charts
                .iter()
                .map(|path| format!("'{}'", path.display()))
                .collect();
            let noun = if charts.len() == 1 { "Chart" } else { "Charts" };
            println!("\n{} saved as {}.", noun, names.join(" and "));
        }
    } else {
        debug!("Chart rendering disabled");
    }

    report.processing_time = start_time.elapsed();
    info!(
        "Run finished in {}: {} outputs written, {} skipped, {} failed",
        HumanDuration(report.processing_time),
        report.written.len(),
        report.skipped.len(),
        report.failures.len()
    );

    if options.is_human() {
        println!("{}", "=== Program Finished ===".bold());
    }

    Ok(report)
}

/// One full pass over the input with an optional row spinner
fn run_pass(config: &Config, show_progress: bool) -> Result<ValidationSummary> {
    info!("Validating {}", config.source.input_path.display());

    let source = RecordSource::open(&config.source)?;
    let validator =
        RowValidator::for_header(RuleSet::standard(), &config.validation, source.header());
    let aggregator = validator.new_aggregator();

    let spinner = create_row_spinner(show_progress);
    let result = validate_source_with(source, &validator, aggregator, |processed| {
        if let Some(pb) = &spinner {
            pb.set_position(processed as u64);
        }
    });

    if let Some(pb) = spinner {
        match &result {
            Ok(summary) => pb.finish_with_message(format!("validated {} rows", summary.total_rows)),
            Err(_) => pb.abandon_with_message("read failed"),
        }
    }

    result
}

/// Render both charts, returning the paths actually written
fn write_charts(
    config: &Config,
    summary: &ValidationSummary,
    report: &mut RunReport,
) -> Vec<PathBuf> {
    let renderer = match ChartRenderer::new(&config.charts) {
        Ok(renderer) => renderer,
        Err(e) => {
            report.record_failure(e);
            return Vec::new();
        }
    };
    if !renderer.has_text() {
        debug!("Charts will be rendered without text");
    }

    let mut written = Vec::new();
    let stages = [
        (
            config.output.validity_chart_path(),
            renderer.write_validity_chart(summary, &config.output.validity_chart_path()),
        ),
        (
            config.output.error_chart_path(),
            renderer.write_error_chart(summary, &config.output.error_chart_path()),
        ),
    ];

    for (path, outcome) in stages {
        match outcome {
            Ok(ChartOutcome::Written(path)) => {
                written.push(path.clone());
                report.written.push(path);
            }
            Ok(ChartOutcome::Skipped { reason }) => {
                info!("Skipped {}: {}", path.display(), reason);
                report.skipped.push(path);
            }
            Err(e) => report.record_failure(e),
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_options() -> RunOptions {
        RunOptions {
            format: OutputFormat::Csv,
            show_progress: false,
        }
    }

    #[test]
    fn test_empty_input_produces_no_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("survey_data.csv");
        fs::write(&input, "\n  \n").unwrap();
        let config = Config::default()
            .with_input_path(&input)
            .with_output_dir(temp_dir.path());

        let report = execute(&config, &quiet_options()).unwrap();

        assert!(report.summary.is_none());
        assert!(report.written.is_empty());
        assert_eq!(report.exit_code(), 0);
        assert!(!config.output.summary_path().exists());
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::default()
            .with_input_path(temp_dir.path().join("missing.csv"))
            .with_output_dir(temp_dir.path());

        let result = execute(&config, &quiet_options());

        assert!(matches!(result, Err(Error::SourceUnreadable { .. })));
    }

    #[test]
    fn test_disabled_outputs_are_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("survey_data.csv");
        fs::write(&input, "ID,Age,Income,Name,Email\nP1,30,50000,x,a@b.com\n").unwrap();
        let mut config = Config::default()
            .with_input_path(&input)
            .with_output_dir(temp_dir.path())
            .without_charts();
        config.output.write_summary = false;

        let report = execute(&config, &quiet_options()).unwrap();

        assert_eq!(report.summary.unwrap().valid_rows, 1);
        assert!(report.written.is_empty());
        assert!(!config.output.summary_path().exists());
        assert!(!config.output.error_chart_path().exists());
    }
}
