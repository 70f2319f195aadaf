//! Shared components for the CLI command
//!
//! Logging setup, layered configuration loading and the run report returned
//! to `main`.

use crate::cli::args::Args;
use crate::config::{AttributionPolicy, ColumnResolution, Config};
use crate::{Error, Result, ValidationSummary};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of one run, used by `main` to pick the exit status
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Summary of the pass; `None` when the input held no rows at all
    pub summary: Option<ValidationSummary>,
    /// Files written by the output stages
    pub written: Vec<PathBuf>,
    /// Output stages that had nothing to write
    pub skipped: Vec<PathBuf>,
    /// Messages of output stages that failed
    pub failures: Vec<String>,
    /// Wall-clock time of the run
    pub processing_time: Duration,
}

impl RunReport {
    pub fn has_output_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// 0 on success, 2 when at least one output stage failed
    pub fn exit_code(&self) -> i32 {
        if self.has_output_failures() { 2 } else { 0 }
    }

    /// Exit status for a run that ended in `error`
    ///
    /// Fatal errors stopped the run before it could report anything and
    /// exit with 1. Anything else is an output failure that escaped its
    /// stage and exits with 2, like a failure recorded in the report.
    pub fn error_exit_code(error: &Error) -> i32 {
        if error.is_fatal() { 1 } else { 2 }
    }

    /// Report a failed output stage and keep going
    pub fn record_failure(&mut self, error: Error) {
        warn!("Output stage failed: {}", error);
        eprintln!("{}", error.to_string().red());
        self.failures.push(error.to_string());
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("data_validator={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
pub fn load_configuration(args: &Args) -> Result<Config> {
    let default_config_path = if args.config.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults");
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Apply command-line overrides; flags only ever switch behavior on
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(input) = &args.input {
        config.source.input_path = input.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output.output_dir = output_dir.clone();
    }
    if let Some(delimiter) = args.delimiter {
        config.source.delimiter = delimiter;
    }
    if args.by_header {
        config.validation.column_resolution = ColumnResolution::HeaderName;
    }
    if args.strict_attribution {
        config.validation.attribution = AttributionPolicy::PerRule;
    }
    if args.no_charts {
        config.output.render_charts = false;
    }
    if args.no_summary_file {
        config.output.write_summary = false;
    }
}

/// Create the output directory if needed
pub fn prepare_output_dir(config: &Config) -> Result<()> {
    let output_dir = &config.output.output_dir;
    if output_dir.as_os_str().is_empty() || output_dir.exists() {
        return Ok(());
    }

    std::fs::create_dir_all(output_dir).map_err(|e| {
        Error::io(
            format!(
                "Failed to create output directory '{}'",
                output_dir.display()
            ),
            e,
        )
    })?;
    info!("Output directory created: {}", output_dir.display());
    Ok(())
}

/// Row counter shown while the pass runs
pub fn create_row_spinner(show: bool) -> Option<ProgressBar> {
    if !show {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} rows {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("validating...");
    Some(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_cli_overrides() {
        let args = Args::try_parse_from([
            "data-validator",
            "input.csv",
            "-o",
            "out",
            "-d",
            ";",
            "--by-header",
            "--strict-attribution",
            "--no-charts",
            "--no-summary-file",
        ])
        .unwrap();
        let mut config = Config::default();

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.source.input_path, PathBuf::from("input.csv"));
        assert_eq!(config.output.output_dir, PathBuf::from("out"));
        assert_eq!(config.source.delimiter, ';');
        assert_eq!(
            config.validation.column_resolution,
            ColumnResolution::HeaderName
        );
        assert_eq!(config.validation.attribution, AttributionPolicy::PerRule);
        assert!(!config.output.render_charts);
        assert!(!config.output.write_summary);
    }

    #[test]
    fn test_absent_flags_keep_config_values() {
        let args = Args::try_parse_from(["data-validator"]).unwrap();
        let mut config = Config::default()
            .with_input_path("from_file.csv")
            .with_header_resolution()
            .without_charts();

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.source.input_path, PathBuf::from("from_file.csv"));
        assert_eq!(
            config.validation.column_resolution,
            ColumnResolution::HeaderName
        );
        assert!(!config.output.render_charts);
    }

    #[test]
    fn test_load_configuration_from_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[source]\ndelimiter = \";\"\n\n[output]\nwrite_summary = false\n",
        )
        .unwrap();

        let args = Args::try_parse_from([
            "data-validator",
            "-c",
            config_path.to_str().unwrap(),
            "-o",
            "reports",
        ])
        .unwrap();
        let config = load_configuration(&args).unwrap();

        assert_eq!(config.source.delimiter, ';');
        assert!(!config.output.write_summary);
        assert_eq!(config.output.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_invalid_delimiter_override_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let args = Args::try_parse_from([
            "data-validator",
            "-c",
            config_path.to_str().unwrap(),
            "-d",
            "\"",
        ])
        .unwrap();

        assert!(matches!(
            load_configuration(&args),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_prepare_output_dir_creates_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("reports").join("today");
        let config = Config::default().with_output_dir(&output_dir);

        prepare_output_dir(&config).unwrap();

        assert!(output_dir.is_dir());
    }

    #[test]
    fn test_run_report_exit_codes() {
        let mut report = RunReport::default();
        assert_eq!(report.exit_code(), 0);

        report.record_failure(Error::chart_write_failed("chart.png", "disk full"));
        assert!(report.has_output_failures());
        assert_eq!(report.exit_code(), 2);
        assert!(report.failures[0].contains("chart.png"));
    }

    #[test]
    fn test_error_exit_codes() {
        let unreadable = Error::source_unreadable(
            "survey_data.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(RunReport::error_exit_code(&unreadable), 1);
        assert_eq!(
            RunReport::error_exit_code(&Error::configuration("bad delimiter")),
            1
        );
        assert_eq!(
            RunReport::error_exit_code(&Error::summary_write_failed("summary.csv", "denied")),
            2
        );
    }
}
