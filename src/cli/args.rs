//! Command-line argument definitions for the data validator
//!
//! The tool has a single action, so arguments live directly on [`Args`]
//! without subcommands. Every option is an override on top of the layered
//! configuration (defaults, then config file).

use crate::app::services::reporters::OutputFormat;
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// Validate survey records and report per-column error counts
#[derive(Debug, Clone, Parser)]
#[command(
    name = "data-validator",
    version,
    about = "Validate survey records and report per-column error counts",
    long_about = "Reads a delimited survey file, checks every row against the Age, Income and \
                  Email rules, prints a summary and writes a CSV summary plus two PNG charts \
                  (valid vs invalid rows, and errors per column)."
)]
pub struct Args {
    /// Input file to validate
    ///
    /// Defaults to survey_data.csv in the current directory, or the
    /// input_path set in the config file.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Directory the summary file and charts are written to
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path (TOML format)
    ///
    /// When omitted, <config dir>/data-validator/config.toml is used if it exists.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field delimiter of the input file (single ASCII character)
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Locate rule columns by header name instead of fixed position
    #[arg(long = "by-header")]
    pub by_header: bool,

    /// Attribute missing fields in short rows to the rules that needed them
    #[arg(long = "strict-attribution")]
    pub strict_attribution: bool,

    /// Skip rendering the PNG charts
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Skip writing the CSV summary file
    #[arg(long = "no-summary-file")]
    pub no_summary_file: bool,

    /// Console summary format
    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Enable verbose logging output
    ///
    /// Use multiple times for increased verbosity:
    /// -v: info level, -vv: debug level, -vvv: trace level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress progress output
    ///
    /// Only errors are logged. Overrides verbose settings.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Whether to show the row progress spinner
    ///
    /// Hidden in quiet mode and for machine-readable output.
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Human
    }

    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err(Error::configuration(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    delimiter
                )));
            }
        }

        if let Some(input) = &self.input {
            if input.as_os_str().is_empty() {
                return Err(Error::configuration("Input path cannot be empty"));
            }
        }

        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(arguments: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("data-validator").chain(arguments.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);

        assert_eq!(args.input, None);
        assert_eq!(args.output_dir, None);
        assert_eq!(args.delimiter, None);
        assert!(!args.by_header);
        assert!(!args.strict_attribution);
        assert!(!args.no_charts);
        assert!(!args.no_summary_file);
        assert_eq!(args.format, OutputFormat::Human);
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.show_progress());
    }

    #[test]
    fn test_full_argument_set() {
        let args = parse(&[
            "records.tsv",
            "-o",
            "reports",
            "-d",
            ";",
            "--by-header",
            "--strict-attribution",
            "--no-charts",
            "--no-summary-file",
            "--format",
            "json",
        ]);

        assert_eq!(args.input, Some(PathBuf::from("records.tsv")));
        assert_eq!(args.output_dir, Some(PathBuf::from("reports")));
        assert_eq!(args.delimiter, Some(';'));
        assert!(args.by_header);
        assert!(args.strict_attribution);
        assert!(args.no_charts);
        assert!(args.no_summary_file);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(!args.show_progress());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse(&["-v"]).get_log_level(), "info");
        assert_eq!(parse(&["-vv"]).get_log_level(), "debug");
        assert_eq!(parse(&["-vvvv"]).get_log_level(), "trace");

        let quiet = parse(&["-q"]);
        assert_eq!(quiet.get_log_level(), "error");
        assert!(!quiet.show_progress());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["data-validator", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let temp_dir = TempDir::new().unwrap();

        assert!(parse(&[]).validate().is_ok());
        assert!(parse(&["-d", "é"]).validate().is_err());

        let missing_config = temp_dir.path().join("missing.toml");
        let args = parse(&["-c", missing_config.to_str().unwrap()]);
        assert!(args.validate().is_err());

        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();
        let args = parse(&["-c", config_path.to_str().unwrap()]);
        assert!(args.validate().is_ok());
    }
}
