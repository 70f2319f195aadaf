//! Console rendering of the validation summary

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::app::services::summary::ValidationSummary;
use crate::{Error, Result};

use super::summary_writer::summary_records;

/// Output format for the console summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Render the summary in the requested format
pub fn render_summary(summary: &ValidationSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(render_human(summary)),
        OutputFormat::Json => render_json(summary),
        OutputFormat::Csv => Ok(render_csv(summary)),
    }
}

/// Print the summary to standard output
pub fn print_summary(summary: &ValidationSummary, format: OutputFormat) -> Result<()> {
    let rendered = render_summary(summary, format)?;
    print!("{}", rendered);
    Ok(())
}

/// Totals followed by each rule's failure count in registration order
fn render_human(summary: &ValidationSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "=== Validation Summary ===".bold()));
    out.push_str(&format!("Total rows processed: {}\n", summary.total_rows));
    out.push_str(&format!(
        "Valid rows: {}\n",
        summary.valid_rows.to_string().green()
    ));
    out.push_str(&format!(
        "Invalid rows: {}\n",
        summary.invalid_rows.to_string().red()
    ));

    out.push_str("\nErrors by column:\n");
    for entry in &summary.rule_errors {
        let count = if entry.count == 0 {
            entry.count.to_string().normal()
        } else {
            entry.count.to_string().yellow()
        };
        out.push_str(&format!(" - {}: {}\n", entry.rule, count));
    }

    out
}

fn render_json(summary: &ValidationSummary) -> Result<String> {
    let json = serde_json::to_string_pretty(summary).map_err(|e| {
        Error::configuration(format!("Failed to serialize validation summary: {}", e))
    })?;
    Ok(format!("{}\n", json))
}

/// Same rows as the summary file
fn render_csv(summary: &ValidationSummary) -> String {
    summary_records(summary)
        .iter()
        .map(|record| format!("{}\n", record.join(",")))
        .collect()
}
