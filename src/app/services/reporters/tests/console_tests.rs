use super::{create_empty_summary, create_reference_summary};
use crate::app::services::reporters::console::{OutputFormat, render_summary};
use crate::app::services::summary::ValidationSummary;

fn render_plain(summary: &ValidationSummary, format: OutputFormat) -> String {
    colored::control::set_override(false);
    render_summary(summary, format).unwrap()
}

#[test]
fn test_human_summary_lists_totals_and_rules_in_order() {
    let output = render_plain(&create_reference_summary(), OutputFormat::Human);

    assert!(output.contains("=== Validation Summary ==="));
    assert!(output.contains("Total rows processed: 5\n"));
    assert!(output.contains("Valid rows: 1\n"));
    assert!(output.contains("Invalid rows: 4\n"));
    assert!(output.contains("Errors by column:\n"));

    let age = output.find(" - Age: 2").unwrap();
    let income = output.find(" - Income: 1").unwrap();
    let email = output.find(" - Email: 2").unwrap();
    assert!(age < income && income < email);
}

#[test]
fn test_human_summary_for_empty_pass() {
    let output = render_plain(&create_empty_summary(), OutputFormat::Human);

    assert!(output.contains("Total rows processed: 0\n"));
    assert!(output.contains(" - Income: 0\n"));
}

#[test]
fn test_json_summary_round_trips() {
    let summary = create_reference_summary();
    let output = render_plain(&summary, OutputFormat::Json);

    let parsed: ValidationSummary = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, summary);
}

#[test]
fn test_csv_summary_matches_summary_file_rows() {
    let output = render_plain(&create_reference_summary(), OutputFormat::Csv);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Metric,Count,Percentage");
    assert_eq!(lines[2], "Valid Rows,1,20.0%");
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_output_format_default_is_human() {
    assert_eq!(OutputFormat::default(), OutputFormat::Human);
}
