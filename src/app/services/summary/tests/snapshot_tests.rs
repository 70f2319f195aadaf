//! Tests for summary percentages and invariants

use crate::app::services::summary::{RuleErrorCount, ValidationSummary};

fn summary_with(total: usize, valid: usize, invalid: usize, counts: [usize; 3]) -> ValidationSummary {
    let mut summary = ValidationSummary::new(["Age", "Income", "Email"]);
    summary.total_rows = total;
    summary.valid_rows = valid;
    summary.invalid_rows = invalid;
    for (entry, count) in summary.rule_errors.iter_mut().zip(counts) {
        entry.count = count;
    }
    summary
}

#[test]
fn test_percentages() {
    let summary = summary_with(3, 1, 2, [1, 1, 1]);

    assert_eq!(summary.format_percentage(summary.valid_rows), "33.3%");
    assert_eq!(summary.format_percentage(summary.invalid_rows), "66.7%");
    assert_eq!(summary.format_percentage(3), "100.0%");
    assert!((summary.valid_rate() - 33.333).abs() < 0.01);
    assert!((summary.invalid_rate() - 66.666).abs() < 0.01);
}

#[test]
fn test_percentage_halves_round_up() {
    let summary = summary_with(16, 1, 15, [0, 0, 0]);
    // 1 / 16 = 6.25%
    assert_eq!(summary.format_percentage(1), "6.3%");

    let summary = summary_with(8, 1, 7, [0, 0, 0]);
    assert_eq!(summary.format_percentage(1), "12.5%");
}

#[test]
fn test_percentage_rounds_the_computed_value_once() {
    // 9 / 2000 * 100 is 0.44999999999999996 as a double
    let summary = summary_with(2000, 9, 1991, [0, 0, 0]);
    assert_eq!(summary.format_percentage(9), "0.4%");

    let summary = summary_with(7, 1, 6, [0, 0, 0]);
    assert_eq!(summary.format_percentage(1), "14.3%");
    assert_eq!(summary.format_percentage(7), "100.0%");
}

#[test]
fn test_zero_total_uses_unit_divisor() {
    let summary = ValidationSummary::new(["Age", "Income", "Email"]);

    assert_eq!(summary.percentage_of(0), 0.0);
    assert_eq!(summary.format_percentage(0), "0.0%");
    assert_eq!(summary.valid_rate(), 0.0);
    assert!(summary.is_consistent());
}

#[test]
fn test_max_rule_errors() {
    assert_eq!(summary_with(5, 1, 4, [2, 4, 1]).max_rule_errors(), 4);
    assert_eq!(summary_with(0, 0, 0, [0, 0, 0]).max_rule_errors(), 0);

    let empty: ValidationSummary = ValidationSummary::new(Vec::<String>::new());
    assert_eq!(empty.max_rule_errors(), 0);
}

#[test]
fn test_consistency_checks() {
    assert!(summary_with(3, 1, 2, [1, 1, 1]).is_consistent());
    // valid + invalid must equal total
    assert!(!summary_with(3, 1, 1, [0, 0, 0]).is_consistent());
    // a rule cannot fail more rows than were processed
    assert!(!summary_with(2, 0, 2, [3, 0, 0]).is_consistent());
}

#[test]
fn test_summary_line() {
    let line = summary_with(3, 1, 2, [1, 1, 1]).summary();

    assert!(line.contains("3 rows (1 valid, 2 invalid, 33.3% valid, 66.7% invalid)"));
    assert!(line.contains("Age: 1, Income: 1, Email: 1"));

    let empty = ValidationSummary::new(Vec::<String>::new()).summary();
    assert!(empty.contains("Errors: none"));
}

#[test]
fn test_serializes_in_registration_order() {
    let summary = summary_with(3, 1, 2, [1, 0, 2]);
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["total_rows"], 3);
    assert_eq!(json["rule_errors"][0]["rule"], "Age");
    assert_eq!(json["rule_errors"][2]["count"], 2);

    let round_trip: ValidationSummary = serde_json::from_value(json).unwrap();
    assert_eq!(
        round_trip.rule_errors[1],
        RuleErrorCount {
            rule: "Income".to_string(),
            count: 0
        }
    );
}
