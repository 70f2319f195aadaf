//! Tests for the summary reporters

mod console_tests;

use crate::app::services::summary::{SummaryAggregator, ValidationSummary};

/// Summary of the reference five-row survey file
///
/// Rows: one valid, one bad age, one bad income and email, one bad age,
/// one empty email.
pub fn create_reference_summary() -> ValidationSummary {
    let mut aggregator = SummaryAggregator::new(["Age", "Income", "Email"]);

    aggregator.record_row(true);

    aggregator.record_rule_failure("Age").unwrap();
    aggregator.record_row(false);

    aggregator.record_rule_failure("Income").unwrap();
    aggregator.record_rule_failure("Email").unwrap();
    aggregator.record_row(false);

    aggregator.record_rule_failure("Age").unwrap();
    aggregator.record_row(false);

    aggregator.record_rule_failure("Email").unwrap();
    aggregator.record_row(false);

    aggregator.finalize()
}

/// Summary with rules registered but no rows
pub fn create_empty_summary() -> ValidationSummary {
    SummaryAggregator::new(["Age", "Income", "Email"]).finalize()
}
