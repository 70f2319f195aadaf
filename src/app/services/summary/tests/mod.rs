//! Tests for summary accumulation and derived statistics

mod snapshot_tests;

use crate::app::services::summary::SummaryAggregator;

/// Aggregator registered with the standard rules
pub fn create_standard_aggregator() -> SummaryAggregator {
    SummaryAggregator::new(["Age", "Income", "Email"])
}
