//! Running counters for a validation pass

use tracing::{debug, trace};

use super::snapshot::ValidationSummary;
use crate::{Error, Result};

/// Lifecycle of an aggregator that can still be mutated
///
/// The finalized state is represented by the [`ValidationSummary`] returned
/// from [`SummaryAggregator::finalize`], which consumes the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// Rules registered, no row recorded yet
    Uninitialized,
    /// At least one row recorded
    Accumulating,
}

/// Mutable totals updated once per row during a validation pass
#[derive(Debug, Clone)]
pub struct SummaryAggregator {
    summary: ValidationSummary,
}

impl SummaryAggregator {
    /// Register the rules, in reporting order, with all counters at zero
    pub fn new<I, S>(rule_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let summary = ValidationSummary::new(rule_names);
        debug!(
            "Summary aggregator registered rules: {:?}",
            summary.rule_names().collect::<Vec<_>>()
        );
        Self { summary }
    }

    /// Current lifecycle state
    pub fn state(&self) -> AggregatorState {
        if self.summary.total_rows == 0 {
            AggregatorState::Uninitialized
        } else {
            AggregatorState::Accumulating
        }
    }

    /// Count one processed row and its verdict
    pub fn record_row(&mut self, valid: bool) {
        self.summary.total_rows += 1;
        if valid {
            self.summary.valid_rows += 1;
        } else {
            self.summary.invalid_rows += 1;
        }
        trace!(
            "Recorded row {} (valid: {})",
            self.summary.total_rows, valid
        );
    }

    /// Count one failure of a registered rule
    pub fn record_rule_failure(&mut self, rule: &str) -> Result<()> {
        let entry = self
            .summary
            .rule_errors
            .iter_mut()
            .find(|entry| entry.rule == rule)
            .ok_or_else(|| Error::unregistered_rule(rule))?;
        entry.count += 1;
        Ok(())
    }

    /// Read-only copy of the current counts
    pub fn snapshot(&self) -> ValidationSummary {
        self.summary.clone()
    }

    /// End the pass and hand out the final, immutable summary
    pub fn finalize(self) -> ValidationSummary {
        debug!("{}", self.summary.summary());
        self.summary
    }
}
