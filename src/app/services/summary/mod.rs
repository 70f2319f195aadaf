//! Validation summary accumulation
//!
//! This module holds the running totals of a validation pass and the
//! immutable summary handed to reporters once the pass is complete.
//!
//! - [`aggregator`] - Mutable counters updated once per row during the pass
//! - [`snapshot`] - Read-only [`ValidationSummary`] and percentage helpers
//!
//! The aggregator is an explicit value owned by whoever runs the pass, so
//! independent passes never share counters.

pub mod aggregator;
pub mod snapshot;

#[cfg(test)]
pub mod tests;

pub use aggregator::{AggregatorState, SummaryAggregator};
pub use snapshot::{RuleErrorCount, ValidationSummary};
