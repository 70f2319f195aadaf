//! Per-row validation and summary attribution

use tracing::{debug, warn};

use super::column_mapping::ColumnMapping;
use super::rules::extract_field;
use crate::Result;
use crate::app::models::{Row, RuleFailure, RuleOutcome, RuleSet};
use crate::app::services::summary::SummaryAggregator;
use crate::config::{AttributionPolicy, ColumnResolution, ValidationConfig};

/// Outcome of every rule for one row, in rule order
#[derive(Debug, Clone, PartialEq)]
pub struct RowVerdict {
    pub outcomes: Vec<RuleOutcome>,
}

impl RowVerdict {
    /// A row is valid iff every rule passed
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(RuleOutcome::passed)
    }

    /// Failed rules as (rule index, reason)
    pub fn failures(&self) -> impl Iterator<Item = (usize, RuleFailure)> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| outcome.failure().map(|failure| (index, failure)))
    }

    /// True when the row lacked a field at least one rule needed
    pub fn is_short_row(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| outcome.failure() == Some(RuleFailure::MissingField))
    }
}

/// Applies a rule set to rows and records verdicts in a summary
#[derive(Debug, Clone)]
pub struct RowValidator {
    rule_set: RuleSet,
    positions: Vec<usize>,
    attribution: AttributionPolicy,
}

impl RowValidator {
    /// Validator reading every rule from its fixed position
    pub fn positional(rule_set: RuleSet, attribution: AttributionPolicy) -> Self {
        let positions = rule_set.rules().iter().map(|rule| rule.position).collect();
        Self {
            rule_set,
            positions,
            attribution,
        }
    }

    /// Validator configured for a source whose header row is `header`
    ///
    /// With header resolution each rule reads the column named after it; a
    /// rule whose column is absent from the header keeps its fixed position.
    pub fn for_header(rule_set: RuleSet, config: &ValidationConfig, header: &Row) -> Self {
        let mut validator = Self::positional(rule_set, config.attribution);

        if config.column_resolution == ColumnResolution::HeaderName {
            let mapping = ColumnMapping::analyze(header);
            debug!("Resolving rule columns from {} header names", mapping.len());

            for (rule, position) in validator
                .rule_set
                .rules()
                .iter()
                .zip(validator.positions.iter_mut())
            {
                match mapping.get_index(&rule.column) {
                    Some(index) => *position = index,
                    None => warn!(
                        "Column '{}' not found in header; rule '{}' reads position {}",
                        rule.column, rule.name, rule.position
                    ),
                }
            }
        }

        debug!(
            "Rule positions: {:?}",
            validator
                .rule_set
                .rules()
                .iter()
                .map(|rule| rule.name.as_str())
                .zip(validator.positions.iter().copied())
                .collect::<Vec<_>>()
        );
        validator
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Field position each rule reads, in rule order
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn attribution(&self) -> AttributionPolicy {
        self.attribution
    }

    /// Fresh aggregator registered with this validator's rules
    pub fn new_aggregator(&self) -> SummaryAggregator {
        SummaryAggregator::new(self.rule_set.names())
    }

    /// Apply every rule to the row without recording anything
    ///
    /// Under `RowOnly` trailing empty fields do not count as fields, so a
    /// rule reading one of them sees a short row.
    pub fn evaluate(&self, row: &Row) -> RowVerdict {
        let available = match self.attribution {
            AttributionPolicy::RowOnly => row.len_without_trailing_empty(),
            AttributionPolicy::PerRule => row.len(),
        };

        let outcomes = self
            .rule_set
            .rules()
            .iter()
            .zip(&self.positions)
            .map(|(rule, &position)| {
                let field = if position < available {
                    extract_field(row, position)
                } else {
                    None
                };
                rule.evaluate(field)
            })
            .collect();

        RowVerdict { outcomes }
    }

    /// Validate the row and record its verdict and rule failures
    ///
    /// Returns whether the row was valid.
    pub fn validate(&self, row: &Row, aggregator: &mut SummaryAggregator) -> Result<bool> {
        let verdict = self.evaluate(row);
        let valid = verdict.is_valid();

        if !valid {
            if verdict.is_short_row() && self.attribution == AttributionPolicy::RowOnly {
                debug!(
                    "Line {}: only {} fields, counted invalid without rule attribution",
                    row.line(),
                    row.len_without_trailing_empty()
                );
            } else {
                for (index, failure) in verdict.failures() {
                    let rule = &self.rule_set.rules()[index];
                    debug!("Line {}: {} failed ({})", row.line(), rule.name, failure);
                    aggregator.record_rule_failure(&rule.name)?;
                }
            }
        }

        aggregator.record_row(valid);
        Ok(valid)
    }
}
