//! Field extraction and rule evaluation
//!
//! Numeric parsing returns an explicit [`ParsedNumber`] instead of an error,
//! since "not a number" is an expected, frequent outcome for survey data.

use crate::app::models::{FieldRule, ParsedNumber, Row, RuleFailure, RuleKind, RuleOutcome};
use tracing::trace;

/// Get the field at `index` with surrounding whitespace removed
pub fn extract_field(row: &Row, index: usize) -> Option<&str> {
    row.field(index).map(str::trim)
}

/// Parse a whole number
pub fn parse_integer(value: &str) -> ParsedNumber<i64> {
    match value.trim().parse::<i64>() {
        Ok(number) => ParsedNumber::Value(number),
        Err(e) => ParsedNumber::Malformed {
            reason: format!("'{}' is not a whole number ({})", value, e),
        },
    }
}

/// Parse a decimal number
pub fn parse_decimal(value: &str) -> ParsedNumber<f64> {
    match value.trim().parse::<f64>() {
        Ok(number) => ParsedNumber::Value(number),
        Err(e) => ParsedNumber::Malformed {
            reason: format!("'{}' is not a number ({})", value, e),
        },
    }
}

/// Apply one rule to a field value (`None` when the row is too short)
pub fn evaluate_rule(rule: &FieldRule, field: Option<&str>) -> RuleOutcome {
    let Some(raw) = field else {
        return RuleOutcome::Fail(RuleFailure::MissingField);
    };

    let value = raw.trim();
    if value.is_empty() {
        return RuleOutcome::Fail(RuleFailure::EmptyField);
    }

    match &rule.kind {
        RuleKind::IntegerRange { min, max } => match parse_integer(value) {
            ParsedNumber::Value(number) if (*min..=*max).contains(&number) => RuleOutcome::Pass,
            ParsedNumber::Value(_) => RuleOutcome::Fail(RuleFailure::OutOfRange),
            ParsedNumber::Malformed { reason } => malformed(rule, &reason),
        },
        RuleKind::PositiveDecimal => match parse_decimal(value) {
            // NaN compares false and lands in OutOfRange
            ParsedNumber::Value(number) if number > 0.0 => RuleOutcome::Pass,
            ParsedNumber::Value(_) => RuleOutcome::Fail(RuleFailure::OutOfRange),
            ParsedNumber::Malformed { reason } => malformed(rule, &reason),
        },
        RuleKind::ContainsChar(required) => {
            if value.contains(*required) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::Fail(RuleFailure::MissingCharacter)
            }
        }
    }
}

fn malformed(rule: &FieldRule, reason: &str) -> RuleOutcome {
    trace!("{} rule: {}", rule.name, reason);
    RuleOutcome::Fail(RuleFailure::MalformedNumber)
}

impl FieldRule {
    /// Apply this rule to a field value (`None` when the row is too short)
    pub fn evaluate(&self, field: Option<&str>) -> RuleOutcome {
        evaluate_rule(self, field)
    }
}
