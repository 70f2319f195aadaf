//! Immutable validation summary and derived statistics

use serde::{Deserialize, Serialize};

/// Failure count for one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleErrorCount {
    /// Rule name ("Age", "Income", "Email")
    pub rule: String,
    /// Number of rows that failed the rule
    pub count: usize,
}

/// Aggregate counts produced by a validation pass
///
/// Rule entries keep their registration order. After a complete pass
/// `valid_rows + invalid_rows == total_rows` and every rule count is at most
/// `total_rows`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Total number of data rows processed (header excluded)
    pub total_rows: usize,

    /// Rows that passed every rule
    pub valid_rows: usize,

    /// Rows that failed at least one rule or could not be decoded
    pub invalid_rows: usize,

    /// Per-rule failure counts in registration order
    pub rule_errors: Vec<RuleErrorCount>,
}

impl ValidationSummary {
    /// Create an all-zero summary for the given rules
    pub fn new<I, S>(rule_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rule_errors: Vec<RuleErrorCount> = Vec::new();
        for name in rule_names {
            let rule = name.into();
            if rule_errors.iter().any(|entry| entry.rule == rule) {
                continue;
            }
            rule_errors.push(RuleErrorCount { rule, count: 0 });
        }

        Self {
            total_rows: 0,
            valid_rows: 0,
            invalid_rows: 0,
            rule_errors,
        }
    }

    /// Failure count for a rule, if the rule is registered
    pub fn rule_error_count(&self, rule: &str) -> Option<usize> {
        self.rule_errors
            .iter()
            .find(|entry| entry.rule == rule)
            .map(|entry| entry.count)
    }

    /// Rule names in registration order
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rule_errors.iter().map(|entry| entry.rule.as_str())
    }

    /// Largest per-rule failure count (0 when no rules are registered)
    pub fn max_rule_errors(&self) -> usize {
        self.rule_errors
            .iter()
            .map(|entry| entry.count)
            .max()
            .unwrap_or(0)
    }

    /// `count` as a percentage of the total rows
    ///
    /// A zero total is divided as 1, so every percentage degrades to 0.0.
    pub fn percentage_of(&self, count: usize) -> f64 {
        let divisor = if self.total_rows == 0 {
            1.0
        } else {
            self.total_rows as f64
        };
        (count as f64 / divisor) * 100.0
    }

    /// `count` as a percentage with one decimal place and a `%` suffix
    ///
    /// The percentage is rounded half-up from its shortest decimal form, so
    /// 6.25 renders as `6.3%` while 0.44999999999999996 renders as `0.4%`.
    pub fn format_percentage(&self, count: usize) -> String {
        format!("{}%", round_half_up_one_decimal(self.percentage_of(count)))
    }

    /// Percentage of rows that passed every rule
    pub fn valid_rate(&self) -> f64 {
        self.percentage_of(self.valid_rows)
    }

    /// Percentage of rows that failed at least one rule
    pub fn invalid_rate(&self) -> f64 {
        self.percentage_of(self.invalid_rows)
    }

    /// Check the count invariants of a completed pass
    pub fn is_consistent(&self) -> bool {
        self.valid_rows + self.invalid_rows == self.total_rows
            && self
                .rule_errors
                .iter()
                .all(|entry| entry.count <= self.total_rows)
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        let rules = self
            .rule_errors
            .iter()
            .map(|entry| format!("{}: {}", entry.rule, entry.count))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Validation Summary: {} rows ({} valid, {} invalid, {:.1}% valid, {:.1}% invalid) | Errors: {}",
            self.total_rows,
            self.valid_rows,
            self.invalid_rows,
            self.valid_rate(),
            self.invalid_rate(),
            if rules.is_empty() { "none" } else { rules.as_str() }
        )
    }
}

/// Render a non-negative value with one decimal, rounding half-up on the
/// shortest round-trip decimal digits of the value
fn round_half_up_one_decimal(value: f64) -> String {
    let digits = value.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let mut fraction_digits = fraction.bytes().map(|b| u64::from(b - b'0'));
    let tenths_digit = fraction_digits.next().unwrap_or(0);
    let round_up = fraction_digits.next().is_some_and(|d| d >= 5);

    match whole.parse::<u64>() {
        Ok(whole) => {
            let tenths = whole * 10 + tenths_digit + u64::from(round_up);
            format!("{}.{}", tenths / 10, tenths % 10)
        }
        Err(_) => format!("{:.1}", value),
    }
}
