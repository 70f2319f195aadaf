//! Core data structures for record validation
//!
//! Defines the row type produced by the record source, the fixed field rules,
//! and the outcome types produced when a rule is applied to a field.

use crate::constants::rules;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One record from the input file, index-addressed
///
/// Rows are transient: they live for one iteration of the validation pass and
/// only their aggregate effect on the summary is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    record: StringRecord,
    line: u64,
}

impl Row {
    /// Wrap a parsed record together with the line it was read from
    pub fn new(record: StringRecord, line: u64) -> Self {
        Self { record, line }
    }

    /// Build a row from plain field values (line number 0)
    pub fn from_fields<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field.as_ref());
        }
        Self { record, line: 0 }
    }

    /// Get the raw field at `index`, if the row is long enough
    pub fn field(&self, index: usize) -> Option<&str> {
        self.record.get(index)
    }

    /// Number of fields in the row
    pub fn len(&self) -> usize {
        self.record.len()
    }

    /// Number of fields once trailing empty fields are dropped
    ///
    /// `P1,30,50000,x,` counts 4 and `,,,,` counts 0. Whitespace is content.
    pub fn len_without_trailing_empty(&self) -> usize {
        (0..self.record.len())
            .rposition(|i| !self.record[i].is_empty())
            .map_or(0, |last| last + 1)
    }

    /// Check if the row has no fields
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// 1-based line number in the source file (0 when built in memory)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Iterate over the raw field values
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.record.iter()
    }
}

/// Semantic check applied once a field is present and non-empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleKind {
    /// Whole number within an inclusive range
    IntegerRange { min: i64, max: i64 },
    /// Decimal number strictly greater than zero
    PositiveDecimal,
    /// Text containing a required character
    ContainsChar(char),
}

/// A named check bound to a field position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Rule name as reported in summaries ("Age", "Income", "Email")
    pub name: String,
    /// Header name the rule reads when columns are resolved by header
    pub column: String,
    /// Fixed field position used by default
    pub position: usize,
    /// Check applied to the trimmed field
    pub kind: RuleKind,
}

impl FieldRule {
    /// Create a rule whose header column shares its name
    pub fn new(name: impl Into<String>, position: usize, kind: RuleKind) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            name,
            position,
            kind,
        }
    }

    /// Age must be a whole number between 0 and 120 inclusive
    pub fn age() -> Self {
        Self::new(
            rules::AGE_NAME,
            rules::AGE_POSITION,
            RuleKind::IntegerRange {
                min: rules::AGE_MIN,
                max: rules::AGE_MAX,
            },
        )
    }

    /// Income must be a number greater than zero
    pub fn income() -> Self {
        Self::new(
            rules::INCOME_NAME,
            rules::INCOME_POSITION,
            RuleKind::PositiveDecimal,
        )
    }

    /// Email must be non-empty and contain '@'
    pub fn email() -> Self {
        Self::new(
            rules::EMAIL_NAME,
            rules::EMAIL_POSITION,
            RuleKind::ContainsChar(rules::EMAIL_REQUIRED_CHAR),
        )
    }
}

/// The ordered, fixed set of rules applied to every row
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Age, Income, Email in that order
    pub fn standard() -> Self {
        Self {
            rules: vec![FieldRule::age(), FieldRule::income(), FieldRule::email()],
        }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Rule names in registration order
    pub fn names(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Explicit result of parsing a numeric field
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedNumber<T> {
    /// The field parsed to a value
    Value(T),
    /// The field is not a number of the expected type
    Malformed { reason: String },
}

/// Why a single rule rejected a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleFailure {
    /// The row has fewer fields than the rule's position requires
    MissingField,
    /// The field is empty after trimming
    EmptyField,
    /// The field could not be parsed as the rule's numeric type
    MalformedNumber,
    /// The parsed value is outside the accepted range
    OutOfRange,
    /// The field lacks the required character
    MissingCharacter,
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            RuleFailure::MissingField => "missing field",
            RuleFailure::EmptyField => "empty field",
            RuleFailure::MalformedNumber => "malformed number",
            RuleFailure::OutOfRange => "value out of range",
            RuleFailure::MissingCharacter => "required character missing",
        };
        write!(f, "{}", description)
    }
}

/// Outcome of applying one rule to one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    Fail(RuleFailure),
}

impl RuleOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, RuleOutcome::Pass)
    }

    pub fn failure(&self) -> Option<RuleFailure> {
        match self {
            RuleOutcome::Pass => None,
            RuleOutcome::Fail(failure) => Some(*failure),
        }
    }
}
