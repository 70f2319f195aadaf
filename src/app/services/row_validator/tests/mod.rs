//! Tests for row validation
//!
//! Shared fixtures build rows in the survey layout
//! `Name, Age, Income, City, Email`.

mod column_mapping_tests;

use crate::app::models::{Row, RuleSet};
use crate::app::services::row_validator::RowValidator;
use crate::config::AttributionPolicy;
use std::io::Write;
use tempfile::NamedTempFile;

pub const SURVEY_HEADER: &str = "Name,Age,Income,City,Email";

/// Row in the survey layout with the given rule fields
pub fn survey_row(age: &str, income: &str, email: &str) -> Row {
    Row::from_fields(["P1", age, income, "x", email])
}

/// Validator with fixed positions and row-only attribution
pub fn create_positional_validator() -> RowValidator {
    RowValidator::positional(RuleSet::standard(), AttributionPolicy::RowOnly)
}

/// Survey file content: the header followed by the given data lines
pub fn survey_csv(lines: &[&str]) -> String {
    let mut content = String::from(SURVEY_HEADER);
    for line in lines {
        content.push('\n');
        content.push_str(line);
    }
    content.push('\n');
    content
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
