//! Test utilities for the record source
//!
//! Provides sample survey files and temporary-file helpers shared by the
//! record source tests.

use std::io::Write;
use tempfile::NamedTempFile;


/// Survey file with a header, a blank line and three data rows
pub fn create_test_survey_csv() -> String {
    r#"Name,Age,Income,City,Email

P1,30,50000,x,a@b.com
P2,150,50000,x,a@b.com
P3,30,-5,x,bad"#
        .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

/// Helper to create a temporary file from raw bytes
pub fn create_temp_file_bytes(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file
}
