//! Delimited summary file writer

use std::path::Path;

use tracing::{debug, info};

use crate::app::services::summary::ValidationSummary;
use crate::constants::summary_file;
use crate::{Error, Result};

/// Records of the summary file, header first
///
/// Rows: total, valid, invalid, then one `"<Rule> Errors"` row per rule.
/// The total row's percentage is always `100%`.
pub fn summary_records(summary: &ValidationSummary) -> Vec<[String; 3]> {
    let mut records = Vec::with_capacity(4 + summary.rule_errors.len());

    records.push(summary_file::HEADER.map(str::to_string));
    records.push([
        summary_file::TOTAL_LABEL.to_string(),
        summary.total_rows.to_string(),
        summary_file::TOTAL_PERCENTAGE.to_string(),
    ]);
    records.push([
        summary_file::VALID_LABEL.to_string(),
        summary.valid_rows.to_string(),
        summary.format_percentage(summary.valid_rows),
    ]);
    records.push([
        summary_file::INVALID_LABEL.to_string(),
        summary.invalid_rows.to_string(),
        summary.format_percentage(summary.invalid_rows),
    ]);

    for entry in &summary.rule_errors {
        records.push([
            format!("{}{}", entry.rule, summary_file::RULE_SUFFIX),
            entry.count.to_string(),
            summary.format_percentage(entry.count),
        ]);
    }

    records
}

/// Write the summary file to `path`, replacing any existing file
pub fn write_summary_csv(summary: &ValidationSummary, path: &Path) -> Result<()> {
    debug!("Writing summary file: {}", path.display());

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| Error::summary_write_failed(path, e.to_string()))?;

    for record in summary_records(summary) {
        writer
            .write_record(&record)
            .map_err(|e| Error::summary_write_failed(path, e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| Error::summary_write_failed(path, e.to_string()))?;

    info!("Validation summary saved as '{}'", path.display());
    Ok(())
}
