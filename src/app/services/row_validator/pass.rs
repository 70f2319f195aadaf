//! Full validation pass over a record source

use std::io::Read;

use tracing::{debug, info, warn};

use super::validator::RowValidator;
use crate::app::models::RuleSet;
use crate::app::services::record_source::{RecordSource, SourceItem};
use crate::app::services::summary::{SummaryAggregator, ValidationSummary};
use crate::config::{SourceConfig, ValidationConfig};
use crate::{Error, Result};

/// Open the configured file and validate every row with the standard rules
///
/// The file is closed before this returns, whether the pass succeeds or not.
pub fn validate_file(
    source: &SourceConfig,
    validation: &ValidationConfig,
) -> Result<ValidationSummary> {
    info!("Validating {}", source.input_path.display());

    let record_source = RecordSource::open(source)?;
    let validator =
        RowValidator::for_header(RuleSet::standard(), validation, record_source.header());
    let aggregator = validator.new_aggregator();

    validate_source(record_source, &validator, aggregator)
}

/// Validate every remaining row of `source`
pub fn validate_source<R: Read>(
    source: RecordSource<R>,
    validator: &RowValidator,
    aggregator: SummaryAggregator,
) -> Result<ValidationSummary> {
    validate_source_with(source, validator, aggregator, |_| {})
}

/// Validate every remaining row of `source`, calling `on_row` with the
/// number of rows processed so far after each one
///
/// Rows that fail rules or cannot be decoded are counted and the pass moves
/// on; only a read failure on the source ends the pass early.
pub fn validate_source_with<R, F>(
    mut source: RecordSource<R>,
    validator: &RowValidator,
    mut aggregator: SummaryAggregator,
    mut on_row: F,
) -> Result<ValidationSummary>
where
    R: Read,
    F: FnMut(usize),
{
    let mut processed = 0;

    for item in source.rows() {
        match item? {
            SourceItem::Row(row) => {
                validator.validate(&row, &mut aggregator)?;
            }
            SourceItem::Malformed { line, message } => {
                warn!("{}; counted as invalid", Error::row_malformed(line, message));
                aggregator.record_row(false);
            }
        }
        processed += 1;
        on_row(processed);
    }

    let summary = aggregator.finalize();
    debug!("Skipped {} blank lines", source.blank_lines_skipped());
    info!(
        "Validated {} rows from {}: {} valid, {} invalid",
        summary.total_rows,
        source.path().display(),
        summary.valid_rows,
        summary.invalid_rows
    );

    Ok(summary)
}
