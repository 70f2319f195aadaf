//! Row validation against the fixed field rules
//!
//! This module applies the Age, Income and Email rules to every data row and
//! records the outcome in a [`SummaryAggregator`].
//!
//! ## Architecture
//!
//! - [`rules`] - Field extraction, numeric parsing and single-rule evaluation
//! - [`column_mapping`] - Header name to index lookup for header-based resolution
//! - [`validator`] - [`RowValidator`] combining rules into a per-row verdict
//! - [`pass`] - Full validation pass over a [`RecordSource`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use data_validator::app::services::row_validator::validate_file;
//! use data_validator::config::Config;
//!
//! # fn example() -> data_validator::Result<()> {
//! let config = Config::default().with_input_path("survey_data.csv");
//! let summary = validate_file(&config.source, &config.validation)?;
//!
//! println!("{} of {} rows valid", summary.valid_rows, summary.total_rows);
//! # Ok(())
//! # }
//! ```
//!
//! [`SummaryAggregator`]: crate::app::services::summary::SummaryAggregator
//! [`RecordSource`]: crate::app::services::record_source::RecordSource

pub mod column_mapping;
pub mod pass;
pub mod rules;
pub mod validator;

#[cfg(test)]
pub mod tests;

pub use column_mapping::ColumnMapping;
pub use pass::{validate_file, validate_source, validate_source_with};
pub use validator::{RowValidator, RowVerdict};
