//! Reporters consuming a finished [`ValidationSummary`]
//!
//! Every reporter only reads the summary. Reporters are independent: a
//! failure in one (for example an unwritable chart path) does not stop the
//! others from running.
//!
//! - [`console`] - Human, JSON and CSV renderings for standard output
//! - [`summary_writer`] - `Metric,Count,Percentage` summary file
//! - [`charts`] - Validity pie chart and per-rule error bar chart as PNG
//!
//! [`ValidationSummary`]: crate::app::services::summary::ValidationSummary

pub mod charts;
pub mod console;
pub mod summary_writer;

#[cfg(test)]
pub mod tests;

pub use charts::{ChartOutcome, ChartRenderer};
pub use console::{OutputFormat, print_summary, render_summary};
pub use summary_writer::{summary_records, write_summary_csv};
