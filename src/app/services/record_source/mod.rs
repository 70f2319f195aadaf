//! Line-oriented record source for delimited text files
//!
//! The source opens one input file, reads the first non-blank line as the
//! header and then yields the remaining non-blank lines as [`Row`]s, one at a
//! time. There is no quoting or escaping: a delimiter inside a value splits
//! the value.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use data_validator::app::services::record_source::{RecordSource, SourceItem};
//! use data_validator::config::SourceConfig;
//!
//! # fn example() -> data_validator::Result<()> {
//! let mut source = RecordSource::open(&SourceConfig::default())?;
//! println!("Header has {} columns", source.header().len());
//!
//! for item in source.rows() {
//!     match item? {
//!         SourceItem::Row(row) => println!("line {}: {} fields", row.line(), row.len()),
//!         SourceItem::Malformed { line, message } => println!("line {}: {}", line, message),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`Row`]: crate::app::models::Row

mod line_tracker;
pub mod reader;

#[cfg(test)]
pub mod tests;

pub use reader::{RecordSource, Rows, SourceItem};
