//! Record source implementation
//!
//! Wraps a `csv` reader configured for plain delimiter splitting and exposes
//! the header plus a lazy iterator over the remaining rows.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use super::line_tracker::LineTracker;
use crate::app::models::Row;
use crate::config::SourceConfig;
use crate::{Error, Result};

/// One item produced by the record source after the header
#[derive(Debug, Clone, PartialEq)]
pub enum SourceItem {
    /// A decoded, non-blank row
    Row(Row),
    /// A line that could not be decoded into fields (e.g. invalid UTF-8)
    Malformed { line: u64, message: String },
}

/// Delimited text file opened for a single forward pass
///
/// The underlying file handle is owned by the source and released when the
/// source is dropped. The source cannot be rewound; open it again to replay.
pub struct RecordSource<R = File> {
    path: PathBuf,
    reader: csv::Reader<LineTracker<R>>,
    delimiter: u8,
    header: Row,
    blank_lines_skipped: usize,
    exhausted: bool,
}

impl RecordSource<File> {
    /// Open the configured input file and read its header
    pub fn open(config: &SourceConfig) -> Result<Self> {
        Self::open_path(&config.input_path, config.delimiter_byte()?)
    }

    /// Open a file with an explicit delimiter and read its header
    pub fn open_path(path: &Path, delimiter: u8) -> Result<Self> {
        debug!("Opening record source: {}", path.display());
        let file = File::open(path).map_err(|e| Error::source_unreadable(path, e))?;
        Self::from_reader(path, file, delimiter)
    }
}

impl<R: Read> RecordSource<R> {
    /// Build a source over any reader; `path` is only used in messages
    pub fn from_reader(path: impl AsRef<Path>, input: R, delimiter: u8) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::None)
            .delimiter(delimiter)
            .from_reader(LineTracker::new(input));

        let mut source = Self {
            path: path.as_ref().to_path_buf(),
            reader,
            delimiter,
            header: Row::from_fields(Vec::<String>::new()),
            blank_lines_skipped: 0,
            exhausted: false,
        };

        source.header = match source.next_item() {
            None => return Err(Error::empty_source(&source.path)),
            Some(Err(e)) => return Err(e),
            Some(Ok(SourceItem::Row(row))) => row,
            Some(Ok(SourceItem::Malformed { line, message })) => {
                warn!(
                    "Header at line {} could not be decoded ({}); treating it as empty",
                    line, message
                );
                Row::new(StringRecord::new(), line)
            }
        };
        debug!(
            "Header at line {} with {} columns",
            source.header.line(),
            source.header.len()
        );

        Ok(source)
    }

    /// The header row (first non-blank line)
    pub fn header(&self) -> &Row {
        &self.header
    }

    /// Path the source was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of whitespace-only lines skipped so far, including any before
    /// the header; fully empty lines are dropped by the CSV reader itself
    pub fn blank_lines_skipped(&self) -> usize {
        self.blank_lines_skipped
    }

    /// Lazy iterator over the rows after the header
    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows { source: self }
    }

    /// Read the next non-blank line
    ///
    /// Returns `None` once the input is exhausted. An I/O failure is returned
    /// as a fatal error and ends the iteration.
    fn next_item(&mut self) -> Option<Result<SourceItem>> {
        if self.exhausted {
            return None;
        }

        let mut record = StringRecord::new();
        loop {
            match self.reader.read_record(&mut record) {
                Ok(false) => {
                    self.exhausted = true;
                    return None;
                }
                Ok(true) => {
                    if is_blank_line(&record, self.delimiter) {
                        self.blank_lines_skipped += 1;
                        continue;
                    }
                    let line = self.line_of(record.position());
                    return Some(Ok(SourceItem::Row(Row::new(record, line))));
                }
                Err(e) if e.is_io_error() => {
                    self.exhausted = true;
                    let source = match e.into_kind() {
                        csv::ErrorKind::Io(io_error) => io_error,
                        other => std::io::Error::other(format!("{:?}", other)),
                    };
                    return Some(Err(Error::source_unreadable(&self.path, source)));
                }
                Err(e) => {
                    let line = self.line_of(e.position());
                    return Some(Ok(SourceItem::Malformed {
                        line,
                        message: e.to_string(),
                    }));
                }
            }
        }
    }

    /// 1-based file line of a record starting at `position`
    fn line_of(&mut self, position: Option<&csv::Position>) -> u64 {
        let Some(position) = position else {
            return 0;
        };
        self.reader
            .get_mut()
            .line_at(position.byte())
            .unwrap_or_else(|| position.line())
    }
}

/// Iterator over the rows of a [`RecordSource`] after its header
pub struct Rows<'a, R> {
    source: &'a mut RecordSource<R>,
}

impl<R: Read> Iterator for Rows<'_, R> {
    type Item = Result<SourceItem>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.next_item()
    }
}

/// A line is blank when it held nothing but whitespace before splitting
fn is_blank_line(record: &StringRecord, delimiter: u8) -> bool {
    let all_fields_blank = record.iter().all(|field| field.trim().is_empty());
    if record.len() <= 1 {
        return all_fields_blank;
    }
    // With a whitespace delimiter the separators themselves are whitespace
    delimiter.is_ascii_whitespace() && all_fields_blank
}
