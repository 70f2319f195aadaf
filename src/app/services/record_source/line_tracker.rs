//! Physical line numbers for records read through the CSV parser
//!
//! The parser folds empty lines into the position of the record that follows
//! them, so its line counter drifts after every skipped empty line. The
//! tracker sits between the file and the parser and notes where each
//! non-empty line ends, which lets a record's start byte be mapped back to
//! the line it really sits on.

use std::collections::VecDeque;
use std::io::{self, Read};

/// Reader wrapper recording the end offset of every non-empty line
#[derive(Debug)]
pub struct LineTracker<R> {
    inner: R,
    offset: u64,
    line: u64,
    line_has_content: bool,
    /// (offset of the terminating '\n', 1-based line number)
    completed: VecDeque<(u64, u64)>,
}

impl<R> LineTracker<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            line: 1,
            line_has_content: false,
            completed: VecDeque::new(),
        }
    }

    /// Line holding the first content at or after byte `start`
    ///
    /// Record starts must be queried in increasing order; lines ending
    /// before `start` are forgotten.
    pub fn line_at(&mut self, start: u64) -> Option<u64> {
        while let Some(&(end, _)) = self.completed.front() {
            if end > start {
                break;
            }
            self.completed.pop_front();
        }

        match self.completed.front() {
            Some(&(_, line)) => Some(line),
            // Last line of a file without a trailing newline
            None if self.line_has_content => Some(self.line),
            None => None,
        }
    }

    fn track(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            match byte {
                b'\n' => {
                    if self.line_has_content {
                        self.completed.push_back((self.offset, self.line));
                    }
                    self.line += 1;
                    self.line_has_content = false;
                }
                b'\r' => {}
                _ => self.line_has_content = true,
            }
            self.offset += 1;
        }
    }
}

impl<R: Read> Read for LineTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.track(&buf[..read]);
        Ok(read)
    }
}
