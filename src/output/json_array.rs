//! Incremental JSON array output
//!
//! Records are appended as they are harvested instead of being collected
//! in memory. The closing bracket is only written by
//! [`JsonArrayWriter::finish`], so a process that dies mid-year leaves an
//! unterminated array on disk.

use crate::HarvestError;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes `[`, then one compact JSON object per line, then `]`
pub struct JsonArrayWriter<W: Write> {
    inner: W,
    count: usize,
}

impl JsonArrayWriter<BufWriter<File>> {
    /// Creates (or truncates) `path`, creating its parent directory
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> JsonArrayWriter<W> {
    pub fn new(mut inner: W) -> io::Result<Self> {
        inner.write_all(b"[\n")?;
        Ok(Self { inner, count: 0 })
    }

    /// Appends one record and flushes it through to the writer
    ///
    /// Non-ASCII text is written as-is, not escaped.
    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<(), HarvestError> {
        if self.count > 0 {
            self.inner.write_all(b",")?;
        }
        serde_json::to_writer(&mut self.inner, record)?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        self.count += 1;
        Ok(())
    }

    /// Number of records appended so far
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Closes the array and returns the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.write_all(b"]\n")?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}
