//! FileSink node: appends one item per line to a file.
//!
//! The file is created (or truncated) when the sink is built and written
//! through a `BufWriter`; call `flush` before the sink is dropped to surface
//! write errors that would otherwise be lost in `Drop`.

use crate::pipeline::error::SinkError;
use crate::pipeline::node::Sink;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered, append-only, line-per-item file sink.
pub struct FileSink {
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    records: u64,
}

impl FileSink {
    /// Create `path`, truncating any previous contents.
    pub fn create(path: impl AsRef<Path>, name: impl Into<String>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        tracing::debug!("FileSink opened file: {:?}", path);
        Ok(Self {
            name: name.into(),
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            records: 0,
        })
    }

    /// Items recorded since creation.
    pub fn records(&self) -> u64 {
        self.records
    }
}

impl<T: Display> Sink<T> for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn record(&mut self, item: &T) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", item).map_err(|source| SinkError::Write {
            sink: self.name.clone(),
            source,
        })?;
        self.records += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().map_err(|source| SinkError::Flush {
            sink: self.name.clone(),
            source,
        })?;
        tracing::debug!(
            "FileSink '{}' flushed {:?} after {} records",
            self.name,
            self.path,
            self.records
        );
        Ok(())
    }
}
