//! IntegerSource node: reads whitespace-separated integers from a reader.
//!
//! Tokens may be spread over any number of lines. Clean end of input ends the
//! stream; an I/O failure or a token that is not an `i64` is reported as a
//! [`SourceError`] carrying the 1-based line number.

use crate::pipeline::error::SourceError;
use crate::pipeline::node::Source;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Source backed by an open input file.
pub type IntegerFileSource = IntegerSource<BufReader<File>>;

/// Integer tokenizer over any buffered reader.
pub struct IntegerSource<R> {
    reader: R,
    name: String,
    line: String,
    line_no: usize,
    pos: usize,
}

impl IntegerSource<BufReader<File>> {
    /// Open `path` for reading.
    ///
    /// Fails with [`SourceError::Open`] before any item is produced, so the
    /// caller can refuse to start the pipeline.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Opened integer source {:?}", path);
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> IntegerSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line: String::new(),
            line_no: 0,
            pos: 0,
        }
    }

    /// Line number of the most recently read line (0 before the first read).
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead + Send> Source<i64> for IntegerSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_item(&mut self) -> Result<Option<i64>, SourceError> {
        loop {
            let rest = &self.line[self.pos..];
            let leading = rest.len() - rest.trim_start().len();
            let rest = &rest[leading..];

            if !rest.is_empty() {
                let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let token = &rest[..len];
                self.pos += leading + len;

                let line = self.line_no;
                return token.parse::<i64>().map(Some).map_err(|_| SourceError::Parse {
                    line,
                    token: token.to_string(),
                });
            }

            self.line.clear();
            self.pos = 0;
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
        }
    }
}
