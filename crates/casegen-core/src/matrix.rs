//! Parameter matrix reader
//!
//! Reads a delimited file whose first line names the columns and yields one
//! [`ParameterRow`] per following line. Rows are produced lazily; a
//! malformed row is reported as an error item and ends the iteration.

use crate::error::{MatrixReadError, RowParseError};
use crate::row::ParameterRow;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Lazy row iterator over a parameter matrix
pub struct MatrixReader<R> {
    source: PathBuf,
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: csv::StringRecord,
    finished: bool,
}

impl<R> std::fmt::Debug for MatrixReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixReader")
            .field("source", &self.source)
            .field("headers", &self.headers)
            .field("finished", &self.finished)
            .finish()
    }
}

impl MatrixReader<File> {
    /// Open a matrix file
    ///
    /// # Errors
    /// Returns [`MatrixReadError`] if the file cannot be opened or its
    /// header line is unusable
    pub fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, MatrixReadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MatrixReadError::open(path, e))?;
        Self::from_reader(file, delimiter, path)
    }
}

impl<R: io::Read> MatrixReader<R> {
    /// Read a matrix from any reader; `source` names it in errors
    ///
    /// # Errors
    /// Returns [`MatrixReadError`] if the header line is unusable
    pub fn from_reader(
        reader: R,
        delimiter: u8,
        source: impl Into<PathBuf>,
    ) -> Result<Self, MatrixReadError> {
        let source = source.into();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| MatrixReadError::Header {
                path: source.clone(),
                source: e,
            })?
            .iter()
            .map(str::to_owned)
            .collect();

        for (i, name) in headers.iter().enumerate() {
            if headers[..i].contains(name) {
                return Err(MatrixReadError::DuplicateColumn {
                    path: source,
                    column: name.clone(),
                });
            }
        }

        Ok(Self {
            source,
            reader,
            headers,
            record: csv::StringRecord::new(),
            finished: false,
        })
    }

    /// Column names in header order
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Path or name the matrix was read from
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl<R: io::Read> Iterator for MatrixReader<R> {
    type Item = Result<ParameterRow, RowParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let columns = self
                    .headers
                    .iter()
                    .cloned()
                    .zip(self.record.iter().map(str::to_owned))
                    .collect();
                // header names were checked for duplicates on open
                Some(Ok(ParameterRow::from_unique_columns(columns)))
            }
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                let fallback = self.reader.position().line();
                Some(Err(RowParseError::from_csv(&e, fallback)))
            }
        }
    }
}

impl<R: io::Read> std::iter::FusedIterator for MatrixReader<R> {}
