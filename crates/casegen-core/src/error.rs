//! Error types for the case generator
//!
//! Every failure is terminal for a run:
//! - Matrix read failures (file cannot be opened, header unusable)
//! - Row parse failures (malformed data line)
//! - Case file write failures
//! - Configuration failures
//!
//! Identifier collisions and unrecognized columns are not errors.

use std::path::PathBuf;

/// Main generator error type
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Parameter matrix could not be read
    #[error(transparent)]
    MatrixRead(#[from] MatrixReadError),

    /// A data row of the matrix is malformed
    #[error(transparent)]
    RowParse(#[from] RowParseError),

    /// A case file could not be written
    #[error(transparent)]
    CaseWrite(#[from] CaseWriteError),

    /// Configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors opening the parameter matrix or reading its header
#[derive(Debug, thiserror::Error)]
pub enum MatrixReadError {
    /// Input file missing or unreadable
    #[error("cannot open parameter matrix {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header line could not be decoded
    #[error("cannot read header of {path}: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The same column name appears twice in the header
    #[error("duplicate column '{column}' in header of {path}")]
    DuplicateColumn { path: PathBuf, column: String },
}

impl MatrixReadError {
    /// Create open error for path
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}

/// A malformed data row; aborts the whole run
#[derive(Debug, thiserror::Error)]
#[error("malformed row at line {line}: {reason}")]
pub struct RowParseError {
    /// 1-based line number in the input file (header is line 1)
    pub line: u64,
    /// What was wrong with the row
    pub reason: RowFault,
}

/// Cause of a [`RowParseError`]
#[derive(Debug, thiserror::Error)]
pub enum RowFault {
    /// Field count differs from the header
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Field is not valid UTF-8
    #[error("field is not valid UTF-8")]
    InvalidUtf8,

    /// Reader failed mid-file
    #[error("io error: {0}")]
    Io(String),

    /// Any other CSV decoding failure
    #[error("{0}")]
    Other(String),
}

impl RowParseError {
    /// Classify a csv reader error raised while reading a data row
    pub(crate) fn from_csv(err: &csv::Error, fallback_line: u64) -> Self {
        let line = err
            .position()
            .map_or(fallback_line, csv::Position::line);
        let reason = match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => RowFault::FieldCount {
                expected: usize::try_from(*expected_len).unwrap_or(usize::MAX),
                found: usize::try_from(*len).unwrap_or(usize::MAX),
            },
            csv::ErrorKind::Utf8 { .. } => RowFault::InvalidUtf8,
            csv::ErrorKind::Io(io) => RowFault::Io(io.to_string()),
            _ => RowFault::Other(err.to_string()),
        };
        Self { line, reason }
    }
}

/// Errors writing case files
#[derive(Debug, thiserror::Error)]
pub enum CaseWriteError {
    /// Output directory does not exist or is not a directory
    #[error("output directory {0} does not exist")]
    MissingOutputDir(PathBuf),

    /// IO error during file write
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CaseWriteError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::GeneratorConfig`]
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Delimiter unusable for the matrix reader
    #[error("invalid delimiter {0:?}: must be a single ASCII character other than a quote or newline")]
    InvalidDelimiter(char),

    /// Extension empty or containing a path separator
    #[error("invalid case file extension '{0}'")]
    InvalidExtension(String),
}

/// Result alias for generator operations
pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;
