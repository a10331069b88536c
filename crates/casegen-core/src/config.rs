//! Generator configuration
//!
//! Defaults match the historical layout: comma-delimited matrix, `.case`
//! output files. A TOML file may override them, and CLI flags override the
//! file.
//!
//! ```toml
//! delimiter = "\t"
//! extension = "case"
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Default matrix delimiter
pub const DEFAULT_DELIMITER: char = ',';
/// Default case file extension
pub const DEFAULT_EXTENSION: &str = "case";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Column delimiter of the parameter matrix
    pub delimiter: char,
    /// Extension of generated case files, without the dot
    pub extension: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

impl GeneratorConfig {
    /// Create default config
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a TOML config file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is unreadable, malformed or
    /// carries invalid values
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Builder: set delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder: set extension
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Check that values are usable
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidDelimiter`] or
    /// [`ConfigError::InvalidExtension`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delimiter_byte()?;
        let ext = self.extension.as_str();
        if ext.is_empty() || ext.contains(['/', '\\']) || ext.starts_with('.') {
            return Err(ConfigError::InvalidExtension(self.extension.clone()));
        }
        Ok(())
    }

    /// Delimiter as the single byte the reader expects
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidDelimiter`] for non-ASCII, quote or
    /// line break delimiters
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match u8::try_from(self.delimiter) {
            Ok(b) if b.is_ascii() && !matches!(b, b'"' | b'\n' | b'\r') => Ok(b),
            _ => Err(ConfigError::InvalidDelimiter(self.delimiter)),
        }
    }
}
