//! Case file writer
//!
//! Layout of a case file:
//!
//! ```text
//! #! (0001) EXE: tkg --plan dev -i azure
//!
//! AZURE_LOCATION: westus2
//! CLUSTER_CIDR: 100.96.0.0/11
//! ```

use crate::encoder::CaseDescriptor;
use crate::error::CaseWriteError;
use std::path::{Path, PathBuf};

/// Render the text of a case file
#[must_use]
pub fn render(case: &CaseDescriptor) -> String {
    let mut out = format!("#! ({:04}) EXE: {}\n\n", case.sequence, case.command_line());
    for item in &case.overrides {
        out.push_str(&item.to_string());
        out.push('\n');
    }
    out
}

/// Writes rendered cases into an existing directory
#[derive(Debug, Clone)]
pub struct CaseFileWriter {
    output_dir: PathBuf,
    extension: String,
}

impl CaseFileWriter {
    /// Create writer for `output_dir`
    ///
    /// # Errors
    /// Returns [`CaseWriteError::MissingOutputDir`] if the directory does not
    /// exist; it is never created
    pub fn new(
        output_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Result<Self, CaseWriteError> {
        let output_dir = output_dir.into();
        if !output_dir.is_dir() {
            return Err(CaseWriteError::MissingOutputDir(output_dir));
        }
        Ok(Self {
            output_dir,
            extension: extension.into(),
        })
    }

    /// Target directory
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a case will be written to
    #[must_use]
    pub fn path_for(&self, case: &CaseDescriptor) -> PathBuf {
        self.output_dir.join(case.id.file_name(&self.extension))
    }

    /// Write a case, replacing any file of the same name
    ///
    /// # Errors
    /// Returns [`CaseWriteError::Io`] if the file cannot be written
    pub fn write(&self, case: &CaseDescriptor) -> Result<PathBuf, CaseWriteError> {
        let path = self.path_for(case);
        std::fs::write(&path, render(case)).map_err(|e| CaseWriteError::io_error(&path, e))?;
        tracing::debug!(path = %path.display(), sequence = case.sequence, "wrote case file");
        Ok(path)
    }
}
