//! Run driver
//!
//! Reads the matrix, encodes each row and writes its case file, strictly one
//! row at a time. The first failure ends the run.

use crate::config::GeneratorConfig;
use crate::encoder::RowEncoder;
use crate::error::Result;
use crate::identifier::CaseId;
use crate::matrix::MatrixReader;
use crate::writer::CaseFileWriter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// An identifier produced by more than one row in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub id: CaseId,
    /// Sequence number whose file was replaced
    pub replaced: u32,
    /// Sequence number now stored under `id`
    pub by: u32,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Rows read and encoded
    pub rows: u32,
    /// Files written, in row order (repeats on collision)
    pub written: Vec<PathBuf>,
    /// Identifiers that recurred within the run
    pub collisions: Vec<Collision>,
    last_seen: HashMap<CaseId, u32>,
}

impl GenerationReport {
    /// Number of distinct case files on disk after the run
    #[must_use]
    pub fn distinct_files(&self) -> usize {
        self.last_seen.len()
    }

    fn record(&mut self, id: CaseId, sequence: u32, path: PathBuf) {
        self.rows = sequence;
        self.written.push(path);
        if let Some(replaced) = self.last_seen.insert(id, sequence) {
            tracing::debug!(%id, replaced, by = sequence, "case identifier recurred");
            self.collisions.push(Collision {
                id,
                replaced,
                by: sequence,
            });
        }
    }
}

/// Case file generator
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
    encoder: RowEncoder,
}

impl Generator {
    /// Create generator with the given config
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            encoder: RowEncoder::new(),
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one case file per row of `params_file` into `output_dir`
    ///
    /// # Errors
    /// Fails on invalid config, a missing output directory, an unreadable
    /// matrix, a malformed row or a write failure. Files written before the
    /// failure are left in place.
    pub fn run(
        &self,
        params_file: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<GenerationReport> {
        let params_file = params_file.as_ref();
        let output_dir = output_dir.as_ref();
        self.config.validate()?;

        let writer = CaseFileWriter::new(output_dir, self.config.extension.clone())?;
        let rows = MatrixReader::open(params_file, self.config.delimiter_byte()?)?;
        tracing::info!(
            matrix = %params_file.display(),
            output = %output_dir.display(),
            columns = rows.headers().len(),
            "generating cases"
        );

        let mut report = GenerationReport::default();
        for (sequence, row) in (1u32..).zip(rows) {
            let row = row?;
            let case = self.encoder.encode(sequence, &row);
            let path = writer.write(&case)?;
            report.record(case.id, sequence, path);
        }

        tracing::info!(
            rows = report.rows,
            files = report.distinct_files(),
            collisions = report.collisions.len(),
            "generation finished"
        );
        Ok(report)
    }
}
