//! Testing utilities for the casegen workspace
//!
//! Shared fixtures: matrix files in temporary directories and row builders.

#![allow(missing_docs)]

use casegen_core::ParameterRow;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small matrix exercising every dispatch rule
pub const SAMPLE_MATRIX: &str = "\
_CNAME,_PLAN,_INFRA,--size,--enable-ceip-participation,AZURE_CUSTOM_TAGS,CLUSTER_CIDR,AZURE_LOCATION
tkg,dev,azure,small,true,tagKey1=v,NA,westus2
tkg,prod,azure,NOTPROVIDED,false,NA,100.96.0.0/11,eastus<comma>2
tanzu,dev,vsphere,medium,NOTPROVIDED,env=qa,NA,<qq>quoted<qq>
";

/// Temporary workspace holding a matrix file and an output directory
pub struct MatrixFixture {
    dir: TempDir,
    matrix: PathBuf,
    output: PathBuf,
}

impl MatrixFixture {
    /// Write `contents` as `params.csv` and create an empty `cases/` dir
    pub fn new(contents: &str) -> Self {
        Self::from_bytes(contents.as_bytes())
    }

    /// Same as [`MatrixFixture::new`] for raw, possibly non-UTF-8, bytes
    pub fn from_bytes(contents: &[u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let matrix = dir.path().join("params.csv");
        std::fs::write(&matrix, contents).unwrap();
        let output = dir.path().join("cases");
        std::fs::create_dir(&output).unwrap();
        Self {
            dir,
            matrix,
            output,
        }
    }

    /// Fixture over [`SAMPLE_MATRIX`]
    pub fn sample() -> Self {
        Self::new(SAMPLE_MATRIX)
    }

    pub fn matrix(&self) -> &Path {
        &self.matrix
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Sorted names of files in the output directory
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.output)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Contents of a file in the output directory
    pub fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.output.join(name)).unwrap()
    }
}

/// Build a row from `(name, value)` pairs
pub fn row(pairs: &[(&str, &str)]) -> ParameterRow {
    ParameterRow::new(pairs.iter().copied()).unwrap()
}
