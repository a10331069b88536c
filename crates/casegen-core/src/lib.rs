//! Cluster test case generator
//!
//! Turns a pairwise-combinatorial parameter matrix into one case file per
//! row. Each case file carries the CLI invocation to run and the
//! configuration overrides to apply, and is named by a content hash of the
//! row so re-generation is idempotent.
//!
//! # Pipeline
//!
//! ```text
//! params.csv → MatrixReader → ParameterRow → RowEncoder → CaseDescriptor → CaseFileWriter → <id>.case
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use casegen_core::{Generator, GeneratorConfig};
//!
//! # fn example() -> Result<(), casegen_core::GeneratorError> {
//! let report = Generator::new(GeneratorConfig::new()).run("params.csv", "cases")?;
//! println!("{} rows", report.rows);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod identifier;
pub mod matrix;
pub mod row;
pub mod writer;

// Re-exports for convenience
pub use config::GeneratorConfig;
pub use encoder::{CaseDescriptor, ColumnRule, CommandArgument, ConfigOverride, RowEncoder};
pub use error::{
    CaseWriteError, ConfigError, GeneratorError, MatrixReadError, RowFault, RowParseError,
};
pub use generator::{Collision, GenerationReport, Generator};
pub use identifier::CaseId;
pub use matrix::MatrixReader;
pub use row::{DuplicateColumn, ParameterRow};
pub use writer::{render, CaseFileWriter};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
