//! Content-addressed case identifiers
//!
//! Provides [`CaseId`], the 8-digit decimal name of a generated case file.
//! The identifier is derived from the full row content so that re-running
//! the generator over the same matrix yields the same file names.

use crate::row::ParameterRow;
use sha2::{Digest, Sha256};
use std::fmt::{self, Display, Formatter};

/// Identifiers are reduced into `0..MODULUS`
pub const MODULUS: u32 = 100_000_000;

/// Decimal width of a rendered identifier
pub const WIDTH: usize = 8;

/// An 8-digit case identifier
///
/// Two rows with the same set of `(name, value)` pairs always share an
/// identifier. Distinct rows may collide modulo 10^8; that is accepted and
/// resolved by the writer as last-write-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaseId(u32);

impl CaseId {
    /// Wrap a raw value, reducing it into range
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value % MODULUS)
    }

    /// Raw numeric value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Derive the identifier for a row
    ///
    /// SHA-256 over every column name immediately followed by its raw value,
    /// in lexicographic column order, read as a big-endian integer mod 10^8.
    #[must_use]
    pub fn for_row(row: &ParameterRow) -> Self {
        let mut hasher = Sha256::new();
        for (name, value) in row.sorted_columns() {
            hasher.update(name.as_bytes());
            hasher.update(value.as_bytes());
        }
        Self::from_digest(&hasher.finalize())
    }

    /// Reduce a big-endian digest modulo 10^8
    #[must_use]
    pub fn from_digest(digest: &[u8]) -> Self {
        let modulus = u64::from(MODULUS);
        let rem = digest
            .iter()
            .fold(0u64, |acc, &byte| (acc * 256 + u64::from(byte)) % modulus);
        // rem < MODULUS, always fits
        Self(u32::try_from(rem).unwrap_or_default())
    }

    /// Case file name for this identifier
    #[must_use]
    pub fn file_name(self, extension: &str) -> String {
        format!("{self}.{extension}")
    }
}

impl Display for CaseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = WIDTH)
    }
}
