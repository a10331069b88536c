//! Parameter rows
//!
//! Provides [`ParameterRow`], one line of the parameter matrix keyed by
//! header column names.

use std::collections::BTreeMap;

/// One row of the parameter matrix
///
/// Column names are unique. The header order is kept for display, while
/// [`ParameterRow::sorted_columns`] gives the byte-wise lexicographic order
/// that identifier hashing and argument dispatch depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRow {
    columns: Vec<(String, String)>,
}

/// Row construction failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate column '{0}'")]
pub struct DuplicateColumn(pub String);

impl ParameterRow {
    /// Build a row from `(name, value)` pairs in header order
    ///
    /// # Errors
    /// Returns [`DuplicateColumn`] if a column name repeats
    pub fn new<I, K, V>(columns: I) -> Result<Self, DuplicateColumn>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut out: Vec<(String, String)> = Vec::new();
        for (name, value) in columns {
            let name = name.into();
            if out.iter().any(|(existing, _)| *existing == name) {
                return Err(DuplicateColumn(name));
            }
            out.push((name, value.into()));
        }
        Ok(Self { columns: out })
    }

    /// Build from columns already known to be unique
    pub(crate) fn from_unique_columns(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// Value of a column, if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Columns in header order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Columns sorted by name
    #[must_use]
    pub fn sorted_columns(&self) -> BTreeMap<&str, &str> {
        self.columns().collect()
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
