//! Dataframe engine traits.
//!
//! The validated reader never reads, filters, groups, or counts rows itself;
//! it delegates to an engine through the narrow capability set defined here.
//! Different implementations can back it (DataFusion, in-memory rows, ...).

use crate::{Dtype, Result};
use std::future::Future;

/// A session with a dataframe engine.
///
/// Owned by the caller and only borrowed by read operations.
///
/// # Example
///
/// ```rust,ignore
/// let frame = source
///     .reader("csv")?
///     .option("header", "true")
///     .load("data/users.csv")
///     .await?;
/// ```
pub trait DataSource: Send + Sync {
    /// Reader type produced by this source
    type Reader: FrameReader<Frame = Self::Frame>;

    /// Dataset type loaded by this source
    type Frame: Frame;

    /// Creates a reader configured for the given format identifier.
    fn reader(&self, format: &str) -> Result<Self::Reader>;
}

/// A reader being configured before it loads a dataset.
pub trait FrameReader: Send + Sized {
    /// Dataset type produced by `load`
    type Frame: Frame;

    /// Applies one key/value setting. Settings are kept in call order.
    fn option(self, key: &str, value: &str) -> Self;

    /// Loads the dataset stored at `location`.
    fn load(self, location: &str) -> impl Future<Output = Result<Self::Frame>> + Send;
}

/// A loaded tabular dataset.
///
/// Transformations are lazy where the engine allows it; only `count`
/// executes work.
pub trait Frame: Send + Sync + Sized {
    /// Returns the `(column name, type name)` pairs in column order.
    fn dtypes(&self) -> Vec<Dtype>;

    /// Keeps only the rows where `column` is null.
    ///
    /// The column is resolved case-insensitively.
    fn filter_nulls(&self, column: &str) -> Result<Self>;

    /// Groups rows by the combination of `columns` and keeps one row per
    /// group that occurs more than once.
    ///
    /// The columns are resolved case-insensitively.
    fn duplicate_groups(&self, columns: &[String]) -> Result<Self>;

    /// Counts the rows of this dataset.
    fn count(&self) -> impl Future<Output = Result<usize>> + Send;

    /// Returns the column names in column order.
    fn columns(&self) -> Vec<String> {
        self.dtypes().into_iter().map(|(name, _)| name).collect()
    }
}

/// Resolves a column name against the dataset's columns, ignoring case.
///
/// An exact match wins over a case-insensitive one.
pub fn resolve_column<'a>(columns: &'a [String], name: &str) -> Option<&'a str> {
    columns
        .iter()
        .find(|c| c.as_str() == name)
        .or_else(|| columns.iter().find(|c| c.eq_ignore_ascii_case(name)))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_column_ignores_case() {
        let columns = vec!["Id".to_string(), "name".to_string()];
        assert_eq!(resolve_column(&columns, "ID"), Some("Id"));
        assert_eq!(resolve_column(&columns, "name"), Some("name"));
        assert_eq!(resolve_column(&columns, "email"), None);
    }

    #[test]
    fn test_resolve_column_prefers_exact_match() {
        let columns = vec!["ID".to_string(), "id".to_string()];
        assert_eq!(resolve_column(&columns, "id"), Some("id"));
    }
}
