//! Null constraint validation.
//!
//! Each listed column is checked with its own pass over the data: rows where
//! the column is null are filtered and counted. Every failing column is
//! collected before the check reports.

use crate::read;
use reader_core::{DataSource, Frame, ReadOptions, ReaderError, Result};
use tracing::debug;

/// Validates that columns contain no null values.
#[derive(Debug, Clone, Default)]
pub struct NullValidator;

impl NullValidator {
    /// Creates a new null validator.
    pub fn new() -> Self {
        Self
    }

    /// Checks every column in order and fails with all the columns that
    /// contain at least one null.
    pub async fn validate<F, C>(&self, frame: &F, columns: &[C]) -> Result<()>
    where
        F: Frame,
        C: AsRef<str>,
    {
        let mut failed_columns = Vec::new();

        for column in columns {
            let column = column.as_ref();
            let nulls = frame.filter_nulls(column)?.count().await?;
            debug!("Column '{}' has {} null value(s)", column, nulls);
            if nulls > 0 {
                failed_columns.push(column.to_string());
            }
        }

        if failed_columns.is_empty() {
            Ok(())
        } else {
            Err(ReaderError::NullConstraintViolation {
                columns: failed_columns,
            })
        }
    }
}

/// Reads a dataset and validates that the given columns contain no nulls.
///
/// Fails with `NullConstraintViolation` listing every column that contains
/// nulls. Returns the dataset unchanged otherwise.
pub async fn read_with_non_nullable_columns<S, C>(
    source: &S,
    location: &str,
    format: &str,
    non_nullable_columns: &[C],
    options: &ReadOptions,
) -> Result<S::Frame>
where
    S: DataSource,
    C: AsRef<str>,
{
    let frame = read(source, location, format, options).await?;
    NullValidator::new()
        .validate(&frame, non_nullable_columns)
        .await?;
    Ok(frame)
}
