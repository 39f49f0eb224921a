//! Uniqueness validation.
//!
//! Rows are grouped by the full combination of the listed columns; any group
//! holding more than one row is a duplicate.

use crate::read;
use reader_core::{DataSource, Frame, ReadOptions, ReaderError, Result};
use tracing::debug;

/// Validates that value combinations are unique across rows.
#[derive(Debug, Clone, Default)]
pub struct UniquenessValidator;

impl UniquenessValidator {
    /// Creates a new uniqueness validator.
    pub fn new() -> Self {
        Self
    }

    /// Fails if any combination of `columns` occurs in more than one row.
    ///
    /// An empty column list puts every row in one group, so it only fails
    /// when the dataset has more than one row.
    pub async fn validate<F, C>(&self, frame: &F, columns: &[C]) -> Result<()>
    where
        F: Frame,
        C: AsRef<str>,
    {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let duplicate_groups = if columns.is_empty() {
            usize::from(frame.count().await? > 1)
        } else {
            frame.duplicate_groups(&columns)?.count().await?
        };
        debug!(
            "Found {} duplicated group(s) for columns {:?}",
            duplicate_groups, columns
        );

        if duplicate_groups > 0 {
            return Err(ReaderError::UniquenessViolation {
                columns,
                duplicate_groups,
            });
        }

        Ok(())
    }
}

/// Reads a dataset and validates that the combined values of the given
/// columns are unique.
///
/// Fails with `UniquenessViolation` naming the columns if any combination
/// repeats. Returns the dataset unchanged otherwise.
pub async fn read_with_unique_column_values<S, C>(
    source: &S,
    location: &str,
    format: &str,
    unique_value_columns: &[C],
    options: &ReadOptions,
) -> Result<S::Frame>
where
    S: DataSource,
    C: AsRef<str>,
{
    let frame = read(source, location, format, options).await?;
    UniquenessValidator::new()
        .validate(&frame, unique_value_columns)
        .await?;
    Ok(frame)
}
