//! Schema validation logic.
//!
//! Compares a dataset's column names and types against an expected schema.
//! Column names are compared case-insensitively and order-independently; type
//! names are compared exactly.

use crate::read;
use reader_core::{
    DataSource, Dtype, Frame, ReadOptions, ReaderError, Result, SchemaSpec, TypeComparison,
    resolve_column, sorted_column_names, sorted_type_names,
};
use tracing::{debug, warn};

/// Validates dataset dtypes against a `SchemaSpec`.
///
/// By default the types are compared as a sorted multiset, without regard to
/// which column carries which type. `TypeComparison::PerColumn` checks each
/// column's own type instead.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    comparison: TypeComparison,
}

impl SchemaValidator {
    /// Creates a new schema validator using multiset type comparison.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type comparison mode.
    pub fn with_type_comparison(mut self, comparison: TypeComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Validates the actual dtypes against the expected schema.
    ///
    /// Column names are checked first; a type mismatch is only reported once
    /// the column sets agree.
    pub fn validate(&self, schema: &SchemaSpec, actual: &[Dtype]) -> Result<()> {
        let expected_columns = schema.expected_columns();
        let expected_types = schema.expected_types();
        let actual_columns = sorted_column_names(actual);
        let actual_types = sorted_type_names(actual);

        debug!("expected columns: {:?}", expected_columns);
        debug!("actual columns: {:?}", actual_columns);
        debug!("expected data types: {:?}", expected_types);
        debug!("actual data types: {:?}", actual_types);

        if expected_columns != actual_columns {
            warn!("Column mismatch: expected {:?}", expected_columns);
            return Err(ReaderError::SchemaMismatch {
                actual: actual_columns,
            });
        }

        let types_match = match self.comparison {
            TypeComparison::Multiset => expected_types == actual_types,
            TypeComparison::PerColumn => types_match_per_column(schema, actual),
        };

        if !types_match {
            warn!("Type mismatch: expected {:?}", schema.columns());
            return Err(ReaderError::TypeMismatch {
                actual: actual.to_vec(),
            });
        }

        Ok(())
    }
}

/// Checks that every expected column carries its expected type.
///
/// Columns that differ only in case are told apart by an exact name match.
fn types_match_per_column(schema: &SchemaSpec, actual: &[Dtype]) -> bool {
    let names: Vec<String> = actual.iter().map(|(c, _)| c.clone()).collect();

    schema.columns().iter().all(|(column, expected)| {
        resolve_column(&names, column)
            .and_then(|name| actual.iter().find(|(c, _)| c == name))
            .is_some_and(|(_, t)| t == expected)
    })
}

/// Reads a dataset and validates its schema.
///
/// Fails with `SchemaMismatch` if the column names differ from the schema
/// and with `TypeMismatch` if the type names differ. Returns the dataset
/// unchanged otherwise. An empty schema cannot reach this point: `SchemaSpec`
/// rejects it on construction.
pub async fn read_with_type_validation<S: DataSource>(
    source: &S,
    location: &str,
    format: &str,
    schema: &SchemaSpec,
    options: &ReadOptions,
) -> Result<S::Frame> {
    let frame = read(source, location, format, options).await?;
    SchemaValidator::new().validate(schema, &frame.dtypes())?;
    Ok(frame)
}
