//! Builder pattern for creating read requests.
//!
//! This module provides an ergonomic builder for constructing a
//! `ReadRequest` with a fluent API.

use crate::{DataFormat, ReadOptions, ReadRequest, SchemaSpec, TypeComparison};

/// Builder for creating a `ReadRequest`.
///
/// # Example
///
/// ```rust
/// use reader_core::{DataFormat, ReadRequestBuilder};
///
/// let request = ReadRequestBuilder::new("s3://data/collateral", DataFormat::Parquet)
///     .name("allocated_collateral")
///     .option("mergeSchema", "true")
///     .column("id", "bigint")
///     .column("amount", "double")
///     .non_nullable("id")
///     .unique("id")
///     .build();
///
/// assert_eq!(request.schema.unwrap().len(), 2);
/// ```
#[derive(Debug)]
pub struct ReadRequestBuilder {
    name: Option<String>,
    location: String,
    format: DataFormat,
    options: ReadOptions,
    columns: Vec<(String, String)>,
    type_comparison: TypeComparison,
    non_nullable_columns: Vec<String>,
    unique_columns: Vec<String>,
}

impl ReadRequestBuilder {
    /// Creates a new request builder with required fields.
    ///
    /// # Arguments
    ///
    /// * `location` - Where the data is stored
    /// * `format` - How the data is stored
    pub fn new(location: impl Into<String>, format: DataFormat) -> Self {
        Self {
            name: None,
            location: location.into(),
            format,
            options: ReadOptions::new(),
            columns: Vec::new(),
            type_comparison: TypeComparison::default(),
            non_nullable_columns: Vec::new(),
            unique_columns: Vec::new(),
        }
    }

    /// Sets the request name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a reader option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(key, value);
        self
    }

    /// Replaces all reader options.
    pub fn options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds an expected column to the schema check.
    pub fn column(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.columns.push((name.into(), type_name.into()));
        self
    }

    /// Sets the type comparison mode of the schema check.
    pub fn type_comparison(mut self, mode: TypeComparison) -> Self {
        self.type_comparison = mode;
        self
    }

    /// Adds a column that must not contain nulls.
    pub fn non_nullable(mut self, column: impl Into<String>) -> Self {
        self.non_nullable_columns.push(column.into());
        self
    }

    /// Adds a column to the uniqueness key.
    pub fn unique(mut self, column: impl Into<String>) -> Self {
        self.unique_columns.push(column.into());
        self
    }

    /// Builds the request.
    ///
    /// The schema check is configured only if at least one column was added.
    pub fn build(self) -> ReadRequest {
        ReadRequest {
            name: self.name,
            location: self.location,
            format: self.format,
            options: self.options,
            schema: SchemaSpec::try_new(self.columns).ok(),
            type_comparison: self.type_comparison,
            non_nullable_columns: self.non_nullable_columns,
            unique_columns: self.unique_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_minimal() {
        let request = ReadRequestBuilder::new("/tmp/data.csv", DataFormat::Csv).build();

        assert_eq!(request.location, "/tmp/data.csv");
        assert_eq!(request.format, DataFormat::Csv);
        assert!(request.schema.is_none());
        assert!(request.non_nullable_columns.is_empty());
        assert!(request.unique_columns.is_empty());
    }

    #[test]
    fn test_builder_full() {
        let request = ReadRequestBuilder::new("/tmp/data", DataFormat::Json)
            .name("events")
            .option("k", "v")
            .option("k2", "v2")
            .column("id", "bigint")
            .type_comparison(TypeComparison::PerColumn)
            .non_nullable("id")
            .unique("id")
            .unique("day")
            .build();

        assert_eq!(request.display_name(), "events");
        assert_eq!(request.options.len(), 2);
        assert_eq!(
            request.schema.unwrap().columns(),
            &[("id".to_string(), "bigint".to_string())]
        );
        assert_eq!(request.type_comparison, TypeComparison::PerColumn);
        assert_eq!(request.unique_columns, vec!["id", "day"]);
    }
}
