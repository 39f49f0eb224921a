//! Read request types and structures.
//!
//! This module contains the types describing what to read and how to check
//! it: the format identifier, ordered reader options, the expected schema,
//! and the bundled `ReadRequest` used by configuration files.

use crate::{ReaderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `(column name, type name)` pair as reported by a dataset.
pub type Dtype = (String, String);

/// Supported data format identifiers.
///
/// Parsed case-insensitively from the format string handed to a reader.
/// Engines decide which of these they can actually load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataFormat {
    /// Comma (or otherwise) separated values
    Csv,
    /// Newline-delimited JSON
    Json,
    /// Apache Parquet columnar format
    Parquet,
    /// Apache Avro format
    Avro,
    /// Apache ORC format
    Orc,
    /// Delta Lake table format
    Delta,
    /// Any other identifier, kept verbatim
    Custom(String),
}

impl DataFormat {
    /// Returns the canonical identifier of this format.
    pub fn as_str(&self) -> &str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Json => "json",
            DataFormat::Parquet => "parquet",
            DataFormat::Avro => "avro",
            DataFormat::Orc => "orc",
            DataFormat::Delta => "delta",
            DataFormat::Custom(id) => id,
        }
    }
}

impl FromStr for DataFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "csv" => DataFormat::Csv,
            "json" | "ndjson" | "jsonl" => DataFormat::Json,
            "parquet" => DataFormat::Parquet,
            "avro" => DataFormat::Avro,
            "orc" => DataFormat::Orc,
            "delta" => DataFormat::Delta,
            _ => DataFormat::Custom(s.trim().to_string()),
        })
    }
}

impl From<String> for DataFormat {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl From<DataFormat> for String {
    fn from(format: DataFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered key/value settings applied to a reader before loading.
///
/// Options keep their insertion order; when a key repeats, the later entry
/// wins once the reader interprets them.
///
/// # Example
///
/// ```rust
/// use reader_core::ReadOptions;
///
/// let options = ReadOptions::new()
///     .with("header", "true")
///     .with("sep", ";");
/// assert_eq!(options.len(), 2);
///
/// let malformed = ReadOptions::try_from_entries([vec!["k", "v", "extra"]]);
/// assert!(malformed.is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct ReadOptions {
    entries: Vec<(String, String)>,
}

impl ReadOptions {
    /// Creates an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from untyped entries, each of which must hold exactly
    /// a key and a value.
    pub fn try_from_entries<I, E, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: AsRef<[S]>,
        S: AsRef<str>,
    {
        let entries = pairs_from_entries(entries, "options")?;
        Ok(Self { entries })
    }

    /// Appends an option.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends an option in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Iterates the options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the effective value of a key (case-insensitive, last wins).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReadOptions {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<Vec<Vec<String>>> for ReadOptions {
    type Error = ReaderError;

    fn try_from(entries: Vec<Vec<String>>) -> Result<Self> {
        Self::try_from_entries(entries)
    }
}

impl From<ReadOptions> for Vec<Vec<String>> {
    fn from(options: ReadOptions) -> Self {
        options.entries.into_iter().map(|(k, v)| vec![k, v]).collect()
    }
}

/// How expected and actual column types are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeComparison {
    /// Sorted type names compared as a multiset, regardless of which column
    /// carries which type
    #[default]
    Multiset,
    /// Every column must carry its own expected type
    PerColumn,
}

/// Expected schema: a non-empty, ordered list of `(column, type)` pairs.
///
/// # Example
///
/// ```rust
/// use reader_core::SchemaSpec;
///
/// let schema = SchemaSpec::try_new(vec![
///     ("ID".to_string(), "bigint".to_string()),
///     ("name".to_string(), "string".to_string()),
/// ])
/// .unwrap();
/// assert_eq!(schema.expected_columns(), vec!["id", "name"]);
///
/// assert!(SchemaSpec::try_new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct SchemaSpec {
    columns: Vec<Dtype>,
}

impl SchemaSpec {
    /// Creates a schema spec, rejecting an empty column list.
    pub fn try_new(columns: Vec<Dtype>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ReaderError::precondition(
                "Must provide a schema (a non-empty list of (column, type) pairs)",
            ));
        }
        Ok(Self { columns })
    }

    /// Builds a schema spec from untyped entries, each of which must hold
    /// exactly a column name and a type name.
    pub fn try_from_entries<I, E, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: AsRef<[S]>,
        S: AsRef<str>,
    {
        Self::try_new(pairs_from_entries(entries, "schema")?)
    }

    /// Returns the `(column, type)` pairs in declaration order.
    pub fn columns(&self) -> &[Dtype] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; a schema spec has at least one column.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Sorted, lower-cased expected column names.
    pub fn expected_columns(&self) -> Vec<String> {
        sorted_column_names(&self.columns)
    }

    /// Sorted expected type names.
    pub fn expected_types(&self) -> Vec<String> {
        sorted_type_names(&self.columns)
    }
}

impl TryFrom<Vec<Vec<String>>> for SchemaSpec {
    type Error = ReaderError;

    fn try_from(entries: Vec<Vec<String>>) -> Result<Self> {
        Self::try_from_entries(entries)
    }
}

impl From<SchemaSpec> for Vec<Vec<String>> {
    fn from(schema: SchemaSpec) -> Self {
        schema.columns.into_iter().map(|(c, t)| vec![c, t]).collect()
    }
}

/// Sorted, lower-cased column names of a dtype list.
pub fn sorted_column_names(dtypes: &[Dtype]) -> Vec<String> {
    let mut names: Vec<String> = dtypes.iter().map(|(c, _)| c.to_lowercase()).collect();
    names.sort();
    names
}

/// Sorted type names of a dtype list.
pub fn sorted_type_names(dtypes: &[Dtype]) -> Vec<String> {
    let mut types: Vec<String> = dtypes.iter().map(|(_, t)| t.clone()).collect();
    types.sort();
    types
}

fn pairs_from_entries<I, E, S>(entries: I, what: &str) -> Result<Vec<(String, String)>>
where
    I: IntoIterator<Item = E>,
    E: AsRef<[S]>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| match entry.as_ref() {
            [first, second] => Ok((first.as_ref().to_string(), second.as_ref().to_string())),
            other => Err(ReaderError::precondition(format!(
                "{} must be a list of pairs, the pair must contain 2 values \
                 (entry {} has {})",
                what,
                idx,
                other.len()
            ))),
        })
        .collect()
}

/// A complete validated read: where to read from, how, and what to check.
///
/// # Example
///
/// ```rust
/// use reader_core::{DataFormat, ReadRequest};
///
/// let request = ReadRequest {
///     name: Some("collateral".to_string()),
///     location: "data/collateral.csv".to_string(),
///     format: DataFormat::Csv,
///     options: Default::default(),
///     schema: None,
///     type_comparison: Default::default(),
///     non_nullable_columns: vec!["id".to_string()],
///     unique_columns: vec!["id".to_string()],
/// };
/// assert_eq!(request.display_name(), "collateral");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadRequest {
    /// Optional human-readable name of the dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Physical location of the data (file, directory, or URI)
    pub location: String,

    /// Data format identifier
    pub format: DataFormat,

    /// Reader options, applied in order
    #[serde(default, skip_serializing_if = "ReadOptions::is_empty")]
    pub options: ReadOptions,

    /// Expected schema, if the schema should be checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaSpec>,

    /// Type comparison mode for the schema check
    #[serde(default)]
    pub type_comparison: TypeComparison,

    /// Columns that must not contain nulls
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_nullable_columns: Vec<String>,

    /// Columns whose value combinations must be unique (empty: no check)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_columns: Vec<String>,
}

impl ReadRequest {
    /// Returns the request name, falling back to its location.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.location)
    }
}
