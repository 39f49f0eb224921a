//! Error types for validated reads.
//!
//! This module defines every failure a validated read can surface: caller
//! bugs (malformed options or schema arguments), data-quality failures found
//! by the validators, and failures reported by the dataframe engine.

use crate::Dtype;
use thiserror::Error;

/// Result type for validated read operations.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Main error type for validated read operations.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// Malformed options or schema argument
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Column names of the dataset differ from the expected schema
    #[error("Did not get the columns as specified in the schema, got: {actual:?}")]
    SchemaMismatch {
        /// Sorted, lower-cased column names found in the dataset
        actual: Vec<String>,
    },

    /// Column types of the dataset differ from the expected schema
    #[error("Did not get the same data types for the columns, got: {actual:?}")]
    TypeMismatch {
        /// The dataset's dtypes as loaded
        actual: Vec<Dtype>,
    },

    /// One or more non-nullable columns contain nulls
    #[error("The following columns contain null values: {columns:?}")]
    NullConstraintViolation {
        /// Failing columns, in the order they were checked
        columns: Vec<String>,
    },

    /// Duplicate value combinations were found
    #[error("Data has duplicates for columns: {columns:?} ({duplicate_groups} duplicated group(s))")]
    UniquenessViolation {
        /// Columns forming the uniqueness key
        columns: Vec<String>,
        /// Number of value combinations occurring more than once
        duplicate_groups: usize,
    },

    /// Operation is declared but not implemented
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Format identifier not supported by the engine
    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    /// Reader option with a value the engine cannot interpret
    #[error("Invalid value '{value}' for reader option '{key}': {message}")]
    InvalidOption {
        /// Option key
        key: String,
        /// Option value
        value: String,
        /// Why the value was rejected
        message: String,
    },

    /// Column referenced by a check does not exist in the dataset
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Nothing could be loaded from the location
    #[error("Failed to load '{location}': {message}")]
    Load {
        /// Location passed to the reader
        location: String,
        /// Failure details
        message: String,
    },

    /// Error raised by the dataframe engine
    #[error("Dataframe engine error: {0}")]
    Engine(String),
}

impl ReaderError {
    /// Creates a new precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates a new not-implemented error.
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented(message.into())
    }

    /// Creates a new invalid option error.
    pub fn invalid_option(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Creates a new load error.
    pub fn load(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Creates a new engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }

    /// Returns true for failures caused by the data rather than the caller
    /// or the engine.
    pub fn is_data_quality(&self) -> bool {
        matches!(
            self,
            Self::SchemaMismatch { .. }
                | Self::TypeMismatch { .. }
                | Self::NullConstraintViolation { .. }
                | Self::UniquenessViolation { .. }
        )
    }
}
