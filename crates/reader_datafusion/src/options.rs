//! Interpretation of reader options for DataFusion.
//!
//! Keys follow the Spark reader names and are matched case-insensitively.
//! A later entry for the same key overrides an earlier one.

use reader_core::{DataFormat, ReadOptions, ReaderError, Result};
use tracing::{debug, warn};

/// Reader settings resolved from the options applied to a reader.
///
/// `None` leaves the DataFusion default in place. For CSV that means a
/// header row is expected unless `header=false` is given, unlike Spark,
/// which reads without a header by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReaderSettings {
    /// First line is a header (csv)
    pub has_header: Option<bool>,

    /// Field delimiter (csv)
    pub delimiter: Option<u8>,

    /// Quote character (csv)
    pub quote: Option<u8>,

    /// Escape character (csv)
    pub escape: Option<u8>,

    /// Comment line prefix (csv)
    pub comment: Option<u8>,

    /// Extension of the files read from a directory
    pub file_extension: Option<String>,

    /// Rows sampled to infer the schema (csv, json)
    pub schema_infer_max_records: Option<usize>,

    /// Row group pruning with predicates (parquet)
    pub parquet_pruning: Option<bool>,

    /// Ignore embedded schema metadata (parquet)
    pub skip_metadata: Option<bool>,
}

impl ReaderSettings {
    /// Resolves the settings for `format` from `options`, in order.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::InvalidOption` when a known key has a value
    /// that cannot be interpreted.
    pub fn from_options(format: &DataFormat, options: &ReadOptions) -> Result<Self> {
        let mut settings = Self::default();

        for (key, value) in options.iter() {
            let normalized = key.to_ascii_lowercase().replace('_', "");
            match (format, normalized.as_str()) {
                (DataFormat::Csv, "header") => settings.has_header = Some(parse_bool(key, value)?),
                (DataFormat::Csv, "sep" | "delimiter") => {
                    settings.delimiter = Some(parse_char(key, value)?)
                }
                (DataFormat::Csv, "quote") => settings.quote = Some(parse_char(key, value)?),
                (DataFormat::Csv, "escape") => settings.escape = Some(parse_char(key, value)?),
                (DataFormat::Csv, "comment") => settings.comment = Some(parse_char(key, value)?),
                (_, "fileextension") => settings.file_extension = Some(value.to_string()),
                (DataFormat::Csv | DataFormat::Json, "schemainfermaxrecords") => {
                    settings.schema_infer_max_records = Some(parse_count(key, value)?)
                }
                (DataFormat::Parquet, "parquetpruning") => {
                    settings.parquet_pruning = Some(parse_bool(key, value)?)
                }
                (DataFormat::Parquet, "skipmetadata") => {
                    settings.skip_metadata = Some(parse_bool(key, value)?)
                }
                // DataFusion always infers and merges file schemas
                (_, "inferschema" | "mergeschema") => {
                    debug!("Option '{}' is implied by DataFusion, ignoring", key);
                }
                _ => warn!(
                    "Ignoring unsupported reader option '{}' for {} format",
                    key, format
                ),
            }
        }

        Ok(settings)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .trim()
        .to_ascii_lowercase()
        .parse::<bool>()
        .map_err(|_| ReaderError::invalid_option(key, value, "expected 'true' or 'false'"))
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ReaderError::invalid_option(key, value, "expected a non-negative integer"))
}

fn parse_char(key: &str, value: &str) -> Result<u8> {
    match value {
        "\\t" => return Ok(b'\t'),
        "\\n" => return Ok(b'\n'),
        _ => {}
    }

    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ReaderError::invalid_option(
            key,
            value,
            "expected a single ASCII character",
        )),
    }
}
