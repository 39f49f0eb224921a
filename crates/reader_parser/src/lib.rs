//! Parser for validated read requests (YAML/TOML formats).
//!
//! A request file names the data to read, the reader options, and the
//! checks to run on the loaded dataset. Options and schema columns are
//! lists of `[key, value]` pairs so their order survives.
//!
//! # Example
//!
//! ```rust
//! use reader_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: allocated_collateral
//! location: data/collateral.csv
//! format: csv
//! options:
//!   - ["header", "true"]
//! schema:
//!   - ["collateral_id", "bigint"]
//!   - ["amount", "double"]
//! non_nullable_columns: [collateral_id]
//! unique_columns: [collateral_id]
//! "#;
//!
//! let request = parse_yaml(yaml).expect("Failed to parse request");
//! assert_eq!(request.display_name(), "allocated_collateral");
//! ```

use reader_core::ReadRequest;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during request parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported request file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a read request from a YAML string.
pub fn parse_yaml(content: &str) -> Result<ReadRequest> {
    let request: ReadRequest = serde_yaml_ng::from_str(content)?;
    Ok(request)
}

/// Parse a read request from a TOML string.
///
/// # Example
///
/// ```rust
/// use reader_parser::parse_toml;
///
/// let toml = r#"
/// location = "s3://bucket/trades"
/// format = "parquet"
/// unique_columns = ["trade_id"]
/// "#;
///
/// let request = parse_toml(toml).unwrap();
/// assert_eq!(request.unique_columns, vec!["trade_id"]);
/// ```
pub fn parse_toml(content: &str) -> Result<ReadRequest> {
    toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
}

/// Detect the request format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `RequestFormat::Yaml`
/// * `.toml` → `RequestFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<RequestFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(RequestFormat::Yaml),
        "toml" => Ok(RequestFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a read request from a file with automatic format detection.
///
/// ```no_run
/// use reader_parser::parse_file;
/// use std::path::Path;
///
/// let request = parse_file(Path::new("requests/collateral.yml")).unwrap();
/// println!("Loaded request: {}", request.display_name());
/// ```
pub fn parse_file(path: &Path) -> Result<ReadRequest> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        RequestFormat::Yaml => parse_yaml(&content),
        RequestFormat::Toml => parse_toml(&content),
    }
}
