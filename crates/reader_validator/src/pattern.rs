//! Column pattern validation.

use reader_core::{DataSource, ReadOptions, ReaderError, Result};

/// Reads a dataset and validates column values against regular expressions.
///
/// Not implemented: every call fails with `ReaderError::NotImplemented`
/// without touching the data source.
pub async fn read_with_regular_expression_columns<S, C, P>(
    _source: &S,
    _location: &str,
    _format: &str,
    _patterns: &[(C, P)],
    _options: &ReadOptions,
) -> Result<S::Frame>
where
    S: DataSource,
    C: AsRef<str>,
    P: AsRef<str>,
{
    Err(ReaderError::not_implemented(
        "column pattern validation is not available",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryFrame, MemorySource};

    #[tokio::test]
    async fn test_always_not_implemented() {
        let source = MemorySource::new().with_table("mem://t", MemoryFrame::new([("id", "string")]));

        let err = read_with_regular_expression_columns(
            &source,
            "mem://t",
            "csv",
            &[("id", r"^\d+$")],
            &ReadOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReaderError::NotImplemented(_)));
        assert!(source.loads().is_empty());

        let no_patterns: [(&str, &str); 0] = [];
        let err = read_with_regular_expression_columns(
            &source,
            "",
            "",
            &no_patterns,
            &ReadOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReaderError::NotImplemented(_)));
    }
}
