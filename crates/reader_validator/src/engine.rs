//! Request runner.
//!
//! This module provides the `DataValidator` that executes a `ReadRequest`:
//! one load, then the configured schema, null, and uniqueness checks.

use crate::{NullValidator, SchemaValidator, UniquenessValidator, read};
use chrono::Utc;
use reader_core::{
    CheckKind, DataSource, Frame, ReadRequest, Result, ValidationContext, ValidationReport,
};
use std::time::Instant;
use tracing::{info, warn};

/// A loaded dataset together with the report of the checks run on it.
#[derive(Debug)]
pub struct ValidatedRead<F> {
    /// The dataset, as loaded
    pub frame: F,
    /// Outcome of the configured checks
    pub report: ValidationReport,
}

/// Runs read requests against a data source.
///
/// Checks run in the order schema, non-nullable columns, unique columns.
/// Data-quality failures are collected into the report unless the context
/// asks to fail fast; caller errors (preconditions) and engine errors always
/// propagate.
///
/// # Example
///
/// ```rust
/// use reader_core::{DataFormat, ReadRequestBuilder};
/// use reader_validator::{DataValidator, MemoryFrame, MemorySource};
///
/// let frame = MemoryFrame::new([("id", "bigint")]).with_values(vec![1i64.into()]);
/// let source = MemorySource::new().with_table("mem://ids", frame);
/// let request = ReadRequestBuilder::new("mem://ids", DataFormat::Csv)
///     .column("id", "bigint")
///     .non_nullable("id")
///     .unique("id")
///     .build();
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let result = rt.block_on(DataValidator::new().run(&source, &request)).unwrap();
/// assert!(result.report.passed);
/// assert_eq!(result.report.stats.checks_run, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataValidator {
    context: ValidationContext,
}

impl DataValidator {
    /// Creates a runner with the default context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner with the given context.
    pub fn with_context(context: ValidationContext) -> Self {
        Self { context }
    }

    /// Loads the requested dataset and runs its checks.
    pub async fn run<S: DataSource>(
        &self,
        source: &S,
        request: &ReadRequest,
    ) -> Result<ValidatedRead<S::Frame>> {
        let start = Instant::now();
        let mut report = ValidationReport::success();
        report.stats.started_at = Utc::now();

        info!("Running read request: {}", request.display_name());

        let frame = read(
            source,
            &request.location,
            request.format.as_str(),
            &request.options,
        )
        .await?;
        let dtypes = frame.dtypes();
        report.stats.columns = dtypes.len();

        if let Some(schema) = &request.schema {
            let result = SchemaValidator::new()
                .with_type_comparison(request.type_comparison)
                .validate(schema, &dtypes);
            self.settle(&mut report, CheckKind::Schema, result)?;
        }

        if self.context.schema_only {
            if !request.non_nullable_columns.is_empty() {
                report.add_warning("Skipped non-nullable check (schema-only mode)");
            }
            if !request.unique_columns.is_empty() {
                report.add_warning("Skipped unique check (schema-only mode)");
            }
        } else {
            if !request.non_nullable_columns.is_empty() {
                let result = NullValidator::new()
                    .validate(&frame, &request.non_nullable_columns)
                    .await;
                self.settle(&mut report, CheckKind::NonNullable, result)?;
            }

            if !request.unique_columns.is_empty() {
                let result = UniquenessValidator::new()
                    .validate(&frame, &request.unique_columns)
                    .await;
                self.settle(&mut report, CheckKind::Unique, result)?;
            }

            report.stats.rows = Some(frame.count().await?);
        }

        report.stats.duration_ms = start.elapsed().as_millis() as u64;

        if report.passed {
            info!("Read request passed: {}", request.display_name());
        } else {
            warn!(
                "Read request failed: {} with {} error(s)",
                request.display_name(),
                report.errors.len()
            );
        }

        Ok(ValidatedRead { frame, report })
    }

    /// Records a check result in the report, or propagates it.
    fn settle(
        &self,
        report: &mut ValidationReport,
        check: CheckKind,
        result: Result<()>,
    ) -> Result<()> {
        match result {
            Ok(()) => {
                report.record_pass(check);
                Ok(())
            }
            Err(err) if err.is_data_quality() && !self.context.fail_fast => {
                report.record_failure(check, err.to_string());
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataValue, MemoryFrame, MemorySource};
    use pretty_assertions::assert_eq;
    use reader_core::{DataFormat, ReadRequestBuilder, ReaderError, TypeComparison};

    fn source() -> MemorySource {
        let frame = MemoryFrame::new([("id", "bigint"), ("name", "string")])
            .with_values(vec![1i64.into(), "ada".into()])
            .with_values(vec![1i64.into(), DataValue::Null]);
        MemorySource::new().with_table("mem://people", frame)
    }

    fn request() -> ReadRequestBuilder {
        ReadRequestBuilder::new("mem://people", DataFormat::Csv)
    }

    #[tokio::test]
    async fn test_passing_request() {
        let request = request()
            .option("header", "true")
            .column("ID", "bigint")
            .column("name", "string")
            .non_nullable("id")
            .build();

        let source = source();
        let result = DataValidator::new().run(&source, &request).await.unwrap();

        assert!(result.report.passed, "errors: {:?}", result.report.errors);
        assert_eq!(result.report.stats.columns, 2);
        assert_eq!(result.report.stats.rows, Some(2));
        assert_eq!(result.report.stats.checks_run, 2);
        assert_eq!(result.frame.len(), 2);
        assert_eq!(source.loads().len(), 1);
        assert_eq!(source.loads()[0].options.get("header"), Some("true"));
    }

    #[tokio::test]
    async fn test_failures_are_collected() {
        let request = request()
            .column("id", "int")
            .column("name", "string")
            .non_nullable("name")
            .unique("id")
            .build();

        let result = DataValidator::new().run(&source(), &request).await.unwrap();
        let report = result.report;

        assert!(!report.passed);
        assert_eq!(report.errors.len(), 3);
        assert!(!report.outcome(CheckKind::Schema).unwrap().passed);
        assert!(!report.outcome(CheckKind::NonNullable).unwrap().passed);
        assert!(!report.outcome(CheckKind::Unique).unwrap().passed);
        assert!(report.errors[1].contains("null"));
    }

    #[tokio::test]
    async fn test_fail_fast_returns_first_failure() {
        let request = request().non_nullable("name").unique("id").build();
        let validator = DataValidator::with_context(ValidationContext::new().with_fail_fast(true));

        let err = validator.run(&source(), &request).await.unwrap_err();
        assert!(matches!(err, ReaderError::NullConstraintViolation { .. }));
    }

    #[tokio::test]
    async fn test_schema_only_skips_data_checks() {
        let request = request()
            .column("id", "bigint")
            .column("name", "string")
            .non_nullable("name")
            .unique("id")
            .build();
        let validator =
            DataValidator::with_context(ValidationContext::new().with_schema_only(true));

        let report = validator.run(&source(), &request).await.unwrap().report;
        assert!(report.passed);
        assert_eq!(report.stats.checks_run, 1);
        assert_eq!(report.stats.rows, None);
        assert_eq!(report.warnings.len(), 2);
    }

    #[tokio::test]
    async fn test_per_column_mode_from_request() {
        let frame = MemoryFrame::new([("a", "string"), ("b", "int")]);
        let source = MemorySource::new().with_table("mem://swapped", frame);
        let request = ReadRequestBuilder::new("mem://swapped", DataFormat::Csv)
            .column("a", "int")
            .column("b", "string")
            .type_comparison(TypeComparison::PerColumn)
            .build();

        let report = DataValidator::new().run(&source, &request).await.unwrap().report;
        assert!(!report.passed);
        assert!(report.errors[0].contains("data types"));
    }

    #[tokio::test]
    async fn test_engine_errors_propagate() {
        let request = request().non_nullable("missing").build();
        let err = DataValidator::new().run(&source(), &request).await.unwrap_err();
        assert!(matches!(err, ReaderError::ColumnNotFound(_)));
    }
}
