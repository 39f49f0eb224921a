//! Integration tests for validated reads.
//!
//! These tests run every read operation end to end against an in-memory
//! collateral dataset, the way a pipeline would call them.

use reader_core::{
    DataFormat, ReadOptions, ReadRequestBuilder, ReaderError, SchemaSpec, ValidationContext,
};
use reader_validator::{
    DataValidator, DataValue, MemoryFrame, MemorySource, read, read_with_non_nullable_columns,
    read_with_regular_expression_columns, read_with_type_validation,
    read_with_unique_column_values,
};

const LOCATION: &str = "abfss://lake/integration_layer/allocated_collateral/";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Creates a realistic allocated-collateral dataset.
fn collateral() -> MemoryFrame {
    MemoryFrame::new([
        ("Collateral_ID", "bigint"),
        ("Counterparty", "string"),
        ("Amount", "double"),
        ("Currency", "string"),
        ("Valuation_Date", "date"),
    ])
    .with_values(vec![
        1001i64.into(),
        "ACME".into(),
        250_000.0.into(),
        "EUR".into(),
        "2024-03-01".into(),
    ])
    .with_values(vec![
        1002i64.into(),
        "Globex".into(),
        125_500.5.into(),
        "USD".into(),
        "2024-03-01".into(),
    ])
    .with_values(vec![
        1003i64.into(),
        "Initech".into(),
        DataValue::Null,
        "EUR".into(),
        "2024-03-02".into(),
    ])
}

fn source() -> MemorySource {
    MemorySource::new().with_table(LOCATION, collateral())
}

fn expected_schema() -> SchemaSpec {
    SchemaSpec::try_from_entries([
        ["valuation_date", "date"],
        ["currency", "string"],
        ["amount", "double"],
        ["counterparty", "string"],
        ["collateral_id", "bigint"],
    ])
    .unwrap()
}

#[tokio::test]
async fn test_delta_read_with_merge_schema() {
    init_tracing();
    let source = source();
    let options = ReadOptions::try_from_entries([["mergeSchema", "True"]]).unwrap();

    let frame = read(&source, LOCATION, "delta", &options).await.unwrap();

    assert_eq!(frame.len(), 3);
    assert_eq!(source.loads()[0].options.get("mergeSchema"), Some("True"));
}

#[test]
fn test_malformed_options_are_rejected_before_reading() {
    let err = ReadOptions::try_from_entries([vec!["k", "v", "extra"]]).unwrap_err();

    assert!(matches!(err, ReaderError::Precondition(_)));
    assert!(
        err.to_string().contains("must contain 2 values"),
        "message should explain the expected shape: {}",
        err
    );
}

#[tokio::test]
async fn test_schema_matches_case_insensitive_permutation() {
    init_tracing();
    let frame = read_with_type_validation(
        &source(),
        LOCATION,
        "delta",
        &expected_schema(),
        &ReadOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(frame.len(), 3);
}

#[tokio::test]
async fn test_schema_missing_column() {
    let schema = SchemaSpec::try_from_entries([
        ["collateral_id", "bigint"],
        ["counterparty", "string"],
        ["amount", "double"],
        ["currency", "string"],
        ["valuation_date", "date"],
        ["haircut", "double"],
    ])
    .unwrap();

    let err = read_with_type_validation(&source(), LOCATION, "delta", &schema, &ReadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ReaderError::SchemaMismatch { .. }));
    assert!(err.to_string().contains("valuation_date"));
}

#[tokio::test]
async fn test_schema_type_difference() {
    let schema = SchemaSpec::try_from_entries([
        ["collateral_id", "string"],
        ["counterparty", "string"],
        ["amount", "double"],
        ["currency", "string"],
        ["valuation_date", "date"],
    ])
    .unwrap();

    let err = read_with_type_validation(&source(), LOCATION, "delta", &schema, &ReadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ReaderError::TypeMismatch { .. }));
    assert!(err.to_string().contains("Collateral_ID"));
}

#[tokio::test]
async fn test_non_nullable_columns() {
    let frame = read_with_non_nullable_columns(
        &source(),
        LOCATION,
        "delta",
        &["collateral_id", "counterparty"],
        &ReadOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(frame.len(), 3);

    let err = read_with_non_nullable_columns(
        &source(),
        LOCATION,
        "delta",
        &["amount", "currency"],
        &ReadOptions::default(),
    )
    .await
    .unwrap_err();
    match err {
        ReaderError::NullConstraintViolation { columns } => assert_eq!(columns, vec!["amount"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unique_column_values() {
    let frame = read_with_unique_column_values(
        &source(),
        LOCATION,
        "delta",
        &["collateral_id"],
        &ReadOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(frame.len(), 3);

    let err = read_with_unique_column_values(
        &source(),
        LOCATION,
        "delta",
        &["valuation_date"],
        &ReadOptions::default(),
    )
    .await
    .unwrap_err();
    match err {
        ReaderError::UniquenessViolation { columns, .. } => {
            assert_eq!(columns, vec!["valuation_date"])
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_pattern_validation_is_not_implemented() {
    let err = read_with_regular_expression_columns(
        &source(),
        LOCATION,
        "delta",
        &[("currency", "^[A-Z]{3}$")],
        &ReadOptions::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReaderError::NotImplemented(_)));
}

#[tokio::test]
async fn test_full_request_report() {
    init_tracing();
    let request = ReadRequestBuilder::new(LOCATION, DataFormat::Delta)
        .name("allocated_collateral")
        .option("mergeSchema", "True")
        .column("collateral_id", "bigint")
        .column("counterparty", "string")
        .column("amount", "double")
        .column("currency", "string")
        .column("valuation_date", "date")
        .non_nullable("collateral_id")
        .non_nullable("amount")
        .unique("collateral_id")
        .build();

    let result = DataValidator::with_context(ValidationContext::new())
        .run(&source(), &request)
        .await
        .unwrap();

    let report = result.report;
    assert!(!report.passed);
    assert_eq!(report.stats.checks_run, 3);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("amount"));
    assert_eq!(report.stats.rows, Some(3));
}
