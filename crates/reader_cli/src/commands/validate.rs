use anyhow::{Context, Result, anyhow};
use reader_core::{Frame, ReaderError, SchemaSpec, TypeComparison};
use reader_datafusion::{DataFusionFrame, DataFusionSource};
use reader_validator::{
    SchemaValidator, read, read_with_non_nullable_columns, read_with_unique_column_values,
};
use tracing::info;

use crate::{SourceArgs, commands::read_options, output};

/// Checks the dataset's columns and types against `name:type` columns.
pub async fn schema(args: &SourceArgs, columns: &[String], per_column: bool) -> Result<()> {
    let spec = parse_schema(columns)?;
    let comparison = if per_column {
        TypeComparison::PerColumn
    } else {
        TypeComparison::Multiset
    };
    info!(
        "Checking schema of {} ({} columns, {:?} comparison)",
        args.location,
        spec.len(),
        comparison
    );

    let source = DataFusionSource::new();
    let frame = read(&source, &args.location, &args.format, &read_options(args))
        .await
        .with_context(|| format!("Failed to read {}", args.location))?;

    let result = SchemaValidator::new()
        .with_type_comparison(comparison)
        .validate(&spec, &frame.dtypes())
        .map(|_| frame);

    finish(result, "Schema matches").await
}

/// Checks that none of `columns` contain nulls.
pub async fn not_null(args: &SourceArgs, columns: &[String]) -> Result<()> {
    info!("Checking {} for nulls in {:?}", args.location, columns);

    let source = DataFusionSource::new();
    let result = read_with_non_nullable_columns(
        &source,
        &args.location,
        &args.format,
        columns,
        &read_options(args),
    )
    .await;

    finish(result, "No nulls found").await
}

/// Checks that the combination of `columns` is unique.
pub async fn unique(args: &SourceArgs, columns: &[String]) -> Result<()> {
    info!("Checking {} for duplicates on {:?}", args.location, columns);

    let source = DataFusionSource::new();
    let result = read_with_unique_column_values(
        &source,
        &args.location,
        &args.format,
        columns,
        &read_options(args),
    )
    .await;

    finish(result, "No duplicates found").await
}

fn parse_schema(columns: &[String]) -> Result<SchemaSpec> {
    let pairs = columns
        .iter()
        .map(|c| {
            c.split_once(':')
                .map(|(name, type_name)| [name.trim(), type_name.trim()])
                .ok_or_else(|| anyhow!("Expected column as name:type, got '{}'", c))
        })
        .collect::<Result<Vec<_>>>()?;

    SchemaSpec::try_from_entries(pairs).context("Invalid schema")
}

/// Reports the outcome of a check; a data failure exits with status 1.
async fn finish(result: reader_core::Result<DataFusionFrame>, success: &str) -> Result<()> {
    match result {
        Ok(frame) => {
            let rows = frame.count().await.context("Failed to count rows")?;
            output::print_success(&format!("{} ({} rows)", success, rows));
            Ok(())
        }
        Err(err) if err.is_data_quality() => {
            output::print_error(&err.to_string());
            std::process::exit(1);
        }
        Err(err @ ReaderError::Precondition(_)) => Err(err).context("Invalid arguments"),
        Err(err) => Err(err).context("Validation failed"),
    }
}
