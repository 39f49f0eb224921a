use anyhow::{Context, Result};
use reader_core::{ReadRequest, ValidationContext};
use reader_datafusion::DataFusionSource;
use reader_parser::parse_file;
use reader_validator::DataValidator;
use std::path::Path;
use tracing::info;

use crate::output;

pub async fn execute(
    request_path: &str,
    fail_fast: bool,
    schema_only: bool,
    format: &str,
) -> Result<()> {
    info!("Running request: {}", request_path);
    info!("Fail fast: {}", fail_fast);
    info!("Schema only: {}", schema_only);

    let path = Path::new(request_path);
    let mut request = parse_file(path)
        .with_context(|| format!("Failed to parse request file: {}", request_path))?;
    resolve_location(&mut request, path);

    output::print_info(&format!(
        "Request loaded: {} ({} at {})",
        request.display_name(),
        request.format,
        request.location
    ));

    let context = ValidationContext::new()
        .with_fail_fast(fail_fast)
        .with_schema_only(schema_only);

    let source = DataFusionSource::new();
    let validated = match DataValidator::with_context(context)
        .run(&source, &request)
        .await
    {
        Ok(validated) => validated,
        Err(err) if err.is_data_quality() => {
            output::print_error(&err.to_string());
            std::process::exit(1);
        }
        Err(err) => return Err(err).context("Validation failed"),
    };

    output::print_validation_report(&validated.report, format)?;

    if !validated.report.passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Makes a relative local location relative to the request file's directory.
fn resolve_location(request: &mut ReadRequest, request_path: &Path) {
    let location = Path::new(&request.location);
    if request.location.contains("://") || location.is_absolute() {
        return;
    }

    if let Some(dir) = request_path.parent() {
        request.location = dir.join(location).to_string_lossy().into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reader_core::{DataFormat, ReadRequestBuilder};

    #[test]
    fn test_relative_location_follows_request_file() {
        let mut request = ReadRequestBuilder::new("data.csv", DataFormat::Csv).build();
        resolve_location(&mut request, Path::new("requests/collateral.yml"));
        assert_eq!(
            Path::new(&request.location),
            Path::new("requests").join("data.csv")
        );
    }

    #[test]
    fn test_uri_and_absolute_locations_are_kept() {
        let mut request = ReadRequestBuilder::new("s3://lake/data", DataFormat::Parquet).build();
        resolve_location(&mut request, Path::new("requests/trades.toml"));
        assert_eq!(request.location, "s3://lake/data");

        let mut request = ReadRequestBuilder::new("/data/trades", DataFormat::Parquet).build();
        resolve_location(&mut request, Path::new("requests/trades.toml"));
        assert_eq!(request.location, "/data/trades");
    }
}
