use anyhow::{Context, Result};
use reader_core::Frame;
use reader_datafusion::DataFusionSource;
use reader_validator::read;
use tracing::info;

use crate::{SourceArgs, commands::read_options, output};

pub async fn execute(args: &SourceArgs) -> Result<()> {
    info!("Reading {} data from {}", args.format, args.location);

    let source = DataFusionSource::new();
    let frame = read(&source, &args.location, &args.format, &read_options(args))
        .await
        .with_context(|| format!("Failed to read {}", args.location))?;

    let rows = frame
        .count()
        .await
        .context("Failed to count rows")?;

    output::print_dtypes(&frame.dtypes(), rows);
    Ok(())
}
