//! The loader every validated read starts from.

use reader_core::{DataSource, Frame, FrameReader, ReadOptions, Result};
use tracing::{debug, info};

/// Reads the dataset stored at `location` through the given data source.
///
/// A reader is created for `format` and configured with every option in
/// order before the dataset is loaded. The dataset is returned as loaded.
///
/// # Example
///
/// ```rust
/// use reader_core::ReadOptions;
/// use reader_validator::{MemoryFrame, MemorySource, read};
///
/// let source = MemorySource::new().with_table("mem://t", MemoryFrame::new([("id", "bigint")]));
/// let options = ReadOptions::new().with("mergeSchema", "true");
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let frame = rt.block_on(read(&source, "mem://t", "delta", &options)).unwrap();
/// assert!(frame.is_empty());
/// ```
pub async fn read<S: DataSource>(
    source: &S,
    location: &str,
    format: &str,
    options: &ReadOptions,
) -> Result<S::Frame> {
    info!("Reading {} data from {}", format, location);

    let mut reader = source.reader(format)?;
    for (key, value) in options.iter() {
        debug!("Reader option {} = {}", key, value);
        reader = reader.option(key, value);
    }

    let frame = reader.load(location).await?;
    debug!("Loaded {} column(s) from {}", frame.dtypes().len(), location);

    Ok(frame)
}
