//! DataFusion implementation of the engine traits.

use crate::{converter::arrow_type_to_dtype, options::ReaderSettings};
use datafusion::{
    error::DataFusionError,
    functions_aggregate::expr_fn::count,
    logical_expr::{Expr, ident, lit},
    prelude::{CsvReadOptions, DataFrame, NdJsonReadOptions, ParquetReadOptions, SessionContext},
};
use reader_core::{
    DataFormat, DataSource, Dtype, Frame, FrameReader, ReadOptions, ReaderError, Result,
    resolve_column,
};
use std::path::Path;
use tracing::debug;

/// Name of the per-group row count produced by `duplicate_groups`.
const COUNT_COLUMN: &str = "count";

/// A DataFusion session used as a data source.
///
/// Supports the `csv`, `json` (newline-delimited) and `parquet` formats.
#[derive(Clone, Default)]
pub struct DataFusionSource {
    ctx: SessionContext,
}

impl DataFusionSource {
    /// Creates a source with a fresh `SessionContext`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing session, keeping its registered tables and settings.
    pub fn with_context(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Returns the underlying session.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }
}

impl DataSource for DataFusionSource {
    type Reader = DataFusionReader;
    type Frame = DataFusionFrame;

    fn reader(&self, format: &str) -> Result<DataFusionReader> {
        let format = DataFormat::from(format.to_string());
        match format {
            DataFormat::Csv | DataFormat::Json | DataFormat::Parquet => Ok(DataFusionReader {
                ctx: self.ctx.clone(),
                format,
                options: ReadOptions::new(),
            }),
            other => Err(ReaderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A reader bound to one format, collecting options until `load`.
pub struct DataFusionReader {
    ctx: SessionContext,
    format: DataFormat,
    options: ReadOptions,
}

impl FrameReader for DataFusionReader {
    type Frame = DataFusionFrame;

    fn option(mut self, key: &str, value: &str) -> Self {
        self.options.push(key, value);
        self
    }

    async fn load(self, location: &str) -> Result<DataFusionFrame> {
        let settings = ReaderSettings::from_options(&self.format, &self.options)?;

        // A missing local path would otherwise list as an empty table
        if is_missing_local_path(location) {
            return Err(ReaderError::load(location, "path does not exist"));
        }
        debug!("Reading {} from '{}' with {:?}", self.format, location, settings);

        let loaded = match self.format {
            DataFormat::Csv => {
                let mut opts = CsvReadOptions::new();
                if let Some(has_header) = settings.has_header {
                    opts = opts.has_header(has_header);
                }
                if let Some(delimiter) = settings.delimiter {
                    opts = opts.delimiter(delimiter);
                }
                if let Some(quote) = settings.quote {
                    opts = opts.quote(quote);
                }
                if let Some(escape) = settings.escape {
                    opts = opts.escape(escape);
                }
                if let Some(comment) = settings.comment {
                    opts = opts.comment(comment);
                }
                if let Some(ext) = settings.file_extension.as_deref() {
                    opts = opts.file_extension(ext);
                }
                if let Some(max) = settings.schema_infer_max_records {
                    opts = opts.schema_infer_max_records(max);
                }
                self.ctx.read_csv(location, opts).await
            }
            DataFormat::Json => {
                let mut opts = NdJsonReadOptions::default();
                if let Some(ext) = settings.file_extension.as_deref() {
                    opts = opts.file_extension(ext);
                }
                if let Some(max) = settings.schema_infer_max_records {
                    opts.schema_infer_max_records = max;
                }
                self.ctx.read_json(location, opts).await
            }
            DataFormat::Parquet => {
                let mut opts = ParquetReadOptions {
                    parquet_pruning: settings.parquet_pruning,
                    skip_metadata: settings.skip_metadata,
                    ..Default::default()
                };
                if let Some(ext) = settings.file_extension.as_deref() {
                    opts.file_extension = ext;
                }
                self.ctx.read_parquet(location, opts).await
            }
            other => return Err(ReaderError::UnsupportedFormat(other.to_string())),
        };

        loaded
            .map(DataFusionFrame::new)
            .map_err(|e| ReaderError::load(location, e.to_string()))
    }
}

/// A lazily evaluated DataFusion dataframe.
#[derive(Clone)]
pub struct DataFusionFrame {
    df: DataFrame,
}

impl DataFusionFrame {
    /// Wraps a DataFusion dataframe.
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Returns the wrapped dataframe.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Unwraps the dataframe.
    pub fn into_inner(self) -> DataFrame {
        self.df
    }

    fn column_expr(&self, columns: &[String], name: &str) -> Result<Expr> {
        resolve_column(columns, name)
            .map(ident)
            .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))
    }
}

impl Frame for DataFusionFrame {
    fn dtypes(&self) -> Vec<Dtype> {
        self.df
            .schema()
            .fields()
            .iter()
            .map(|f| (f.name().clone(), arrow_type_to_dtype(f.data_type())))
            .collect()
    }

    fn filter_nulls(&self, column: &str) -> Result<Self> {
        let expr = self.column_expr(&self.columns(), column)?;
        self.df
            .clone()
            .filter(expr.is_null())
            .map(Self::new)
            .map_err(engine_error)
    }

    fn duplicate_groups(&self, columns: &[String]) -> Result<Self> {
        let available = self.columns();
        let groups = columns
            .iter()
            .map(|c| self.column_expr(&available, c))
            .collect::<Result<Vec<_>>>()?;

        let count_name = count_alias(columns);

        self.df
            .clone()
            .aggregate(groups, vec![count(lit(1)).alias(&count_name)])
            .and_then(|df| df.filter(ident(&count_name).gt(lit(1i64))))
            .map(Self::new)
            .map_err(engine_error)
    }

    async fn count(&self) -> Result<usize> {
        self.df.clone().count().await.map_err(engine_error)
    }
}

/// Returns true for a local location whose non-glob prefix does not exist.
///
/// URI locations are left to DataFusion. For a glob such as `/data/*.csv`
/// only the directory before the first glob character is checked.
fn is_missing_local_path(location: &str) -> bool {
    if location.contains("://") {
        return false;
    }

    let prefix = match location.find(['*', '?', '[']) {
        Some(glob_start) => match location[..glob_start].rfind('/') {
            Some(sep) => &location[..=sep],
            None => ".",
        },
        None => location,
    };

    !Path::new(prefix).exists()
}

/// Name of the group count that no grouped column already uses.
fn count_alias(columns: &[String]) -> String {
    let mut name = COUNT_COLUMN.to_string();
    while columns.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
        name.push('_');
    }
    name
}

fn engine_error(err: DataFusionError) -> ReaderError {
    ReaderError::engine(err.to_string())
}
