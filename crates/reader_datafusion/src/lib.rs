//! # Validated Reader - DataFusion engine
//!
//! Backs the validated reader with [Apache DataFusion](https://datafusion.apache.org/):
//! CSV, newline-delimited JSON and Parquet files are loaded into lazy
//! dataframes whose column types are reported with Spark-style names.
//!
//! ## Example
//!
//! ```rust,no_run
//! use reader_core::ReadOptions;
//! use reader_datafusion::DataFusionSource;
//! use reader_validator::read_with_non_nullable_columns;
//!
//! # async fn example() -> reader_core::Result<()> {
//! let source = DataFusionSource::new();
//! let options = ReadOptions::new().with("header", "true");
//!
//! let frame = read_with_non_nullable_columns(
//!     &source,
//!     "data/collateral.csv",
//!     "csv",
//!     &["collateral_id"],
//!     &options,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

mod converter;
mod options;
mod source;

pub use converter::arrow_type_to_dtype;
pub use options::ReaderSettings;
pub use source::{DataFusionFrame, DataFusionReader, DataFusionSource};
