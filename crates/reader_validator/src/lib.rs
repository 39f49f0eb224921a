//! # Validated Reader
//!
//! Loads a tabular dataset through a dataframe engine and checks it. This
//! crate provides:
//!
//! - The loader (`read`) every validated read starts from
//! - Schema validation (column names and types)
//! - Null constraint validation
//! - Uniqueness validation over column combinations
//! - A request runner producing validation reports
//! - An in-memory engine implementing the engine traits
//!
//! ## Example
//!
//! ```rust
//! use reader_core::{ReadOptions, SchemaSpec};
//! use reader_validator::{MemoryFrame, MemorySource, read_with_type_validation};
//!
//! let frame = MemoryFrame::new([("ID", "bigint"), ("name", "string")]);
//! let source = MemorySource::new().with_table("mem://people", frame);
//! let schema = SchemaSpec::try_from_entries([["name", "string"], ["id", "bigint"]]).unwrap();
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let result = rt.block_on(read_with_type_validation(
//!     &source,
//!     "mem://people",
//!     "parquet",
//!     &schema,
//!     &ReadOptions::default(),
//! ));
//!
//! match result {
//!     Ok(frame) => println!("Loaded {} rows", frame.len()),
//!     Err(err) => println!("Validation failed: {}", err),
//! }
//! ```

mod dataset;
mod engine;
mod nulls;
mod pattern;
mod reader;
mod schema;
mod uniqueness;

pub use dataset::*;
pub use engine::*;
pub use nulls::*;
pub use pattern::*;
pub use reader::*;
pub use schema::*;
pub use uniqueness::*;
