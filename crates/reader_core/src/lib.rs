//! # Validated Reader Core
//!
//! Core types and engine traits for the Validated Reader.
//!
//! The validated reader loads a tabular dataset through a dataframe engine and
//! checks its schema, null constraints, or uniqueness constraints. This crate
//! holds the pieces every other crate shares.
//!
//! ## Key Concepts
//!
//! - **DataSource / FrameReader / Frame**: the capability set an engine provides
//! - **ReadOptions**: ordered key/value reader settings
//! - **SchemaSpec**: expected `(column, type)` pairs
//! - **ReadRequest**: a complete, serializable description of a validated read
//!
//! ## Example
//!
//! ```rust
//! use reader_core::{ReadOptions, SchemaSpec};
//!
//! let options = ReadOptions::new().with("header", "true");
//! let schema = SchemaSpec::try_from_entries([["id", "bigint"], ["name", "string"]]).unwrap();
//!
//! assert_eq!(options.get("header"), Some("true"));
//! assert_eq!(schema.expected_types(), vec!["bigint", "string"]);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod report;
pub mod request;

pub use builder::*;
pub use engine::*;
pub use error::*;
pub use report::*;
pub use request::*;
