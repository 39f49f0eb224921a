//! In-memory dataframe engine.
//!
//! `MemorySource` serves `MemoryFrame`s registered under a location. It
//! accepts every format identifier and keeps a log of the loads it served,
//! including the reader options applied to each one.

use reader_core::{
    DataSource, Dtype, Frame, FrameReader, ReadOptions, ReaderError, Result, resolve_column,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// A value in an in-memory dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Timestamp value (ISO 8601 string)
    Timestamp(String),
    /// Map/struct value
    Map(HashMap<String, DataValue>),
    /// List/array value
    List(Vec<DataValue>),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Attempts to get this value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Key used to place this value in a group. Nulls group together.
    fn group_key(&self) -> String {
        match self {
            DataValue::Null => "null".to_string(),
            DataValue::String(s) => format!("s:{}", s),
            DataValue::Int(i) => format!("i:{}", i),
            DataValue::Float(f) => format!("f:{}", f),
            DataValue::Bool(b) => format!("b:{}", b),
            DataValue::Timestamp(ts) => format!("t:{}", ts),
            DataValue::Map(map) => {
                let mut entries: Vec<_> = map
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v.group_key()))
                    .collect();
                entries.sort();
                format!("m:{{{}}}", entries.join(","))
            }
            DataValue::List(items) => {
                let items: Vec<_> = items.iter().map(DataValue::group_key).collect();
                format!("l:[{}]", items.join(","))
            }
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// A single row of data. A missing column reads as null.
pub type DataRow = HashMap<String, DataValue>;

/// An in-memory dataset: declared dtypes plus rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryFrame {
    dtypes: Vec<Dtype>,
    rows: Vec<DataRow>,
}

impl MemoryFrame {
    /// Creates an empty dataset with the given `(column, type)` pairs.
    pub fn new<I, C, T>(dtypes: I) -> Self
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: Into<String>,
    {
        Self {
            dtypes: dtypes
                .into_iter()
                .map(|(c, t)| (c.into(), t.into()))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a dataset from dtypes and rows.
    pub fn from_rows(dtypes: Vec<Dtype>, rows: Vec<DataRow>) -> Self {
        Self { dtypes, rows }
    }

    /// Appends a row given positionally, in dtype order.
    ///
    /// Extra values are ignored; missing trailing values read as null.
    pub fn with_values(mut self, values: Vec<DataValue>) -> Self {
        let row = self
            .dtypes
            .iter()
            .zip(values)
            .map(|((column, _), value)| (column.clone(), value))
            .collect();
        self.rows.push(row);
        self
    }

    /// Adds a row to the dataset.
    pub fn add_row(&mut self, row: DataRow) {
        self.rows.push(row);
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.iter()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn resolve(&self, name: &str) -> Result<String> {
        let columns = self.columns();
        resolve_column(&columns, name)
            .map(str::to_string)
            .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))
    }
}

fn value_of<'a>(row: &'a DataRow, column: &str) -> &'a DataValue {
    row.get(column).unwrap_or(&DataValue::Null)
}

impl Frame for MemoryFrame {
    fn dtypes(&self) -> Vec<Dtype> {
        self.dtypes.clone()
    }

    fn filter_nulls(&self, column: &str) -> Result<Self> {
        let column = self.resolve(column)?;
        Ok(Self {
            dtypes: self.dtypes.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| value_of(row, &column).is_null())
                .cloned()
                .collect(),
        })
    }

    fn duplicate_groups(&self, columns: &[String]) -> Result<Self> {
        let columns = columns
            .iter()
            .map(|c| self.resolve(c))
            .collect::<Result<Vec<_>>>()?;

        // Groups in first-seen order: (first row of the group, row count)
        let mut index: HashMap<Vec<String>, usize> = HashMap::new();
        let mut groups: Vec<(DataRow, i64)> = Vec::new();

        for row in &self.rows {
            let key: Vec<String> = columns
                .iter()
                .map(|c| value_of(row, c).group_key())
                .collect();
            match index.get(&key) {
                Some(&idx) => groups[idx].1 += 1,
                None => {
                    index.insert(key, groups.len());
                    let projected = columns
                        .iter()
                        .map(|c| (c.clone(), value_of(row, c).clone()))
                        .collect();
                    groups.push((projected, 1));
                }
            }
        }

        let mut dtypes: Vec<Dtype> = columns
            .iter()
            .map(|c| {
                let type_name = self
                    .dtypes
                    .iter()
                    .find(|(name, _)| name == c)
                    .map(|(_, t)| t.clone())
                    .unwrap_or_default();
                (c.clone(), type_name)
            })
            .collect();
        dtypes.push(("count".to_string(), "bigint".to_string()));

        let rows = groups
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(mut row, count)| {
                row.insert("count".to_string(), DataValue::Int(count));
                row
            })
            .collect();

        Ok(Self { dtypes, rows })
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rows.len())
    }
}

/// One load served by a `MemorySource`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRecord {
    /// Format identifier the reader was created with
    pub format: String,
    /// Location that was loaded
    pub location: String,
    /// Options applied to the reader, in call order
    pub options: ReadOptions,
}

/// An in-memory engine session serving registered datasets.
///
/// # Example
///
/// ```rust
/// use reader_core::{DataSource, Frame, FrameReader};
/// use reader_validator::{MemoryFrame, MemorySource};
///
/// let frame = MemoryFrame::new([("id", "bigint")]).with_values(vec![1i64.into()]);
/// let source = MemorySource::new().with_table("mem://users", frame);
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let loaded = rt
///     .block_on(source.reader("csv").unwrap().option("header", "true").load("mem://users"))
///     .unwrap();
///
/// assert_eq!(rt.block_on(loaded.count()).unwrap(), 1);
/// assert_eq!(source.loads()[0].options.get("header"), Some("true"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: Arc<HashMap<String, MemoryFrame>>,
    loads: Arc<Mutex<Vec<LoadRecord>>>,
}

impl MemorySource {
    /// Creates a source with no datasets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dataset under a location.
    pub fn with_table(mut self, location: impl Into<String>, frame: MemoryFrame) -> Self {
        Arc::make_mut(&mut self.tables).insert(location.into(), frame);
        self
    }

    /// Returns every load served so far, oldest first.
    pub fn loads(&self) -> Vec<LoadRecord> {
        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DataSource for MemorySource {
    type Reader = MemoryReader;
    type Frame = MemoryFrame;

    fn reader(&self, format: &str) -> Result<MemoryReader> {
        if format.trim().is_empty() {
            return Err(ReaderError::UnsupportedFormat(format.to_string()));
        }
        Ok(MemoryReader {
            tables: Arc::clone(&self.tables),
            loads: Arc::clone(&self.loads),
            format: format.to_string(),
            options: ReadOptions::new(),
        })
    }
}

/// Reader produced by `MemorySource`.
#[derive(Debug)]
pub struct MemoryReader {
    tables: Arc<HashMap<String, MemoryFrame>>,
    loads: Arc<Mutex<Vec<LoadRecord>>>,
    format: String,
    options: ReadOptions,
}

impl FrameReader for MemoryReader {
    type Frame = MemoryFrame;

    fn option(mut self, key: &str, value: &str) -> Self {
        self.options.push(key, value);
        self
    }

    async fn load(self, location: &str) -> Result<MemoryFrame> {
        debug!(
            "Serving in-memory dataset '{}' as {} with {} option(s)",
            location,
            self.format,
            self.options.len()
        );

        self.loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LoadRecord {
                format: self.format,
                location: location.to_string(),
                options: self.options,
            });

        self.tables
            .get(location)
            .cloned()
            .ok_or_else(|| ReaderError::load(location, "no dataset registered at this location"))
    }
}
