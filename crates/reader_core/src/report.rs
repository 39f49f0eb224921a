//! Validation context and report types.
//!
//! A request run produces a `ValidationReport` recording the outcome of each
//! configured check, shaped by the `ValidationContext` it ran under.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Options for running a read request.
#[derive(Debug, Default, Clone)]
pub struct ValidationContext {
    /// Stop at the first failed check and return it as an error
    pub fail_fast: bool,

    /// Check the schema only; skip the passes over the data
    pub schema_only: bool,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets fail-fast mode.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets schema-only mode.
    pub fn with_schema_only(mut self, schema_only: bool) -> Self {
        self.schema_only = schema_only;
        self
    }
}

/// The checks a read request can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Column names and types
    Schema,
    /// No nulls in the listed columns
    NonNullable,
    /// Unique value combinations
    Unique,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckKind::Schema => "schema",
            CheckKind::NonNullable => "non-nullable",
            CheckKind::Unique => "unique",
        })
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// Which check ran
    pub check: CheckKind,

    /// Whether it passed
    pub passed: bool,

    /// Failure message, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Report of a request run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether every check passed
    pub passed: bool,

    /// Failure messages, in check order
    pub errors: Vec<String>,

    /// Non-fatal notes (skipped checks)
    pub warnings: Vec<String>,

    /// Per-check outcomes
    pub checks: Vec<CheckOutcome>,

    /// Run statistics
    pub stats: ValidationStats,
}

/// Statistics about a request run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationStats {
    /// Number of columns in the loaded dataset
    pub columns: usize,

    /// Number of rows, when a data pass counted them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,

    /// Number of checks that ran
    pub checks_run: usize,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Run duration in milliseconds
    pub duration_ms: u64,
}

impl Default for ValidationStats {
    fn default() -> Self {
        Self {
            columns: 0,
            rows: None,
            checks_run: 0,
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }
}

impl ValidationReport {
    /// Creates an empty, passing report.
    pub fn success() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            checks: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Records a passed check.
    pub fn record_pass(&mut self, check: CheckKind) {
        self.checks.push(CheckOutcome {
            check,
            passed: true,
            message: None,
        });
        self.stats.checks_run += 1;
    }

    /// Records a failed check.
    pub fn record_failure(&mut self, check: CheckKind, message: impl Into<String>) {
        let message = message.into();
        self.errors.push(message.clone());
        self.checks.push(CheckOutcome {
            check,
            passed: false,
            message: Some(message),
        });
        self.stats.checks_run += 1;
        self.passed = false;
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns the outcome of a check, if it ran.
    pub fn outcome(&self, check: CheckKind) -> Option<&CheckOutcome> {
        self.checks.iter().find(|o| o.check == check)
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::success()
    }
}
