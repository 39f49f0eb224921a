pub mod check;
pub mod read;
pub mod run;
pub mod validate;

use reader_core::ReadOptions;

use crate::SourceArgs;

/// Parses a `key=value` reader option.
pub fn parse_option(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

/// Collects the reader options of the command line, in order.
pub fn read_options(source: &SourceArgs) -> ReadOptions {
    source.options.iter().cloned().collect()
}
