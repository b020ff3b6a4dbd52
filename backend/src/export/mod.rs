//! Serialize engine output as CSV or JSON.

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ExportResult;

/// Output format for record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown format '{}' (expected json or csv)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

/// Records as CSV, one header row from the camelCase field names.
///
/// Missing numbers become empty cells.
pub fn to_csv<T: Serialize>(records: &[&T]) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Any serializable value as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Records in the requested format.
pub fn render<T: Serialize>(records: &[&T], format: OutputFormat) -> ExportResult<String> {
    match format {
        OutputFormat::Json => to_json(records),
        OutputFormat::Csv => to_csv(records),
    }
}

/// Write to a file, or to stdout when no path is given.
pub fn write_output(content: &str, path: Option<&Path>) -> ExportResult<()> {
    match path {
        Some(p) => fs::write(p, content)?,
        None => println!("{}", content),
    }
    Ok(())
}
