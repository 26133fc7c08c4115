//! Record Export
//!
//! Serializes card records to CSV or JSON. Output is built fully in memory so
//! a failed run never leaves a partial file behind.

mod tests;

use crate::error::{ExportError, Result};
use crate::tools::clean::clean_row;
use crate::types::{CardRecord, Mode};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Csv,
    Json,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::InvalidInput(format!("unknown format `{other}`"))),
        }
    }
}

/// Default output name: `epack_<mode>_<YYYY-MM-DD>.<ext>`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use epack_export::tools::export::{default_file_name, Format};
/// use epack_export::Mode;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// assert_eq!(default_file_name(Mode::Collection, Format::Csv, date), "epack_collection_2025-01-31.csv");
/// ```
pub fn default_file_name(mode: Mode, format: Format, date: NaiveDate) -> String {
    format!("epack_{}_{}.{}", mode, date.format("%Y-%m-%d"), format.extension())
}

/// CSV text: header row, then one cleaned row per record, `\n` terminated.
///
/// Cells are quoted only when they contain a comma, quote or line break.
pub fn to_csv(records: &[CardRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CardRecord::HEADERS)?;
    for record in records {
        writer.write_record(clean_row(&record.to_row()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidInput(e.to_string()))
}

/// Pretty JSON array of records.
pub fn to_json(records: &[CardRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render records in the given format.
pub fn render(records: &[CardRecord], format: Format) -> Result<String> {
    match format {
        Format::Csv => to_csv(records),
        Format::Json => to_json(records),
    }
}

/// Render and write records in one shot.
///
/// Empty input is refused with [`ExportError::NoCards`] and nothing is written.
pub fn write_records(path: &Path, records: &[CardRecord], format: Format, mode: Mode) -> Result<()> {
    if records.is_empty() {
        return Err(ExportError::NoCards {
            mode: mode.to_string(),
        });
    }
    let body = render(records, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    Ok(())
}
