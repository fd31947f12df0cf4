//! Row sources: decode question files into loosely typed rows.

use std::io::Read;
use std::path::Path;

use quiz_core::model::RawRow;

use crate::error::LoadError;

/// Supported question file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    /// Comma separated, header row first.
    Csv,
    /// A JSON array of objects.
    Json,
}

impl RowFormat {
    /// Picks the format from a file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Decodes CSV where the header row names every field.
///
/// Blank lines are skipped. Records shorter than the header simply lack the
/// trailing fields; extra trailing cells are dropped.
///
/// # Errors
///
/// Returns `LoadError::Csv` for malformed CSV.
pub fn rows_from_csv<R: Read>(reader: R) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_owned(), value.to_owned()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Decodes a JSON array of objects.
///
/// # Errors
///
/// Returns `LoadError::Json` if the text is not an array of objects.
pub fn rows_from_json(text: &str) -> Result<Vec<RawRow>, LoadError> {
    Ok(serde_json::from_str(text)?)
}

/// Reads and decodes a question file, choosing the decoder by extension.
///
/// # Errors
///
/// Returns `LoadError::UnsupportedFormat` for unknown extensions, and I/O or
/// decode errors otherwise.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let format = RowFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))?;
    let text = std::fs::read_to_string(path)?;
    match format {
        RowFormat::Csv => rows_from_csv(text.as_bytes()),
        RowFormat::Json => rows_from_json(&text),
    }
}
