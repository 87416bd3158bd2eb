//! CSV sheet decoding.
//!
//! Produces the ordered header list and the raw data rows the column
//! classifier and derivation engine work on. Decoding is lenient: ragged rows
//! are accepted and cell text is kept verbatim.

use crate::error::CoreError;

/// UTF-8 byte order mark some spreadsheet exports prepend.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One data row, addressed by header position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Raw text of the cell at `index`, or `None` past the end of a short row.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A decoded sheet: header list plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Sheet {
    /// Decode CSV bytes. The first record is the header row.
    ///
    /// Header cells are trimmed; data cells are kept verbatim. Rows may be
    /// shorter or longer than the header row.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| CoreError::Validation(format!("Unreadable CSV header row: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                // Data rows start on line 2.
                CoreError::Validation(format!("Unreadable CSV row {}: {e}", idx + 2))
            })?;
            rows.push(RawRow::new(record.iter().map(str::to_string).collect()));
        }

        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
