//! Table region: a rectangular block of cells with row 0 as the header.
//!
//! Rows are normalized to a uniform column count at construction, so the
//! rest of the engine never observes jagged rows.

use crate::cell::CellValue;

#[derive(Debug, Clone, Default)]
pub struct TableRegion {
    rows: Vec<Vec<CellValue>>,
    columns: usize,
}

impl TableRegion {
    /// Build a region whose width is the widest supplied row. Short rows
    /// are right-padded with `Empty`.
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self::with_columns(rows, columns)
    }

    /// Build a region with an explicit width. Short rows are right-padded
    /// with `Empty`, long rows truncated.
    pub fn with_columns(mut rows: Vec<Vec<CellValue>>, columns: usize) -> Self {
        for row in &mut rows {
            row.resize(columns, CellValue::Empty);
        }
        Self { rows, columns }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Number of data rows (everything below the header).
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// The header row, empty slice when the region has no rows.
    pub fn header(&self) -> &[CellValue] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Data rows (row 1..N), empty when the region is header-only.
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        if self.rows.len() > 1 {
            &self.rows[1..]
        } else {
            &[]
        }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Cell lookup over the whole region (header included). Out-of-range
    /// coordinates read as absent.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Header text for a column: the stringified row-0 cell, or a
    /// synthesized spreadsheet-style label when blank.
    pub fn header_text(&self, col: usize) -> String {
        let text = self
            .header()
            .get(col)
            .map(CellValue::canonical_string)
            .unwrap_or_default();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            column_label(col)
        } else {
            trimmed.to_string()
        }
    }
}

/// Convert a 0-based column index to a spreadsheet-style letter label.
pub fn column_label(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}
