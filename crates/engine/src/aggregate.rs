//! Amount aggregation over a chosen row set.

use serde::Serialize;

use crate::amount::parse_amount;
use crate::cell::CellValue;
use crate::region::TableRegion;

/// How one amount cell resolved. Empty and invalid cells both contribute 0
/// to the total; the distinction is diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellOutcome {
    Parsed,
    Empty,
    Invalid,
}

/// Per-row trace entry. The identifier is carried for audit output only;
/// it never affects the numeric result.
#[derive(Debug, Clone, Serialize)]
pub struct AmountEntry {
    pub data_row: usize,
    pub identifier: String,
    pub amount: f64,
    pub outcome: CellOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct AmountSummary {
    pub total: f64,
    pub parsed: usize,
    pub empty: usize,
    pub invalid: usize,
    pub entries: Vec<AmountEntry>,
}

/// Sum the normalized amount column over the given data-row indices.
///
/// Out-of-range rows or columns contribute nothing; malformed cells resolve
/// to 0 — the sum itself can never fail.
pub fn sum_amounts(
    region: &TableRegion,
    id_column: usize,
    amount_column: usize,
    data_rows: &[usize],
) -> AmountSummary {
    let rows = region.data_rows();
    let mut total = 0.0;
    let mut parsed = 0;
    let mut empty = 0;
    let mut invalid = 0;
    let mut entries = Vec::with_capacity(data_rows.len());

    for &index in data_rows {
        let Some(row) = rows.get(index) else {
            continue;
        };
        let identifier = row
            .get(id_column)
            .map(CellValue::canonical_string)
            .unwrap_or_default();
        let cell = row.get(amount_column).unwrap_or(&CellValue::Empty);

        let (amount, outcome) = if cell.is_blank() {
            (0.0, CellOutcome::Empty)
        } else {
            match parse_amount(cell) {
                Some(n) => (n, CellOutcome::Parsed),
                None => (0.0, CellOutcome::Invalid),
            }
        };

        match outcome {
            CellOutcome::Parsed => parsed += 1,
            CellOutcome::Empty => empty += 1,
            CellOutcome::Invalid => invalid += 1,
        }
        total += amount;
        entries.push(AmountEntry {
            data_row: index,
            identifier,
            amount,
            outcome,
        });
    }

    AmountSummary {
        total,
        parsed,
        empty,
        invalid,
        entries,
    }
}
