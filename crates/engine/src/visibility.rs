//! Row visibility: AND-combination of active filter fields into a boolean
//! vector over data rows, plus run-length compression for hosts that apply
//! visibility in range operations.
//!
//! The vector covers data rows only — the header row is always visible by
//! construction, not by an entry here.

use serde::Serialize;

use crate::filter::FilterModel;
use crate::region::TableRegion;

#[derive(Debug, Clone, Serialize)]
pub struct VisibilityReport {
    /// One flag per data row, index 0 = first data row.
    pub visible: Vec<bool>,
    pub visible_count: usize,
    pub hidden_count: usize,
}

impl VisibilityReport {
    /// Indices (into the data rows) of the visible rows.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| if v { Some(i) } else { None })
            .collect()
    }
}

/// A maximal contiguous run of same-visibility data rows, 1-based from the
/// first data row (the host's row-range contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityRun {
    pub start_row: usize,
    pub end_row: usize,
    pub visible: bool,
}

/// Evaluate every data row against the active filter fields.
///
/// Fields combine with AND; evaluation short-circuits on the first field a
/// row fails. A field whose selection is empty matches nothing, so it hides
/// every row — intentional, not an error. With no active field all rows
/// are visible.
pub fn evaluate(region: &TableRegion, model: &FilterModel) -> VisibilityReport {
    let active: Vec<_> = model.active_fields().collect();

    let mut visible = Vec::with_capacity(region.data_row_count());
    for row in region.data_rows() {
        let mut show = true;
        for field in &active {
            // Out-of-range columns read as empty, which no selection contains
            let text = row
                .get(field.column)
                .map(|c| c.canonical_string())
                .unwrap_or_default();
            if !field.selected.contains(&text) {
                show = false;
                break;
            }
        }
        visible.push(show);
    }

    let visible_count = visible.iter().filter(|&&v| v).count();
    VisibilityReport {
        hidden_count: visible.len() - visible_count,
        visible_count,
        visible,
    }
}

/// Compress a visibility vector into maximal same-visibility runs.
pub fn compress_runs(visible: &[bool]) -> Vec<VisibilityRun> {
    let mut runs = Vec::new();
    let Some(&first) = visible.first() else {
        return runs;
    };

    let mut start = 1usize; // 1-based data-row numbering
    let mut current = first;
    for (i, &v) in visible.iter().enumerate().skip(1) {
        if v != current {
            runs.push(VisibilityRun {
                start_row: start,
                end_row: i,
                visible: current,
            });
            start = i + 1;
            current = v;
        }
    }
    runs.push(VisibilityRun {
        start_row: start,
        end_row: visible.len(),
        visible: current,
    });
    runs
}

/// Expand runs back into the boolean vector they were built from.
pub fn expand_runs(runs: &[VisibilityRun]) -> Vec<bool> {
    let mut visible = Vec::new();
    for run in runs {
        for _ in run.start_row..=run.end_row {
            visible.push(run.visible);
        }
    }
    visible
}
