//! Merge consolidation: detect vertically merged (or merge-emulating) cell
//! spans in one column and plan their collapse into single logical rows.
//!
//! Detection is an ordered pair of strategies; the first one that finds
//! anything wins wholesale. They are never combined — a column with some
//! explicit merge metadata never gets pattern inference on top.

use serde::Serialize;

use crate::cell::CellValue;

/// A contiguous row span representing one logical record in the scanned
/// column. Inclusive, 0-based over the supplied rows; `end_row > start_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeGroup {
    pub column: usize,
    pub start_row: usize,
    pub end_row: usize,
}

/// Host-supplied merged-cell metadata: a rectangle anchored at
/// (`row`, `column`) spanning `row_span` x `col_span` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedArea {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub col_span: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStrategy {
    /// Explicit merged-cell metadata from the host.
    ExplicitAreas,
    /// Inferred from a non-empty anchor cell followed by empty cells.
    ValuePattern,
}

/// Outcome of a detection pass. `strategy` is `None` when neither strategy
/// found a group — a neutral result, not an error.
#[derive(Debug, Clone)]
pub struct MergeScan {
    pub strategy: Option<DetectionStrategy>,
    pub groups: Vec<MergeGroup>,
}

/// Try explicit metadata first, fall back to value-pattern inference.
pub fn detect_groups(
    column: usize,
    rows: &[Vec<CellValue>],
    areas: &[MergedArea],
) -> MergeScan {
    let groups = detect_from_areas(column, areas);
    if !groups.is_empty() {
        return MergeScan {
            strategy: Some(DetectionStrategy::ExplicitAreas),
            groups,
        };
    }

    let groups = detect_from_pattern(column, rows);
    let strategy = if groups.is_empty() {
        None
    } else {
        Some(DetectionStrategy::ValuePattern)
    };
    MergeScan { strategy, groups }
}

/// Every metadata area covering the column with a row span above 1 is a
/// group.
pub fn detect_from_areas(column: usize, areas: &[MergedArea]) -> Vec<MergeGroup> {
    let mut groups: Vec<MergeGroup> = areas
        .iter()
        .filter(|a| {
            a.row_span > 1 && a.column <= column && column < a.column + a.col_span.max(1)
        })
        .map(|a| MergeGroup {
            column,
            start_row: a.row,
            end_row: a.row + a.row_span - 1,
        })
        .collect();
    groups.sort_by_key(|g| g.start_row);
    groups
}

/// Infer groups from the column's values: a non-empty anchor cell followed
/// by one or more empty cells reads like a merged span. Empty runs with no
/// anchor are missing data and are left alone.
pub fn detect_from_pattern(column: usize, rows: &[Vec<CellValue>]) -> Vec<MergeGroup> {
    let mut groups = Vec::new();
    let mut row = 0;
    while row < rows.len() {
        if cell_is_blank(rows, row, column) {
            row += 1;
            continue;
        }
        let mut end = row;
        while end + 1 < rows.len() && cell_is_blank(rows, end + 1, column) {
            end += 1;
        }
        if end > row {
            groups.push(MergeGroup {
                column,
                start_row: row,
                end_row: end,
            });
        }
        row = end + 1;
    }
    groups
}

fn cell_is_blank(rows: &[Vec<CellValue>], row: usize, column: usize) -> bool {
    rows[row].get(column).map_or(true, CellValue::is_blank)
}

/// One group's rewrite: the consolidated base-row values plus the rows that
/// become redundant once the base is rewritten.
#[derive(Debug, Clone)]
pub struct GroupRewrite {
    pub group: MergeGroup,
    /// The base row's values with later rows' divergent values overlaid.
    pub values: Vec<CellValue>,
    /// Redundant rows, descending so deletion never shifts a pending index.
    pub delete_rows: Vec<usize>,
}

/// Rewrites ordered by descending `start_row`; applying them top of the
/// list first keeps every later group's indices valid.
#[derive(Debug, Clone, Default)]
pub struct ConsolidationPlan {
    pub rewrites: Vec<GroupRewrite>,
}

/// Build the rewrite plan for a set of detected groups.
///
/// Per group: the first row's values are the base. Each later row's trimmed
/// non-empty cell either replaces an empty base cell outright, or appends
/// with a line break when it differs from the base's current value.
/// Identical values are never duplicated.
pub fn consolidate(rows: &[Vec<CellValue>], groups: &[MergeGroup]) -> ConsolidationPlan {
    let mut ordered: Vec<MergeGroup> = groups
        .iter()
        .copied()
        .filter(|g| g.end_row > g.start_row && g.end_row < rows.len())
        .collect();
    ordered.sort_by(|a, b| b.start_row.cmp(&a.start_row));

    let rewrites = ordered
        .into_iter()
        .map(|group| {
            let mut values = rows[group.start_row].clone();

            for row in group.start_row + 1..=group.end_row {
                for col in 0..values.len() {
                    let Some(incoming_cell) = rows[row].get(col) else {
                        continue;
                    };
                    let incoming = incoming_cell.canonical_string();
                    let incoming = incoming.trim();
                    if incoming.is_empty() {
                        continue;
                    }

                    let current = values[col].canonical_string();
                    let current = current.trim().to_string();
                    if current.is_empty() {
                        values[col] = incoming_cell.clone();
                    } else if incoming != current {
                        values[col] = CellValue::Text(format!("{current}\n{incoming}"));
                    }
                }
            }

            let delete_rows = (group.start_row + 1..=group.end_row).rev().collect();
            GroupRewrite {
                group,
                values,
                delete_rows,
            }
        })
        .collect();

    ConsolidationPlan { rewrites }
}

/// Apply a plan in place: rewrite each base row, then drop the redundant
/// rows. The plan's descending order makes the deletions index-stable.
pub fn apply_plan(rows: &mut Vec<Vec<CellValue>>, plan: &ConsolidationPlan) {
    for rewrite in &plan.rewrites {
        rows[rewrite.group.start_row] = rewrite.values.clone();
        for &row in &rewrite.delete_rows {
            rows.remove(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn name_rows() -> Vec<Vec<CellValue>> {
        vec![
            vec![text("Smith"), text("A")],
            vec![CellValue::Empty, text("")],
            vec![CellValue::Empty, text("A")],
            vec![text("Jones"), text("B")],
            vec![CellValue::Empty, text("C")],
        ]
    }

    #[test]
    fn pattern_detection_groups_anchor_plus_trailing_empties() {
        let groups = detect_from_pattern(0, &name_rows());
        assert_eq!(
            groups,
            vec![
                MergeGroup { column: 0, start_row: 0, end_row: 2 },
                MergeGroup { column: 0, start_row: 3, end_row: 4 },
            ]
        );
    }

    #[test]
    fn leading_empties_are_missing_data_not_a_group() {
        let rows = vec![
            vec![CellValue::Empty],
            vec![CellValue::Empty],
            vec![text("Smith")],
            vec![text("Jones")],
        ];
        assert!(detect_from_pattern(0, &rows).is_empty());
    }

    #[test]
    fn area_detection_filters_to_the_target_column() {
        let areas = [
            MergedArea { row: 0, column: 0, row_span: 3, col_span: 1 },
            MergedArea { row: 1, column: 2, row_span: 2, col_span: 1 },
            MergedArea { row: 4, column: 0, row_span: 1, col_span: 2 }, // row_span 1: not a group
        ];
        let groups = detect_from_areas(0, &areas);
        assert_eq!(
            groups,
            vec![MergeGroup { column: 0, start_row: 0, end_row: 2 }]
        );
    }

    #[test]
    fn explicit_areas_win_wholesale_over_pattern() {
        let rows = name_rows();
        let areas = [MergedArea { row: 3, column: 0, row_span: 2, col_span: 1 }];

        // Metadata present: pattern gaps at rows 0-2 are left untouched
        let scan = detect_groups(0, &rows, &areas);
        assert_eq!(scan.strategy, Some(DetectionStrategy::ExplicitAreas));
        assert_eq!(scan.groups.len(), 1);
        assert_eq!(scan.groups[0].start_row, 3);

        // No metadata: fall back to the pattern
        let scan = detect_groups(0, &rows, &[]);
        assert_eq!(scan.strategy, Some(DetectionStrategy::ValuePattern));
        assert_eq!(scan.groups.len(), 2);
    }

    #[test]
    fn no_groups_is_a_neutral_outcome() {
        let rows = vec![vec![text("a")], vec![text("b")]];
        let scan = detect_groups(0, &rows, &[]);
        assert_eq!(scan.strategy, None);
        assert!(scan.groups.is_empty());
    }

    #[test]
    fn duplicate_values_are_not_appended() {
        let rows = name_rows();
        let groups = detect_from_pattern(0, &rows);
        let plan = consolidate(&rows, &groups);

        // Descending start_row: Jones group first
        assert_eq!(plan.rewrites[0].group.start_row, 3);
        assert_eq!(plan.rewrites[1].group.start_row, 0);

        // Column 1 of the Smith group is ["A", "", "A"]: no duplicate append
        let smith = &plan.rewrites[1];
        assert_eq!(smith.values[1], text("A"));

        // Column 1 of the Jones group is ["B", "C"]: divergent, joined
        let jones = &plan.rewrites[0];
        assert_eq!(jones.values[1], text("B\nC"));
    }

    #[test]
    fn empty_base_cell_is_replaced_not_appended() {
        let rows = vec![
            vec![text("Smith"), CellValue::Empty],
            vec![CellValue::Empty, text("note")],
        ];
        let groups = detect_from_pattern(0, &rows);
        let plan = consolidate(&rows, &groups);
        assert_eq!(plan.rewrites[0].values[1], text("note"));
    }

    #[test]
    fn apply_plan_rewrites_and_deletes_index_stably() {
        let mut rows = name_rows();
        let groups = detect_from_pattern(0, &rows);
        let plan = consolidate(&rows, &groups);
        apply_plan(&mut rows, &plan);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], text("Smith"));
        assert_eq!(rows[0][1], text("A"));
        assert_eq!(rows[1][0], text("Jones"));
        assert_eq!(rows[1][1], text("B\nC"));
    }

    #[test]
    fn groups_past_the_data_are_dropped() {
        let rows = name_rows();
        let bogus = [MergeGroup { column: 0, start_row: 3, end_row: 99 }];
        let plan = consolidate(&rows, &bogus);
        assert!(plan.rewrites.is_empty());
    }
}
