//! Column profiling: distinct-value extraction into filter fields.
//!
//! Re-run in full whenever the region or header assignment changes;
//! not incremental.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::region::TableRegion;

/// Per-column record of all distinct values and the current selection.
///
/// Invariants: `selected ⊆ values`; an empty selection is legal and means
/// "nothing passes".
#[derive(Debug, Clone, Serialize)]
pub struct FilterField {
    pub column: usize,
    pub header: String,
    /// Distinct non-empty canonical strings, sorted case-insensitively
    /// with a raw tie-break.
    pub values: Vec<String>,
    pub selected: FxHashSet<String>,
}

impl FilterField {
    /// Actively filtering: the selection is a proper subset of the values.
    /// An empty selection on a non-empty value set still filters (it hides
    /// every row).
    pub fn is_active(&self) -> bool {
        self.selected.len() < self.values.len()
    }

    /// Add or remove one value. Unknown values are ignored.
    pub fn toggle(&mut self, value: &str) {
        if !self.values.iter().any(|v| v == value) {
            return;
        }
        if !self.selected.remove(value) {
            self.selected.insert(value.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.values.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    pub fn invert(&mut self) {
        let inverted: FxHashSet<String> = self
            .values
            .iter()
            .filter(|v| !self.selected.contains(*v))
            .cloned()
            .collect();
        self.selected = inverted;
    }

    /// Select every value containing `query` (case-insensitive), leaving
    /// non-matching values' state untouched.
    pub fn select_all_matching(&mut self, query: &str) {
        let query = query.to_lowercase();
        for value in &self.values {
            if value.to_lowercase().contains(&query) {
                self.selected.insert(value.clone());
            }
        }
    }

    /// Deselect every value containing `query` (case-insensitive).
    pub fn select_none_matching(&mut self, query: &str) {
        let query = query.to_lowercase();
        self.selected
            .retain(|value| !value.to_lowercase().contains(&query));
    }

    /// Flip the selection state of every value containing `query`
    /// (case-insensitive).
    pub fn invert_matching(&mut self, query: &str) {
        let query = query.to_lowercase();
        for value in &self.values {
            if !value.to_lowercase().contains(&query) {
                continue;
            }
            if !self.selected.remove(value) {
                self.selected.insert(value.clone());
            }
        }
    }
}

/// Build one filter field per column: header text (or a synthesized label),
/// the column's distinct non-empty values, and a selection seeded to all
/// values (a no-op filter).
pub fn profile_region(region: &TableRegion) -> Vec<FilterField> {
    (0..region.column_count())
        .map(|col| {
            let mut seen: FxHashSet<String> = FxHashSet::default();
            let mut values = Vec::new();

            for row in region.data_rows() {
                let cell = &row[col];
                if cell.is_blank() {
                    continue;
                }
                let text = cell.canonical_string();
                if seen.insert(text.clone()) {
                    values.push(text);
                }
            }

            values.sort_by(|a, b| {
                a.to_lowercase()
                    .cmp(&b.to_lowercase())
                    .then_with(|| a.cmp(b))
            });

            let selected = values.iter().cloned().collect();
            FilterField {
                column: col,
                header: region.header_text(col),
                values,
                selected,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn region() -> TableRegion {
        TableRegion::new(vec![
            vec![text("Region"), text("Amount")],
            vec![text("east"), CellValue::Number(10.0)],
            vec![text("West"), CellValue::Number(20.0)],
            vec![text("east"), CellValue::Empty],
            vec![text("Central"), CellValue::Number(30.0)],
        ])
    }

    #[test]
    fn distinct_values_sorted_case_insensitively() {
        let fields = profile_region(&region());
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].header, "Region");
        assert_eq!(fields[0].values, vec!["Central", "east", "West"]);
        // Empty amount cell is skipped; numbers stringify canonically
        assert_eq!(fields[1].values, vec!["10", "20", "30"]);
    }

    #[test]
    fn fresh_fields_select_everything_and_are_inactive() {
        let fields = profile_region(&region());
        for field in &fields {
            assert_eq!(field.selected.len(), field.values.len());
            assert!(!field.is_active());
        }
    }

    #[test]
    fn toggle_ignores_unknown_values() {
        let mut field = profile_region(&region()).remove(0);
        field.toggle("nowhere");
        assert_eq!(field.selected.len(), 3);

        field.toggle("east");
        assert_eq!(field.selected.len(), 2);
        assert!(field.is_active());

        field.toggle("east");
        assert_eq!(field.selected.len(), 3);
        assert!(!field.is_active());
    }

    #[test]
    fn select_none_is_active_when_values_exist() {
        let mut field = profile_region(&region()).remove(0);
        field.select_none();
        assert!(field.selected.is_empty());
        assert!(field.is_active());

        field.select_all();
        assert!(!field.is_active());
    }

    #[test]
    fn invert_is_its_own_inverse() {
        let mut field = profile_region(&region()).remove(0);
        field.toggle("West");
        let before = field.selected.clone();
        field.invert();
        field.invert();
        assert_eq!(field.selected, before);
    }

    #[test]
    fn scoped_operations_leave_non_matching_values_alone() {
        let mut field = profile_region(&region()).remove(0);

        // "select none" scoped to a search must not deselect unrelated values
        field.select_none_matching("east");
        assert!(!field.selected.contains("east"));
        assert!(field.selected.contains("West"));
        assert!(field.selected.contains("Central"));

        field.select_all_matching("EAST");
        assert!(field.selected.contains("east"));

        field.invert_matching("west");
        assert!(!field.selected.contains("West"));
        assert!(field.selected.contains("Central"));
    }

    #[test]
    fn column_with_no_values_profiles_empty() {
        let region = TableRegion::new(vec![
            vec![text("A"), text("B")],
            vec![text("x"), CellValue::Empty],
        ]);
        let fields = profile_region(&region);
        assert!(fields[1].values.is_empty());
        assert!(!fields[1].is_active());
    }
}
