//! Filter model: per-column value selections for one table.
//!
//! Mutated only sequentially by its owner; discarded wholesale when
//! filtering is disabled or a new region is loaded.

use crate::error::EngineError;
use crate::profile::{profile_region, FilterField};
use crate::region::TableRegion;

#[derive(Debug, Clone, Default)]
pub struct FilterModel {
    fields: Vec<FilterField>,
}

impl FilterModel {
    pub fn new(fields: Vec<FilterField>) -> Self {
        Self { fields }
    }

    /// Profile a region and seed every field's selection to all values.
    pub fn from_region(region: &TableRegion) -> Self {
        Self::new(profile_region(region))
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    /// Fields that currently constrain visibility.
    pub fn active_fields(&self) -> impl Iterator<Item = &FilterField> {
        self.fields.iter().filter(|f| f.is_active())
    }

    pub fn any_active(&self) -> bool {
        self.fields.iter().any(FilterField::is_active)
    }

    /// Lookup by column index. Asking for a column that was never profiled
    /// is a caller bug, not a data condition.
    pub fn field(&self, column: usize) -> Result<&FilterField, EngineError> {
        self.fields
            .iter()
            .find(|f| f.column == column)
            .ok_or(EngineError::UnknownColumn { column })
    }

    fn field_mut(&mut self, column: usize) -> Result<&mut FilterField, EngineError> {
        self.fields
            .iter_mut()
            .find(|f| f.column == column)
            .ok_or(EngineError::UnknownColumn { column })
    }

    pub fn is_active(&self, column: usize) -> Result<bool, EngineError> {
        Ok(self.field(column)?.is_active())
    }

    /// Toggle one value's selection. Unknown values are a defensive no-op.
    pub fn toggle(&mut self, column: usize, value: &str) -> Result<(), EngineError> {
        self.field_mut(column)?.toggle(value);
        Ok(())
    }

    pub fn select_all(&mut self, column: usize) -> Result<(), EngineError> {
        self.field_mut(column)?.select_all();
        Ok(())
    }

    pub fn select_none(&mut self, column: usize) -> Result<(), EngineError> {
        self.field_mut(column)?.select_none();
        Ok(())
    }

    pub fn invert(&mut self, column: usize) -> Result<(), EngineError> {
        self.field_mut(column)?.invert();
        Ok(())
    }

    /// Bulk-select scoped to a case-insensitive substring search.
    pub fn select_all_matching(
        &mut self,
        column: usize,
        query: &str,
    ) -> Result<(), EngineError> {
        self.field_mut(column)?.select_all_matching(query);
        Ok(())
    }

    pub fn select_none_matching(
        &mut self,
        column: usize,
        query: &str,
    ) -> Result<(), EngineError> {
        self.field_mut(column)?.select_none_matching(query);
        Ok(())
    }

    pub fn invert_matching(&mut self, column: usize, query: &str) -> Result<(), EngineError> {
        self.field_mut(column)?.invert_matching(query);
        Ok(())
    }

    /// Keep only the listed values selected for one column. Convenience for
    /// hosts that supply whole selections at once (unknown values ignored).
    pub fn select_only<I, S>(&mut self, column: usize, values: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let field = self.field_mut(column)?;
        field.select_none();
        for value in values {
            field.toggle(value.as_ref());
        }
        Ok(())
    }
}
