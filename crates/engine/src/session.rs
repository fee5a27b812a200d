//! Filter session: the one mutable context for filtering a single table.
//!
//! Owns the loaded region and at most one filter model. Loading a new
//! region or disabling filtering discards the model wholesale rather than
//! patching it — selections never outlive the table they were built from.

use serde::Serialize;

use crate::aggregate::sum_amounts;
use crate::error::EngineError;
use crate::filter::FilterModel;
use crate::region::TableRegion;
use crate::visibility::{evaluate, VisibilityReport};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    pub visible_row_count: usize,
    pub total_amount: f64,
}

#[derive(Debug, Default)]
pub struct FilterSession {
    region: TableRegion,
    model: Option<FilterModel>,
}

impl FilterSession {
    pub fn new(region: TableRegion) -> Self {
        Self {
            region,
            model: None,
        }
    }

    pub fn region(&self) -> &TableRegion {
        &self.region
    }

    /// Replace the region. Any existing filter model is discarded.
    pub fn load_region(&mut self, region: TableRegion) {
        self.region = region;
        self.model = None;
    }

    /// Profile the region and seed a fresh model (everything selected).
    pub fn enable_filtering(&mut self) -> &FilterModel {
        self.model.insert(FilterModel::from_region(&self.region))
    }

    pub fn disable_filtering(&mut self) {
        self.model = None;
    }

    pub fn is_filtering_enabled(&self) -> bool {
        self.model.is_some()
    }

    /// Accessing the model while filtering is disabled is a caller bug.
    pub fn model(&self) -> Result<&FilterModel, EngineError> {
        self.model.as_ref().ok_or(EngineError::FilteringNotEnabled)
    }

    pub fn model_mut(&mut self) -> Result<&mut FilterModel, EngineError> {
        self.model.as_mut().ok_or(EngineError::FilteringNotEnabled)
    }

    /// Current visibility. With filtering disabled every data row is
    /// visible — absence of a model is absence of a filter, not an error.
    pub fn visibility(&self) -> VisibilityReport {
        match &self.model {
            Some(model) => evaluate(&self.region, model),
            None => {
                let count = self.region.data_row_count();
                VisibilityReport {
                    visible: vec![true; count],
                    visible_count: count,
                    hidden_count: 0,
                }
            }
        }
    }

    /// Row count and normalized amount total over the visible rows.
    pub fn summarize(&self, id_column: usize, amount_column: usize) -> Summary {
        let report = self.visibility();
        let rows = report.visible_rows();
        let amounts = sum_amounts(&self.region, id_column, amount_column, &rows);
        Summary {
            visible_row_count: report.visible_count,
            total_amount: amounts.total,
        }
    }
}
