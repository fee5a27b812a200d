//! `tallygrid-engine` — table filtering, merge consolidation and amount
//! aggregation over an in-memory table region.
//!
//! Pure engine crate: receives pre-loaded rows, returns instructions
//! (visibility runs, rewrite plans, summaries). No UI or IO dependencies.

pub mod aggregate;
pub mod amount;
pub mod cell;
pub mod error;
pub mod filter;
pub mod merge;
pub mod profile;
pub mod region;
pub mod session;
pub mod visibility;

pub use aggregate::{sum_amounts, AmountSummary, CellOutcome};
pub use amount::normalize_amount;
pub use cell::CellValue;
pub use error::EngineError;
pub use filter::FilterModel;
pub use merge::{consolidate, detect_groups, MergeGroup, MergedArea};
pub use profile::{profile_region, FilterField};
pub use region::TableRegion;
pub use session::{FilterSession, Summary};
pub use visibility::{compress_runs, evaluate, VisibilityReport, VisibilityRun};
