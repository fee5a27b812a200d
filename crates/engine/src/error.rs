use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Lookup of a column index that was never profiled into a filter field.
    UnknownColumn { column: usize },
    /// Filter model accessed while filtering is disabled for the session.
    FilteringNotEnabled,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColumn { column } => {
                write!(f, "column {column} has no filter field")
            }
            Self::FilteringNotEnabled => {
                write!(f, "filtering is not enabled for this table")
            }
        }
    }
}

impl std::error::Error for EngineError {}
