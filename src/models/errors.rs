use thiserror::Error;

use crate::types::DealId;

/// Failures reported by a store capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Deal [{deal_id}] already exists in the store")]
    UniqueViolation {
        deal_id: DealId
    },
    #[error("Store backend failure: {0}")]
    Backend(String)
}

/// A row that could not be decomposed into the expected deal columns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Row has {found} columns, header declares {expected}")]
    ColumnCount {
        expected: usize,
        found: usize
    },
    #[error("Header is missing required column [{label}]")]
    MissingHeader {
        label: &'static str
    },
    #[error("Row could not be read: {0}")]
    Unreadable(String)
}

/// The only failure that aborts a whole import run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Source [{source_name}] is unavailable: {reason}")]
    SourceUnavailable {
        source_name: String,
        reason: String
    }
}

impl EngineError {
    pub fn source_unavailable(source_name: &str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.to_string(),
            reason: reason.to_string()
        }
    }
}
