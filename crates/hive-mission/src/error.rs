//! Mission error type.

use thiserror::Error;

use hive_logistics::LogisticsError;
use hive_store::StoreError;

/// Errors produced by `hive-mission`.
///
/// None of these are transient world conditions; those surface as
/// [`Viability::NonViable`][crate::Viability] or simply as "try again next
/// tick".  An `Err` means a mission's persisted state or a contract between
/// layers is broken.
#[derive(Debug, Error)]
pub enum MissionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("logistics error: {0}")]
    Logistics(#[from] LogisticsError),

    #[error("unknown mission type '{0}'")]
    UnknownKind(String),
}

pub type MissionResult<T> = Result<T, MissionError>;
