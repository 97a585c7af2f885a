//! Store error type.

use thiserror::Error;

/// Errors produced by `hive-store`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("memory JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A mission record's `data` payload does not match its kind.
    #[error("mission '{mission}': bad data payload: {source}")]
    MissionData {
        mission: String,
        #[source]
        source:  serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
