use thiserror::Error;

use hive_core::CoreError;
use hive_store::StoreError;

/// Errors produced while assembling or persisting a kernel.
///
/// Failures inside a tick are never returned: they are logged, counted in
/// [`TickStats::failures`][crate::TickStats], and the tick carries on.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("colony '{colony}': no spawn named '{spawn}' in its room")]
    UnknownSpawn { colony: String, spawn: String },
}

pub type KernelResult<T> = Result<T, KernelError>;
