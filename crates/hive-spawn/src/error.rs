use thiserror::Error;

use hive_core::AgentName;
use hive_world::ResultCode;

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("facility {facility} rejected production of {name}: {code}")]
    CommitFailed { facility: String, name: AgentName, code: ResultCode },
}

pub type SpawnResult<T> = Result<T, SpawnError>;
