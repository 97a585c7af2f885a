use thiserror::Error;

use hive_core::AgentName;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("agent {0} is not alive")]
    AgentNotFound(AgentName),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
