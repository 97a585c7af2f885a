//! Logistics error type.

use thiserror::Error;

use hive_core::{AgentName, ObjectId, Pos, RequestId};

/// Errors produced by `hive-logistics`.
///
/// `TargetNotFound` is a contract violation: the caller asked for a leg to a
/// target that does not resolve, and silently skipping it would leave the
/// plan's projected state out of step with reality.
#[derive(Debug, Error)]
pub enum LogisticsError {
    #[error("request {request}: target {target} does not resolve")]
    TargetNotFound { request: RequestId, target: ObjectId },

    #[error("request {request}: no path from {from} to {to}")]
    Unreachable { request: RequestId, from: Pos, to: Pos },

    #[error("hauler {0} has no plan")]
    HaulerNotFound(AgentName),
}

pub type LogisticsResult<T> = Result<T, LogisticsError>;
