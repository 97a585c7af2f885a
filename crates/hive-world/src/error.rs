//! World-subsystem error type.

use thiserror::Error;

use hive_core::{AgentName, ObjectId, Pos};

/// Errors produced by `hive-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("no path from {from} to {to}")]
    NoPath { from: Pos, to: Pos },

    #[error("position {0} is outside the world")]
    OutOfBounds(Pos),

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("name {0} is already taken")]
    NameTaken(AgentName),
}

pub type WorldResult<T> = Result<T, WorldError>;
