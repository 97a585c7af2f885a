//! Spawn requests, queued entries and what `request_creep` hands back.

use serde::{Deserialize, Serialize};

use hive_core::{AgentName, BodyPart};

use crate::BodySpec;

/// How urgently a mission needs its next agent.
///
/// A mission with no live agents is non-functional, so its body is sized to
/// the energy available right now.  Otherwise the body is sized to the
/// facility's full capacity and the request waits for energy.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Need {
    Critical,
    #[default]
    Normal,
}

/// "I need an agent of shape X."  Ephemeral: consumed by one
/// `request_creep` call.
#[derive(Clone, Debug)]
pub struct SpawnRequest {
    /// Lower values are served first.
    pub priority: u32,
    pub body:     BodySpec,
    /// Name of the requesting mission.
    pub mission:  String,
    pub need:     Need,
}

/// A request waiting in a facility's queue.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct QueuedRequest {
    pub priority: u32,
    /// Name the agent will be produced under.
    pub name:     AgentName,
    /// Body spec name, recorded in the new agent's memory.
    pub body:     String,
    pub parts:    Vec<BodyPart>,
    pub mission:  String,
}

/// Token for an agent that does not exist yet.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reservation {
    pub name:  AgentName,
    pub parts: Vec<BodyPart>,
}

/// Result of [`SpawnQueue::request_creep`][crate::SpawnQueue::request_creep].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RequestOutcome {
    /// An orphaned live agent was reassigned to the requesting mission.
    Existing(AgentName),
    /// Production was queued under the reserved name.
    Reserved(Reservation),
}

impl RequestOutcome {
    /// The agent name either way.
    pub fn name(&self) -> &AgentName {
        match self {
            RequestOutcome::Existing(name) => name,
            RequestOutcome::Reserved(r) => &r.name,
        }
    }
}
