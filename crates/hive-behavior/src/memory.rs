//! Persisted per-agent memory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hive_core::AgentName;

use crate::TaskStack;

/// Memory of every known agent, keyed by name.
pub type AgentMemories = BTreeMap<AgentName, AgentMemory>;

/// Everything the framework remembers about one agent between ticks.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct AgentMemory {
    /// Owning mission; `None` marks an orphan available for reuse.
    #[serde(default)]
    pub mission: Option<String>,
    /// Name of the body spec the agent was produced from.
    pub body:    String,
    #[serde(default, rename = "mem")]
    pub tasks:   TaskStack,
}

impl AgentMemory {
    pub fn new(body: impl Into<String>, mission: Option<String>) -> Self {
        Self { mission, body: body.into(), tasks: TaskStack::new() }
    }

    #[inline]
    pub fn is_orphan(&self) -> bool {
        self.mission.is_none()
    }

    /// Detach from the owning mission and drop all tasks.
    pub fn release(&mut self) {
        self.mission = None;
        self.tasks.clear();
    }
}
