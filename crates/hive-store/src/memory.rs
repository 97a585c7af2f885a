//! `Memory`: the single persisted value that crosses ticks.
//!
//! # Layout
//!
//! ```json
//! {
//!   "missions": { "<name>": { "type": "...", "creeps": [...], "colony": "...", "data": {...} } },
//!   "spawns":   { "<facility>": { "facility": "...", "requests": [...], "serial": 0 } },
//!   "networks": { "<colony>": { "requests": {...}, "plans": {...} } },
//!   "agents":   { "<name>": { "mission": "...", "body": "...", "mem": [...] } }
//! }
//! ```
//!
//! Nothing else survives between ticks.  Spawn queues and logistics networks
//! are keyed coordinators: one per facility and one per colony, created on
//! first use.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use hive_behavior::AgentMemories;
use hive_logistics::LogisticsNetwork;
use hive_spawn::SpawnQueue;
use hive_world::World;

use crate::{MissionRecord, StoreResult};

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Memory {
    pub missions: BTreeMap<String, MissionRecord>,
    pub spawns:   BTreeMap<String, SpawnQueue>,
    pub networks: BTreeMap<String, LogisticsNetwork>,
    pub agents:   AgentMemories,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Serialization ─────────────────────────────────────────────────────

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overwrite `path` with the pretty-printed store.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    // ── Coordinators ──────────────────────────────────────────────────────

    /// The spawn queue of `facility`, created empty on first use.
    pub fn spawn_queue_mut(&mut self, facility: &str) -> &mut SpawnQueue {
        self.spawns
            .entry(facility.to_owned())
            .or_insert_with(|| SpawnQueue::new(facility))
    }

    /// The logistics network of `colony`, created empty on first use.
    pub fn network_mut(&mut self, colony: &str) -> &mut LogisticsNetwork {
        self.networks.entry(colony.to_owned()).or_default()
    }

    /// `true` if any spawn queue still holds a request under `name`.
    pub fn is_pending(&self, name: &str) -> bool {
        self.spawns.values().any(|q| q.is_pending(name))
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Turn every agent of `mission` into an orphan.  Returns how many were
    /// released.
    pub fn release_agents(&mut self, mission: &str) -> usize {
        let mut released = 0;
        for mem in self.agents.values_mut().filter(|m| m.mission.as_deref() == Some(mission)) {
            mem.release();
            released += 1;
        }
        released
    }

    /// Drop memory of agents that no longer exist and are not waiting in a
    /// spawn queue.  Returns the removed names.
    pub fn collect_dead_agents(&mut self, world: &dyn World) -> Vec<String> {
        let dead: Vec<String> = self
            .agents
            .keys()
            .filter(|name| world.agent(name.as_str()).is_none() && !self.is_pending(name.as_str()))
            .map(|name| name.as_str().to_owned())
            .collect();
        for name in &dead {
            self.agents.remove(name.as_str());
            debug!(agent = %name, "agent memory collected");
        }
        dead
    }
}
