//! What a mission sees while one of its phases runs.

use hive_behavior::{AgentMemory, BehaviorRecord, TaskStack};
use hive_core::{AgentName, HiveConfig, Tick};
use hive_store::Memory;
use hive_world::{Spawner, World};

/// Per-phase view of the world and the persisted store.
///
/// Missions never act on the world directly: they read it, request agents
/// through the spawn queues in `memory`, and write task records that the
/// behavior pass executes after every mission has run.
pub struct MissionContext<'a> {
    pub world:   &'a dyn World,
    pub spawner: &'a dyn Spawner,
    pub memory:  &'a mut Memory,
    pub config:  &'a HiveConfig,
}

impl<'a> MissionContext<'a> {
    #[inline]
    pub fn new(
        world:   &'a dyn World,
        spawner: &'a dyn Spawner,
        memory:  &'a mut Memory,
        config:  &'a HiveConfig,
    ) -> Self {
        Self { world, spawner, memory, config }
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.world.tick()
    }

    /// The task stack of `agent`, creating its memory under `mission` if the
    /// agent has none yet.
    pub fn tasks_mut(&mut self, agent: &AgentName, body: &str, mission: &str) -> &mut TaskStack {
        &mut self
            .memory
            .agents
            .entry(agent.clone())
            .or_insert_with(|| AgentMemory::new(body, Some(mission.to_owned())))
            .tasks
    }

    /// Drop invalid frames from `agent`'s stack.  Returns `true` if a valid
    /// frame remains.
    pub fn prune_tasks(&mut self, agent: &AgentName) -> bool {
        let world = self.world;
        let Some(live) = world.agent(agent.as_str()) else { return false };
        self.memory
            .agents
            .get_mut(agent)
            .is_some_and(|mem| mem.tasks.current(live, world).is_some())
    }

    /// Make `record` the agent's long-lived task (idempotent).
    pub fn assign(&mut self, agent: &AgentName, record: BehaviorRecord) -> bool {
        self.memory.agents.get_mut(agent).is_some_and(|mem| mem.tasks.assign(record))
    }

    /// Layer a sub-task over the agent's current one (idempotent).
    pub fn push(&mut self, agent: &AgentName, record: BehaviorRecord) -> bool {
        self.memory.agents.get_mut(agent).is_some_and(|mem| mem.tasks.push(record))
    }
}

/// Outcome of a mission's refresh phase.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Viability {
    Viable,
    /// A required world reference is gone for good; the mission should be
    /// retired for this reason.
    NonViable(String),
}

impl Viability {
    pub fn non_viable(reason: impl Into<String>) -> Self {
        Viability::NonViable(reason.into())
    }
}
