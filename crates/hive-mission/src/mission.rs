//! The generic mission runner.
//!
//! # Phases
//!
//! A mission is driven once per tick, in this order:
//!
//! 1. **refresh**: drop dead members, then let the policy re-resolve the
//!    world references its payload needs.  A missing required reference
//!    makes the mission non-viable.
//! 2. **roll call**: settle the outstanding reservation, adopt strays, and
//!    issue at most one spawn request if the pool is short.
//! 3. **run**: the policy (re)assigns tasks to every ready member.
//! 4. **save**: write the record and payload back to memory.
//!
//! **retire** replaces all of the above when the mission is done.
//!
//! # Reservation slot
//!
//! At most one reservation is outstanding.  At roll call it is promoted if
//! the agent exists (production has started), kept while its request is
//! still queued, and dropped as stale otherwise.  While the slot is
//! occupied no new request is issued, however short the pool is.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use hive_core::{AgentName, HiveConfig, spawn_ticks};
use hive_spawn::{BodySpec, Need, RequestOutcome, SpawnQueue, SpawnRequest};
use hive_store::MissionRecord;
use hive_world::Agent;

use crate::{MissionContext, MissionKind, MissionResult, Viability};

// ── Policy ────────────────────────────────────────────────────────────────────

/// The mission-specific half of a mission.
///
/// A policy is stateless; everything that must survive the tick lives in
/// its `Data` payload, which the runner loads from and saves to the
/// mission record.
pub trait MissionPolicy {
    type Data: Serialize + DeserializeOwned + Default;

    const KIND: MissionKind;

    /// Re-resolve the world references in `data`.
    fn refresh(&self, data: &mut Self::Data, record: &MissionRecord, ctx: &MissionContext<'_>) -> Viability;

    /// Pool size wanted right now.
    fn max_creeps(&self, data: &Self::Data, record: &MissionRecord, ctx: &MissionContext<'_>) -> usize;

    /// Body requested for new members.
    fn body(&self, data: &Self::Data) -> BodySpec;

    /// Spawn priority; lower is served first.
    fn priority(&self, _data: &Self::Data, config: &HiveConfig) -> u32 {
        config.default_priority
    }

    /// Assign tasks to the ready members of `crew`.
    fn creep_actions(&self, data: &mut Self::Data, crew: &Crew<'_>, ctx: &mut MissionContext<'_>) -> MissionResult<()>;

    /// Teardown before the record is deleted.
    fn retire(&self, _data: &mut Self::Data, _crew: &Crew<'_>, _ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        Ok(())
    }
}

/// The members a policy works with this tick.
pub struct Crew<'a> {
    pub mission: &'a str,
    pub colony:  &'a str,
    /// Live members that have finished production, in roster order.
    pub ready:   Vec<AgentName>,
    /// Body spec name members were produced from.
    pub body:    &'a str,
}

// ── Handle ────────────────────────────────────────────────────────────────────

/// What roll call did this tick.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RollCall {
    pub promoted:  Option<AgentName>,
    pub dropped:   Option<AgentName>,
    pub adopted:   Vec<AgentName>,
    pub requested: Option<RequestOutcome>,
}

/// Object-safe face of a mission, as stored in the registry.
pub trait MissionHandle {
    fn name(&self) -> &str;

    fn kind(&self) -> MissionKind;

    fn record(&self) -> &MissionRecord;

    fn refresh(&mut self, ctx: &mut MissionContext<'_>) -> MissionResult<Viability>;

    fn roll_call(&mut self, ctx: &mut MissionContext<'_>) -> MissionResult<RollCall>;

    fn run(&mut self, ctx: &mut MissionContext<'_>) -> MissionResult<()>;

    /// Write the record back to memory.
    fn save(&mut self, ctx: &mut MissionContext<'_>) -> MissionResult<()>;

    /// Tear down, release members to the orphan pool, cancel queued
    /// requests and delete the record.
    fn retire(&mut self, ctx: &mut MissionContext<'_>, reason: &str) -> MissionResult<()>;
}

// ── Mission<P> ────────────────────────────────────────────────────────────────

/// A policy bound to its persisted record.
pub struct Mission<P: MissionPolicy> {
    name:   String,
    record: MissionRecord,
    data:   P::Data,
    policy: P,
}

impl<P: MissionPolicy> Mission<P> {
    /// Rebuild a mission from its record, decoding the payload.
    pub fn load(name: impl Into<String>, record: MissionRecord, policy: P) -> MissionResult<Self> {
        let name = name.into();
        let data = record.data(&name)?;
        Ok(Self { name, record, data, policy })
    }

    pub fn data(&self) -> &P::Data {
        &self.data
    }
}

/// `true` once an agent is close enough to the end of its life that a
/// replacement should be on its way.
fn is_aging(agent: &Agent, margin: u64) -> bool {
    !agent.spawning && (agent.ticks_to_live as u64) < spawn_ticks(&agent.body) + margin
}

impl<P: MissionPolicy> MissionHandle for Mission<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MissionKind {
        P::KIND
    }

    fn record(&self) -> &MissionRecord {
        &self.record
    }

    fn refresh(&mut self, ctx: &mut MissionContext<'_>) -> MissionResult<Viability> {
        let world = ctx.world;
        let before = self.record.creeps.len();
        self.record.creeps.retain(|n| world.agent(n.as_str()).is_some());
        if self.record.creeps.len() < before {
            debug!(mission = %self.name, lost = before - self.record.creeps.len(), "members lost");
        }
        Ok(self.policy.refresh(&mut self.data, &self.record, ctx))
    }

    fn roll_call(&mut self, ctx: &mut MissionContext<'_>) -> MissionResult<RollCall> {
        let world = ctx.world;
        let mut report = RollCall::default();

        if let Some(next) = self.record.next_creep.clone() {
            if world.agent(next.as_str()).is_some() {
                debug!(mission = %self.name, agent = %next, "reservation promoted");
                self.record.creeps.push(next.clone());
                self.record.next_creep = None;
                report.promoted = Some(next);
            } else if !ctx.memory.is_pending(next.as_str()) {
                debug!(mission = %self.name, agent = %next, "stale reservation dropped");
                self.record.next_creep = None;
                report.dropped = Some(next);
            }
        }

        // Agents whose memory names this mission but the roster lost track
        // of (a save that never happened, a record restored from an old
        // snapshot).
        let strays: Vec<AgentName> = ctx
            .memory
            .agents
            .iter()
            .filter(|(name, mem)| {
                mem.mission.as_deref() == Some(self.name.as_str())
                    && !self.record.creeps.contains(*name)
                    && self.record.next_creep.as_ref() != Some(*name)
                    && world.agent(name.as_str()).is_some()
            })
            .map(|(name, _)| name.clone())
            .collect();
        for name in strays {
            debug!(mission = %self.name, agent = %name, "stray adopted");
            self.record.creeps.push(name.clone());
            report.adopted.push(name);
        }

        if self.record.next_creep.is_some() {
            return Ok(report);
        }
        let wanted = self.policy.max_creeps(&self.data, &self.record, ctx);
        let margin = ctx.config.prespawn_margin;
        let effective = self
            .record
            .creeps
            .iter()
            .filter_map(|n| world.agent(n.as_str()))
            .filter(|a| !is_aging(a, margin))
            .count();
        if effective >= wanted {
            return Ok(report);
        }
        let Some(facility) = self.record.spawn_source.clone() else {
            warn!(mission = %self.name, "short of agents but no spawn source");
            return Ok(report);
        };

        let need = if self.record.creeps.is_empty() { Need::Critical } else { Need::Normal };
        let request = SpawnRequest {
            priority: self.policy.priority(&self.data, ctx.config),
            body:     self.policy.body(&self.data),
            mission:  self.name.clone(),
            need,
        };
        let memory = &mut *ctx.memory;
        let queue = memory
            .spawns
            .entry(facility.clone())
            .or_insert_with(|| SpawnQueue::new(facility.as_str()));
        let outcome = queue.request_creep(request, world, ctx.spawner, &mut memory.agents);
        match &outcome {
            RequestOutcome::Existing(name) => {
                info!(mission = %self.name, agent = %name, "orphan adopted");
                self.record.creeps.push(name.clone());
            }
            RequestOutcome::Reserved(r) => {
                debug!(mission = %self.name, agent = %r.name, parts = r.parts.len(), ?need, "agent requested");
                self.record.next_creep = Some(r.name.clone());
            }
        }
        report.requested = Some(outcome);
        Ok(report)
    }

    fn run(&mut self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        let world = ctx.world;
        let body = self.policy.body(&self.data);
        let mut ready = Vec::with_capacity(self.record.creeps.len());
        for name in &self.record.creeps {
            if world.agent(name.as_str()).is_none_or(|a| a.spawning) {
                continue;
            }
            ctx.tasks_mut(name, &body.name, &self.name);
            // A member claimed by another mission is not ours to drive.
            if ctx.memory.agents.get(name).is_some_and(|m| m.mission.as_deref() == Some(self.name.as_str())) {
                ready.push(name.clone());
            }
        }

        let crew = Crew { mission: &self.name, colony: &self.record.colony, ready, body: &body.name };
        self.policy.creep_actions(&mut self.data, &crew, ctx)
    }

    fn save(&mut self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        // The roster goes back even if the payload does not encode; the
        // previous payload stays in place.
        let encoded = self.record.set_data(&self.name, &self.data);
        ctx.memory.missions.insert(self.name.clone(), self.record.clone());
        Ok(encoded?)
    }

    fn retire(&mut self, ctx: &mut MissionContext<'_>, reason: &str) -> MissionResult<()> {
        let body = self.policy.body(&self.data);
        let crew = Crew {
            mission: &self.name,
            colony:  &self.record.colony,
            ready:   self.record.creeps.clone(),
            body:    &body.name,
        };
        self.policy.retire(&mut self.data, &crew, ctx)?;

        let released = ctx.memory.release_agents(&self.name);
        let cancelled: usize = ctx.memory.spawns.values_mut().map(|q| q.cancel_mission(&self.name)).sum();
        ctx.memory.missions.remove(&self.name);
        info!(mission = %self.name, reason, released, cancelled, "mission retired");
        Ok(())
    }
}
