//! `SpawnQueue`: the single-facility production scheduler.
//!
//! # Model
//!
//! Missions call [`SpawnQueue::request_creep`] during their run phase.  Each
//! call either reuses an orphaned live agent on the spot or appends a
//! request to the persisted list, which is re-sorted by ascending priority
//! after every insertion.  Once every mission has had its turn, the kernel
//! calls [`SpawnQueue::run`] exactly once: if the facility is idle and can
//! afford the head request it commits production, otherwise nothing happens
//! this tick.
//!
//! The head is the only candidate.  A cheaper request further down never
//! jumps ahead of an unaffordable one at higher priority.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use hive_behavior::{AgentMemories, AgentMemory};
use hive_core::{AgentName, body_cost};
use hive_world::{Spawner, World};

use crate::{Need, QueuedRequest, RequestOutcome, Reservation, SpawnError, SpawnRequest, SpawnResult};

/// The persisted request list of one production facility.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SpawnQueue {
    facility: String,
    #[serde(default)]
    requests: Vec<QueuedRequest>,
    /// Next serial for reservation names.
    #[serde(default)]
    serial:   u32,
}

impl SpawnQueue {
    pub fn new(facility: impl Into<String>) -> Self {
        Self { facility: facility.into(), requests: Vec::new(), serial: 0 }
    }

    pub fn facility(&self) -> &str {
        &self.facility
    }

    /// Pending requests, highest priority first.
    pub fn requests(&self) -> &[QueuedRequest] {
        &self.requests
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// `true` if a request under `name` is still waiting for production.
    pub fn is_pending(&self, name: &str) -> bool {
        self.requests.iter().any(|r| r.name.as_str() == name)
    }

    /// Reuse an orphan or reserve a new agent for `request`.
    ///
    /// An orphan is a live agent whose memory has no mission and whose body
    /// spec name matches.  Reusing one costs nothing and leaves the queue
    /// untouched.
    pub fn request_creep(
        &mut self,
        request: SpawnRequest,
        world:   &dyn World,
        spawner: &dyn Spawner,
        agents:  &mut AgentMemories,
    ) -> RequestOutcome {
        let orphan = agents
            .iter_mut()
            .find(|(name, mem)| {
                mem.is_orphan() && mem.body == request.body.name && world.agent(name.as_str()).is_some()
            });
        if let Some((name, mem)) = orphan {
            mem.mission = Some(request.mission.clone());
            mem.tasks.clear();
            debug!(facility = %self.facility, agent = %name, mission = %request.mission, "orphan reassigned");
            return RequestOutcome::Existing(name.clone());
        }

        let energy = match request.need {
            Need::Critical => spawner.available_resource(&self.facility),
            Need::Normal => spawner.resource_capacity(&self.facility),
        };
        let parts = request.body.manifest(energy);
        let name = self.next_name(&request.body.name, agents);

        self.requests.push(QueuedRequest {
            priority: request.priority,
            name:     name.clone(),
            body:     request.body.name,
            parts:    parts.clone(),
            mission:  request.mission,
        });
        self.requests.sort_by_key(|r| r.priority);

        RequestOutcome::Reserved(Reservation { name, parts })
    }

    /// Commit production of the head request if the facility is idle and
    /// can afford it.  Returns the name of the agent now in production.
    ///
    /// A facility that rejects a commit for any other reason loses the
    /// request; its mission sees the reservation go stale and asks again.
    pub fn run(&mut self, spawner: &mut dyn Spawner, agents: &mut AgentMemories) -> SpawnResult<Option<AgentName>> {
        let Some(head) = self.requests.first() else { return Ok(None) };
        if spawner.is_busy(&self.facility) {
            return Ok(None);
        }
        let cost = body_cost(&head.parts);
        let available = spawner.available_resource(&self.facility);
        if cost > available {
            debug!(facility = %self.facility, agent = %head.name, cost, available, "waiting for energy");
            return Ok(None);
        }

        let req = self.requests.remove(0);
        let code = spawner.commit_production(&self.facility, &req.parts, &req.name);
        if !code.is_ok() {
            warn!(facility = %self.facility, agent = %req.name, %code, "production rejected");
            return Err(SpawnError::CommitFailed { facility: self.facility.clone(), name: req.name, code });
        }

        info!(
            facility = %self.facility,
            agent    = %req.name,
            mission  = %req.mission,
            parts    = req.parts.len(),
            cost,
            "production committed"
        );
        agents.insert(req.name.clone(), AgentMemory::new(req.body, Some(req.mission)));
        Ok(Some(req.name))
    }

    /// Drop every request made by `mission`.  Used when a mission retires.
    pub fn cancel_mission(&mut self, mission: &str) -> usize {
        let before = self.requests.len();
        self.requests.retain(|r| r.mission != mission);
        before - self.requests.len()
    }

    fn next_name(&mut self, body: &str, agents: &AgentMemories) -> AgentName {
        loop {
            let name = AgentName::new(format!("{body}-{}", self.serial));
            self.serial += 1;
            if !agents.contains_key(&name) && !self.is_pending(name.as_str()) {
                return name;
            }
        }
    }
}
