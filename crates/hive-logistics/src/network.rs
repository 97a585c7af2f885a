//! `LogisticsNetwork`: pending transfer requests and one route plan per
//! hauler, persisted as a single record.
//!
//! # Per-tick flow
//!
//! The owning mission calls [`LogisticsNetwork::update`] once per tick:
//!
//! 1. expire requests whose timeout has passed,
//! 2. drop plans of haulers that died or left the pool and open empty plans
//!    for new ones,
//! 3. rebuild plans that lost legs from the hauler's actual state,
//! 4. hand every unassigned request to a hauler under the configured
//!    [`AssignmentPolicy`].
//!
//! When a hauler finishes a leg the mission calls
//! [`LogisticsNetwork::complete_step`], which books the moved amount against
//! the request and rebuilds that hauler's plan.
//!
//! A request is *assigned* while some plan holds a leg for it.  Dropping a
//! leg (hauler lost, zero payload on rebuild) simply makes it unassigned
//! again.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hive_core::{AgentName, AssignmentPolicy, LogisticsConfig, RequestId, Tick};
use hive_world::World;

use crate::{
    LogisticsError, LogisticsResult, NewRequest, PlanState, PlanStep, RoutePlan, TransferRequest, project_step,
};

/// What one [`LogisticsNetwork::update`] call did.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NetworkUpdate {
    pub expired:  Vec<RequestId>,
    pub assigned: Vec<(RequestId, AgentName)>,
}

/// Requests plus per-hauler plans for one locality.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct LogisticsNetwork {
    #[serde(default)]
    requests: BTreeMap<RequestId, TransferRequest>,
    #[serde(default)]
    plans:    BTreeMap<AgentName, RoutePlan>,
    /// Plans that lost legs and must be re-projected.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    stale:    BTreeSet<AgentName>,
    #[serde(default)]
    next_id:  u32,
    /// Round-robin position in the hauler pool.
    #[serde(default)]
    cursor:   usize,
}

impl LogisticsNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Register a request, or refresh the existing one for the same
    /// `(target, resource, kind)`.  Either way the timeout restarts.
    pub fn register(&mut self, new: NewRequest, now: Tick, config: &LogisticsConfig) -> RequestId {
        let timeout = now + config.request_timeout;
        if let Some(existing) = self.requests.values_mut().find(|r| r.same_slot(&new)) {
            existing.amount = new.amount;
            existing.buffer = new.buffer;
            existing.timeout = timeout;
            return existing.id;
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.requests.insert(id, TransferRequest {
            id,
            resource: new.resource,
            kind:     new.kind,
            target:   new.target,
            amount:   new.amount,
            buffer:   new.buffer,
            timeout,
        });
        debug!(request = %id, target = %new.target, kind = %new.kind, amount = new.amount, "request registered");
        id
    }

    /// Remove a request and every leg serving it.
    pub fn unregister(&mut self, id: RequestId) -> Option<TransferRequest> {
        let req = self.requests.remove(&id)?;
        self.strip(&[id]);
        Some(req)
    }

    /// Remove requests whose timeout is at or before `now`.
    pub fn expire(&mut self, now: Tick) -> Vec<RequestId> {
        let expired: Vec<RequestId> =
            self.requests.values().filter(|r| r.timeout <= now).map(|r| r.id).collect();
        for id in &expired {
            self.requests.remove(id);
            info!(request = %id, %now, "request expired");
        }
        self.strip(&expired);
        expired
    }

    pub fn request(&self, id: RequestId) -> Option<&TransferRequest> {
        self.requests.get(&id)
    }

    pub fn requests(&self) -> impl Iterator<Item = &TransferRequest> + '_ {
        self.requests.values()
    }

    pub fn is_assigned(&self, id: RequestId) -> bool {
        self.plans.values().any(|p| p.contains(id))
    }

    /// Requests no plan serves, in id order.
    pub fn unassigned(&self) -> Vec<RequestId> {
        self.requests.keys().copied().filter(|&id| !self.is_assigned(id)).collect()
    }

    // ── Haulers & plans ───────────────────────────────────────────────────

    pub fn plan(&self, hauler: &str) -> Option<&RoutePlan> {
        self.plans.get(hauler)
    }

    /// The leg `hauler` should work on now.
    pub fn next_step(&self, hauler: &str) -> Option<&PlanStep> {
        self.plans.get(hauler).and_then(|p| p.steps().first())
    }

    pub fn haulers(&self) -> impl Iterator<Item = &AgentName> + '_ {
        self.plans.keys()
    }

    /// Match the plan set to `haulers`.  Plans of haulers that are gone are
    /// dropped (their requests become unassigned); live, ready haulers
    /// without a plan get an empty one.
    pub fn sync_haulers(&mut self, haulers: &[AgentName], world: &dyn World) {
        let lost: Vec<AgentName> = self
            .plans
            .keys()
            .filter(|h| !haulers.contains(h) || world.agent(h.as_str()).is_none())
            .cloned()
            .collect();
        for hauler in lost {
            if let Some(plan) = self.plans.remove(&hauler) {
                info!(hauler = %hauler, released = plan.len(), "hauler lost");
            }
            self.stale.remove(&hauler);
        }

        for hauler in haulers {
            if self.plans.contains_key(hauler) {
                continue;
            }
            if let Some(agent) = world.agent(hauler.as_str()).filter(|a| !a.spawning) {
                self.plans.insert(hauler.clone(), RoutePlan::for_agent(agent, world.tick()));
            }
        }
    }

    /// Re-project `hauler`'s plan from its actual position and store,
    /// keeping the same requests in the same order.  Legs whose request is
    /// gone, whose target no longer resolves, or which would move nothing
    /// are dropped.
    pub fn rebuild_plan(&mut self, hauler: &AgentName, world: &dyn World) -> LogisticsResult<()> {
        let agent = world
            .agent(hauler.as_str())
            .ok_or_else(|| LogisticsError::HaulerNotFound(hauler.clone()))?;
        let plan = self
            .plans
            .get_mut(hauler)
            .ok_or_else(|| LogisticsError::HaulerNotFound(hauler.clone()))?;

        let ids: Vec<RequestId> = plan.steps().iter().map(|s| s.request).collect();
        plan.reset(agent.store.capacity, PlanState::from_agent(agent, world.tick()));
        for id in ids {
            let Some(req) = self.requests.get(&id) else { continue };
            if world.object(req.target).is_none() {
                continue;
            }
            match project_step(plan, req, world) {
                Ok(step) if step.payload != 0 => plan.push_step(step),
                Ok(_) => debug!(hauler = %hauler, request = %id, "leg dropped on rebuild: nothing to move"),
                Err(e) => debug!(hauler = %hauler, request = %id, error = %e, "leg dropped on rebuild"),
            }
        }
        self.stale.remove(hauler);
        Ok(())
    }

    /// Book `hauler`'s first leg as done and rebuild its plan.
    ///
    /// The leg's projected amount is deducted from its request; a request
    /// with nothing left is fulfilled and removed.  Returns the completed
    /// leg's request id, or `None` if the plan was empty.
    pub fn complete_step(&mut self, hauler: &AgentName, world: &dyn World) -> LogisticsResult<Option<RequestId>> {
        let plan = self
            .plans
            .get_mut(hauler)
            .ok_or_else(|| LogisticsError::HaulerNotFound(hauler.clone()))?;
        let Some(step) = plan.steps().first().cloned() else { return Ok(None) };
        plan.retain_steps(|s| s.request != step.request);

        if let Some(req) = self.requests.get_mut(&step.request) {
            req.amount = req.amount.saturating_sub(step.amount());
            if req.amount == 0 {
                self.requests.remove(&step.request);
                info!(request = %step.request, hauler = %hauler, "request fulfilled");
            }
        }

        self.rebuild_plan(hauler, world)?;
        Ok(Some(step.request))
    }

    /// Drop `hauler`'s first leg without booking anything against its
    /// request, then rebuild.  The request becomes unassigned again.
    pub fn abandon_step(&mut self, hauler: &AgentName, world: &dyn World) -> LogisticsResult<Option<RequestId>> {
        let plan = self
            .plans
            .get_mut(hauler)
            .ok_or_else(|| LogisticsError::HaulerNotFound(hauler.clone()))?;
        let Some(request) = plan.steps().first().map(|s| s.request) else { return Ok(None) };
        plan.retain_steps(|s| s.request != request);
        debug!(request = %request, hauler = %hauler, "leg abandoned");
        self.rebuild_plan(hauler, world)?;
        Ok(Some(request))
    }

    /// Hand every unassigned request whose target resolves to a hauler.
    ///
    /// A hauler can take a request if its plan is shorter than
    /// `max_plan_steps`, the target is reachable, and the projected leg
    /// would move something.
    pub fn assign(&mut self, world: &dyn World, config: &LogisticsConfig) -> Vec<(RequestId, AgentName)> {
        let mut assigned = Vec::new();
        if self.plans.is_empty() {
            return assigned;
        }

        for id in self.unassigned() {
            let Some(req) = self.requests.get(&id) else { continue };
            if world.object(req.target).is_none() {
                debug!(request = %id, target = %req.target, "target not visible; left unassigned");
                continue;
            }
            let choice = match config.assignment {
                AssignmentPolicy::RoundRobin => {
                    pick_round_robin(&self.plans, req, world, config.max_plan_steps, self.cursor)
                        .map(|(idx, hauler, step)| {
                            self.cursor = idx + 1;
                            (hauler, step)
                        })
                }
                AssignmentPolicy::NearestCompletion => {
                    pick_nearest(&self.plans, req, world, config.max_plan_steps)
                }
            };
            let Some((hauler, step)) = choice else { continue };
            if let Some(plan) = self.plans.get_mut(&hauler) {
                plan.push_step(step);
                debug!(request = %id, hauler = %hauler, "request assigned");
                assigned.push((id, hauler));
            }
        }
        assigned
    }

    /// The whole per-tick maintenance pass.
    pub fn update(&mut self, haulers: &[AgentName], world: &dyn World, config: &LogisticsConfig) -> NetworkUpdate {
        let expired = self.expire(world.tick());
        self.sync_haulers(haulers, world);

        let stale: Vec<AgentName> = self.stale.iter().cloned().collect();
        for hauler in stale {
            if let Err(e) = self.rebuild_plan(&hauler, world) {
                debug!(hauler = %hauler, error = %e, "stale plan not rebuilt");
                self.stale.remove(&hauler);
            }
        }

        let assigned = self.assign(world, config);
        NetworkUpdate { expired, assigned }
    }

    /// Remove legs for `ids` from every plan; touched plans go stale.
    fn strip(&mut self, ids: &[RequestId]) {
        if ids.is_empty() {
            return;
        }
        for (hauler, plan) in self.plans.iter_mut() {
            if ids.iter().any(|&id| plan.contains(id)) {
                plan.retain_steps(|s| !ids.contains(&s.request));
                self.stale.insert(hauler.clone());
            }
        }
    }
}

/// First hauler from `cursor` onwards (wrapping) that can take `req`.
/// Returns the hauler's pool index alongside the projected leg.
fn pick_round_robin(
    plans:     &BTreeMap<AgentName, RoutePlan>,
    req:       &TransferRequest,
    world:     &dyn World,
    max_steps: usize,
    cursor:    usize,
) -> Option<(usize, AgentName, PlanStep)> {
    let n = plans.len();
    let haulers: Vec<(&AgentName, &RoutePlan)> = plans.iter().collect();
    (0..n).find_map(|offset| {
        let idx = (cursor + offset) % n;
        let (hauler, plan) = haulers[idx];
        candidate_step(plan, req, world, max_steps).map(|step| (idx, hauler.clone(), step))
    })
}

/// The hauler whose plan would complete `req` earliest.  Ties go to the
/// first hauler in name order.
fn pick_nearest(
    plans:     &BTreeMap<AgentName, RoutePlan>,
    req:       &TransferRequest,
    world:     &dyn World,
    max_steps: usize,
) -> Option<(AgentName, PlanStep)> {
    let mut best: Option<(Tick, AgentName, PlanStep)> = None;
    for (hauler, plan) in plans {
        let Some(step) = candidate_step(plan, req, world, max_steps) else { continue };
        let done = plan.end().time + step.duration as u64;
        if best.as_ref().is_none_or(|(t, _, _)| done < *t) {
            best = Some((done, hauler.clone(), step));
        }
    }
    best.map(|(_, hauler, step)| (hauler, step))
}

fn candidate_step(plan: &RoutePlan, req: &TransferRequest, world: &dyn World, max_steps: usize) -> Option<PlanStep> {
    if plan.len() >= max_steps {
        return None;
    }
    project_step(plan, req, world).ok().filter(|s| s.payload != 0)
}
