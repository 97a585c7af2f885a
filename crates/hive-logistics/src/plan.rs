//! Route plans and the state reducer that projects them.
//!
//! A plan is a start snapshot of the hauler plus an ordered list of legs.
//! Folding [`plan_state_reducer`] over the legs from `start` always yields
//! `end`; every mutation goes through [`RoutePlan::push_step`] or
//! [`RoutePlan::reset`] so the two can never drift apart.

use serde::{Deserialize, Serialize};

use hive_core::{ObjectId, Pos, RequestId, ResourceKind, Store, Tick};
use hive_world::Agent;

/// Projected hauler state at some point of a plan.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PlanState {
    pub pos:           Pos,
    pub time:          Tick,
    pub store:         Store,
    pub free_capacity: u32,
}

impl PlanState {
    /// The hauler's actual state right now.
    pub fn from_agent(agent: &Agent, now: Tick) -> Self {
        Self {
            pos:           agent.pos,
            time:          now,
            store:         agent.store.clone(),
            free_capacity: agent.store.free_capacity(),
        }
    }
}

/// One leg of an itinerary.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PlanStep {
    #[serde(rename = "request_id")]
    pub request:  RequestId,
    pub target:   ObjectId,
    /// Travel ticks from the previous projected position.
    pub duration: u32,
    /// Target position.
    pub pos:      Pos,
    pub resource: ResourceKind,
    /// Positive when gained (pickup), negative when handed over (delivery).
    pub payload:  i64,
}

impl PlanStep {
    /// Absolute amount moved by this leg.
    #[inline]
    pub fn amount(&self) -> u32 {
        self.payload.unsigned_abs() as u32
    }
}

/// Apply one leg to a projected state.
pub fn plan_state_reducer(state: &PlanState, step: &PlanStep) -> PlanState {
    let mut next = state.clone();
    next.pos = step.pos;
    next.time = state.time + step.duration as u64;
    next.store.apply_delta(step.resource, step.payload);
    next.free_capacity = (state.free_capacity as i64 - step.payload).max(0) as u32;
    next
}

/// A hauler's projected itinerary.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RoutePlan {
    pub capacity: u32,
    start:        PlanState,
    steps:        Vec<PlanStep>,
    end:          PlanState,
}

impl RoutePlan {
    /// An empty plan starting from `start`.
    pub fn new(capacity: u32, start: PlanState) -> Self {
        Self { capacity, end: start.clone(), start, steps: Vec::new() }
    }

    pub fn for_agent(agent: &Agent, now: Tick) -> Self {
        Self::new(agent.store.capacity, PlanState::from_agent(agent, now))
    }

    pub fn start(&self) -> &PlanState {
        &self.start
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn end(&self) -> &PlanState {
        &self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn contains(&self, request: RequestId) -> bool {
        self.steps.iter().any(|s| s.request == request)
    }

    /// Append a leg and fold it into `end`.
    pub fn push_step(&mut self, step: PlanStep) {
        self.end = plan_state_reducer(&self.end, &step);
        self.steps.push(step);
    }

    /// Drop every leg and start over from `start`.
    pub fn reset(&mut self, capacity: u32, start: PlanState) {
        *self = Self::new(capacity, start);
    }

    /// Keep only the legs matching `keep`, re-folding `end`.
    pub fn retain_steps(&mut self, keep: impl FnMut(&PlanStep) -> bool) {
        self.steps.retain(keep);
        self.end = self.fold();
    }

    /// Fold every leg over `start`.
    pub fn fold(&self) -> PlanState {
        self.steps.iter().fold(self.start.clone(), |s, step| plan_state_reducer(&s, step))
    }

    /// Net payload already planned against `target` for `resource`.
    pub(crate) fn planned_against(&self, target: ObjectId, resource: ResourceKind) -> i64 {
        self.steps
            .iter()
            .filter(|s| s.target == target && s.resource == resource)
            .map(|s| s.payload)
            .sum()
    }
}
