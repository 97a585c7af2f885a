//! The persisted per-agent task record.
//!
//! A `BehaviorRecord` is plain data: which behavior, aimed at what, since
//! when, with which options, plus a small behavior-private scratch area.
//! Everything executable is re-derived from `kind` each tick.

use serde::{Deserialize, Serialize};

use hive_core::{ObjectId, Pos, RequestId, ResourceKind, Tick};
use hive_world::WorldObject;

/// Closed set of leaf behaviors.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    Harvest,
    /// Deliver a resource into a target store.
    Transfer,
    Withdraw,
    Pickup,
    Build,
    Repair,
    Upgrade,
    /// Wait near a target.
    Idle,
}

impl BehaviorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorKind::Harvest  => "harvest",
            BehaviorKind::Transfer => "transfer",
            BehaviorKind::Withdraw => "withdraw",
            BehaviorKind::Pickup   => "pickup",
            BehaviorKind::Build    => "build",
            BehaviorKind::Repair   => "repair",
            BehaviorKind::Upgrade  => "upgrade",
            BehaviorKind::Idle     => "idle",
        }
    }
}

impl std::fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target id plus a positional snapshot taken at assignment time.
///
/// `pos` lets an agent keep walking toward the target while the target's
/// room is not observable.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TargetRef {
    pub id:  ObjectId,
    pub pos: Pos,
}

impl From<&WorldObject> for TargetRef {
    fn from(obj: &WorldObject) -> Self {
        Self { id: obj.id, pos: obj.pos }
    }
}

/// Per-instance options.  All fields are optional; unset fields fall back
/// to the behavior's defaults.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorOptions {
    /// Keep the task alive while the target's room is unobservable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blind:    Option<bool>,
    /// Resource moved by transfer and withdraw.  Defaults to energy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceKind>,
    /// Amount moved; `None` moves as much as possible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount:   Option<u32>,
}

impl BehaviorOptions {
    pub fn blind(mut self, blind: bool) -> Self {
        self.blind = Some(blind);
        self
    }

    pub fn resource(mut self, resource: ResourceKind) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn amount(mut self, amount: u32) -> Self {
        self.amount = Some(amount);
        self
    }

    #[inline]
    pub fn resource_or_energy(&self) -> ResourceKind {
        self.resource.unwrap_or_default()
    }
}

/// Behavior-private scratch state.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskData {
    /// Container a harvester stands on so overflow lands in it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff:   Option<ObjectId>,
    /// Logistics request this leg serves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request:   Option<RequestId>,
    /// Set by one-shot behaviors once their action succeeded.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub completed: bool,
}

/// One task frame.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BehaviorRecord {
    #[serde(rename = "name")]
    pub kind:    BehaviorKind,
    pub target:  TargetRef,
    /// Assignment tick, for timeout enforcement.
    pub tick:    Tick,
    #[serde(default)]
    pub options: BehaviorOptions,
    #[serde(default)]
    pub data:    TaskData,
}

impl BehaviorRecord {
    /// Start a task against `target` at tick `now`.
    pub fn new(kind: BehaviorKind, target: impl Into<TargetRef>, options: BehaviorOptions, now: Tick) -> Self {
        Self {
            kind,
            target: target.into(),
            tick: now,
            options,
            data: TaskData::default(),
        }
    }

    pub fn with_data(mut self, data: TaskData) -> Self {
        self.data = data;
        self
    }

    /// `true` if `other` describes the same task (kind, target and options),
    /// regardless of when it was assigned or how far it has progressed.
    pub fn same_task(&self, other: &BehaviorRecord) -> bool {
        self.kind == other.kind && self.target.id == other.target.id && self.options == other.options
    }
}
