//! The `Behavior` trait: one implementation per [`BehaviorKind`].
//!
//! Implementations are stateless unit structs.  All per-agent state lives in
//! the [`BehaviorRecord`] they are handed, so the same behavior value serves
//! every agent and nothing has to survive between ticks.

use hive_core::{AgentName, Pos};
use hive_world::{Agent, ResultCode, World, WorldActions, WorldObject};

use crate::{BehaviorKind, BehaviorRecord, behaviors};

/// Static parameters of a behavior.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Settings {
    /// Ticks after assignment at which the task expires.
    pub timeout: u64,
    /// Chebyshev distance from the target at which `work` is possible.
    pub range:   u32,
    /// Keep the task alive while the target's room is unobservable.
    pub blind:   bool,
}

/// A reusable task definition.
///
/// # Required methods
///
/// [`settings`][Self::settings], [`is_valid_task`][Self::is_valid_task],
/// [`is_valid_target`][Self::is_valid_target] and [`work`][Self::work].
/// [`is_valid`][Self::is_valid] and [`run`][Self::run] compose them and are
/// not meant to be overridden.
pub trait Behavior {
    fn settings(&self) -> Settings;

    /// Agent-side precondition (has the right parts, carries something, …).
    fn is_valid_task(&self, agent: &Agent, record: &BehaviorRecord) -> bool;

    /// Target-side precondition, checked only when the target resolves.
    fn is_valid_target(&self, agent: &Agent, target: &WorldObject, record: &BehaviorRecord) -> bool;

    /// Perform the leaf action.  Called only when the agent is in range.
    fn work(&self, agent: &AgentName, record: &mut BehaviorRecord, world: &mut dyn WorldActions) -> ResultCode;

    /// Where the agent has to stand, as `(position, range)`.
    ///
    /// Defaults to the target's live position (or its snapshot when it does
    /// not resolve) and `settings().range`.
    fn destination(&self, record: &BehaviorRecord, world: &dyn World) -> (Pos, u32) {
        let pos = world.object(record.target.id).map_or(record.target.pos, |o| o.pos);
        (pos, self.settings().range)
    }

    /// Task, timeout and target checks combined.
    ///
    /// A target that does not resolve is still acceptable when its
    /// last-known room is unobservable and the task is blind.
    fn is_valid(&self, agent: &Agent, record: &BehaviorRecord, world: &dyn World) -> bool {
        let settings = self.settings();
        if !self.is_valid_task(agent, record) {
            return false;
        }
        if world.tick().since(record.tick) >= settings.timeout {
            return false;
        }
        match world.object(record.target.id) {
            Some(target) => self.is_valid_target(agent, target, record),
            None => {
                let blind = settings.blind || record.options.blind == Some(true);
                blind && !world.is_visible(record.target.pos.room())
            }
        }
    }

    /// Move toward the destination, or work once in range.  Never both in
    /// the same tick.
    fn run(&self, agent: &AgentName, record: &mut BehaviorRecord, world: &mut dyn WorldActions) -> ResultCode {
        let Some(pos) = world.agent(agent.as_str()).map(|a| a.pos) else {
            return ResultCode::InvalidTarget;
        };
        let (dest, range) = self.destination(record, world.as_world());
        if !pos.in_range_to(dest, range) {
            return world.move_toward(agent.as_str(), dest, range);
        }
        self.work(agent, record, world)
    }
}

impl BehaviorKind {
    /// The implementation behind this kind.
    pub fn behavior(self) -> &'static dyn Behavior {
        match self {
            BehaviorKind::Harvest  => &behaviors::HarvestBehavior,
            BehaviorKind::Transfer => &behaviors::TransferBehavior,
            BehaviorKind::Withdraw => &behaviors::WithdrawBehavior,
            BehaviorKind::Pickup   => &behaviors::PickupBehavior,
            BehaviorKind::Build    => &behaviors::BuildBehavior,
            BehaviorKind::Repair   => &behaviors::RepairBehavior,
            BehaviorKind::Upgrade  => &behaviors::UpgradeBehavior,
            BehaviorKind::Idle     => &behaviors::IdleBehavior,
        }
    }

    #[inline]
    pub fn settings(self) -> Settings {
        self.behavior().settings()
    }
}

impl BehaviorRecord {
    /// [`Behavior::is_valid`] for this record's kind.
    pub fn is_valid(&self, agent: &Agent, world: &dyn World) -> bool {
        self.kind.behavior().is_valid(agent, self, world)
    }

    /// [`Behavior::run`] for this record's kind.
    pub fn run(&mut self, agent: &AgentName, world: &mut dyn WorldActions) -> ResultCode {
        self.kind.behavior().run(agent, self, world)
    }
}
