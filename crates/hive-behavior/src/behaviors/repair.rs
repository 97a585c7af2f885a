use hive_core::AgentName;
use hive_world::{Action, Agent, ResultCode, WorldActions, WorldObject};

use super::can_spend_energy;
use crate::{Behavior, BehaviorRecord, Settings};

/// Restore hit points of a damaged structure.
pub struct RepairBehavior;

impl Behavior for RepairBehavior {
    fn settings(&self) -> Settings {
        Settings { timeout: 500, range: 3, blind: false }
    }

    fn is_valid_task(&self, agent: &Agent, _record: &BehaviorRecord) -> bool {
        can_spend_energy(agent)
    }

    fn is_valid_target(&self, _agent: &Agent, target: &WorldObject, _record: &BehaviorRecord) -> bool {
        target.needs_repair()
    }

    fn work(&self, agent: &AgentName, record: &mut BehaviorRecord, world: &mut dyn WorldActions) -> ResultCode {
        world.perform(agent.as_str(), Action::Repair(record.target.id))
    }
}
