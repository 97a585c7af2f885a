use hive_core::AgentName;
use hive_world::{Action, Agent, ResultCode, WorldActions, WorldObject};

use crate::{Behavior, BehaviorRecord, Settings};

/// Take a resource out of a store.  One-shot.
pub struct WithdrawBehavior;

impl Behavior for WithdrawBehavior {
    fn settings(&self) -> Settings {
        Settings { timeout: 50, range: 1, blind: false }
    }

    fn is_valid_task(&self, agent: &Agent, record: &BehaviorRecord) -> bool {
        !record.data.completed && agent.store.free_capacity() > 0
    }

    fn is_valid_target(&self, _agent: &Agent, target: &WorldObject, record: &BehaviorRecord) -> bool {
        !target.is_source() && target.store.get(record.options.resource_or_energy()) > 0
    }

    fn work(&self, agent: &AgentName, record: &mut BehaviorRecord, world: &mut dyn WorldActions) -> ResultCode {
        let action = Action::Withdraw {
            target:   record.target.id,
            resource: record.options.resource_or_energy(),
            amount:   record.options.amount,
        };
        let code = world.perform(agent.as_str(), action);
        if code.is_ok() {
            record.data.completed = true;
        }
        code
    }
}
