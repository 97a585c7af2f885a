use hive_core::AgentName;
use hive_world::{Action, Agent, ObjectKind, ResultCode, WorldActions, WorldObject};

use crate::{Behavior, BehaviorRecord, Settings};

/// Pick up a pile from the ground.  One-shot.
pub struct PickupBehavior;

impl Behavior for PickupBehavior {
    fn settings(&self) -> Settings {
        Settings { timeout: 50, range: 1, blind: false }
    }

    fn is_valid_task(&self, agent: &Agent, record: &BehaviorRecord) -> bool {
        !record.data.completed && agent.store.free_capacity() > 0
    }

    fn is_valid_target(&self, _agent: &Agent, target: &WorldObject, _record: &BehaviorRecord) -> bool {
        target.kind == ObjectKind::Pile && !target.store.is_empty()
    }

    fn work(&self, agent: &AgentName, record: &mut BehaviorRecord, world: &mut dyn WorldActions) -> ResultCode {
        let code = world.perform(agent.as_str(), Action::Pickup(record.target.id));
        if code.is_ok() {
            record.data.completed = true;
        }
        code
    }
}
