use hive_core::AgentName;
use hive_world::{Agent, ResultCode, WorldActions, WorldObject};

use crate::{Behavior, BehaviorRecord, Settings};

/// Stand next to the target for a while.  Used to park agents that have
/// nothing to do so they re-evaluate shortly.
pub struct IdleBehavior;

impl Behavior for IdleBehavior {
    fn settings(&self) -> Settings {
        Settings { timeout: 10, range: 1, blind: false }
    }

    fn is_valid_task(&self, _agent: &Agent, _record: &BehaviorRecord) -> bool {
        true
    }

    fn is_valid_target(&self, _agent: &Agent, _target: &WorldObject, _record: &BehaviorRecord) -> bool {
        true
    }

    fn work(&self, _agent: &AgentName, _record: &mut BehaviorRecord, _world: &mut dyn WorldActions) -> ResultCode {
        ResultCode::Ok
    }
}
