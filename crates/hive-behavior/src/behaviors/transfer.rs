use hive_core::AgentName;
use hive_world::{Action, Agent, ObjectKind, ResultCode, WorldActions, WorldObject};

use crate::{Behavior, BehaviorRecord, Settings};

/// Deliver a resource into a target store.  One-shot: done after the first
/// successful transfer.
pub struct TransferBehavior;

impl Behavior for TransferBehavior {
    fn settings(&self) -> Settings {
        Settings { timeout: 50, range: 1, blind: false }
    }

    fn is_valid_task(&self, agent: &Agent, record: &BehaviorRecord) -> bool {
        !record.data.completed && agent.store.get(record.options.resource_or_energy()) > 0
    }

    fn is_valid_target(&self, _agent: &Agent, target: &WorldObject, _record: &BehaviorRecord) -> bool {
        let accepts = !matches!(
            target.kind,
            ObjectKind::Source { .. } | ObjectKind::ConstructionSite { .. } | ObjectKind::Pile
        );
        accepts && target.store.free_capacity() > 0
    }

    fn work(&self, agent: &AgentName, record: &mut BehaviorRecord, world: &mut dyn WorldActions) -> ResultCode {
        let action = Action::Transfer {
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
