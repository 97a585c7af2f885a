use hive_core::AgentName;
use hive_world::{Action, Agent, ObjectKind, ResultCode, WorldActions, WorldObject};

use super::can_spend_energy;
use crate::{Behavior, BehaviorRecord, Settings};

/// Spend energy on a construction site.
pub struct BuildBehavior;

impl Behavior for BuildBehavior {
    fn settings(&self) -> Settings {
        Settings { timeout: 500, range: 3, blind: false }
    }

    fn is_valid_task(&self, agent: &Agent, _record: &BehaviorRecord) -> bool {
        can_spend_energy(agent)
    }

    fn is_valid_target(&self, _agent: &Agent, target: &WorldObject, _record: &BehaviorRecord) -> bool {
        matches!(target.kind, ObjectKind::ConstructionSite { .. })
    }

    fn work(&self, agent: &AgentName, record: &mut BehaviorRecord, world: &mut dyn WorldActions) -> ResultCode {
        world.perform(agent.as_str(), Action::Build(record.target.id))
    }
}
