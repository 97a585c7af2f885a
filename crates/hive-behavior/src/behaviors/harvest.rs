use hive_core::{AgentName, BodyPart, Pos};
use hive_world::{Action, Agent, ObjectKind, ResultCode, World, WorldActions, WorldObject};

use crate::{Behavior, BehaviorRecord, Settings};

/// Harvest energy from a source.
///
/// With `data.dropoff` set to a container, the harvester parks on the
/// container's tile so overflow lands in it and it keeps working while full.
pub struct HarvestBehavior;

impl Behavior for HarvestBehavior {
    fn settings(&self) -> Settings {
        Settings { timeout: 1_500, range: 1, blind: true }
    }

    fn is_valid_task(&self, agent: &Agent, record: &BehaviorRecord) -> bool {
        if agent.parts(BodyPart::Work) == 0 {
            return false;
        }
        agent.store.capacity == 0 || !agent.store.is_full() || record.data.dropoff.is_some()
    }

    fn is_valid_target(&self, _agent: &Agent, target: &WorldObject, _record: &BehaviorRecord) -> bool {
        target.is_source()
    }

    fn destination(&self, record: &BehaviorRecord, world: &dyn World) -> (Pos, u32) {
        let container = record
            .data
            .dropoff
            .and_then(|id| world.object(id))
            .filter(|c| c.kind == ObjectKind::Container);
        match container {
            Some(c) => (c.pos, 0),
            None => {
                let pos = world.object(record.target.id).map_or(record.target.pos, |o| o.pos);
                (pos, self.settings().range)
            }
        }
    }

    fn work(&self, agent: &AgentName, record: &mut BehaviorRecord, world: &mut dyn WorldActions) -> ResultCode {
        world.perform(agent.as_str(), Action::Harvest(record.target.id))
    }
}
