//! Concrete mission policies.
//!
//! | Policy             | Pool        | Task                                        |
//! |--------------------|-------------|---------------------------------------------|
//! | `ColonyOperation`  | none        | keeps the other missions alive, feeds logistics |
//! | `HarvestMission`   | miners      | harvest one source                          |
//! | `UpgradeMission`   | upgraders   | upgrade the controller                      |
//! | `BuildMission`     | builders    | build sites, extra members repair           |
//! | `LogisticsMission` | haulers     | walk the logistics network's route plans    |

mod build;
mod colony;
mod harvest;
mod logistics;
mod upgrade;

pub use build::{BuildData, BuildMission};
pub use colony::{ColonyData, ColonyOperation};
pub use harvest::{HarvestData, HarvestMission};
pub use logistics::{LogisticsData, LogisticsMission};
pub use upgrade::{UpgradeData, UpgradeMission};

use hive_behavior::{BehaviorKind, BehaviorOptions, BehaviorRecord};
use hive_core::{ObjectId, Pos, ResourceKind};
use hive_world::{Agent, ObjectKind, World, WorldObject};

/// Where an empty worker gets energy: the closest pile, else storage, else
/// the fullest container.
pub(crate) fn refuel_task(world: &dyn World, agent: &Agent) -> Option<BehaviorRecord> {
    let now = world.tick();
    let objects = world.objects_in_room(agent.pos.room());

    let pile = objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Pile && o.energy() > 0)
        .min_by_key(|o| agent.pos.range_to(o.pos));
    if let Some(pile) = pile {
        return Some(BehaviorRecord::new(BehaviorKind::Pickup, *pile, BehaviorOptions::default(), now));
    }

    objects
        .iter()
        .filter(|o| matches!(o.kind, ObjectKind::Storage | ObjectKind::Container) && o.energy() > 0)
        .max_by_key(|o| (o.kind == ObjectKind::Storage, o.energy()))
        .map(|o| {
            let options = BehaviorOptions::default().resource(ResourceKind::Energy);
            BehaviorRecord::new(BehaviorKind::Withdraw, *o, options, now)
        })
}

/// Closest spawn or extension in the agent's room that still takes energy.
pub(crate) fn energy_sink<'w>(world: &'w dyn World, agent: &Agent) -> Option<&'w WorldObject> {
    world
        .objects_in_room(agent.pos.room())
        .into_iter()
        .filter(|o| matches!(o.kind, ObjectKind::Spawn { .. } | ObjectKind::Extension))
        .filter(|o| o.store.free_capacity() > 0)
        .min_by_key(|o| (agent.pos.range_to(o.pos), o.id))
}

/// Target of a task whose object may be out of sight: the live object when
/// visible, else the cached position.
pub(crate) fn target_ref(world: &dyn World, id: ObjectId, last_seen: Option<Pos>) -> Option<hive_behavior::TargetRef> {
    match world.object(id) {
        Some(obj) => Some(obj.into()),
        None => last_seen.map(|pos| hive_behavior::TargetRef { id, pos }),
    }
}
