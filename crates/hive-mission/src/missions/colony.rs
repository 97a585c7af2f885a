use serde::{Deserialize, Serialize};
use tracing::debug;

use hive_core::{ResourceKind, RoomCoord};
use hive_logistics::NewRequest;
use hive_spawn::BodySpec;
use hive_store::MissionRecord;
use hive_world::ObjectKind;

use super::{BuildData, HarvestData, LogisticsData, UpgradeData};
use crate::{Crew, MissionContext, MissionKind, MissionPolicy, MissionResult, Viability, init_mission};

/// Top-level operation of one colony room.
///
/// Owns no agents.  Every tick it makes sure the room's missions exist
/// (one harvest per source, upgrade, build while sites remain, logistics)
/// and posts the room's supply and demand to the colony's logistics
/// network.
pub struct ColonyOperation;

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ColonyData {
    pub room:  RoomCoord,
    /// Name of the spawn the colony's missions request agents from.
    pub spawn: String,
}

impl MissionPolicy for ColonyOperation {
    type Data = ColonyData;

    const KIND: MissionKind = MissionKind::Colony;

    fn refresh(&self, data: &mut ColonyData, _record: &MissionRecord, ctx: &MissionContext<'_>) -> Viability {
        let world = ctx.world;
        if !world.is_visible(data.room) {
            return Viability::Viable;
        }
        let alive = world
            .objects_in_room(data.room)
            .iter()
            .any(|o| o.spawn_name() == Some(data.spawn.as_str()));
        if alive { Viability::Viable } else { Viability::non_viable("spawn destroyed") }
    }

    fn max_creeps(&self, _data: &ColonyData, _record: &MissionRecord, _ctx: &MissionContext<'_>) -> usize {
        0
    }

    fn body(&self, _data: &ColonyData) -> BodySpec {
        BodySpec::new("none", vec![])
    }

    fn creep_actions(&self, data: &mut ColonyData, crew: &Crew<'_>, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        let world = ctx.world;
        if !world.is_visible(data.room) {
            return Ok(());
        }
        let colony = crew.colony;
        let spawn = Some(data.spawn.as_str());
        let objects = world.objects_in_room(data.room);
        let memory = &mut *ctx.memory;

        for source in objects.iter().filter(|o| o.is_source()) {
            let name = format!("harvest-{colony}-{}", source.id.0);
            init_mission(memory, &name, MissionKind::Harvest, colony, spawn, &HarvestData::new(source))?;
        }
        if let Some(controller) = objects.iter().find(|o| matches!(o.kind, ObjectKind::Controller { .. })) {
            let name = format!("upgrade-{colony}");
            init_mission(memory, &name, MissionKind::Upgrade, colony, spawn, &UpgradeData::new(controller))?;
        }
        if objects.iter().any(|o| matches!(o.kind, ObjectKind::ConstructionSite { .. })) {
            let name = format!("build-{colony}");
            init_mission(memory, &name, MissionKind::Build, colony, spawn, &BuildData::new(data.room))?;
        }
        let name = format!("logistics-{colony}");
        init_mission(memory, &name, MissionKind::Logistics, colony, spawn, &LogisticsData::default())?;

        let now = world.tick();
        let config = &ctx.config.logistics;
        let network = memory.network_mut(colony);
        let mut surplus = 0;
        let mut posted = 0;
        for obj in &objects {
            let request = match obj.kind {
                ObjectKind::Spawn { .. } | ObjectKind::Extension if obj.store.free_capacity() > 0 => {
                    NewRequest::delivery(obj.id, ResourceKind::Energy, obj.store.free_capacity())
                }
                ObjectKind::Container | ObjectKind::Pile if obj.energy() > 0 => {
                    surplus += obj.energy();
                    NewRequest::pickup(obj.id, ResourceKind::Energy, obj.energy())
                }
                _ => continue,
            };
            network.register(request, now, config);
            posted += 1;
        }
        // Whatever nobody else asked for ends up in storage.
        if let Some(storage) = objects.iter().find(|o| o.kind == ObjectKind::Storage) {
            let room = storage.store.free_capacity().min(surplus);
            if room > 0 {
                network.register(NewRequest::delivery(storage.id, ResourceKind::Energy, room), now, config);
                posted += 1;
            }
        }
        debug!(mission = crew.mission, posted, "requests posted");
        Ok(())
    }
}
