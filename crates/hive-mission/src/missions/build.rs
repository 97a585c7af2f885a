use serde::{Deserialize, Serialize};

use hive_behavior::{BehaviorKind, BehaviorOptions, BehaviorRecord};
use hive_core::{BodyPart, HiveConfig, ObjectId, RoomCoord};
use hive_spawn::{BodyOptions, BodySpec};
use hive_store::MissionRecord;
use hive_world::ObjectKind;

use super::refuel_task;
use crate::{Crew, MissionContext, MissionKind, MissionPolicy, MissionResult, Viability};

/// Work through a room's construction sites.  The first builder always
/// builds; later ones repair the most damaged structure while one exists.
/// Retires once no site is left.
pub struct BuildMission;

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct BuildData {
    pub room:  RoomCoord,
    /// Open sites, oldest first.
    #[serde(default)]
    pub sites: Vec<ObjectId>,
}

impl BuildData {
    pub fn new(room: RoomCoord) -> Self {
        Self { room, sites: Vec::new() }
    }
}

impl MissionPolicy for BuildMission {
    type Data = BuildData;

    const KIND: MissionKind = MissionKind::Build;

    fn refresh(&self, data: &mut BuildData, _record: &MissionRecord, ctx: &MissionContext<'_>) -> Viability {
        if !ctx.world.is_visible(data.room) {
            return Viability::Viable;
        }
        let mut sites: Vec<ObjectId> = ctx
            .world
            .objects_in_room(data.room)
            .into_iter()
            .filter(|o| matches!(o.kind, ObjectKind::ConstructionSite { .. }))
            .map(|o| o.id)
            .collect();
        sites.sort_unstable();
        data.sites = sites;
        if data.sites.is_empty() {
            Viability::non_viable("no construction sites left")
        } else {
            Viability::Viable
        }
    }

    fn max_creeps(&self, data: &BuildData, _record: &MissionRecord, _ctx: &MissionContext<'_>) -> usize {
        data.sites.len().min(2)
    }

    fn body(&self, _data: &BuildData) -> BodySpec {
        use BodyPart::*;
        BodySpec::new("builder", vec![Work, Carry, Move])
            .with_options(BodyOptions { max_units: Some(4), ..Default::default() })
    }

    fn priority(&self, _data: &BuildData, config: &HiveConfig) -> u32 {
        config.default_priority + 2
    }

    fn creep_actions(&self, data: &mut BuildData, crew: &Crew<'_>, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        let world = ctx.world;
        let now = ctx.tick();
        let objects = world.objects_in_room(data.room);
        let damaged = objects
            .iter()
            .filter(|o| o.needs_repair())
            .min_by_key(|o| (o.hits as u64 * 1_000 / o.hits_max.max(1) as u64, o.id));

        for (index, name) in crew.ready.iter().enumerate() {
            let Some(agent) = world.agent(name.as_str()) else { continue };
            let task = match damaged {
                Some(target) if index > 0 => {
                    BehaviorRecord::new(BehaviorKind::Repair, *target, BehaviorOptions::default(), now)
                }
                _ => {
                    let Some(site) = data.sites.get(index % data.sites.len().max(1)).and_then(|&id| world.object(id))
                    else {
                        continue;
                    };
                    BehaviorRecord::new(BehaviorKind::Build, site, BehaviorOptions::default(), now)
                }
            };
            ctx.prune_tasks(name);
            ctx.assign(name, task);
            if agent.energy() == 0 {
                if let Some(refuel) = refuel_task(world, agent) {
                    ctx.push(name, refuel);
                }
            }
        }
        Ok(())
    }
}
