use serde::{Deserialize, Serialize};

use hive_behavior::{BehaviorKind, BehaviorOptions, BehaviorRecord, TaskData};
use hive_core::{BodyPart, HiveConfig, ObjectId, Pos};
use hive_spawn::{BodyOptions, BodySpec};
use hive_store::MissionRecord;
use hive_world::{ObjectKind, WorldObject};

use super::{energy_sink, target_ref};
use crate::{Crew, MissionContext, MissionKind, MissionPolicy, MissionResult, Viability};

/// Harvest one energy source.
///
/// With a container next to the source a single large miner parks on it and
/// never walks; without one, up to two miners carry their own energy to the
/// nearest spawn or extension.
pub struct HarvestMission;

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct HarvestData {
    pub source:    ObjectId,
    /// Last seen position of the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos:       Option<Pos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ObjectId>,
}

impl HarvestData {
    pub fn new(source: &WorldObject) -> Self {
        Self { source: source.id, pos: Some(source.pos), container: None }
    }
}

impl MissionPolicy for HarvestMission {
    type Data = HarvestData;

    const KIND: MissionKind = MissionKind::Harvest;

    fn refresh(&self, data: &mut HarvestData, _record: &MissionRecord, ctx: &MissionContext<'_>) -> Viability {
        let world = ctx.world;
        match world.object(data.source) {
            Some(src) if src.is_source() => {
                data.pos = Some(src.pos);
                data.container = world
                    .find_in_range(src.pos, 1)
                    .into_iter()
                    .filter_map(|id| world.object(id))
                    .find(|o| o.kind == ObjectKind::Container)
                    .map(|o| o.id);
                Viability::Viable
            }
            Some(_) => Viability::non_viable("target is not a source"),
            None => match data.pos {
                Some(pos) if !world.is_visible(pos.room()) => Viability::Viable,
                _ => Viability::non_viable("source no longer exists"),
            },
        }
    }

    fn max_creeps(&self, data: &HarvestData, _record: &MissionRecord, _ctx: &MissionContext<'_>) -> usize {
        if data.container.is_some() { 1 } else { 2 }
    }

    fn body(&self, _data: &HarvestData) -> BodySpec {
        use BodyPart::*;
        BodySpec::new("miner", vec![Work, Work, Carry, Move])
            .with_options(BodyOptions { max_units: Some(3), ..Default::default() })
    }

    fn priority(&self, _data: &HarvestData, config: &HiveConfig) -> u32 {
        config.default_priority.saturating_sub(5)
    }

    fn creep_actions(&self, data: &mut HarvestData, crew: &Crew<'_>, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        let world = ctx.world;
        let now = ctx.tick();
        let Some(source) = target_ref(world, data.source, data.pos) else { return Ok(()) };
        let task = TaskData { dropoff: data.container, ..Default::default() };

        for name in &crew.ready {
            let Some(agent) = world.agent(name.as_str()) else { continue };
            ctx.prune_tasks(name);
            let harvest = BehaviorRecord::new(BehaviorKind::Harvest, source, BehaviorOptions::default(), now)
                .with_data(task.clone());
            ctx.assign(name, harvest);

            if data.container.is_none() && agent.store.is_full() {
                if let Some(sink) = energy_sink(world, agent) {
                    ctx.push(name, BehaviorRecord::new(BehaviorKind::Transfer, sink, BehaviorOptions::default(), now));
                }
            }
        }
        Ok(())
    }
}
