use serde::{Deserialize, Serialize};

use hive_behavior::{BehaviorKind, BehaviorOptions, BehaviorRecord};
use hive_core::{BodyPart, ObjectId, Pos};
use hive_spawn::{BodyOptions, BodySpec};
use hive_store::MissionRecord;
use hive_world::{ObjectKind, WorldObject};

use super::{refuel_task, target_ref};
use crate::{Crew, MissionContext, MissionKind, MissionPolicy, MissionResult, Viability};

/// Stored energy in the controller's room above which a second upgrader is
/// worth feeding.
const SECOND_UPGRADER_ENERGY: u32 = 1_000;

/// Upgrade the colony controller.
pub struct UpgradeMission;

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct UpgradeData {
    pub controller: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos:        Option<Pos>,
}

impl UpgradeData {
    pub fn new(controller: &WorldObject) -> Self {
        Self { controller: controller.id, pos: Some(controller.pos) }
    }
}

impl MissionPolicy for UpgradeMission {
    type Data = UpgradeData;

    const KIND: MissionKind = MissionKind::Upgrade;

    fn refresh(&self, data: &mut UpgradeData, _record: &MissionRecord, ctx: &MissionContext<'_>) -> Viability {
        match ctx.world.object(data.controller) {
            Some(c) if matches!(c.kind, ObjectKind::Controller { .. }) => {
                data.pos = Some(c.pos);
                Viability::Viable
            }
            Some(_) => Viability::non_viable("target is not a controller"),
            None => match data.pos {
                Some(pos) if !ctx.world.is_visible(pos.room()) => Viability::Viable,
                _ => Viability::non_viable("controller lost"),
            },
        }
    }

    fn max_creeps(&self, data: &UpgradeData, _record: &MissionRecord, ctx: &MissionContext<'_>) -> usize {
        let Some(pos) = data.pos else { return 1 };
        let stored: u32 = ctx
            .world
            .objects_in_room(pos.room())
            .into_iter()
            .filter(|o| matches!(o.kind, ObjectKind::Storage | ObjectKind::Container))
            .map(|o| o.energy())
            .sum();
        if stored >= SECOND_UPGRADER_ENERGY { 2 } else { 1 }
    }

    fn body(&self, _data: &UpgradeData) -> BodySpec {
        use BodyPart::*;
        BodySpec::new("upgrader", vec![Work, Carry, Move])
            .with_options(BodyOptions { max_units: Some(5), ..Default::default() })
    }

    fn creep_actions(&self, data: &mut UpgradeData, crew: &Crew<'_>, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        let world = ctx.world;
        let now = ctx.tick();
        let Some(controller) = target_ref(world, data.controller, data.pos) else { return Ok(()) };

        for name in &crew.ready {
            let Some(agent) = world.agent(name.as_str()) else { continue };
            ctx.prune_tasks(name);
            ctx.assign(name, BehaviorRecord::new(BehaviorKind::Upgrade, controller, BehaviorOptions::default(), now));
            if agent.energy() == 0 {
                if let Some(refuel) = refuel_task(world, agent) {
                    ctx.push(name, refuel);
                }
            }
        }
        Ok(())
    }
}
