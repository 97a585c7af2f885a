use serde::{Deserialize, Serialize};
use tracing::debug;

use hive_behavior::{BehaviorKind, BehaviorOptions, BehaviorRecord, TaskData};
use hive_core::{BodyPart, HiveConfig};
use hive_logistics::PlanStep;
use hive_spawn::{BodyOptions, BodySpec};
use hive_store::MissionRecord;
use hive_world::{ObjectKind, World};

use crate::{Crew, MissionContext, MissionKind, MissionPolicy, MissionResult, Viability};

/// Open requests per hauler before another one is wanted.
const REQUESTS_PER_HAULER: usize = 4;
const MAX_HAULERS: usize = 3;

/// Drive the colony's hauler pool through its logistics network.
///
/// Each hauler's current task mirrors the first leg of its route plan and
/// carries the leg's request id.  A leg whose task completed is booked.  A
/// leg whose task is invalid, or whose frame is gone and cannot be rebuilt
/// into a valid task, is abandoned.  Either way the hauler's plan is rebuilt
/// and its next leg handed out.
pub struct LogisticsMission;

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct LogisticsData {
    /// Legs booked as done over the mission's lifetime.
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub abandoned: u64,
}

/// The task that carries out `step`.
fn leg_task(step: &PlanStep, world: &dyn World) -> Option<BehaviorRecord> {
    let target = world.object(step.target)?;
    let kind = match (step.payload > 0, target.kind == ObjectKind::Pile) {
        (true, true)  => BehaviorKind::Pickup,
        (true, false) => BehaviorKind::Withdraw,
        (false, _)    => BehaviorKind::Transfer,
    };
    let options = BehaviorOptions::default().resource(step.resource).amount(step.amount());
    let data = TaskData { request: Some(step.request), ..Default::default() };
    Some(BehaviorRecord::new(kind, target, options, world.tick()).with_data(data))
}

impl MissionPolicy for LogisticsMission {
    type Data = LogisticsData;

    const KIND: MissionKind = MissionKind::Logistics;

    fn refresh(&self, _data: &mut LogisticsData, _record: &MissionRecord, _ctx: &MissionContext<'_>) -> Viability {
        Viability::Viable
    }

    fn max_creeps(&self, _data: &LogisticsData, record: &MissionRecord, ctx: &MissionContext<'_>) -> usize {
        let open = ctx.memory.networks.get(&record.colony).map_or(0, |n| n.requests().count());
        (1 + open / REQUESTS_PER_HAULER).min(MAX_HAULERS)
    }

    fn body(&self, _data: &LogisticsData) -> BodySpec {
        use BodyPart::*;
        BodySpec::new("hauler", vec![Carry, Carry, Move])
            .with_options(BodyOptions { max_units: Some(8), ..Default::default() })
    }

    fn priority(&self, _data: &LogisticsData, config: &HiveConfig) -> u32 {
        config.default_priority.saturating_sub(4)
    }

    fn creep_actions(&self, data: &mut LogisticsData, crew: &Crew<'_>, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        let world = ctx.world;
        let config = &ctx.config.logistics;
        let memory = &mut *ctx.memory;
        let network = memory.networks.entry(crew.colony.to_owned()).or_default();

        // Settle the legs worked on last tick.  The behavior pass may have
        // popped a failed frame already, so an open leg with no frame is
        // checked against a fresh task.
        for hauler in &crew.ready {
            let Some(agent) = world.agent(hauler.as_str()) else { continue };
            let Some(mem) = memory.agents.get_mut(hauler) else { continue };
            let leg = network.next_step(hauler.as_str()).map(|s| s.request);
            let frame = mem
                .tasks
                .top()
                .and_then(|t| t.data.request.map(|r| (r, t.data.completed, t.is_valid(agent, world))));

            let settle = match (leg, frame) {
                (None, None) => continue,
                (None, Some(_)) => None,
                // The plan moved on without this leg (expiry, rebuild).
                (Some(leg), Some((request, ..))) if request != leg => None,
                (Some(_), Some((_, true, _))) => Some(true),
                (Some(_), Some((_, false, true))) => continue,
                (Some(_), Some((_, false, false))) => Some(false),
                (Some(_), None) => {
                    let workable = network
                        .next_step(hauler.as_str())
                        .and_then(|step| leg_task(step, world))
                        .is_some_and(|task| task.is_valid(agent, world));
                    if workable {
                        continue;
                    }
                    Some(false)
                }
            };
            match settle {
                Some(true) => {
                    network.complete_step(hauler, world)?;
                    data.completed += 1;
                }
                Some(false) => {
                    network.abandon_step(hauler, world)?;
                    data.abandoned += 1;
                }
                None => {}
            }
            mem.tasks.clear();
        }

        let update = network.update(&crew.ready, world, config);
        if !update.assigned.is_empty() || !update.expired.is_empty() {
            debug!(
                mission  = crew.mission,
                assigned = update.assigned.len(),
                expired  = update.expired.len(),
                "network updated"
            );
        }

        // Hand out the current leg of every plan.
        for hauler in &crew.ready {
            let Some(task) = network.next_step(hauler.as_str()).and_then(|step| leg_task(step, world)) else { continue };
            if let Some(mem) = memory.agents.get_mut(hauler) {
                mem.tasks.assign(task);
            }
        }
        Ok(())
    }

    fn retire(&self, _data: &mut LogisticsData, crew: &Crew<'_>, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        if let Some(network) = ctx.memory.networks.get_mut(crew.colony) {
            network.sync_haulers(&[], ctx.world);
        }
        Ok(())
    }
}
