//! Projecting a transfer request onto the end of a route plan.

use hive_world::World;

use crate::{LogisticsError, LogisticsResult, PlanStep, RoutePlan, TransferKind, TransferRequest};

/// Range at which a hauler can reach a target.
pub const HAULER_RANGE: u32 = 1;

/// Project `request` from the plan's current `end` state without changing
/// the plan.
///
/// Travel time is the path length from the projected end position to any
/// tile adjacent to the target.  The payload is bounded by what the target
/// holds (pickup) or can accept (delivery) once earlier legs of the same
/// plan against the same target are accounted for, by what the hauler can
/// carry or has on board at that point, and by `request.amount`.
pub fn project_step(plan: &RoutePlan, request: &TransferRequest, world: &dyn World) -> LogisticsResult<PlanStep> {
    let target = world.object(request.target).ok_or(LogisticsError::TargetNotFound {
        request: request.id,
        target:  request.target,
    })?;
    let end = plan.end();
    let duration = world
        .path_length(end.pos, target.pos, HAULER_RANGE)
        .ok_or(LogisticsError::Unreachable { request: request.id, from: end.pos, to: target.pos })?;

    let prior = plan.planned_against(target.id, request.resource);
    let payload = match request.kind {
        TransferKind::Pickup => {
            let held = target.store.get(request.resource) as i64 - prior;
            let available = (held - request.buffer as i64).max(0);
            available.min(end.free_capacity as i64).min(request.amount as i64)
        }
        TransferKind::Delivery => {
            let free = target.store.free_capacity() as i64 + prior;
            let room = (free - request.buffer as i64).max(0);
            -room
                .min(end.store.get(request.resource) as i64)
                .min(request.amount as i64)
        }
    };

    Ok(PlanStep {
        request: request.id,
        target: target.id,
        duration,
        pos: target.pos,
        resource: request.resource,
        payload,
    })
}

/// Project `request` and append the resulting leg to `plan`.  Returns the
/// appended leg.
pub fn append_request_to_plan(
    plan:    &mut RoutePlan,
    request: &TransferRequest,
    world:   &dyn World,
) -> LogisticsResult<PlanStep> {
    let step = project_step(plan, request, world)?;
    plan.push_step(step.clone());
    Ok(step)
}
