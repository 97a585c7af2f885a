//! Executing an agent's current task for one tick.

use hive_core::AgentName;
use hive_world::{ResultCode, WorldActions};

use crate::{BehaviorError, BehaviorResult, TaskStack};

/// Validate `tasks` against the world and run the surviving top frame.
///
/// Returns `Ok(None)` when the agent has nothing valid to do or is still
/// spawning, and the action's result code otherwise.  A result code other
/// than `Ok` is not an error: the owning mission reconsiders next tick.
pub fn run_agent(
    name:  &AgentName,
    tasks: &mut TaskStack,
    world: &mut dyn WorldActions,
) -> BehaviorResult<Option<ResultCode>> {
    let agent = world
        .agent(name.as_str())
        .ok_or_else(|| BehaviorError::AgentNotFound(name.clone()))?;
    if agent.spawning {
        return Ok(None);
    }
    if tasks.current(agent, world.as_world()).is_none() {
        return Ok(None);
    }
    let Some(record) = tasks.top_mut() else { return Ok(None) };
    Ok(Some(record.run(name, world)))
}
