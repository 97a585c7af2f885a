//! The `Kernel` struct and its tick loop.

use std::path::Path;

use tracing::{debug, error, info};

use hive_behavior::run_agent;
use hive_core::{AgentName, HiveConfig, Tick};
use hive_mission::{MissionContext, MissionError, MissionHandle, RollCall, Viability, construct};
use hive_store::Memory;
use hive_world::{Spawner, World, WorldActions};

use crate::{KernelObserver, KernelResult, Registry, Retirement, TickStats};

/// Mission phase, for failure reports.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Phase {
    Refresh,
    RollCall,
    Run,
    Save,
    Retire,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Refresh  => "refresh",
            Phase::RollCall => "roll_call",
            Phase::Run      => "run",
            Phase::Save     => "save",
            Phase::Retire   => "retire",
        }
    }
}

// ── Kernel ────────────────────────────────────────────────────────────────────

/// The coordination layer driving one world.
///
/// `Kernel<W>` owns the world binding, the persisted [`Memory`] and the
/// per-tick [`Registry`], and runs the tick in this order:
///
/// 1. **Registry**: rebuild every mission from its record.
/// 2. **Missions**: operations first, then missions, each in name order:
///    refresh → roll call → run → save.  A non-viable mission is retired
///    instead.  A failing phase is logged and the mission skips the rest of
///    its phases; the others carry on.
/// 3. **Spawn queues**: each facility commits at most one production.
/// 4. **Behaviors**: every live, ready agent runs its current task.
/// 5. **Collection**: memory of agents that are gone (and not waiting in a
///    queue) is dropped.
///
/// Nothing but `memory` carries state from one tick to the next.
///
/// Create via [`KernelBuilder`][crate::KernelBuilder].
pub struct Kernel<W: WorldActions + Spawner> {
    pub config: HiveConfig,

    /// The host binding.  Advancing it between ticks is the caller's job.
    pub world: W,

    /// Authoritative persisted state.
    pub memory: Memory,

    /// This tick's executable missions.  Rebuilt at every tick start.
    pub registry: Registry<dyn MissionHandle>,
}

impl<W: WorldActions + Spawner> Kernel<W> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run `config.total_ticks` ticks, calling `advance` on the world after
    /// each one.
    pub fn run<O: KernelObserver>(&mut self, observer: &mut O, advance: impl FnMut(&mut W)) -> Tick {
        let ticks = self.config.total_ticks;
        self.run_ticks(ticks, observer, advance);
        let end = self.world.tick();
        observer.on_run_end(end);
        end
    }

    /// Run exactly `n` ticks.  Useful for tests and incremental stepping.
    pub fn run_ticks<O: KernelObserver>(&mut self, n: u64, observer: &mut O, mut advance: impl FnMut(&mut W)) {
        for _ in 0..n {
            let now = self.world.tick();
            observer.on_tick_start(now);
            let stats = self.tick();
            for r in &stats.retired {
                observer.on_mission_retired(now, r);
            }
            observer.on_tick_end(&stats);
            advance(&mut self.world);
        }
    }

    /// Process one tick at the world's current tick.
    pub fn tick(&mut self) -> TickStats {
        let now = self.world.tick();
        let mut stats = TickStats::new(now);

        self.rebuild_registry(&mut stats);
        self.run_missions(&mut stats);
        self.run_spawn_queues(&mut stats);
        self.run_behaviors(&mut stats);

        stats.collected = self.memory.collect_dead_agents(&self.world).len();
        stats.queued = self.memory.spawns.values().map(|q| q.len()).sum();
        stats.open_requests = self.memory.networks.values().map(|n| n.requests().count()).sum();

        debug!(
            tick     = %now,
            missions = stats.missions,
            spawned  = stats.spawned.len(),
            acted    = stats.acted,
            failures = stats.failures,
            "tick done"
        );
        stats
    }

    /// Write `memory` to `path` as JSON.
    pub fn save_memory(&self, path: &Path) -> KernelResult<()> {
        self.memory.save(path)?;
        Ok(())
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn rebuild_registry(&mut self, stats: &mut TickStats) {
        let records = self.memory.missions.iter().map(|(name, rec)| (name.as_str(), rec));
        let rejected = self.registry.init(records, construct);
        for (name, e) in rejected {
            error!(mission = %name, error = %e, "mission record not constructed");
            stats.failures += 1;
        }
    }

    fn run_missions(&mut self, stats: &mut TickStats) {
        let mut order: Vec<(bool, &str)> = self
            .registry
            .iter()
            .map(|(name, handle)| (!handle.kind().is_operation(), name))
            .collect();
        order.sort_unstable();
        let order: Vec<String> = order.into_iter().map(|(_, name)| name.to_owned()).collect();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let world    = &self.world;
        let memory   = &mut self.memory;
        let config   = &self.config;
        let registry = &mut self.registry;

        let mut retired = Vec::new();
        for name in order {
            let Some(handle) = registry.get_mut(&name) else { continue };
            let mut ctx = MissionContext::new(world, world, memory, config);
            stats.missions += 1;

            match drive(handle, &mut ctx) {
                Ok(Outcome::Ran(report)) => {
                    if report.requested.is_some() {
                        stats.requested += 1;
                    }
                }
                Ok(Outcome::Retired(reason)) => {
                    stats.retired.push(Retirement { mission: name.clone(), kind: handle.kind().to_string(), reason });
                    retired.push(name);
                }
                Err((phase, e)) => {
                    error!(mission = %name, phase = phase.as_str(), error = %e, "mission phase failed");
                    stats.failures += 1;
                }
            }
        }
        for name in retired {
            registry.unregister(&name);
        }
    }

    fn run_spawn_queues(&mut self, stats: &mut TickStats) {
        let Memory { spawns, agents, .. } = &mut self.memory;
        for queue in spawns.values_mut() {
            match queue.run(&mut self.world, agents) {
                Ok(Some(name)) => stats.spawned.push(name),
                Ok(None) => {}
                Err(e) => {
                    error!(facility = queue.facility(), error = %e, "spawn queue failed");
                    stats.failures += 1;
                }
            }
        }
    }

    fn run_behaviors(&mut self, stats: &mut TickStats) {
        let names: Vec<AgentName> = self.memory.agents.keys().cloned().collect();
        for name in names {
            if self.world.agent(name.as_str()).is_none_or(|a| a.spawning) {
                continue;
            }
            let Some(mem) = self.memory.agents.get_mut(&name) else { continue };
            match run_agent(&name, &mut mem.tasks, &mut self.world) {
                Ok(Some(code)) => {
                    stats.acted += 1;
                    if !code.is_ok() {
                        debug!(agent = %name, %code, "action refused");
                    }
                }
                Ok(None) => stats.idle += 1,
                Err(e) => {
                    error!(agent = %name, error = %e, "behavior failed");
                    stats.failures += 1;
                }
            }
        }
    }
}

pub(crate) enum Outcome {
    Ran(RollCall),
    Retired(String),
}

/// Run one mission's phases, or retire it if it is no longer viable.
///
/// Once roll call has passed the record is saved even if `run` fails, so a
/// reservation made this tick is not lost.  A `run` failure is reported
/// ahead of a `save` failure.
pub(crate) fn drive(
    handle: &mut dyn MissionHandle,
    ctx:    &mut MissionContext<'_>,
) -> Result<Outcome, (Phase, MissionError)> {
    match handle.refresh(ctx).map_err(|e| (Phase::Refresh, e))? {
        Viability::Viable => {}
        Viability::NonViable(reason) => {
            info!(mission = handle.name(), reason = %reason, "mission not viable");
            handle.retire(ctx, &reason).map_err(|e| (Phase::Retire, e))?;
            return Ok(Outcome::Retired(reason));
        }
    }
    let report = handle.roll_call(ctx).map_err(|e| (Phase::RollCall, e))?;
    let ran = handle.run(ctx);
    let saved = handle.save(ctx);
    ran.map_err(|e| (Phase::Run, e))?;
    saved.map_err(|e| (Phase::Save, e))?;
    Ok(Outcome::Ran(report))
}
