//! What one tick did.

use hive_core::{AgentName, Tick};

/// A mission removed this tick.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Retirement {
    pub mission: String,
    pub kind:    String,
    pub reason:  String,
}

/// Counters collected by [`Kernel::tick`][crate::Kernel::tick].
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TickStats {
    pub tick:          Tick,
    /// Missions that ran (all phases or until one failed).
    pub missions:      usize,
    /// Spawn requests issued at roll call, orphan reuse included.
    pub requested:     usize,
    /// Agents whose production was committed.
    pub spawned:       Vec<AgentName>,
    /// Agents that executed an action.
    pub acted:         usize,
    /// Agents with nothing valid to do.
    pub idle:          usize,
    /// Memory entries of dead agents removed.
    pub collected:     usize,
    /// Requests waiting in all spawn queues after the tick.
    pub queued:        usize,
    /// Open logistics requests over all networks after the tick.
    pub open_requests: usize,
    /// Phases that returned an error.
    pub failures:      usize,
    pub retired:       Vec<Retirement>,
}

impl TickStats {
    pub fn new(tick: Tick) -> Self {
        Self { tick, ..Default::default() }
    }
}
