//! Plain data row types written by output backends.

use hive_kernel::{Retirement, TickStats};

/// Counters of one kernel tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStatsRow {
    pub tick:          u64,
    pub missions:      u64,
    pub requested:     u64,
    pub spawned:       u64,
    pub acted:         u64,
    pub idle:          u64,
    pub queued:        u64,
    pub open_requests: u64,
    pub collected:     u64,
    pub failures:      u64,
}

impl From<&TickStats> for TickStatsRow {
    fn from(s: &TickStats) -> Self {
        Self {
            tick:          s.tick.0,
            missions:      s.missions as u64,
            requested:     s.requested as u64,
            spawned:       s.spawned.len() as u64,
            acted:         s.acted as u64,
            idle:          s.idle as u64,
            queued:        s.queued as u64,
            open_requests: s.open_requests as u64,
            collected:     s.collected as u64,
            failures:      s.failures as u64,
        }
    }
}

/// One retired mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetirementRow {
    pub tick:    u64,
    pub mission: String,
    pub kind:    String,
    pub reason:  String,
}

impl RetirementRow {
    pub fn new(tick: u64, r: &Retirement) -> Self {
        Self { tick, mission: r.mission.clone(), kind: r.kind.clone(), reason: r.reason.clone() }
    }
}
