//! Kernel observer trait for progress reporting and data collection.

use hive_core::Tick;

use crate::{Retirement, TickStats};

/// Callbacks invoked by [`Kernel::run`][crate::Kernel::run] at key points of
/// the loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: retirement printer
///
/// ```rust,ignore
/// struct Retirements;
///
/// impl KernelObserver for Retirements {
///     fn on_mission_retired(&mut self, tick: Tick, r: &Retirement) {
///         println!("{tick}: {} retired ({})", r.mission, r.reason);
///     }
/// }
/// ```
pub trait KernelObserver {
    /// Called before any processing of the tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once for every mission retired during the tick, before
    /// `on_tick_end`.
    fn on_mission_retired(&mut self, _tick: Tick, _retirement: &Retirement) {}

    /// Called after the tick's behavior pass and memory collection.
    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called once after the final tick.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`KernelObserver`] that does nothing.
pub struct NoopObserver;

impl KernelObserver for NoopObserver {}
