//! `StatsObserver<W>`: bridges `KernelObserver` to a `StatsWriter`.

use hive_core::{HiveConfig, Tick};
use hive_kernel::{KernelObserver, Retirement, TickStats};

use crate::row::{RetirementRow, TickStatsRow};
use crate::writer::StatsWriter;
use crate::{OutputError, OutputResult};

/// A [`KernelObserver`] that writes tick counters and retirements to any
/// [`StatsWriter`] backend.
///
/// Tick rows are written every `output_interval_ticks` ticks (never when
/// the interval is 0); retirements are always written.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `kernel.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct StatsObserver<W: StatsWriter> {
    writer:     W,
    interval:   u64,
    last_error: Option<OutputError>,
}

impl<W: StatsWriter> StatsObserver<W> {
    pub fn new(writer: W, config: &HiveConfig) -> Self {
        Self { writer, interval: config.output_interval_ticks, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: StatsWriter> KernelObserver for StatsObserver<W> {
    fn on_mission_retired(&mut self, tick: Tick, retirement: &Retirement) {
        let result = self.writer.write_retirement(&RetirementRow::new(tick.0, retirement));
        self.store_err(result);
    }

    fn on_tick_end(&mut self, stats: &TickStats) {
        if self.interval == 0 || !stats.tick.0.is_multiple_of(self.interval) {
            return;
        }
        let result = self.writer.write_tick(&TickStatsRow::from(stats));
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
