//! The `StatsWriter` trait implemented by telemetry backends.

use crate::{OutputResult, RetirementRow, TickStatsRow};

/// Sink for kernel telemetry.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`StatsObserver::take_error`][crate::StatsObserver::take_error].
pub trait StatsWriter {
    /// Write one tick's counters.
    fn write_tick(&mut self, row: &TickStatsRow) -> OutputResult<()>;

    /// Write one retirement.
    fn write_retirement(&mut self, row: &RetirementRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
