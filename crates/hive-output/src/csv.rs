//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_stats.csv`
//! - `retirements.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::StatsWriter;
use crate::{OutputResult, RetirementRow, TickStatsRow};

pub const TICK_STATS_HEADER: [&str; 10] = [
    "tick",
    "missions",
    "requested",
    "spawned",
    "acted",
    "idle",
    "queued",
    "open_requests",
    "collected",
    "failures",
];

pub const RETIREMENTS_HEADER: [&str; 4] = ["tick", "mission", "kind", "reason"];

/// Writes kernel telemetry to two CSV files.
pub struct CsvStatsWriter {
    ticks:       Writer<File>,
    retirements: Writer<File>,
    finished:    bool,
}

impl CsvStatsWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files in it
    /// and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut ticks = Writer::from_path(dir.join("tick_stats.csv"))?;
        ticks.write_record(TICK_STATS_HEADER)?;

        let mut retirements = Writer::from_path(dir.join("retirements.csv"))?;
        retirements.write_record(RETIREMENTS_HEADER)?;

        Ok(Self { ticks, retirements, finished: false })
    }
}

impl StatsWriter for CsvStatsWriter {
    fn write_tick(&mut self, row: &TickStatsRow) -> OutputResult<()> {
        self.ticks.write_record(&[
            row.tick.to_string(),
            row.missions.to_string(),
            row.requested.to_string(),
            row.spawned.to_string(),
            row.acted.to_string(),
            row.idle.to_string(),
            row.queued.to_string(),
            row.open_requests.to_string(),
            row.collected.to_string(),
            row.failures.to_string(),
        ])?;
        Ok(())
    }

    fn write_retirement(&mut self, row: &RetirementRow) -> OutputResult<()> {
        self.retirements.write_record([
            row.tick.to_string().as_str(),
            row.mission.as_str(),
            row.kind.as_str(),
            row.reason.as_str(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ticks.flush()?;
        self.retirements.flush()?;
        Ok(())
    }
}
