//! `hive-output`: kernel telemetry writers for the hive framework.
//!
//! | Backend | Files created                         |
//! |---------|---------------------------------------|
//! | CSV     | `tick_stats.csv`, `retirements.csv`   |
//!
//! Backends implement [`StatsWriter`] and are driven by [`StatsObserver`],
//! which implements `hive_kernel::KernelObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hive_output::{CsvStatsWriter, StatsObserver};
//!
//! let writer = CsvStatsWriter::new(Path::new("./output"))?;
//! let mut obs = StatsObserver::new(writer, &kernel.config);
//! kernel.run(&mut obs, |w| w.end_tick());
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvStatsWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatsObserver;
pub use row::{RetirementRow, TickStatsRow};
pub use writer::StatsWriter;
