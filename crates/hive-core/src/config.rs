//! Top-level runtime configuration.
//!
//! Typically loaded from a JSON file by the application crate and handed to
//! the kernel builder.  Every field has a default, so a partial JSON object
//! (or `{}`) is a valid configuration.

use crate::{CoreError, CoreResult};

/// How the logistics network hands new transfer requests to haulers.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssignmentPolicy {
    /// Cycle through the hauler pool in name order.
    #[default]
    RoundRobin,
    /// Give each request to the hauler whose itinerary would finish it
    /// earliest.
    NearestCompletion,
}

/// Logistics network tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogisticsConfig {
    /// Ticks a transfer request stays open before it expires.
    pub request_timeout: u64,

    /// Request-to-hauler assignment policy.
    pub assignment: AssignmentPolicy,

    /// Longest itinerary a single hauler may be given.
    pub max_plan_steps: usize,
}

impl Default for LogisticsConfig {
    fn default() -> Self {
        Self {
            request_timeout: 300,
            assignment:      AssignmentPolicy::RoundRobin,
            max_plan_steps:  4,
        }
    }
}

/// Top-level configuration for one hive process.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HiveConfig {
    /// Master RNG seed.  The same seed always produces identical runs of the
    /// demo world.
    pub seed: u64,

    /// Ticks to execute when the kernel is driven by `run()`.
    pub total_ticks: u64,

    /// Extra ticks of lead time when deciding that an ageing agent needs a
    /// replacement (added to the replacement's own production time).
    pub prespawn_margin: u64,

    /// Spawn priority used by missions that do not override it.  Lower
    /// values are served first.
    pub default_priority: u32,

    pub logistics: LogisticsConfig,

    /// Emit telemetry every N ticks.  0 disables periodic output.
    pub output_interval_ticks: u64,

    /// Default `tracing` filter directive for binaries.
    pub log_filter: String,
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            seed:                  42,
            total_ticks:           1_500,
            prespawn_margin:       20,
            default_priority:      10,
            logistics:             LogisticsConfig::default(),
            output_interval_ticks: 1,
            log_filter:            "info".to_owned(),
        }
    }
}

impl HiveConfig {
    /// Reject values that would stall or break the tick loop.
    pub fn validate(&self) -> CoreResult<()> {
        if self.logistics.request_timeout == 0 {
            return Err(CoreError::Config("logistics.request_timeout must be > 0".into()));
        }
        if self.logistics.max_plan_steps == 0 {
            return Err(CoreError::Config("logistics.max_plan_steps must be > 0".into()));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: HiveConfig =
            serde_json::from_str(json).map_err(|e| CoreError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    #[cfg(feature = "serde")]
    pub fn load(path: &std::path::Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
