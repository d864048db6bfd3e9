//! Scheduler configuration types.

use serde::{Deserialize, Serialize};

fn default_flip_interval() -> u64 {
    300
}

fn default_refresh_hour() -> u32 {
    4
}

fn default_shutdown_grace() -> u64 {
    1000
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleConfig {
    /// Seconds between flips of quote and notification mode
    #[serde(default = "default_flip_interval")]
    pub flip_interval_secs: u64,
    /// Local hour (0-23, taken modulo 24) of the daily data refresh
    #[serde(default = "default_refresh_hour")]
    pub refresh_hour: u32,
    /// Pause after the power-off command before the process exits
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_ms: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            flip_interval_secs: default_flip_interval(),
            refresh_hour: default_refresh_hour(),
            shutdown_grace_ms: default_shutdown_grace(),
        }
    }
}
