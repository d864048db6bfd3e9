//! Notification panel configuration types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_seasonal_label() -> String {
    "Next summer".to_string()
}

fn default_seasonal_month() -> u32 {
    6
}

fn default_seasonal_day() -> u32 {
    20
}

fn default_target_label() -> String {
    "30 Sep 2028".to_string()
}

fn default_target_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2028, 9, 30).unwrap_or_default()
}

fn default_true() -> bool {
    true
}

/// Countdown targets shown on the notification panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    /// Label of the yearly recurring date
    #[serde(default = "default_seasonal_label")]
    pub seasonal_label: String,
    #[serde(default = "default_seasonal_month")]
    pub seasonal_month: u32,
    #[serde(default = "default_seasonal_day")]
    pub seasonal_day: u32,
    /// Label of the fixed far-future date
    #[serde(default = "default_target_label")]
    pub target_label: String,
    /// Fixed far-future date (`yyyy-mm-dd`)
    #[serde(default = "default_target_date")]
    pub target_date: NaiveDate,
    /// Append the date of the last quote fetch
    #[serde(default = "default_true")]
    pub show_updated: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            seasonal_label: default_seasonal_label(),
            seasonal_month: default_seasonal_month(),
            seasonal_day: default_seasonal_day(),
            target_label: default_target_label(),
            target_date: default_target_date(),
            show_updated: true,
        }
    }
}
