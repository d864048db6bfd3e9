//! Display configuration types.

use crate::font::DEFAULT_FONT_INDEX;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Colour scheme of the panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Black text on white
    #[serde(rename = "light")]
    #[default]
    Light,
    /// White text on black
    #[serde(rename = "dark")]
    Dark,
}

fn default_font_index() -> usize {
    DEFAULT_FONT_INDEX
}

fn default_notification_font_index() -> usize {
    2
}

fn default_call_timeout() -> u64 {
    5000
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Text area and margins
    #[serde(default)]
    pub viewport: Viewport,
    /// Index into the font table where quote layout starts searching
    #[serde(default = "default_font_index")]
    pub font_index: usize,
    /// Font used for the pre-formatted notification lines
    #[serde(default = "default_notification_font_index")]
    pub notification_font_index: usize,
    #[serde(default)]
    pub mode: DisplayMode,
    /// Upper bound for a single power-on, paint or power-off call
    #[serde(default = "default_call_timeout")]
    pub call_timeout_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            font_index: default_font_index(),
            notification_font_index: default_notification_font_index(),
            mode: DisplayMode::default(),
            call_timeout_ms: default_call_timeout(),
        }
    }
}
