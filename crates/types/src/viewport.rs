//! Panel geometry

use serde::{Deserialize, Serialize};

/// Native width of the 2.13" panel (its short axis)
pub const PANEL_WIDTH: u32 = 122;

/// Native height of the 2.13" panel (its long axis)
pub const PANEL_HEIGHT: u32 = 250;

/// Addressable text area of the panel
///
/// Dimensions are given in the panel's native portrait orientation while
/// text is drawn rotated by 90 degrees: `width` is the vertical line budget
/// and `height` the horizontal character budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_margin_top")]
    pub margin_top: u32,
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: u32,
}

fn default_width() -> u32 {
    PANEL_WIDTH
}

fn default_height() -> u32 {
    PANEL_HEIGHT
}

fn default_margin_top() -> u32 {
    2
}

fn default_margin_bottom() -> u32 {
    3
}

impl Viewport {
    /// Pixels available for lines once margins are removed
    pub fn usable_height(&self) -> u32 {
        self.width
            .saturating_sub(self.margin_top)
            .saturating_sub(self.margin_bottom)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin_top: default_margin_top(),
            margin_bottom: default_margin_bottom(),
        }
    }
}
