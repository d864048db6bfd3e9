//! Fixed font table of the panel's bitmap fonts

use serde::{Deserialize, Serialize};

/// Geometry of one bitmap font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontOption {
    /// Line height in pixels
    pub height_px: u32,
    /// Horizontal footprint of one glyph in pixels
    pub glyph_width_px: u32,
}

impl FontOption {
    pub const fn new(height_px: u32, glyph_width_px: u32) -> Self {
        Self {
            height_px,
            glyph_width_px,
        }
    }
}

/// Available fonts, largest first. Layout only ever walks this table downward.
pub const FONTS: &[FontOption] = &[
    FontOption::new(20, 14),
    FontOption::new(16, 11),
    FontOption::new(12, 7),
    FontOption::new(8, 5),
];

/// Index of the 16px font, used when nothing else is configured
pub const DEFAULT_FONT_INDEX: usize = 1;

/// Index of the table entry whose height is closest to `height_px`
///
/// Ties resolve to the larger font. A height of zero selects the default font.
pub fn closest_font_index(height_px: u32) -> usize {
    if height_px == 0 {
        return DEFAULT_FONT_INDEX;
    }
    FONTS
        .iter()
        .enumerate()
        .min_by_key(|(_, font)| font.height_px.abs_diff(height_px))
        .map(|(index, _)| index)
        .unwrap_or(DEFAULT_FONT_INDEX)
}
