//! inkboard-types: Shared data types for the inkboard e-paper display.
//!
//! This crate contains pure data types (quote records, the font table,
//! viewport geometry and configuration sections) shared across all inkboard
//! crates. Nothing here performs I/O.

pub mod font;
pub mod quote;
pub mod source_configs;
pub mod viewport;

// Re-export commonly used types at the crate root for convenience
pub use font::{closest_font_index, FontOption, DEFAULT_FONT_INDEX, FONTS};
pub use quote::QuoteRecord;
pub use source_configs::{
    DisplayConfig, DisplayMode, NotificationConfig, ScheduleConfig, SourceConfig,
};
pub use viewport::{Viewport, PANEL_HEIGHT, PANEL_WIDTH};
