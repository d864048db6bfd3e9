//! Configuration sections for the display, scheduler, quote source and
//! notification panel.

pub mod display;
pub mod notifications;
pub mod quotes;
pub mod schedule;

// Re-export all config types for convenience
pub use display::{DisplayConfig, DisplayMode};
pub use notifications::NotificationConfig;
pub use quotes::{SourceConfig, DEFAULT_CACHE_PATH, DEFAULT_ENDPOINT};
pub use schedule::ScheduleConfig;
