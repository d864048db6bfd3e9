//! inkboard: Rotating quotes and countdown panels for a small e-paper display
//!
//! This library provides:
//! - Configuration loading
//! - The scheduler that alternates quotes and countdowns on the panel
//! - Daily refresh arithmetic

pub mod config;
pub mod core;

// Re-export commonly used types
pub use config::AppConfig;
pub use core::{Scheduler, SchedulerError, SchedulerState};
