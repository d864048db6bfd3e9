//! Scheduling for inkboard

mod schedule;
mod scheduler;

pub use schedule::{duration_until, next_daily_refresh};
pub use scheduler::{Clock, Scheduler, SchedulerError, SchedulerState};
