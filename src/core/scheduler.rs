//! Display scheduler
//!
//! A single task alternates the panel between a quote and the countdown
//! notifications on a fixed flip interval, reloads the quote pool once a day
//! at a configured wall-clock hour, and powers the panel down when the
//! shutdown future resolves.

use super::schedule::{duration_until, next_daily_refresh};
use crate::config::AppConfig;
use chrono::{DateTime, Local};
use inkboard_core::{BoxedDataSource, BoxedDisplayDriver, DisplayError, Rotator, SourceError};
use inkboard_render::layout;
use inkboard_sources::NotificationBuilder;
use inkboard_types::{DisplayConfig, FONTS};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};

/// Source of wall-clock time
pub type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Lifecycle of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Starting,
    Running { show_quote: bool },
    ShuttingDown,
    Stopped,
}

/// Errors that stop the scheduler
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("display power-on failed: {0}")]
    PowerOn(#[source] DisplayError),
    #[error("display did not respond to {0} within {1:?}")]
    Timeout(&'static str, Duration),
    #[error(transparent)]
    Load(#[from] SourceError),
    #[error("paint failed: {0}")]
    Paint(#[source] DisplayError),
    #[error("nothing to paint")]
    Empty,
}

pub struct Scheduler {
    display_config: DisplayConfig,
    flip_interval: Duration,
    refresh_hour: u32,
    shutdown_grace: Duration,
    call_timeout: Duration,
    source: BoxedDataSource,
    display: BoxedDisplayDriver,
    rotator: Rotator,
    notifications: NotificationBuilder,
    clock: Clock,
    state: SchedulerState,
    next_refresh: DateTime<Local>,
}

impl Scheduler {
    pub fn new(config: &AppConfig, source: BoxedDataSource, display: BoxedDisplayDriver) -> Self {
        let clock: Clock = Box::new(Local::now);
        let next_refresh = next_daily_refresh(&clock(), config.schedule.refresh_hour);

        Self {
            display_config: config.display.clone(),
            flip_interval: Duration::from_secs(config.schedule.flip_interval_secs.max(1)),
            refresh_hour: config.schedule.refresh_hour,
            shutdown_grace: Duration::from_millis(config.schedule.shutdown_grace_ms),
            call_timeout: Duration::from_millis(config.display.call_timeout_ms),
            source,
            display,
            rotator: Rotator::new(Vec::new()),
            notifications: NotificationBuilder::new(config.notifications.clone()),
            clock,
            state: SchedulerState::Starting,
            next_refresh,
        }
    }

    /// Replace the wall clock (the daily refresh follows it)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.next_refresh = next_daily_refresh(&clock(), self.refresh_hour);
        self.clock = clock;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// When the next daily refresh is due
    pub fn next_refresh(&self) -> DateTime<Local> {
        self.next_refresh
    }

    /// Run until `shutdown` resolves
    ///
    /// Fails only when the display cannot be powered on. A pool that cannot
    /// be loaded is replaced by the placeholder quote.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<(), SchedulerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        self.state = SchedulerState::Starting;
        self.power_on().await?;

        log::info!("Loading quotes from {}", self.source.metadata().description);
        let loaded = tokio::select! {
            biased;

            _ = &mut shutdown => None,
            result = self.source.load_or_fetch() => Some(result),
        };
        let Some(loaded) = loaded else {
            log::info!("Shutdown requested while loading quotes");
            self.shutdown().await;
            return Ok(());
        };

        match loaded {
            Ok(pool) => {
                log::info!(
                    "Loaded {} quotes from {}",
                    pool.quotes.len(),
                    self.source.metadata().description
                );
                self.rotator = Rotator::from_pool(pool);
            }
            Err(e) => {
                log::error!("Failed to load quotes, showing placeholder: {}", e);
                self.rotator = Rotator::new(Vec::new());
            }
        }

        self.state = SchedulerState::Running { show_quote: true };
        log::info!(
            "Scheduler running: flip every {:?}, next refresh at {}",
            self.flip_interval,
            self.next_refresh.format("%Y-%m-%d %H:%M")
        );
        self.show_quote().await;

        let mut flip = interval_at(Instant::now() + self.flip_interval, self.flip_interval);
        flip.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let until_refresh = duration_until(&(self.clock)(), &self.next_refresh);

            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    log::info!("Shutdown requested");
                    break;
                }
                _ = flip.tick() => {
                    if (self.clock)() >= self.next_refresh {
                        log::info!("Daily refresh overdue, running it now");
                        self.refresh().await;
                    }
                    self.flip().await;
                }
                _ = tokio::time::sleep(until_refresh) => {
                    self.refresh().await;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Power on and paint a single quote
    ///
    /// Unlike [`Scheduler::run`], a load or paint failure is an error here.
    pub async fn show_once(&mut self) -> Result<(), SchedulerError> {
        let pool = self.source.load_or_fetch().await?;
        self.rotator = Rotator::from_pool(pool);

        let quote = self.rotator.next();
        let fitted = self.layout_quote(&quote.text, &quote.author);
        if fitted.lines.is_empty() {
            return Err(SchedulerError::Empty);
        }

        self.power_on().await?;
        match timeout(
            self.call_timeout,
            self.display.paint(&fitted.lines, fitted.font.height_px),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SchedulerError::Paint(e)),
            Err(_) => Err(SchedulerError::Timeout("paint", self.call_timeout)),
        }
    }

    /// Power on to clear the panel, then power off
    pub async fn turn_off(&mut self) -> Result<(), SchedulerError> {
        self.power_on().await?;
        timeout(self.call_timeout, self.display.power_off())
            .await
            .map_err(|_| SchedulerError::Timeout("power-off", self.call_timeout))
    }

    async fn power_on(&mut self) -> Result<(), SchedulerError> {
        match timeout(self.call_timeout, self.display.power_on()).await {
            Ok(Ok(())) => {
                log::info!("Display '{}' powered on", self.display.id());
                Ok(())
            }
            Ok(Err(e)) => Err(SchedulerError::PowerOn(e)),
            Err(_) => Err(SchedulerError::Timeout("power-on", self.call_timeout)),
        }
    }

    async fn flip(&mut self) {
        let SchedulerState::Running { show_quote } = self.state else {
            return;
        };
        let show_quote = !show_quote;
        self.state = SchedulerState::Running { show_quote };

        if show_quote {
            self.show_quote().await;
        } else {
            self.show_notifications().await;
        }
    }

    async fn show_quote(&mut self) {
        let quote = self.rotator.next();
        let fitted = self.layout_quote(&quote.text, &quote.author);
        if fitted.lines.is_empty() {
            log::warn!("Quote has no text, skipping paint");
            return;
        }
        self.paint(&fitted.lines, fitted.font.height_px).await;
    }

    async fn show_notifications(&mut self) {
        let today = (self.clock)().date_naive();
        let last_fetch = self.rotator.last_fetch().map(|t| t.date_naive());
        let lines = self.notifications.build(today, last_fetch);
        let index = self.display_config.notification_font_index.min(FONTS.len() - 1);
        self.paint(&lines, FONTS[index].height_px).await;
    }

    fn layout_quote(&self, text: &str, author: &str) -> inkboard_render::Layout {
        let viewport = &self.display_config.viewport;
        layout(
            text,
            author,
            self.display_config.font_index,
            viewport.width,
            viewport.height,
            viewport.margin_top,
            viewport.margin_bottom,
        )
    }

    async fn paint(&mut self, lines: &[String], font_height: u32) {
        match timeout(self.call_timeout, self.display.paint(lines, font_height)).await {
            Ok(Ok(())) => log::debug!("Painted {} lines at {}px", lines.len(), font_height),
            Ok(Err(e)) => log::warn!("Paint failed, keeping previous frame: {}", e),
            Err(_) => log::warn!("Paint timed out after {:?}", self.call_timeout),
        }
    }

    async fn refresh(&mut self) {
        log::info!("Refreshing quotes from {}", self.source.metadata().description);

        match self.source.fetch_remote().await {
            Ok(()) => match self.source.load_cached().await {
                Ok(pool) => self.rotator.refresh(pool),
                Err(e) => log::warn!("Fetched quotes could not be loaded, keeping old pool: {}", e),
            },
            Err(e) => log::warn!("Quote refresh failed, keeping old pool: {}", e),
        }

        // A wall clock running behind the timer must not land on the same deadline again
        let now = (self.clock)().max(self.next_refresh);
        self.next_refresh = next_daily_refresh(&now, self.refresh_hour);
        log::info!(
            "Next refresh at {}",
            self.next_refresh.format("%Y-%m-%d %H:%M")
        );
    }

    async fn shutdown(&mut self) {
        self.state = SchedulerState::ShuttingDown;

        if timeout(self.call_timeout, self.display.power_off())
            .await
            .is_err()
        {
            log::warn!("Display power-off timed out after {:?}", self.call_timeout);
        }
        tokio::time::sleep(self.shutdown_grace).await;

        self.state = SchedulerState::Stopped;
        log::info!("Scheduler stopped");
    }
}
