//! In-memory display driver that records every call

use async_trait::async_trait;
use inkboard_core::{DisplayDriver, DisplayError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// A call observed by [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    PowerOn,
    Paint { lines: Vec<String>, font_height: u32 },
    PowerOff,
}

/// Shared view of the events a [`RecordingDisplay`] has seen
#[derive(Debug, Clone, Default)]
pub struct DisplayLog {
    events: Arc<Mutex<Vec<DisplayEvent>>>,
}

impl DisplayLog {
    fn lock(&self) -> MutexGuard<'_, Vec<DisplayEvent>> {
        // Recover the events even if a recording task panicked
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, event: DisplayEvent) {
        self.lock().push(event);
    }

    /// Copy of every event so far
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.lock().clone()
    }

    /// Successful paints, oldest first
    pub fn paints(&self) -> Vec<(Vec<String>, u32)> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                DisplayEvent::Paint { lines, font_height } => Some((lines.clone(), *font_height)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &DisplayEvent) -> usize {
        self.lock()
            .iter()
            .filter(|event| std::mem::discriminant(*event) == std::mem::discriminant(wanted))
            .count()
    }
}

/// Display driver that keeps every successful call in a [`DisplayLog`]
///
/// Failures and delays can be injected to exercise callers.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    log: DisplayLog,
    powered: bool,
    fail_power_on: bool,
    failing_paints: usize,
    paint_delay: Option<Duration>,
    power_off_delay: Option<Duration>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the recorded events, valid after the driver is moved away
    pub fn log(&self) -> DisplayLog {
        self.log.clone()
    }

    /// Make `power_on` fail
    pub fn failing_power_on(mut self) -> Self {
        self.fail_power_on = true;
        self
    }

    /// Make the next `count` paints fail
    pub fn failing_paints(mut self, count: usize) -> Self {
        self.failing_paints = count;
        self
    }

    /// Delay every paint by `delay`
    pub fn with_paint_delay(mut self, delay: Duration) -> Self {
        self.paint_delay = Some(delay);
        self
    }

    /// Delay power-off by `delay`
    pub fn with_power_off_delay(mut self, delay: Duration) -> Self {
        self.power_off_delay = Some(delay);
        self
    }
}

#[async_trait]
impl DisplayDriver for RecordingDisplay {
    fn id(&self) -> &str {
        "recording"
    }

    async fn power_on(&mut self) -> Result<(), DisplayError> {
        if self.fail_power_on {
            return Err(DisplayError::PowerOn("injected failure".to_string()));
        }
        self.powered = true;
        self.log.push(DisplayEvent::PowerOn);
        Ok(())
    }

    async fn power_off(&mut self) {
        if let Some(delay) = self.power_off_delay {
            tokio::time::sleep(delay).await;
        }
        if self.powered {
            self.powered = false;
            self.log.push(DisplayEvent::PowerOff);
        }
    }

    async fn paint(&mut self, lines: &[String], font_height: u32) -> Result<(), DisplayError> {
        if let Some(delay) = self.paint_delay {
            tokio::time::sleep(delay).await;
        }
        if lines.is_empty() {
            return Err(DisplayError::NoLines);
        }
        if self.failing_paints > 0 {
            self.failing_paints -= 1;
            return Err(DisplayError::Paint("injected failure".to_string()));
        }
        self.log.push(DisplayEvent::Paint {
            lines: lines.to_vec(),
            font_height,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls() {
        let mut display = RecordingDisplay::new();
        let log = display.log();

        display.power_on().await.unwrap();
        display.paint(&["hello".to_string()], 16).await.unwrap();
        display.power_off().await;
        display.power_off().await;

        assert_eq!(
            log.events(),
            vec![
                DisplayEvent::PowerOn,
                DisplayEvent::Paint {
                    lines: vec!["hello".to_string()],
                    font_height: 16
                },
                DisplayEvent::PowerOff,
            ]
        );
        assert_eq!(log.paints(), vec![(vec!["hello".to_string()], 16)]);
        assert_eq!(log.count(&DisplayEvent::PowerOff), 1);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let mut display = RecordingDisplay::new().failing_power_on();
        assert!(matches!(
            display.power_on().await,
            Err(DisplayError::PowerOn(_))
        ));

        let mut display = RecordingDisplay::new().failing_paints(1);
        let log = display.log();
        let lines = vec!["x".to_string()];
        assert!(display.paint(&lines, 8).await.is_err());
        assert!(display.paint(&lines, 8).await.is_ok());
        assert!(matches!(
            display.paint(&[], 8).await,
            Err(DisplayError::NoLines)
        ));
        assert_eq!(log.paints().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_power_off_delay() {
        let mut display = RecordingDisplay::new().with_power_off_delay(Duration::from_secs(5));
        display.power_on().await.unwrap();

        let start = tokio::time::Instant::now();
        display.power_off().await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
