//! Display driver trait and related types

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by display drivers
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to turn on display: {0}")]
    PowerOn(String),
    #[error("no lines provided")]
    NoLines,
    #[error("too many lines to fit on screen ({0} lines)")]
    TooManyLines(usize),
    #[error("paint failed: {0}")]
    Paint(String),
}

/// Trait for all display drivers
///
/// A driver powers the panel and paints an ordered set of text lines at a
/// given font height. Callers treat every call as fallible and bound it
/// with a timeout.
#[async_trait]
pub trait DisplayDriver: Send {
    /// Unique identifier for this driver type
    fn id(&self) -> &str;

    /// Initialize and power up the panel
    async fn power_on(&mut self) -> Result<(), DisplayError>;

    /// Clear and power down the panel. Does nothing when already off.
    async fn power_off(&mut self);

    /// Paint `lines` at the font closest to `font_height` px
    ///
    /// Fails with [`DisplayError::NoLines`] when `lines` is empty.
    async fn paint(&mut self, lines: &[String], font_height: u32) -> Result<(), DisplayError>;
}

/// Type-erased display driver for dynamic dispatch
pub type BoxedDisplayDriver = Box<dyn DisplayDriver>;
