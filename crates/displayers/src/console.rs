//! Console simulator for the e-paper panel
//!
//! Renders each paint as a text frame of the rotated panel: one row per
//! line, placed at the vertical offset the hardware would use.

use async_trait::async_trait;
use inkboard_core::{DisplayDriver, DisplayError};
use inkboard_render::truncate;
use inkboard_types::{closest_font_index, DisplayMode, Viewport, FONTS};
use std::io::Write;

const REVERSE_VIDEO: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Text-frame display driver
///
/// Paints go to `out` (stdout by default). Dark mode draws the frame in
/// reverse video.
pub struct ConsoleDisplay<W: Write + Send = std::io::Stdout> {
    viewport: Viewport,
    mode: DisplayMode,
    powered: bool,
    out: W,
}

impl ConsoleDisplay<std::io::Stdout> {
    pub fn new(viewport: Viewport, mode: DisplayMode) -> Self {
        Self::with_writer(viewport, mode, std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleDisplay<W> {
    pub fn with_writer(viewport: Viewport, mode: DisplayMode, out: W) -> Self {
        Self {
            viewport,
            mode,
            powered: false,
            out,
        }
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Consume the driver, returning its writer
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Build the text rows for `lines` without writing them
    ///
    /// Every line gets an equal share of the usable height and is centered
    /// in it. Lines wider than the panel are cut with "...".
    pub fn render_frame(&self, lines: &[String], font_height: u32) -> Result<Vec<String>, DisplayError> {
        if lines.is_empty() {
            return Err(DisplayError::NoLines);
        }

        let font = FONTS[closest_font_index(font_height)];
        let max_chars = (self.viewport.height / font.glyph_width_px) as usize;
        let slot = self.viewport.usable_height() / lines.len() as u32;
        if slot == 0 {
            return Err(DisplayError::TooManyLines(lines.len()));
        }

        let border = format!("+{}+", "-".repeat(max_chars));
        let mut frame = Vec::with_capacity(lines.len() + 2);
        frame.push(format!("    {}", border));
        for (i, line) in lines.iter().enumerate() {
            let y = self.viewport.margin_top
                + i as u32 * slot
                + slot.saturating_sub(font.height_px) / 2;
            frame.push(format!(
                "{:>3} |{:<width$}|",
                y,
                truncate(line, max_chars),
                width = max_chars
            ));
        }
        frame.push(format!("    {}", border));

        if self.mode == DisplayMode::Dark {
            for row in &mut frame {
                *row = format!("{}{}{}", REVERSE_VIDEO, row, RESET);
            }
        }
        Ok(frame)
    }
}

#[async_trait]
impl<W: Write + Send> DisplayDriver for ConsoleDisplay<W> {
    fn id(&self) -> &str {
        "console"
    }

    async fn power_on(&mut self) -> Result<(), DisplayError> {
        log::info!(
            "Console display on ({}x{}, {:?} mode)",
            self.viewport.height,
            self.viewport.width,
            self.mode
        );
        self.powered = true;
        Ok(())
    }

    async fn power_off(&mut self) {
        if !self.powered {
            return;
        }
        self.powered = false;
        if let Err(e) = writeln!(self.out, "[panel cleared and powered off]") {
            log::warn!("Console display write failed: {}", e);
        }
        log::info!("Console display off");
    }

    async fn paint(&mut self, lines: &[String], font_height: u32) -> Result<(), DisplayError> {
        if !self.powered {
            return Err(DisplayError::Paint("display is powered off".to_string()));
        }
        let frame = self.render_frame(lines, font_height)?;
        for row in &frame {
            writeln!(self.out, "{}", row).map_err(|e| DisplayError::Paint(e.to_string()))?;
        }
        self.out
            .flush()
            .map_err(|e| DisplayError::Paint(e.to_string()))?;
        log::debug!("Painted {} lines at {}px", lines.len(), font_height);
        Ok(())
    }
}
