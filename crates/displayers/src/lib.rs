//! inkboard-displayers: Display drivers for the inkboard e-paper display.
//!
//! The hardware driver lives outside this workspace; these drivers let the
//! scheduler run on a desktop (console) and under test (recording).

mod console;
mod recording;

pub use console::ConsoleDisplay;
pub use recording::{DisplayEvent, DisplayLog, RecordingDisplay};
