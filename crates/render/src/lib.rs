//! inkboard-render: Text layout for the inkboard e-paper display.
//!
//! Turns quote text into concrete display lines for the fixed font table,
//! choosing the largest font the text fits in.

mod text_layout;

pub use text_layout::{hard_split, layout, truncate, word_wrap, Layout};
