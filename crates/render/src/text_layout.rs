//! Adaptive text layout
//!
//! Quotes are word-wrapped for each font of the table, starting at a
//! configured index and moving toward smaller fonts until the text fits the
//! panel. Text that does not fit even the smallest font is returned wrapped
//! at that font and allowed to overflow.
//!
//! The panel is driven rotated by 90 degrees, so the viewport's `width`
//! (its short native axis) is the vertical line budget and its `height` the
//! horizontal character budget.

use inkboard_types::{FontOption, FONTS};

/// Result of a layout: the lines to paint and the font they were fitted for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub lines: Vec<String>,
    pub font: FontOption,
}

/// Lay out `body` (and an optional `author`) for the panel
///
/// `start_font_index` is clamped to the font table. An empty body yields no
/// lines. When not even the smallest font leaves room for a single character
/// per line, the body is returned unsplit as one line at the smallest font.
pub fn layout(
    body: &str,
    author: &str,
    start_font_index: usize,
    viewport_width_px: u32,
    viewport_height_px: u32,
    margin_top: u32,
    margin_bottom: u32,
) -> Layout {
    let last = FONTS.len() - 1;
    let start = start_font_index.min(last);
    let smallest = FONTS[last];
    let body = body.trim();

    if body.is_empty() {
        return Layout {
            lines: Vec::new(),
            font: FONTS[start],
        };
    }

    let usable_height = viewport_width_px
        .saturating_sub(margin_top)
        .saturating_sub(margin_bottom);
    let author = author.trim();
    let author = (!author.is_empty()).then_some(author);

    for font in &FONTS[start..] {
        let max_chars = (viewport_height_px / font.glyph_width_px) as usize;
        if max_chars == 0 {
            continue;
        }
        let (lines, fits) = fit(body, author, font, max_chars, usable_height);
        if fits {
            log::trace!(
                "Layout fits at {}px: {} lines of at most {} chars",
                font.height_px,
                lines.len(),
                max_chars
            );
            return Layout { lines, font: *font };
        }
    }

    let max_chars = (viewport_height_px / smallest.glyph_width_px) as usize;
    if max_chars == 0 {
        log::warn!("Viewport too narrow for any font, painting text unsplit");
        return Layout {
            lines: vec![body.to_string()],
            font: smallest,
        };
    }

    let (lines, _) = fit(body, author, &smallest, max_chars, usable_height);
    log::debug!(
        "Text overflows the smallest font: {} lines at {}px",
        lines.len(),
        smallest.height_px
    );
    Layout {
        lines,
        font: smallest,
    }
}

/// Wrap and budget the body for one font. Returns the lines and whether the
/// body fit the line budget (the author line is only appended when it did).
fn fit(
    body: &str,
    author: Option<&str>,
    font: &FontOption,
    max_chars: usize,
    usable_height: u32,
) -> (Vec<String>, bool) {
    let mut lines = hard_split(word_wrap(body, max_chars), max_chars);

    let mut max_lines = ((usable_height / font.height_px) as usize).max(1);
    if author.is_some() {
        max_lines -= 1;
    }

    let fits = lines.len() <= max_lines;
    if fits {
        if let Some(author) = author {
            lines.push(truncate(&format!("- {}", author), max_chars));
        }
    }
    (lines, fits)
}

/// Greedy word wrap: words are joined by single spaces while the line stays
/// within `max_chars` characters
pub fn word_wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut words = text.split_whitespace();

    let Some(first) = words.next() else {
        return lines;
    };
    let mut current = first.to_string();
    let mut current_len = first.chars().count();

    for word in words {
        let word_len = word.chars().count();
        if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }
    lines.push(current);
    lines
}

/// Split every line longer than `max_chars` characters into chunks of at
/// most `max_chars` characters
pub fn hard_split(lines: Vec<String>, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return lines;
    }
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if line.chars().count() <= max_chars {
            out.push(line);
            continue;
        }
        let chars: Vec<char> = line.chars().collect();
        out.extend(chars.chunks(max_chars).map(|chunk| chunk.iter().collect()));
    }
    out
}

/// Cut `line` to `max_chars` characters, ending in "..." when it was cut
pub fn truncate(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut cut: String = line.chars().take(keep).collect();
    cut.push_str(&"..."[..max_chars.min(3)]);
    cut
}
