//! Box fitting for paragraph text layers.
//!
//! Layout uses a fixed average glyph advance instead of real shaping. That keeps fitting pure and
//! font-independent; the template's `advance_em` is tuned per typeface.

use serde::{Deserialize, Serialize};

/// Smallest size [`fit_font_size`] will shrink to.
pub const MIN_FONT_SIZE: f32 = 8.0;
/// Decrement applied per fitting step, in points.
pub const FONT_SIZE_STEP: f32 = 0.5;

/// Approximate typeface metrics, in ems.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Average horizontal advance of one character.
    pub advance_em: f32,
    /// Distance between consecutive baselines.
    pub line_height_em: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            advance_em: 0.55,
            line_height_em: 1.2,
        }
    }
}

impl TextMetrics {
    fn max_chars(&self, font_size: f32, box_width: f32) -> usize {
        let advance = (self.advance_em * font_size).max(f32::EPSILON);
        ((box_width / advance).floor() as usize).max(1)
    }

    /// Height of `line_count` lines at `font_size`.
    pub fn block_height(&self, line_count: usize, font_size: f32) -> f32 {
        line_count as f32 * font_size * self.line_height_em
    }
}

/// Greedy word wrap. Explicit `\n` always starts a new line; words longer than a whole line are
/// broken at character boundaries.
pub fn wrap_lines(text: &str, font_size: f32, box_width: f32, metrics: &TextMetrics) -> Vec<String> {
    let max_chars = metrics.max_chars(font_size, box_width);
    let mut lines = Vec::new();

    for hard_line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in hard_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > max_chars && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        lines.push(current);
    }

    lines
}

/// Shrink `start_size` in [`FONT_SIZE_STEP`] decrements until `text` wraps inside the box.
///
/// Returns at least [`MIN_FONT_SIZE`] even if the text still overflows at that size.
pub fn fit_font_size(
    text: &str,
    start_size: f32,
    box_width: f32,
    box_height: f32,
    metrics: &TextMetrics,
) -> f32 {
    let mut size = start_size.max(MIN_FONT_SIZE);
    loop {
        let lines = wrap_lines(text, size, box_width, metrics);
        if metrics.block_height(lines.len(), size) <= box_height {
            return size;
        }
        if size - FONT_SIZE_STEP < MIN_FONT_SIZE {
            return MIN_FONT_SIZE;
        }
        size -= FONT_SIZE_STEP;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
