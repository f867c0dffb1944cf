//! Hook extraction from raw model output.
//!
//! The model is asked for bullet points but its answer has no fixed shape.
//! Heuristics:
//!
//! - split on line breaks;
//! - strip any leading run of `-`, `•` and whitespace;
//! - trim trailing whitespace and drop lines left empty;
//! - keep at most [`MAX_HOOKS`] lines, in order.
//!
//! Fewer than five usable lines is not an error; the short list is returned.

use super::models::MAX_HOOKS;

/// Characters treated as bullet markers at the start of a line.
const BULLET_MARKERS: [char; 2] = ['-', '•'];

/// Parse the model's answer into at most [`MAX_HOOKS`] hook lines.
pub fn parse_hooks(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .take(MAX_HOOKS)
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || BULLET_MARKERS.contains(&c))
        .trim_end()
}
