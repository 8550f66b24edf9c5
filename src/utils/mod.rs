//! Utility functions and helpers.

pub mod http;

/// Shorten text for single-line log output, respecting char boundaries.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
