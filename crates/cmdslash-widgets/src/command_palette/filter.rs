#![forbid(unsafe_code)]

//! Query filtering and offset helpers.
//!
//! Matching is a case-sensitive prefix test on the display label. No
//! substring or fuzzy matching: `"In"` matches `"Insert 🐕"` but not
//! `"insert"` or `"Print"`.

use super::registry::CommandRegistry;

/// Indices of commands whose display label starts with `query`, in
/// registration order.
pub fn filter_commands(registry: &CommandRegistry, query: &str) -> Vec<usize> {
    registry
        .commands()
        .iter()
        .enumerate()
        .filter(|(_, command)| command.display().starts_with(query))
        .map(|(i, _)| i)
        .collect()
}

/// Largest char boundary of `text` that is `<= index`.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}
