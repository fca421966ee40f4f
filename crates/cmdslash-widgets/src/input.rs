#![forbid(unsafe_code)]

//! Single-line text editor state.
//!
//! Holds the value and a grapheme-indexed cursor, and applies editing keys
//! (insert, delete, word motions). It does not render; the palette owns one
//! and reads its value after every edit. Grapheme-cluster aware, so a
//! backspace after `🐕` or `é` removes the whole cluster.

use cmdslash_core::event::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;

/// A single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
}

impl TextInput {
    /// Create a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Value access ---

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value, clamping the cursor to the valid range.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.grapheme_count());
    }

    /// Get the cursor position (grapheme index).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor past the last grapheme.
    pub fn move_to_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    /// Insert text at the cursor (paste).
    pub fn insert_str(&mut self, text: &str) {
        // Single-line: drop line breaks rather than splitting the value.
        let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        self.insert_at_cursor(&text);
    }

    // --- Event handling ---

    /// Apply an editing key.
    ///
    /// Returns `true` if the key was consumed (value or cursor may have
    /// changed). Keys with no editing meaning, including Enter, Escape and
    /// vertical arrows, are left for the caller.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_actionable() {
            return false;
        }
        let ctrl = key.ctrl();
        let word = ctrl || key.alt();

        let consumed = match key.code {
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                true
            }
            KeyCode::Char('e') if ctrl => {
                self.move_to_end();
                true
            }
            KeyCode::Char('u') if ctrl => {
                let byte_end = self.grapheme_byte_offset(self.cursor);
                self.value.drain(..byte_end);
                self.cursor = 0;
                true
            }
            KeyCode::Char(c) if !(ctrl || key.alt() || key.super_key()) => {
                let mut buf = [0u8; 4];
                self.insert_at_cursor(c.encode_utf8(&mut buf));
                true
            }
            KeyCode::Backspace => {
                if word {
                    self.delete_word_back();
                } else {
                    self.delete_char_back();
                }
                true
            }
            KeyCode::Delete => {
                if word {
                    self.delete_word_forward();
                } else {
                    self.delete_char_forward();
                }
                true
            }
            KeyCode::Left => {
                if word {
                    self.cursor = self.word_start_before(self.cursor);
                } else {
                    self.cursor = self.cursor.saturating_sub(1);
                }
                true
            }
            KeyCode::Right => {
                if word {
                    self.cursor = self.word_end_after(self.cursor);
                } else if self.cursor < self.grapheme_count() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.move_to_end();
                true
            }
            _ => false,
        };
        // Deletions can merge the clusters on either side of the cursor.
        self.cursor = self.cursor.min(self.grapheme_count());
        consumed
    }

    // --- Editing operations ---

    /// Insert `text` at the cursor and place the cursor after it.
    ///
    /// The inserted text may join the clusters around it (combining marks,
    /// ZWJ sequences, flag pairs), so the cursor is recomputed from the byte
    /// position rather than advanced by a count.
    fn insert_at_cursor(&mut self, text: &str) {
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert_str(byte_offset, text);
        let end = byte_offset + text.len();
        self.cursor = self.value[..end].graphemes(true).count();
    }

    fn delete_char_back(&mut self) {
        if self.cursor > 0 {
            let byte_start = self.grapheme_byte_offset(self.cursor - 1);
            let byte_end = self.grapheme_byte_offset(self.cursor);
            self.value.drain(byte_start..byte_end);
            self.cursor -= 1;
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor < self.grapheme_count() {
            let byte_start = self.grapheme_byte_offset(self.cursor);
            let byte_end = self.grapheme_byte_offset(self.cursor + 1);
            self.value.drain(byte_start..byte_end);
        }
    }

    fn delete_word_back(&mut self) {
        let start = self.word_start_before(self.cursor);
        let byte_start = self.grapheme_byte_offset(start);
        let byte_end = self.grapheme_byte_offset(self.cursor);
        self.value.drain(byte_start..byte_end);
        self.cursor = start;
    }

    fn delete_word_forward(&mut self) {
        let end = self.word_end_after(self.cursor);
        let byte_start = self.grapheme_byte_offset(self.cursor);
        let byte_end = self.grapheme_byte_offset(end);
        self.value.drain(byte_start..byte_end);
    }

    // --- Word motions ---

    fn word_start_before(&self, from: usize) -> usize {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let mut pos = from.min(graphemes.len());
        if pos == 0 {
            return 0;
        }
        let target = grapheme_class(graphemes[pos - 1]);
        while pos > 0 && grapheme_class(graphemes[pos - 1]) == target {
            pos -= 1;
        }
        pos
    }

    fn word_end_after(&self, from: usize) -> usize {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let max = graphemes.len();
        let mut pos = from;
        if pos >= max {
            return max;
        }
        let target = grapheme_class(graphemes[pos]);
        while pos < max && grapheme_class(graphemes[pos]) == target {
            pos += 1;
        }
        pos
    }

    // --- Internal helpers ---

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// 0 = whitespace, 1 = alphanumeric, 2 = punctuation/symbol.
fn grapheme_class(g: &str) -> u8 {
    if g.chars().all(char::is_whitespace) {
        0
    } else if g.chars().any(char::is_alphanumeric) {
        1
    } else {
        2
    }
}
