//! Query bar input handling (pure state transitions).
//!
//! Holds the mode, the raw text and a char-indexed cursor. All operations are
//! pure in-memory edits - no side effects, testable without TUI.

use crate::model::{Query, QueryMode, ValidationError};

/// Editable query bar state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    mode: QueryMode,
    text: String,
    /// Cursor position in chars (not bytes).
    cursor: usize,
    /// Validation failure of the last submit, shown until the next edit.
    validation: Option<ValidationError>,
}

impl QueryInput {
    /// Empty input in domain search mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input pre-filled with `text`, cursor at the end.
    pub fn with_text(mode: QueryMode, text: &str) -> Self {
        Self {
            mode,
            text: text.to_string(),
            cursor: text.chars().count(),
            validation: None,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// Raw, un-normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Validation failure of the last submit, if not yet edited away.
    pub fn validation(&self) -> Option<ValidationError> {
        self.validation
    }

    /// Switch between domain search and visit-id lookup.
    ///
    /// Only the label/placeholder change; text and cursor are kept.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.validation = None;
    }

    /// Insert `ch` at the cursor and advance the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        self.validation = None;
    }

    /// Delete the char before the cursor. No-op at position 0.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        self.validation = None;
    }

    /// Move cursor left by one char. Saturates at 0.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right by one char. Saturates at the text length.
    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.validation = None;
    }

    /// Normalize and validate the text into a [`Query`].
    ///
    /// On failure the error is also remembered for inline display; the
    /// caller must not issue any request.
    pub fn submit(&mut self) -> Result<Query, ValidationError> {
        let result = Query::new(self.mode, &self.text);
        self.validation = result.as_ref().err().copied();
        result
    }

    /// Byte offset of char position `chars`.
    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "query_input_tests.rs"]
mod tests;
