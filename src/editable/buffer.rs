//! Rope-backed text buffer used by the markdown transforms.
//!
//! Wraps `ropey::Rope` to answer the line questions every transform asks
//! ("where does the line containing this offset start and end?") and to apply
//! character-offset edits. All offsets are clamped, so callers may pass
//! out-of-range values without panicking.

use std::ops::Range;

use ropey::Rope;

/// Character-indexed text buffer for a single field value.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    /// Create a RopeBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Clamp a character offset into `[0, len_chars]`
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.len_chars())
    }

    /// Character just before `offset`, if any
    pub fn char_before(&self, offset: usize) -> Option<char> {
        let offset = self.clamp(offset);
        (offset > 0).then(|| self.rope.char(offset - 1))
    }

    /// Line index containing the character offset
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(self.clamp(offset))
    }

    /// Offset of the first character of `line`
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Offset just past the last character of `line`, excluding a trailing
    /// `\n` or `\r\n`
    pub fn line_end(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.len_chars();
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        let start = self.rope.line_to_char(line);
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        start + len
    }

    /// Character range of the line containing `offset` (newline excluded)
    pub fn line_range_at(&self, offset: usize) -> Range<usize> {
        let line = self.line_of(offset);
        self.line_start(line)..self.line_end(line)
    }

    /// Get slice of text as String (by character indices)
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Insert text at character offset
    pub fn insert(&mut self, offset: usize, text: &str) {
        let clamped = self.clamp(offset);
        self.rope.insert(clamped, text);
    }

    /// Remove text in character range
    pub fn remove(&mut self, range: Range<usize>) {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Replace text in range with new text
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let start = self.clamp(range.start);
        self.remove(start..range.end);
        self.insert(start, text);
    }

    /// Get full content as String
    pub fn content(&self) -> String {
        self.rope.to_string()
    }
}

/// Number of characters in `s` (offsets throughout the crate count chars)
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
