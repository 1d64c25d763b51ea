//!
//! Text buffers addressed by line number and character offset.
//!
//! The paragraph locator only reads through [`TextBuffer`]; the fill command
//! writes through [`EditableBuffer`]. [`Document`] is the in-memory
//! implementation used by the CLI and the tests.

use std::fmt;

/// Errors raised when an edit does not fit the buffer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Offset {offset} is outside the buffer (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("Edit range is inverted: start {start} is after end {end}")]
    InvertedRange { start: usize, end: usize },
}

/// Read-only view of a text buffer
///
/// Offsets are character offsets from the start of the buffer. Line indices are
/// 0-based. Line accessors expect `line < self.line_count()`.
pub trait TextBuffer {
    /// Number of lines; an empty buffer has one empty line
    fn line_count(&self) -> usize;

    /// Offset of the first character of `line`
    fn line_start_offset(&self, line: usize) -> usize;

    /// Offset one past the last character of `line`, line terminator excluded
    fn line_end_offset(&self, line: usize) -> usize;

    /// Text of `line` without its terminator
    fn line_text(&self, line: usize) -> &str;

    /// Line containing `offset`, or `None` when the offset is past the end
    fn line_of_offset(&self, offset: usize) -> Option<usize>;

    /// Text between two offsets, or `None` when the range does not fit
    fn text_range(&self, start: usize, end: usize) -> Option<&str>;
}

/// A buffer that accepts range replacements
pub trait EditableBuffer: TextBuffer {
    /// Replace the characters in `[start, end)` with `text`
    fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<(), EditError>;
}

/// Pre-computed position of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineInfo {
    /// Character offset where this line starts
    char_offset: usize,
    /// Length of the line in characters (without newline)
    char_len: usize,
    /// Byte offset where this line starts
    byte_offset: usize,
    /// Length of the line in bytes (without newline)
    byte_len: usize,
}

/// In-memory text buffer with LF line breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    lines: Vec<LineInfo>,
    char_len: usize,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let (lines, char_len) = Self::compute_line_info(&text);
        Self { text, lines, char_len }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Length of the document in characters
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Run `f` against the document as one edit
    ///
    /// If `f` returns an error or panics, the document is put back to the text
    /// it held before the call.
    pub fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Document) -> Result<T, E>) -> Result<T, E> {
        let mut guard = Rollback {
            snapshot: Some(self.text.clone()),
            doc: self,
        };
        let value = f(&mut *guard.doc)?;
        guard.snapshot = None;
        Ok(value)
    }

    fn reset(&mut self, text: String) {
        *self = Self::new(text);
    }

    fn compute_line_info(text: &str) -> (Vec<LineInfo>, usize) {
        let mut lines = Vec::new();
        let mut line_char_start = 0;
        let mut line_byte_start = 0;
        let mut char_idx = 0;

        for (byte_idx, c) in text.char_indices() {
            if c == '\n' {
                lines.push(LineInfo {
                    char_offset: line_char_start,
                    char_len: char_idx - line_char_start,
                    byte_offset: line_byte_start,
                    byte_len: byte_idx - line_byte_start,
                });
                line_char_start = char_idx + 1;
                line_byte_start = byte_idx + 1;
            }
            char_idx += 1;
        }

        lines.push(LineInfo {
            char_offset: line_char_start,
            char_len: char_idx - line_char_start,
            byte_offset: line_byte_start,
            byte_len: text.len() - line_byte_start,
        });

        (lines, char_idx)
    }

    /// Map a character offset to a byte offset
    fn char_to_byte(&self, offset: usize) -> Option<usize> {
        let line = self.line_of_offset(offset)?;
        let info = &self.lines[line];
        let within = offset - info.char_offset;
        let byte = self.text[info.byte_offset..]
            .char_indices()
            .nth(within)
            .map(|(i, _)| info.byte_offset + i)
            .unwrap_or(self.text.len());
        Some(byte)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TextBuffer for Document {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_start_offset(&self, line: usize) -> usize {
        self.lines[line].char_offset
    }

    fn line_end_offset(&self, line: usize) -> usize {
        let info = &self.lines[line];
        info.char_offset + info.char_len
    }

    fn line_text(&self, line: usize) -> &str {
        let info = &self.lines[line];
        &self.text[info.byte_offset..info.byte_offset + info.byte_len]
    }

    fn line_of_offset(&self, offset: usize) -> Option<usize> {
        if offset > self.char_len {
            return None;
        }
        // lines[0] starts at 0, so the partition point is at least 1
        Some(self.lines.partition_point(|info| info.char_offset <= offset) - 1)
    }

    fn text_range(&self, start: usize, end: usize) -> Option<&str> {
        if start > end {
            return None;
        }
        let start_byte = self.char_to_byte(start)?;
        let end_byte = self.char_to_byte(end)?;
        Some(&self.text[start_byte..end_byte])
    }
}

impl EditableBuffer for Document {
    fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<(), EditError> {
        if start > end {
            return Err(EditError::InvertedRange { start, end });
        }
        let len = self.char_len;
        let start_byte = self
            .char_to_byte(start)
            .ok_or(EditError::OffsetOutOfRange { offset: start, len })?;
        let end_byte = self
            .char_to_byte(end)
            .ok_or(EditError::OffsetOutOfRange { offset: end, len })?;

        self.text.replace_range(start_byte..end_byte, text);
        let (lines, char_len) = Self::compute_line_info(&self.text);
        self.lines = lines;
        self.char_len = char_len;
        Ok(())
    }
}

/// Restores the document snapshot unless the transaction completed
struct Rollback<'a> {
    doc: &'a mut Document,
    snapshot: Option<String>,
}

impl Drop for Rollback<'_> {
    fn drop(&mut self) {
        if let Some(text) = self.snapshot.take() {
            log::debug!("Rolling back incomplete edit");
            self.doc.reset(text);
        }
    }
}
