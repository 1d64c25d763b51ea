//! The fill-paragraph command
//!
//! Ties the paragraph locator and the filler to a buffer: find the paragraph
//! under the caret, refill it, and replace the original span with one edit.

use crate::buffer::{Document, EditError, EditableBuffer, TextBuffer};
use crate::paragraph::locate_paragraph;
use crate::utils::text_reflow::{FILL_WIDTH, fill_paragraph};

/// A single range replacement produced by the fill command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillEdit {
    /// Character offset where the replaced span starts
    pub start_offset: usize,
    /// Character offset one past the end of the replaced span
    pub end_offset: usize,
    /// The refilled paragraph, prefixes included
    pub replacement: String,
}

impl FillEdit {
    /// Whether applying the edit would leave the buffer unchanged
    pub fn is_noop<B: TextBuffer + ?Sized>(&self, buffer: &B) -> bool {
        buffer.text_range(self.start_offset, self.end_offset) == Some(self.replacement.as_str())
    }

    pub fn apply<B: EditableBuffer + ?Sized>(&self, buffer: &mut B) -> Result<(), EditError> {
        buffer.replace(self.start_offset, self.end_offset, &self.replacement)
    }
}

/// What running the command did to the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// The caret is not inside a paragraph; nothing was edited
    NoParagraph,
    /// The paragraph was already filled; nothing was edited
    Unchanged,
    /// The paragraph was replaced
    Filled(FillEdit),
}

/// Refills the paragraph around a caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillParagraph {
    comment_prefix: String,
    width: usize,
}

impl FillParagraph {
    pub fn new(comment_prefix: impl Into<String>) -> Self {
        Self {
            comment_prefix: comment_prefix.into(),
            width: FILL_WIDTH,
        }
    }

    pub fn comment_prefix(&self) -> &str {
        &self.comment_prefix
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Compute the edit for the paragraph at `caret` without applying it
    pub fn plan<B: TextBuffer + ?Sized>(&self, buffer: &B, caret: usize) -> Option<FillEdit> {
        let paragraph = locate_paragraph(buffer, caret, &self.comment_prefix)?;
        let filled = fill_paragraph(&paragraph, self.width);

        Some(FillEdit {
            start_offset: paragraph.start_offset,
            end_offset: paragraph.end_offset,
            replacement: paragraph.replacement_text(&filled),
        })
    }

    /// Refill the paragraph at `caret` in place
    ///
    /// The replacement is applied inside a [`Document::transaction`], so the
    /// document is either fully updated or left untouched.
    pub fn run(&self, doc: &mut Document, caret: usize) -> Result<FillOutcome, EditError> {
        let Some(edit) = self.plan(doc, caret) else {
            return Ok(FillOutcome::NoParagraph);
        };

        if edit.is_noop(doc) {
            log::debug!("Paragraph at offset {caret} is already filled");
            return Ok(FillOutcome::Unchanged);
        }

        doc.transaction(|doc| edit.apply(doc))?;
        Ok(FillOutcome::Filled(edit))
    }
}

/// Convert a 1-based line and column to a character offset
///
/// Returns `None` when the line does not exist. Columns past the end of the
/// line are clamped to the line end; column 0 is treated as 1.
pub fn caret_offset<B: TextBuffer + ?Sized>(buffer: &B, line: usize, column: usize) -> Option<usize> {
    let line_idx = line.checked_sub(1)?;
    if line_idx >= buffer.line_count() {
        return None;
    }

    let start = buffer.line_start_offset(line_idx);
    let end = buffer.line_end_offset(line_idx);
    Some((start + column.saturating_sub(1)).min(end))
}
