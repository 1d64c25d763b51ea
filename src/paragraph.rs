//! Paragraph detection around a caret position
//!
//! A paragraph is the maximal run of adjacent lines around the caret that are
//! bare comment lines (only whitespace before the comment prefix) with
//! non-blank text after the prefix. With an empty comment prefix every line
//! qualifies as a comment line, so a paragraph is a run of non-blank lines.

use crate::buffer::TextBuffer;
use crate::utils::is_blank;

/// A block of comment lines found around the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Character offset of the first character of the first line
    pub start_offset: usize,
    /// Character offset one past the last character of the last line
    pub end_offset: usize,
    /// Text after the comment prefix of each line, top to bottom
    pub lines: Vec<String>,
    /// Indentation and comment marker to put in front of every refilled line.
    /// Empty when no comment prefix applies.
    pub prefix: String,
}

impl Paragraph {
    /// Build the text that replaces `[start_offset, end_offset)`
    ///
    /// Every refilled line gets the paragraph prefix; lines are joined with `\n`.
    pub fn replacement_text<S: AsRef<str>>(&self, filled: &[S]) -> String {
        filled
            .iter()
            .map(|line| format!("{}{}", self.prefix, line.as_ref()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// How a single line relates to the paragraph being scanned
#[derive(Debug, PartialEq, Eq)]
enum LineScan<'a> {
    /// No comment prefix, or code before it
    NotComment,
    /// A comment line with nothing after the prefix
    Blank,
    Content {
        /// Line text up to and including the comment prefix
        prefix: &'a str,
        /// Line text after the comment prefix
        content: &'a str,
    },
}

fn scan_line<'a>(line: &'a str, comment_prefix: &str) -> LineScan<'a> {
    let Some(comment_start) = line.find(comment_prefix) else {
        return LineScan::NotComment;
    };
    if !is_blank(&line[..comment_start]) {
        return LineScan::NotComment;
    }

    let content_start = comment_start + comment_prefix.len();
    let content = &line[content_start..];
    if is_blank(content) {
        return LineScan::Blank;
    }

    LineScan::Content {
        prefix: &line[..content_start],
        content,
    }
}

/// Find the paragraph containing `caret`
///
/// Scans upward from the caret line, then downward from the line below it,
/// collecting lines for as long as they are bare comment lines with non-blank
/// text. The prefix is taken from the caret line and is not re-derived for the
/// other lines.
///
/// Returns `None` when the caret is outside the buffer or its line does not
/// qualify. This is an ordinary outcome: the caller should leave the buffer
/// alone.
pub fn locate_paragraph<B: TextBuffer + ?Sized>(buffer: &B, caret: usize, comment_prefix: &str) -> Option<Paragraph> {
    let current_line = buffer.line_of_offset(caret)?;

    let mut lines = Vec::new();
    let mut prefix: Option<String> = None;
    let mut start_offset = buffer.line_start_offset(current_line);

    for line in (0..=current_line).rev() {
        let LineScan::Content {
            prefix: line_prefix,
            content,
        } = scan_line(buffer.line_text(line), comment_prefix)
        else {
            break;
        };

        prefix.get_or_insert_with(|| line_prefix.to_string());
        lines.push(content.to_string());
        start_offset = buffer.line_start_offset(line);
    }

    if lines.is_empty() {
        log::debug!("No paragraph at line {}", current_line + 1);
        return None;
    }

    lines.reverse();

    let mut end_offset = buffer.line_end_offset(current_line);
    for line in current_line + 1..buffer.line_count() {
        let LineScan::Content { content, .. } = scan_line(buffer.line_text(line), comment_prefix) else {
            break;
        };

        lines.push(content.to_string());
        end_offset = buffer.line_end_offset(line);
    }

    log::debug!(
        "Found paragraph of {} line(s) at offsets {start_offset}..{end_offset}",
        lines.len()
    );

    Some(Paragraph {
        start_offset,
        end_offset,
        lines,
        prefix: prefix.unwrap_or_default(),
    })
}
