//! Text reflow utilities for the fill-paragraph command
//!
//! This module implements the greedy word wrap that refills the content lines
//! of a [`Paragraph`] into lines no longer than a fixed width. Comment prefixes
//! are not handled here: the lines passed in are already stripped, and the
//! caller puts the paragraph prefix back in front of every output line.

use crate::paragraph::Paragraph;

/// Width that refilled lines are wrapped to, in characters
pub const FILL_WIDTH: usize = 70;

/// Characters that separate words. Other whitespace is part of a word.
const WORD_SEPARATORS: [char; 2] = [' ', '\t'];

/// Leading run of spaces and tabs of a line
fn leading_indent(line: &str) -> &str {
    let rest = line.trim_start_matches(WORD_SEPARATORS);
    &line[..line.len() - rest.len()]
}

/// Split a line into words on runs of spaces and tabs
fn split_words(line: &str) -> impl Iterator<Item = &str> {
    line.split(WORD_SEPARATORS).filter(|word| !word.is_empty())
}

/// Refill the words of `lines` into lines of at most `width` characters
///
/// The indentation of the first line is put in front of every output line.
/// Whitespace between words collapses to a single space, and line breaks in the
/// input carry no meaning. A word longer than the width is never split; it
/// ends up alone on its own line.
///
/// Width is measured in characters, not display columns.
pub fn fill_lines<S: AsRef<str>>(lines: &[S], width: usize) -> Vec<String> {
    let indent = lines.first().map(|line| leading_indent(line.as_ref())).unwrap_or("");
    let indent_len = indent.chars().count();

    let mut result = Vec::new();
    let mut current = String::from(indent);
    let mut current_len = indent_len;

    for word in lines.iter().flat_map(|line| split_words(line.as_ref())) {
        let word_len = word.chars().count();

        if !current.is_empty() && current_len + word_len + 1 > width {
            // An empty line takes the word even when it is too long
            result.push(std::mem::replace(&mut current, indent.to_string()));
            current_len = indent_len;
        } else if !crate::utils::is_blank(&current) {
            current.push(' ');
            current_len += 1;
        }

        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

/// Refill the content lines of a paragraph
///
/// Returns the new lines without the paragraph prefix. See [`fill_lines`].
pub fn fill_paragraph(paragraph: &Paragraph, width: usize) -> Vec<String> {
    let filled = fill_lines(&paragraph.lines, width);
    log::debug!(
        "Refilled {} line(s) into {} line(s) at width {width}",
        paragraph.lines.len(),
        filled.len()
    );
    filled
}
