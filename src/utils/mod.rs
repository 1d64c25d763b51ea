//!
//! Utility functions and modules shared by the paragraph locator, the filler and the CLI.

pub mod text_reflow;

/// Line ending style of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Detect the dominant line ending of `content`
///
/// CRLF wins only when it is strictly more common than bare LF. Content without
/// any line break is reported as LF.
pub fn detect_line_ending_enum(content: &str) -> LineEnding {
    let crlf_count = content.matches("\r\n").count();
    let lf_count = content.matches('\n').count() - crlf_count;

    if crlf_count > lf_count {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    }
}

/// Rewrite every line break in `content` to `target`
pub fn normalize_line_ending(content: &str, target: LineEnding) -> String {
    let lf = content.replace("\r\n", "\n");
    match target {
        LineEnding::Lf => lf,
        LineEnding::CrLf => lf.replace('\n', "\r\n"),
    }
}

/// Whether a string is empty or made of whitespace only
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
