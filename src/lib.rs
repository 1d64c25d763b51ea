//! Refill the comment paragraph around a caret to a fixed width.
//!
//! The two building blocks are [`locate_paragraph`], which finds the run of
//! comment lines around the caret, and [`fill_paragraph`], which rewraps their
//! words. [`FillParagraph`] combines them into a single buffer edit.
//!
//! ```
//! use fillpara_lib::{Document, FillOutcome, FillParagraph};
//!
//! let mut doc = Document::new("# one\n#   two three\n\ncode()\n");
//! let outcome = FillParagraph::new("#").run(&mut doc, 0).unwrap();
//! assert!(matches!(outcome, FillOutcome::Filled(_)));
//! assert_eq!(doc.text(), "# one two three\n\ncode()\n");
//! ```

pub mod buffer;
pub mod command;
pub mod config;
pub mod exit_codes;
pub mod language;
pub mod paragraph;
pub mod utils;

pub use crate::buffer::{Document, EditError, EditableBuffer, TextBuffer};
pub use crate::command::{FillEdit, FillOutcome, FillParagraph, caret_offset};
pub use crate::language::Language;
pub use crate::paragraph::{Paragraph, locate_paragraph};
pub use crate::utils::text_reflow::{FILL_WIDTH, fill_lines, fill_paragraph};

/// Refill the paragraph at `caret` in `content` and return the new text
///
/// Returns `Ok(None)` when there is no paragraph at the caret, and an error
/// when the planned edit does not fit the content.
pub fn fill_at(content: &str, caret: usize, comment_prefix: &str) -> Result<Option<String>, EditError> {
    let mut doc = Document::new(content);
    let Some(edit) = FillParagraph::new(comment_prefix).plan(&doc, caret) else {
        return Ok(None);
    };

    edit.apply(&mut doc)?;
    Ok(Some(doc.into_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_at() {
        let content = "fn main() {\n    // a b\n    // c\n}\n";
        let offset = content.find("a b").unwrap();
        assert_eq!(
            fill_at(content, offset, "//").unwrap().as_deref(),
            Some("fn main() {\n    // a b c\n}\n")
        );
    }

    #[test]
    fn test_fill_at_outside_paragraph() {
        assert_eq!(fill_at("code\n", 0, "//"), Ok(None));
        assert_eq!(fill_at("// a\n", 100, "//"), Ok(None));
    }

    #[test]
    fn test_fill_at_already_filled_returns_same_text() {
        assert_eq!(fill_at("// a b\n", 0, "//"), Ok(Some("// a b\n".to_string())));
    }
}
