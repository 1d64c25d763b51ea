use fillpara_lib::{Document, Paragraph, TextBuffer, locate_paragraph};

fn offset_of(doc: &Document, line: usize) -> usize {
    doc.line_start_offset(line)
}

#[test]
fn test_paragraph_stops_at_blank_line() {
    let doc = Document::new("# line1\n# line2\n\ncode");
    let paragraph = locate_paragraph(&doc, 0, "#").unwrap();

    assert_eq!(
        paragraph,
        Paragraph {
            start_offset: 0,
            end_offset: 15,
            lines: vec![" line1".to_string(), " line2".to_string()],
            prefix: "#".to_string(),
        }
    );
}

#[test]
fn test_caret_on_any_line_finds_same_paragraph() {
    let doc = Document::new("# line1\n# line2\n\ncode");
    let from_first = locate_paragraph(&doc, 0, "#").unwrap();
    let from_second = locate_paragraph(&doc, offset_of(&doc, 1) + 3, "#").unwrap();
    assert_eq!(from_first, from_second);
}

#[test]
fn test_content_keeps_text_after_prefix() {
    let doc = Document::new("# hello");
    let paragraph = locate_paragraph(&doc, 2, "#").unwrap();
    assert_eq!(paragraph.lines, vec![" hello"]);
}

#[test]
fn test_no_paragraph_on_blank_or_code_line() {
    let doc = Document::new("# line1\n# line2\n\ncode");
    assert_eq!(locate_paragraph(&doc, offset_of(&doc, 2), "#"), None);
    assert_eq!(locate_paragraph(&doc, offset_of(&doc, 3), "#"), None);
}

#[test]
fn test_no_paragraph_past_end_of_buffer() {
    let doc = Document::new("# a");
    assert!(locate_paragraph(&doc, 3, "#").is_some());
    assert_eq!(locate_paragraph(&doc, 4, "#"), None);
}

#[test]
fn test_empty_comment_line_terminates_paragraph() {
    let doc = Document::new("// a\n//\n// b");

    let top = locate_paragraph(&doc, 0, "//").unwrap();
    assert_eq!(top.lines, vec![" a"]);
    assert_eq!((top.start_offset, top.end_offset), (0, 4));

    assert_eq!(locate_paragraph(&doc, 5, "//"), None);

    let bottom = locate_paragraph(&doc, 8, "//").unwrap();
    assert_eq!(bottom.lines, vec![" b"]);
    assert_eq!((bottom.start_offset, bottom.end_offset), (8, 12));
}

#[test]
fn test_whitespace_only_comment_is_blank() {
    let doc = Document::new("//   \t\n// text");
    assert_eq!(locate_paragraph(&doc, 0, "//"), None);
    let paragraph = locate_paragraph(&doc, offset_of(&doc, 1), "//").unwrap();
    assert_eq!(paragraph.lines, vec![" text"]);
}

#[test]
fn test_trailing_comment_after_code_is_excluded() {
    let content = "let x = 1; // trailing\n    // first\n    // second\nfn f() {}\n";
    let doc = Document::new(content);

    let paragraph = locate_paragraph(&doc, offset_of(&doc, 1), "//").unwrap();
    assert_eq!(paragraph.lines, vec![" first", " second"]);
    assert_eq!(paragraph.prefix, "    //");
    assert_eq!(paragraph.start_offset, offset_of(&doc, 1));
    assert_eq!(paragraph.end_offset, doc.line_end_offset(2));

    // The code line itself is not a paragraph
    assert_eq!(locate_paragraph(&doc, 0, "//"), None);
}

#[test]
fn test_caret_in_middle_collects_both_directions_in_order() {
    let doc = Document::new("code\n# one\n# two\n# three\n# four\ncode");
    let paragraph = locate_paragraph(&doc, offset_of(&doc, 3), "#").unwrap();

    assert_eq!(paragraph.lines, vec![" one", " two", " three", " four"]);
    assert_eq!(paragraph.start_offset, offset_of(&doc, 1));
    assert_eq!(paragraph.end_offset, doc.line_end_offset(4));
}

#[test]
fn test_prefix_comes_from_caret_line() {
    let doc = Document::new("  # a\n# b\n");

    let from_top = locate_paragraph(&doc, 0, "#").unwrap();
    assert_eq!(from_top.prefix, "  #");

    let from_bottom = locate_paragraph(&doc, offset_of(&doc, 1), "#").unwrap();
    assert_eq!(from_bottom.prefix, "#");
    assert_eq!(from_bottom.lines, vec![" a", " b"]);
}

#[test]
fn test_content_indentation_is_kept_per_line() {
    let doc = Document::new("#    indented\n# flush");
    let paragraph = locate_paragraph(&doc, 0, "#").unwrap();
    assert_eq!(paragraph.lines, vec!["    indented", " flush"]);
}

#[test]
fn test_plain_text_mode() {
    let doc = Document::new("hello world\n\nnext");
    let paragraph = locate_paragraph(&doc, 0, "").unwrap();

    assert_eq!(paragraph.lines, vec!["hello world"]);
    assert_eq!(paragraph.prefix, "");
    assert_eq!((paragraph.start_offset, paragraph.end_offset), (0, 11));

    let next = locate_paragraph(&doc, offset_of(&doc, 2), "").unwrap();
    assert_eq!(next.lines, vec!["next"]);
}

#[test]
fn test_plain_text_mode_keeps_indentation_in_content() {
    let doc = Document::new("  a\n  b\n");
    let paragraph = locate_paragraph(&doc, 0, "").unwrap();
    assert_eq!(paragraph.lines, vec!["  a", "  b"]);
    assert_eq!(paragraph.prefix, "");
}

#[test]
fn test_caret_at_end_of_document() {
    let doc = Document::new("# a\n# b");
    let paragraph = locate_paragraph(&doc, 7, "#").unwrap();
    assert_eq!(paragraph.lines, vec![" a", " b"]);
}

#[test]
fn test_offsets_count_characters() {
    let doc = Document::new("// héllo\n// wörld\n\nx");
    let paragraph = locate_paragraph(&doc, 10, "//").unwrap();
    assert_eq!((paragraph.start_offset, paragraph.end_offset), (0, 17));
    assert_eq!(paragraph.lines, vec![" héllo", " wörld"]);
}

#[test]
fn test_start_not_after_end() {
    let doc = Document::new("#x");
    let paragraph = locate_paragraph(&doc, 0, "#").unwrap();
    assert!(paragraph.start_offset <= paragraph.end_offset);
    assert!(!paragraph.lines.is_empty());
}

/// A buffer made of separate line strings, as an editor might hand them over
struct LineBuffer {
    lines: Vec<String>,
    text: String,
}

impl LineBuffer {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            text: lines.join("\n"),
        }
    }

    fn starts(&self) -> Vec<usize> {
        let mut starts = Vec::with_capacity(self.lines.len());
        let mut offset = 0;
        for line in &self.lines {
            starts.push(offset);
            offset += line.chars().count() + 1;
        }
        starts
    }
}

impl TextBuffer for LineBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_start_offset(&self, line: usize) -> usize {
        self.starts()[line]
    }

    fn line_end_offset(&self, line: usize) -> usize {
        self.starts()[line] + self.lines[line].chars().count()
    }

    fn line_text(&self, line: usize) -> &str {
        &self.lines[line]
    }

    fn line_of_offset(&self, offset: usize) -> Option<usize> {
        let last = self.lines.len() - 1;
        if offset > self.line_end_offset(last) {
            return None;
        }
        self.starts().iter().rposition(|&start| start <= offset)
    }

    fn text_range(&self, start: usize, end: usize) -> Option<&str> {
        // ASCII only in these tests
        self.text.get(start..end)
    }
}

#[test]
fn test_locator_works_on_any_text_buffer() {
    let buffer = LineBuffer::new(&["-- one", "-- two", "select 1;"]);
    let paragraph = locate_paragraph(&buffer, 8, "--").unwrap();

    assert_eq!(paragraph.lines, vec![" one", " two"]);
    assert_eq!(paragraph.prefix, "--");
    assert_eq!((paragraph.start_offset, paragraph.end_offset), (0, 13));
    assert_eq!(locate_paragraph(&buffer, 15, "--"), None);
}
