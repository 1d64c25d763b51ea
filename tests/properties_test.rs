use fillpara_lib::{Document, FILL_WIDTH, TextBuffer, fill_lines, locate_paragraph};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9.,]{1,12}"
}

fn content_line() -> impl Strategy<Value = String> {
    (" {0,3}", prop::collection::vec(word(), 1..8), "[ \t]{1,3}")
        .prop_map(|(indent, words, gap)| format!("{indent}{}", words.join(gap.as_str())))
}

fn paragraph_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(content_line(), 1..10)
}

/// Lines of a small source file: comments, code and blank lines mixed
fn source_line() -> impl Strategy<Value = String> {
    prop_oneof![
        content_line().prop_map(|line| format!("# {line}")),
        content_line().prop_map(|line| format!("  # {line}")),
        Just("#".to_string()),
        Just(String::new()),
        content_line().prop_map(|line| format!("x = {line}")),
    ]
}

fn words_of<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.as_ref().split([' ', '\t']).filter(|w| !w.is_empty()))
        .map(str::to_string)
        .collect()
}

proptest! {
    #[test]
    fn filling_is_idempotent(lines in paragraph_lines(), width in 10usize..90) {
        let once = fill_lines(&lines, width);
        let twice = fill_lines(&once, width);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filling_keeps_every_word_in_order(lines in paragraph_lines()) {
        let filled = fill_lines(&lines, FILL_WIDTH);
        prop_assert_eq!(words_of(&filled), words_of(&lines));
    }

    #[test]
    fn lines_with_several_words_fit_the_width(lines in paragraph_lines(), width in 10usize..90) {
        for line in fill_lines(&lines, width) {
            if line.split_whitespace().count() > 1 {
                prop_assert!(line.chars().count() <= width, "line too long: {:?}", line);
            }
        }
    }

    #[test]
    fn every_line_starts_with_the_first_indent(lines in paragraph_lines()) {
        let indent: String = lines[0].chars().take_while(|c| *c == ' ').collect();
        for line in fill_lines(&lines, FILL_WIDTH) {
            prop_assert!(line.starts_with(&indent));
        }
    }

    #[test]
    fn located_paragraph_is_well_formed(
        lines in prop::collection::vec(source_line(), 1..12),
        caret_seed in any::<usize>(),
    ) {
        let doc = Document::new(lines.join("\n"));
        let caret = caret_seed % (doc.char_len() + 1);

        if let Some(paragraph) = locate_paragraph(&doc, caret, "#") {
            prop_assert!(!paragraph.lines.is_empty());
            prop_assert!(paragraph.start_offset <= paragraph.end_offset);
            prop_assert!(paragraph.end_offset <= doc.char_len());

            let first = doc.line_of_offset(paragraph.start_offset).unwrap();
            let last = doc.line_of_offset(paragraph.end_offset).unwrap();
            let caret_line = doc.line_of_offset(caret).unwrap();
            prop_assert_eq!(last - first + 1, paragraph.lines.len());
            prop_assert!(first <= caret_line && caret_line <= last);

            // Every paragraph line is a non-blank comment line
            for line in first..=last {
                let text = doc.line_text(line);
                let (before, after) = text.split_once('#').unwrap();
                prop_assert!(before.trim().is_empty());
                prop_assert!(!after.trim().is_empty());
            }
        }
    }

    #[test]
    fn filling_only_touches_the_paragraph(
        lines in prop::collection::vec(source_line(), 1..12),
        caret_seed in any::<usize>(),
    ) {
        let text = lines.join("\n");
        let doc = Document::new(text.as_str());
        let caret = caret_seed % (doc.char_len() + 1);

        let filled = fillpara_lib::fill_at(&text, caret, "#");
        prop_assert!(filled.is_ok(), "edit did not fit: {:?}", filled);

        match (locate_paragraph(&doc, caret, "#"), filled.unwrap()) {
            (Some(paragraph), Some(filled)) => {
                let head: String = text.chars().take(paragraph.start_offset).collect();
                let tail: String = text.chars().skip(paragraph.end_offset).collect();
                prop_assert!(filled.starts_with(&head));
                prop_assert!(filled.ends_with(&tail));
            }
            (None, result) => prop_assert_eq!(result, None),
            (Some(_), None) => prop_assert!(false, "fill failed for a located paragraph"),
        }
    }
}
