//! File processing for the fill command

use anyhow::{Context, Result};
use colored::*;
use fillpara_lib::config::Config;
use fillpara_lib::utils::{LineEnding, detect_line_ending_enum, normalize_line_ending};
use fillpara_lib::{Document, FillEdit, FillOutcome, FillParagraph, Language, caret_offset};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Where the caret is, as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caret {
    /// Character offset into the file as it is on disk
    Offset(usize),
    /// 1-based line and column
    Position { line: usize, column: usize },
}

#[derive(Debug, Clone)]
pub struct FillRequest<'a> {
    /// File to edit, `-` for stdin
    pub path: &'a str,
    pub caret: Caret,
    pub comment_prefix: Option<&'a str>,
    pub language: Option<Language>,
    /// File name used to detect the language of stdin input
    pub stdin_filename: Option<&'a str>,
    /// Print the document instead of writing it back
    pub to_stdout: bool,
    /// Report whether the paragraph would change without writing anything
    pub check: bool,
    pub quiet: bool,
}

impl FillRequest<'_> {
    fn is_stdin(&self) -> bool {
        self.path == "-"
    }

    /// Path used for language detection and config lookups
    fn language_path(&self) -> Option<&Path> {
        if self.is_stdin() {
            self.stdin_filename.map(Path::new)
        } else {
            Some(Path::new(self.path))
        }
    }

    fn display_name(&self) -> &str {
        if self.is_stdin() {
            self.stdin_filename.unwrap_or("<stdin>")
        } else {
            self.path
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    NoParagraph,
    Unchanged,
    Filled,
    /// `--check` found a paragraph that is not filled
    WouldChange,
}

/// Pick the comment prefix for a request
///
/// Precedence: `--comment-prefix`, then `--language`, then the config file,
/// then detection from the file name.
pub fn resolve_comment_prefix(
    comment_prefix: Option<&str>,
    language: Option<Language>,
    config: &Config,
    path: Option<&Path>,
) -> String {
    if let Some(prefix) = comment_prefix {
        return prefix.to_string();
    }
    if let Some(language) = language {
        return language.line_comment_prefix().to_string();
    }
    if let Some(prefix) = config.comment_prefix_for(path) {
        return prefix;
    }
    path.map(Language::from_path)
        .unwrap_or_default()
        .line_comment_prefix()
        .to_string()
}

/// Translate an offset into CRLF content to the same position after
/// normalizing to LF
fn lf_offset(original: &str, offset: usize) -> usize {
    let mut removed = 0;
    let mut chars = original.chars().peekable();
    for _ in 0..offset {
        match chars.next() {
            Some('\r') if chars.peek() == Some(&'\n') => removed += 1,
            Some(_) => {}
            None => break,
        }
    }
    offset - removed
}

/// Inverse of [`lf_offset`]: position in `original` of an offset into its
/// LF-normalized form
///
/// An offset at a normalized `\n` maps to the `\r` of the CRLF pair, so a span
/// ending at a line end leaves the whole terminator outside.
fn original_offset(original: &str, offset: usize) -> usize {
    let mut normalized = 0;
    let mut chars = original.chars().enumerate().peekable();
    while let Some((index, c)) = chars.next() {
        if normalized == offset {
            return index;
        }
        let starts_crlf = c == '\r' && chars.peek().is_some_and(|(_, next)| *next == '\n');
        if !starts_crlf {
            normalized += 1;
        }
    }
    original.chars().count()
}

/// Carry an edit planned on the LF-normalized text over to `original`
///
/// Only the paragraph span is touched; line breaks inside the replacement use
/// `line_ending`.
fn edit_for_original(edit: &FillEdit, original: &str, line_ending: LineEnding) -> FillEdit {
    FillEdit {
        start_offset: original_offset(original, edit.start_offset),
        end_offset: original_offset(original, edit.end_offset),
        replacement: edit.replacement.replace('\n', line_ending.as_str()),
    }
}

fn read_input(request: &FillRequest) -> Result<String> {
    if request.is_stdin() {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(request.path).with_context(|| format!("Failed to read file {}", request.path))
    }
}

/// Run the fill command for one file
pub fn process_fill(request: &FillRequest, config: &Config) -> Result<ProcessStatus> {
    let original = read_input(request)?;
    let original_line_ending = detect_line_ending_enum(&original);
    let mut doc = Document::new(normalize_line_ending(&original, LineEnding::Lf));

    let caret = match request.caret {
        Caret::Offset(offset) => lf_offset(&original, offset),
        Caret::Position { line, column } => caret_offset(&doc, line, column)
            .with_context(|| format!("Line {line} does not exist in {}", request.display_name()))?,
    };

    let prefix = resolve_comment_prefix(
        request.comment_prefix,
        request.language,
        config,
        request.language_path(),
    );
    log::debug!("Using comment prefix {prefix:?} for {}", request.display_name());
    let command = FillParagraph::new(prefix);

    if request.check {
        let status = match command.plan(&doc, caret) {
            None => ProcessStatus::NoParagraph,
            Some(edit) if edit.is_noop(&doc) => ProcessStatus::Unchanged,
            Some(_) => ProcessStatus::WouldChange,
        };
        report(request, status);
        return Ok(status);
    }

    let (status, output) = match command.run(&mut doc, caret).context("Failed to apply edit")? {
        FillOutcome::NoParagraph => (ProcessStatus::NoParagraph, original),
        FillOutcome::Unchanged => (ProcessStatus::Unchanged, original),
        FillOutcome::Filled(edit) => {
            // Splice the paragraph into the text as read, leaving every other line break alone
            let mut output = Document::new(original.as_str());
            edit_for_original(&edit, &original, original_line_ending)
                .apply(&mut output)
                .context("Failed to apply edit")?;
            (ProcessStatus::Filled, output.into_text())
        }
    };

    if request.is_stdin() || request.to_stdout {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(output.as_bytes())
            .and_then(|_| stdout.flush())
            .context("Failed to write to stdout")?;
    } else {
        if status == ProcessStatus::Filled {
            fs::write(request.path, &output).with_context(|| format!("Failed to write file {}", request.path))?;
        }
        report(request, status);
    }

    Ok(status)
}

fn report(request: &FillRequest, status: ProcessStatus) {
    if request.quiet {
        return;
    }
    let name = request.display_name();
    match status {
        ProcessStatus::NoParagraph => {
            eprintln!("{}: {}", name.blue(), "no paragraph at the caret".yellow());
        }
        ProcessStatus::Unchanged => {
            eprintln!("{}: paragraph already filled", name.blue());
        }
        ProcessStatus::Filled => {
            eprintln!("{}: {}", name.blue(), "paragraph refilled".green());
        }
        ProcessStatus::WouldChange => {
            eprintln!("{}: {}", name.blue(), "paragraph would be refilled".red());
        }
    }
}
