//! Source languages and their line comment markers
//!
//! The fill command needs the line comment prefix of the document being
//! edited. Languages are detected from the file name; anything unknown is
//! treated as plain text, which has no comment prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A language the fill command knows the comment syntax of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    PlainText,
    Markdown,
    Rust,
    C,
    Cpp,
    CSharp,
    Java,
    Kotlin,
    Scala,
    Go,
    JavaScript,
    TypeScript,
    Swift,
    Dart,
    Python,
    Shell,
    Ruby,
    Perl,
    R,
    Elixir,
    Toml,
    Yaml,
    Makefile,
    Dockerfile,
    Lua,
    Sql,
    Haskell,
    Elm,
    Ada,
    Lisp,
    Clojure,
    Ini,
    Erlang,
    Tex,
    VimScript,
    Fortran,
    Batch,
    Html,
    Css,
}

impl Language {
    /// Every known language, in the order `fillpara languages` lists them
    pub const ALL: &'static [Language] = &[
        Language::PlainText,
        Language::Markdown,
        Language::Rust,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Java,
        Language::Kotlin,
        Language::Scala,
        Language::Go,
        Language::JavaScript,
        Language::TypeScript,
        Language::Swift,
        Language::Dart,
        Language::Python,
        Language::Shell,
        Language::Ruby,
        Language::Perl,
        Language::R,
        Language::Elixir,
        Language::Toml,
        Language::Yaml,
        Language::Makefile,
        Language::Dockerfile,
        Language::Lua,
        Language::Sql,
        Language::Haskell,
        Language::Elm,
        Language::Ada,
        Language::Lisp,
        Language::Clojure,
        Language::Ini,
        Language::Erlang,
        Language::Tex,
        Language::VimScript,
        Language::Fortran,
        Language::Batch,
        Language::Html,
        Language::Css,
    ];

    /// Line comment marker, empty for languages without line comments
    pub fn line_comment_prefix(self) -> &'static str {
        match self {
            Self::Rust
            | Self::C
            | Self::Cpp
            | Self::CSharp
            | Self::Java
            | Self::Kotlin
            | Self::Scala
            | Self::Go
            | Self::JavaScript
            | Self::TypeScript
            | Self::Swift
            | Self::Dart => "//",
            Self::Python
            | Self::Shell
            | Self::Ruby
            | Self::Perl
            | Self::R
            | Self::Elixir
            | Self::Toml
            | Self::Yaml
            | Self::Makefile
            | Self::Dockerfile => "#",
            Self::Lua | Self::Sql | Self::Haskell | Self::Elm | Self::Ada => "--",
            Self::Lisp | Self::Clojure | Self::Ini => ";",
            Self::Erlang | Self::Tex => "%",
            Self::VimScript => "\"",
            Self::Fortran => "!",
            Self::Batch => "REM",
            Self::PlainText | Self::Markdown | Self::Html | Self::Css => "",
        }
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::PlainText => "text",
            Self::Markdown => "markdown",
            Self::Rust => "rust",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::Scala => "scala",
            Self::Go => "go",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Swift => "swift",
            Self::Dart => "dart",
            Self::Python => "python",
            Self::Shell => "shell",
            Self::Ruby => "ruby",
            Self::Perl => "perl",
            Self::R => "r",
            Self::Elixir => "elixir",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Makefile => "makefile",
            Self::Dockerfile => "dockerfile",
            Self::Lua => "lua",
            Self::Sql => "sql",
            Self::Haskell => "haskell",
            Self::Elm => "elm",
            Self::Ada => "ada",
            Self::Lisp => "lisp",
            Self::Clojure => "clojure",
            Self::Ini => "ini",
            Self::Erlang => "erlang",
            Self::Tex => "tex",
            Self::VimScript => "vim",
            Self::Fortran => "fortran",
            Self::Batch => "batch",
            Self::Html => "html",
            Self::Css => "css",
        }
    }

    /// Detect language from file extension (without the dot)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" | "mdx" => Self::Markdown,
            "rs" => Self::Rust,
            "c" | "h" => Self::C,
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" => Self::Cpp,
            "cs" => Self::CSharp,
            "java" => Self::Java,
            "kt" | "kts" => Self::Kotlin,
            "scala" | "sc" => Self::Scala,
            "go" => Self::Go,
            "js" | "mjs" | "cjs" | "jsx" => Self::JavaScript,
            "ts" | "mts" | "cts" | "tsx" => Self::TypeScript,
            "swift" => Self::Swift,
            "dart" => Self::Dart,
            "py" | "pyi" => Self::Python,
            "sh" | "bash" | "zsh" | "fish" => Self::Shell,
            "rb" => Self::Ruby,
            "pl" | "pm" => Self::Perl,
            "r" => Self::R,
            "ex" | "exs" => Self::Elixir,
            "toml" => Self::Toml,
            "yml" | "yaml" => Self::Yaml,
            "mk" => Self::Makefile,
            "lua" => Self::Lua,
            "sql" => Self::Sql,
            "hs" => Self::Haskell,
            "elm" => Self::Elm,
            "adb" | "ads" => Self::Ada,
            "lisp" | "el" | "scm" | "rkt" => Self::Lisp,
            "clj" | "cljs" | "cljc" | "edn" => Self::Clojure,
            "ini" | "cfg" => Self::Ini,
            "erl" | "hrl" => Self::Erlang,
            "tex" | "sty" | "cls" => Self::Tex,
            "vim" => Self::VimScript,
            "f" | "f90" | "f95" | "f03" => Self::Fortran,
            "bat" | "cmd" => Self::Batch,
            "html" | "htm" | "xml" => Self::Html,
            "css" => Self::Css,
            _ => Self::PlainText,
        }
    }

    /// Detect language from file path
    ///
    /// Well-known file names without an extension are recognised before the
    /// extension is looked at.
    pub fn from_path(path: &Path) -> Self {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match file_name {
            "Makefile" | "makefile" | "GNUmakefile" => return Self::Makefile,
            "Dockerfile" | "Containerfile" => return Self::Dockerfile,
            "CMakeLists.txt" => return Self::Shell,
            ".bashrc" | ".zshrc" | ".profile" => return Self::Shell,
            _ => {}
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::PlainText)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if let Some(language) = Self::ALL.iter().find(|l| l.name() == normalized) {
            return Ok(*language);
        }
        match normalized.as_str() {
            "" | "plain" | "plaintext" | "txt" | "none" => Ok(Self::PlainText),
            "md" => Ok(Self::Markdown),
            "rs" => Ok(Self::Rust),
            "c++" | "cxx" => Ok(Self::Cpp),
            "c#" | "cs" => Ok(Self::CSharp),
            "kt" => Ok(Self::Kotlin),
            "golang" => Ok(Self::Go),
            "js" => Ok(Self::JavaScript),
            "ts" => Ok(Self::TypeScript),
            "py" => Ok(Self::Python),
            "sh" | "bash" | "zsh" => Ok(Self::Shell),
            "rb" => Ok(Self::Ruby),
            "yml" => Ok(Self::Yaml),
            "make" => Ok(Self::Makefile),
            "docker" => Ok(Self::Dockerfile),
            "hs" => Ok(Self::Haskell),
            "elisp" | "scheme" | "racket" => Ok(Self::Lisp),
            "clj" => Ok(Self::Clojure),
            "latex" => Ok(Self::Tex),
            "vimscript" | "viml" => Ok(Self::VimScript),
            "bat" | "cmd" => Ok(Self::Batch),
            "xml" => Ok(Self::Html),
            _ => Err(format!("Unknown language: {s}")),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.name().to_string()
    }
}
