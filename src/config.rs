//!
//! This module defines configuration structures and loading logic for fillpara.
//! Configuration is read from a TOML file, either given explicitly or discovered
//! by walking up from the working directory.

use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file names, in order of precedence
pub const CONFIG_FILES: &[&str] = &[".fillpara.toml", "fillpara.toml", ".config/fillpara.toml"];

/// Represents the complete configuration loaded from .fillpara.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,

    /// Comment prefix overrides, keyed by file extension or language name
    /// Example: { "rs" = "///", "python" = "#:" }
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
}

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GlobalConfig {
    /// Comment prefix to use for every file, overriding language detection
    #[serde(alias = "comment_prefix", skip_serializing_if = "Option::is_none")]
    pub comment_prefix: Option<String>,

    /// Language to assume for every file instead of detecting it from the file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl Config {
    /// Comment prefix the config file asks for when editing `path`
    ///
    /// An entry in `[languages]` matching the file extension wins over one
    /// matching the language name, then `global.comment-prefix`, then the
    /// prefix of `global.language`. `None` means the config has no opinion.
    pub fn comment_prefix_for(&self, path: Option<&Path>) -> Option<String> {
        let by_extension = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(|ext| self.language_override(ext));
        if let Some(prefix) = by_extension {
            return Some(prefix.to_string());
        }

        let language = self.global.language.or_else(|| path.map(Language::from_path));
        if let Some(prefix) = language.and_then(|l| self.language_override(l.name())) {
            return Some(prefix.to_string());
        }

        if let Some(prefix) = &self.global.comment_prefix {
            return Some(prefix.clone());
        }

        self.global.language.map(|l| l.line_comment_prefix().to_string())
    }

    fn language_override(&self, key: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|(k, _)| normalize_key(k) == normalize_key(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Normalizes a `[languages]` key: lowercase, leading dot removed
pub fn normalize_key(key: &str) -> String {
    key.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

/// A configuration together with the file it came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when built-in defaults are in use
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Load configuration for a CLI invocation
    ///
    /// An explicit `config_path` must exist. Without one, the working directory
    /// and its parents are searched unless `isolated` is set.
    pub fn load(config_path: Option<&str>, isolated: bool) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            let path = PathBuf::from(path);
            let config = load_from_file(&path)?;
            return Ok(Self {
                config,
                source: Some(path),
            });
        }

        if isolated {
            log::debug!("[fillpara-config] Ignoring configuration files");
            return Ok(Self::default());
        }

        let start_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                log::debug!("[fillpara-config] Failed to get current directory: {e}");
                return Ok(Self::default());
            }
        };

        Self::load_with_discovery_from(&start_dir)
    }

    /// Discover and load the configuration visible from `start_dir`
    pub fn load_with_discovery_from(start_dir: &Path) -> Result<Self, ConfigError> {
        match discover_config_upward(start_dir) {
            Some(path) => {
                let config = load_from_file(&path)?;
                Ok(Self {
                    config,
                    source: Some(path),
                })
            }
            None => Ok(Self::default()),
        }
    }
}

/// Discover a configuration file by traversing up the directory tree.
/// The search stops at the first directory containing `.git`.
pub fn discover_config_upward(start_dir: &Path) -> Option<PathBuf> {
    const MAX_DEPTH: usize = 100;

    let mut current_dir = start_dir.to_path_buf();

    for _ in 0..MAX_DEPTH {
        log::debug!("[fillpara-config] Searching for config in: {}", current_dir.display());

        for config_name in CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if config_path.is_file() {
                log::debug!("[fillpara-config] Found config file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if current_dir.join(".git").exists() {
            log::debug!("[fillpara-config] Stopping at .git directory");
            return None;
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                log::debug!("[fillpara-config] Reached filesystem root");
                return None;
            }
        }
    }

    log::debug!("[fillpara-config] Maximum traversal depth reached");
    None
}

/// Read and parse one configuration file
pub fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        source,
        path: path.display().to_string(),
    })?;
    parse_config(&content, &path.display().to_string())
}

/// Parse configuration text; `origin` names the source in error messages
pub fn parse_config(content: &str, origin: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("{origin}: Failed to parse TOML: {e}")))?;

    for (key, prefix) in &config.languages {
        if prefix.is_empty() {
            log::debug!("[fillpara-config] Empty comment prefix for '{key}' selects plain text mode");
        }
    }

    Ok(config)
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::FileExists { path: path.to_string() });
    }

    let default_config = r##"# fillpara configuration file

[global]
# Comment prefix used for every file, regardless of its language.
# Leave unset to detect the prefix from the file name.
# comment-prefix = "//"

# Language to assume for every file (see `fillpara languages`).
# language = "python"

# Comment prefix overrides, keyed by file extension or language name.
# An empty prefix reflows plain text paragraphs.
[languages]
# rs = "///"
# python = "#"
# txt = ""
"##;

    fs::write(path, default_config).map_err(|source| ConfigError::IoError {
        source,
        path: path.to_string(),
    })
}
