//! Run and display configuration.
//!
//! Layered: built-in defaults, then a `.scribeconf` file (`key = value`
//! lines), then command-line flags applied by the binary.

use crate::error::ConfigError;
use crate::parser::{ParseOptions, DEFAULT_MAX_BLOCKS};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".scribeconf";

// -- Choices ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Where a piece of file metadata is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    About,
    /// Appended to the H1 title. Only meaningful for the version.
    Filename,
    PreFooter,
    Footer,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Minimal,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    /// `tracing` level name for this setting.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Minimal => "warn",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
            LogLevel::Debug => "trace",
        }
    }

    /// Raise the level by `steps` (one per `-v`).
    pub fn raised(self, steps: u8) -> Self {
        let levels = [
            LogLevel::Minimal,
            LogLevel::Normal,
            LogLevel::Verbose,
            LogLevel::Debug,
        ];
        let index = self as usize + steps as usize;
        levels[index.min(levels.len() - 1)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExampleDisplay {
    #[default]
    Sequential,
    Tabs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentsDisplay {
    #[default]
    Sequential,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellcheckDisplay {
    #[default]
    Sequential,
    Table,
    List,
}

// -- Config -------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub doc_path: PathBuf,
    pub format: OutputFormat,
    pub footer_text: String,
    pub version_placement: Placement,
    pub copyright_placement: Placement,
    pub license_placement: Placement,
    pub linkify_usernames: bool,
    pub log_level: LogLevel,
    pub example_display: ExampleDisplay,
    pub highlight_language: String,
    pub highlight_code: bool,
    pub show_toc: bool,
    pub show_alerts: bool,
    pub show_shellcheck: bool,
    pub arguments_display: ArgumentsDisplay,
    pub shellcheck_display: ShellcheckDisplay,
    pub traverse_symlinks: bool,
    pub max_blocks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            doc_path: PathBuf::from("./docs"),
            format: OutputFormat::Markdown,
            footer_text: format!(
                "This documentation was auto generated with [Shellscribe](https://github.com/tomcdj71/shellscribe) (v{})",
                env!("CARGO_PKG_VERSION")
            ),
            version_placement: Placement::About,
            copyright_placement: Placement::PreFooter,
            license_placement: Placement::PreFooter,
            linkify_usernames: false,
            log_level: LogLevel::Normal,
            example_display: ExampleDisplay::Sequential,
            highlight_language: "bash".to_string(),
            highlight_code: true,
            show_toc: true,
            show_alerts: false,
            show_shellcheck: false,
            arguments_display: ArgumentsDisplay::Sequential,
            shellcheck_display: ShellcheckDisplay::Sequential,
            traverse_symlinks: true,
            max_blocks: DEFAULT_MAX_BLOCKS,
        }
    }
}

impl Config {
    /// Defaults overlaid with the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Config::default();
        config.apply_str(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// `explicit` if given, else `./.scribeconf` when present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Config::load(path);
        }
        let local = Path::new(CONFIG_FILE_NAME);
        if local.is_file() {
            return Config::load(local);
        }
        Ok(Config::default())
    }

    /// Apply every `key = value` line of `text`.
    pub fn apply_str(&mut self, text: &str) -> Result<(), ConfigError> {
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!(line = index + 1, "ignoring config line without '='");
                continue;
            };
            let key = key.trim();
            let value = clean_value(value);
            if !self.set(key, value)? {
                warn!(line = index + 1, key, "unknown config key");
            }
        }
        Ok(())
    }

    /// Set one key. Returns `Ok(false)` for keys this version does not know.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        match key {
            "doc_path" => self.doc_path = PathBuf::from(value),
            "format" => {
                self.format = choice(
                    key,
                    value,
                    &[
                        ("markdown", OutputFormat::Markdown),
                        ("md", OutputFormat::Markdown),
                        ("json", OutputFormat::Json),
                    ],
                    "markdown, md or json",
                )?
            }
            "footer_text" => self.footer_text = value.to_string(),
            "version_placement" => {
                self.version_placement = choice(
                    key,
                    value,
                    &[
                        ("about", Placement::About),
                        ("filename", Placement::Filename),
                        ("footer", Placement::Footer),
                        ("none", Placement::Hidden),
                    ],
                    "about, filename, footer or none",
                )?
            }
            "copyright_placement" => self.copyright_placement = placement(key, value)?,
            "license_placement" => self.license_placement = placement(key, value)?,
            "linkify_usernames" => self.linkify_usernames = boolean(key, value)?,
            "log_level" => {
                self.log_level = choice(
                    key,
                    value,
                    &[
                        ("minimal", LogLevel::Minimal),
                        ("normal", LogLevel::Normal),
                        ("verbose", LogLevel::Verbose),
                        ("debug", LogLevel::Debug),
                    ],
                    "minimal, normal, verbose or debug",
                )?
            }
            "example_display" => {
                self.example_display = choice(
                    key,
                    value,
                    &[
                        ("sequential", ExampleDisplay::Sequential),
                        ("tabs", ExampleDisplay::Tabs),
                    ],
                    "sequential or tabs",
                )?
            }
            "highlight_language" => self.highlight_language = value.to_string(),
            "highlight_code" => self.highlight_code = boolean(key, value)?,
            "show_toc" => self.show_toc = boolean(key, value)?,
            "show_alerts" => self.show_alerts = boolean(key, value)?,
            "show_shellcheck" => self.show_shellcheck = boolean(key, value)?,
            "arguments_display" => {
                self.arguments_display = choice(
                    key,
                    value,
                    &[
                        ("sequential", ArgumentsDisplay::Sequential),
                        ("table", ArgumentsDisplay::Table),
                    ],
                    "sequential or table",
                )?
            }
            "shellcheck_display" => {
                self.shellcheck_display = choice(
                    key,
                    value,
                    &[
                        ("sequential", ShellcheckDisplay::Sequential),
                        ("table", ShellcheckDisplay::Table),
                        ("list", ShellcheckDisplay::List),
                    ],
                    "sequential, table or list",
                )?
            }
            "traverse_symlinks" => self.traverse_symlinks = boolean(key, value)?,
            "max_blocks" => {
                self.max_blocks = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| invalid(key, value, "a positive integer"))?
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_blocks: self.max_blocks,
        }
    }
}

// -- Value parsing ------------------------------------------------------------

/// Trim, drop a trailing ` # comment` and one pair of surrounding quotes.
fn clean_value(value: &str) -> &str {
    let mut value = value.trim();
    if let Some(pos) = value.find(" #").or_else(|| value.find("\t#")) {
        value = value[..pos].trim_end();
    }
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn invalid(key: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

fn choice<T: Copy>(
    key: &str,
    value: &str,
    table: &[(&str, T)],
    expected: &'static str,
) -> Result<T, ConfigError> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, v)| *v)
        .ok_or_else(|| invalid(key, value, expected))
}

fn placement(key: &str, value: &str) -> Result<Placement, ConfigError> {
    choice(
        key,
        value,
        &[
            ("about", Placement::About),
            ("pre-footer", Placement::PreFooter),
            ("footer", Placement::Footer),
            ("none", Placement::Hidden),
        ],
        "about, pre-footer, footer or none",
    )
}

fn boolean(key: &str, value: &str) -> Result<bool, ConfigError> {
    choice(
        key,
        value,
        &[
            ("true", true),
            ("yes", true),
            ("on", true),
            ("1", true),
            ("false", false),
            ("no", false),
            ("off", false),
            ("0", false),
        ],
        "true or false",
    )
}
