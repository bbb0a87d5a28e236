//! Configuration management for Mikumark.
//!
//! Parses `mikumark.toml` with serde and discovers it in the current
//! directory or its parents. CLI settings are applied on top via
//! [`CliSettings`].
//!
//! ```toml
//! [render]
//! on_table_error = "paragraph"   # or "omit"
//! language_class = true
//!
//! [output]
//! dir = "${SITE_DIR:-site}"
//! outline = true
//! ```
//!
//! `output.dir` supports `${VAR}` and `${VAR:-default}` expansion and is
//! resolved relative to the config file.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mikumark.toml";

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override whether outline JSON is written.
    pub outline: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering options.
    pub render: RenderConfig,
    /// Output options as written in TOML.
    output: OutputConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// What to emit for a table that fails to parse.
    pub on_table_error: TableErrorMode,
    /// Whether fenced code gets `class="language-<tag>"`.
    pub language_class: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            on_table_error: TableErrorMode::default(),
            language_class: true,
        }
    }
}

/// Handling of malformed tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableErrorMode {
    /// Render the table source as a plain paragraph.
    #[default]
    Paragraph,
    /// Drop the table.
    Omit,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    outline: Option<bool>,
}

/// Resolved output configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory for rendered files; `None` writes HTML to stdout.
    pub dir: Option<PathBuf>,
    /// Write `<name>.outline.json` next to each HTML file.
    pub outline: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            outline: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `mikumark.toml` in the current directory and its parents, falling
    /// back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir = Some(output_dir.clone());
        }
        if let Some(outline) = settings.outline {
            self.output_resolved.outline = outline;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `output.dir` is set but empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output.dir {
            require_non_empty(dir, "output.dir")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            dir: self.output.dir.as_deref().map(|dir| config_dir.join(dir)),
            outline: self.output.outline.unwrap_or(true),
        };
    }
}
