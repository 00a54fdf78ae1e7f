//! Configuration management for imgdir.
//!
//! Parses `imgdir.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [directives]
//! policy = "trailing"
//! separator = "|"
//! legacy_title_syntax = false
//!
//! [captions]
//! default_align = "left"
//! from_plain_titles = false
//! class = "imgdir-caption"
//!
//! [markers]
//! prefix = "data-imgdir"
//! ```

use std::path::{Path, PathBuf};

use imgdir_core::{
    ApplierConfig, DEFAULT_CAPTION_CLASS, DEFAULT_MARKER_PREFIX, DEFAULT_SEPARATOR, TextAlign,
    TokenizePolicy,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override tokenizing policy.
    pub policy: Option<TokenizePolicy>,
    /// Override plain-title captions.
    pub from_plain_titles: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "imgdir.toml";

/// Characters that appear inside directives and cannot act as separator.
const RESERVED_SEPARATORS: [char; 5] = ['=', '%', '.', '-', '_'];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directive syntax configuration.
    pub directives: DirectivesConfig,
    /// Caption rendering configuration.
    pub captions: CaptionsConfig,
    /// Private marker attribute configuration.
    pub markers: MarkersConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Directive syntax configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DirectivesConfig {
    /// How segments after the separator are interpreted.
    pub policy: TokenizePolicy,
    /// Reserved separator between text and directives.
    pub separator: char,
    /// Also honor `:size=`/`:align=` tokens inside tooltips.
    pub legacy_title_syntax: bool,
}

impl Default for DirectivesConfig {
    fn default() -> Self {
        Self {
            policy: TokenizePolicy::default(),
            separator: DEFAULT_SEPARATOR,
            legacy_title_syntax: false,
        }
    }
}

/// Caption rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CaptionsConfig {
    /// Caption text alignment for images without an alignment directive.
    pub default_align: TextAlign,
    /// Render tooltips without directives as captions.
    pub from_plain_titles: bool,
    /// CSS class of inserted caption elements.
    pub class: String,
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        Self {
            default_align: TextAlign::Left,
            from_plain_titles: false,
            class: DEFAULT_CAPTION_CLASS.to_owned(),
        }
    }
}

/// Private marker attribute configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkersConfig {
    /// Attribute namespace, e.g. `data-imgdir`.
    pub prefix: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_MARKER_PREFIX.to_owned(),
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `imgdir.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Build the applier configuration.
    #[must_use]
    pub fn applier_config(&self) -> ApplierConfig {
        ApplierConfig::new()
            .with_policy(self.directives.policy)
            .with_separator(self.directives.separator)
            .with_legacy_title_syntax(self.directives.legacy_title_syntax)
            .with_caption_align(self.captions.default_align)
            .with_plain_title_captions(self.captions.from_plain_titles)
            .with_marker_prefix(self.markers.prefix.clone())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(policy) = settings.policy {
            self.directives.policy = policy;
        }
        if let Some(from_plain_titles) = settings.from_plain_titles {
            self.captions.from_plain_titles = from_plain_titles;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
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
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_directives()?;
        self.validate_captions()?;
        self.validate_markers()?;
        Ok(())
    }

    fn validate_directives(&self) -> Result<(), ConfigError> {
        let separator = self.directives.separator;
        if !separator.is_ascii_punctuation() || RESERVED_SEPARATORS.contains(&separator) {
            return Err(ConfigError::Validation(format!(
                "directives.separator {separator:?} must be an ASCII punctuation character \
                 not used in directives ('=', '%', '.', '-', '_')"
            )));
        }
        Ok(())
    }

    fn validate_captions(&self) -> Result<(), ConfigError> {
        if self.captions.default_align == TextAlign::Right {
            return Err(ConfigError::Validation(
                "captions.default_align must be \"left\" or \"center\"".to_owned(),
            ));
        }

        let class = &self.captions.class;
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "captions.class must be a single non-empty class name".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_markers(&self) -> Result<(), ConfigError> {
        let prefix = &self.markers.prefix;
        let valid = prefix.len() > "data-".len()
            && prefix.starts_with("data-")
            && prefix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(ConfigError::Validation(format!(
                "markers.prefix {prefix:?} must be a lowercase data-* attribute name"
            )));
        }
        Ok(())
    }
}
