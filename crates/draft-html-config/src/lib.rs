//! Configuration for draft-html.
//!
//! Parses `draft-html.toml` files with serde and provides auto-discovery of
//! config files in parent directories. The loaded [`Config`] converts into
//! [`SerializeOptions`] for the serializer.
//!
//! ```toml
//! [output]
//! directional = true
//!
//! [annotations]
//! kind = "mention"
//! trigger = "@"
//!
//! [[annotations.suggestions]]
//! value = "alice"
//! url = "https://example.com/alice"
//! ```

use std::path::{Path, PathBuf};

use draft_html::{AnnotationConfig, DraftSerializer, MentionSuggestion, SerializeOptions};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "draft-html.toml";

/// Serializer configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,
    /// Annotation detection; absent disables it.
    pub annotations: Option<AnnotationsConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit `dir="auto"` on block and list item tags.
    pub directional: bool,
}

/// Annotation detection configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnnotationsConfig {
    /// Token kind.
    pub kind: AnnotationKindConfig,
    /// Token prefix; defaults to `#` for hashtags and `@` for mentions.
    pub trigger: Option<String>,
    /// Token delimiter; defaults to a single space.
    pub separator: Option<String>,
    /// Mention targets, required for `kind = "mention"`.
    pub suggestions: Vec<SuggestionConfig>,
}

/// Annotation kind as written in TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKindConfig {
    /// Every token is a hashtag.
    #[default]
    Hashtag,
    /// Tokens matching a suggestion are mentions.
    Mention,
}

/// A mention target.
#[derive(Debug, Deserialize)]
pub struct SuggestionConfig {
    /// Token text after the trigger.
    pub value: String,
    /// Link target.
    #[serde(default)]
    pub url: Option<String>,
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

/// Require an optional string field to be non-empty when set.
fn require_non_empty(value: Option<&str>, field: &str) -> Result<(), ConfigError> {
    if value.is_some_and(str::is_empty) {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `draft-html.toml` in the current directory and
    /// parents, falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::Validation`.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
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
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically when loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(annotations) = &self.annotations {
            annotations.validate()?;
        }
        Ok(())
    }

    /// Serializer options described by this configuration.
    #[must_use]
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            annotations: self.annotations.as_ref().map(AnnotationsConfig::to_annotation_config),
            directional: self.output.directional,
        }
    }

    /// Serializer built from [`serialize_options`](Self::serialize_options).
    #[must_use]
    pub fn serializer(&self) -> DraftSerializer {
        DraftSerializer::from_options(self.serialize_options())
    }
}

impl AnnotationsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(self.trigger.as_deref(), "annotations.trigger")?;
        require_non_empty(self.separator.as_deref(), "annotations.separator")?;
        match self.kind {
            AnnotationKindConfig::Hashtag if !self.suggestions.is_empty() => {
                Err(ConfigError::Validation(
                    "annotations.suggestions requires kind = \"mention\"".to_owned(),
                ))
            }
            AnnotationKindConfig::Mention if self.suggestions.is_empty() => {
                Err(ConfigError::Validation(
                    "kind = \"mention\" requires at least one annotations.suggestions entry"
                        .to_owned(),
                ))
            }
            _ => self.suggestions.iter().try_for_each(|s| {
                require_non_empty(Some(s.value.as_str()), "annotations.suggestions.value")?;
                require_non_empty(s.url.as_deref(), "annotations.suggestions.url")
            }),
        }
    }

    fn to_annotation_config(&self) -> AnnotationConfig {
        let base = match self.kind {
            AnnotationKindConfig::Hashtag => AnnotationConfig::hashtag(),
            AnnotationKindConfig::Mention => AnnotationConfig::mention(
                self.suggestions
                    .iter()
                    .map(|s| {
                        let suggestion = MentionSuggestion::new(s.value.clone());
                        match &s.url {
                            Some(url) => suggestion.with_url(url.clone()),
                            None => suggestion,
                        }
                    })
                    .collect(),
            ),
        };
        base.with_trigger(self.trigger.clone().unwrap_or_default())
            .with_separator(self.separator.clone().unwrap_or_default())
    }
}
