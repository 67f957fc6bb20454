//! Configuration management for mdlive.
//!
//! Parses `mdlive.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [page]
//! standalone = true
//! title = "Notes"
//!
//! [highlight]
//! enabled = true
//! cdn_url = "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0"
//! theme = "github"
//!
//! [watch]
//! debounce_ms = 100
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override standalone page output.
    pub standalone: Option<bool>,
    /// Override page title.
    pub title: Option<String>,
    /// Override highlight.js inclusion.
    pub highlight_enabled: Option<bool>,
    /// Override watch debounce interval in milliseconds.
    pub debounce_ms: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdlive.toml";

/// Largest accepted debounce interval.
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output page configuration.
    pub page: PageConfig,
    /// Syntax highlighting configuration.
    pub highlight: HighlightConfig,
    /// Watch mode configuration.
    pub watch: WatchConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output page configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Wrap the rendered fragment in a complete HTML document.
    pub standalone: bool,
    /// Document title for standalone pages.
    pub title: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            title: "Markdown Preview".to_owned(),
        }
    }
}

/// Syntax highlighting configuration.
///
/// Highlighting runs in the browser: standalone pages load highlight.js from
/// `cdn_url` and call it on every `pre code` element.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Whether standalone pages include highlight.js.
    pub enabled: bool,
    /// Base URL of the highlight.js distribution.
    pub cdn_url: String,
    /// Stylesheet name under `styles/` (without `.min.css`).
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cdn_url: "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0".to_owned(),
            theme: "github".to_owned(),
        }
    }
}

impl HighlightConfig {
    /// URL of the highlight.js script.
    #[must_use]
    pub fn script_url(&self) -> String {
        format!("{}/highlight.min.js", self.cdn_url.trim_end_matches('/'))
    }

    /// URL of the theme stylesheet.
    #[must_use]
    pub fn stylesheet_url(&self) -> String {
        format!(
            "{}/styles/{}.min.css",
            self.cdn_url.trim_end_matches('/'),
            self.theme
        )
    }
}

/// Watch mode configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period after the last change before re-rendering.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 100 }
    }
}

impl WatchConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
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

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdlive.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied last and validated together with the file.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(standalone) = settings.standalone {
            self.page.standalone = standalone;
        }
        if let Some(title) = &settings.title {
            self.page.title.clone_from(title);
        }
        if let Some(enabled) = settings.highlight_enabled {
            self.highlight.enabled = enabled;
        }
        if let Some(debounce_ms) = settings.debounce_ms {
            self.watch.debounce_ms = debounce_ms;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.page.title, "page.title")?;

        if self.highlight.enabled {
            require_non_empty(&self.highlight.cdn_url, "highlight.cdn_url")?;
            require_http_url(&self.highlight.cdn_url, "highlight.cdn_url")?;
            require_non_empty(&self.highlight.theme, "highlight.theme")?;
        }

        let debounce_ms = self.watch.debounce_ms;
        if debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "watch.debounce_ms must be greater than 0".to_owned(),
            ));
        }
        if debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::Validation(format!(
                "watch.debounce_ms cannot exceed {MAX_DEBOUNCE_MS}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let msg = err.to_string();
        for expected in expected_substrings {
            assert!(
                msg.contains(expected),
                "expected '{expected}' in error message: {msg}"
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.page.standalone);
        assert_eq!(config.page.title, "Markdown Preview");
        assert!(config.highlight.enabled);
        assert_eq!(config.highlight.theme, "github");
        assert_eq!(config.watch.debounce(), Duration::from_millis(100));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
[page]
standalone = true
title = "Notes"

[highlight]
enabled = false
cdn_url = "https://cdn.example.com/hljs"
theme = "monokai"

[watch]
debounce_ms = 250
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert!(config.page.standalone);
        assert_eq!(config.page.title, "Notes");
        assert!(!config.highlight.enabled);
        assert_eq!(config.highlight.cdn_url, "https://cdn.example.com/hljs");
        assert_eq!(config.highlight.theme, "monokai");
        assert_eq!(config.watch.debounce_ms, 250);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let (_dir, path) = write_config("[page]\nstandalone = true\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert!(config.page.standalone);
        assert_eq!(config.page.title, "Markdown Preview");
        assert!(config.highlight.enabled);
        assert_eq!(config.watch.debounce_ms, 100);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let (_dir, path) = write_config("[page\nstandalone = true");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let (_dir, path) = write_config("[watch]\ndebounce_ms = 0\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("watch.debounce_ms"));
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            standalone: Some(true),
            title: Some("Draft".to_owned()),
            highlight_enabled: Some(false),
            debounce_ms: Some(50),
        });

        assert!(config.page.standalone);
        assert_eq!(config.page.title, "Draft");
        assert!(!config.highlight.enabled);
        assert_eq!(config.watch.debounce_ms, 50);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert!(!config.page.standalone);
        assert_eq!(config.page.title, "Markdown Preview");
        assert!(config.highlight.enabled);
        assert_eq!(config.watch.debounce_ms, 100);
    }

    #[test]
    fn test_cli_settings_override_file() {
        let (_dir, path) = write_config("[page]\nstandalone = false\ntitle = \"File\"\n");
        let settings = CliSettings {
            standalone: Some(true),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!(config.page.standalone);
        assert_eq!(config.page.title, "File");
    }

    #[test]
    fn test_validate_title_empty() {
        let mut config = Config::default();
        config.page.title = "  ".to_owned();
        assert_validation_error(&config, &["page.title", "cannot be empty"]);
    }

    #[test]
    fn test_validate_cdn_url_invalid_scheme() {
        let mut config = Config::default();
        config.highlight.cdn_url = "ftp://cdn.example.com".to_owned();
        assert_validation_error(&config, &["highlight.cdn_url", "http://"]);
    }

    #[test]
    fn test_validate_cdn_url_ignored_when_disabled() {
        let mut config = Config::default();
        config.highlight.enabled = false;
        config.highlight.cdn_url = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_theme_empty() {
        let mut config = Config::default();
        config.highlight.theme = String::new();
        assert_validation_error(&config, &["highlight.theme"]);
    }

    #[test]
    fn test_validate_debounce_too_high() {
        let mut config = Config::default();
        config.watch.debounce_ms = MAX_DEBOUNCE_MS + 1;
        assert_validation_error(&config, &["watch.debounce_ms", "cannot exceed"]);
    }

    #[test]
    fn test_highlight_urls() {
        let highlight = HighlightConfig {
            enabled: true,
            cdn_url: "https://cdn.example.com/hljs/".to_owned(),
            theme: "nord".to_owned(),
        };
        assert_eq!(
            highlight.script_url(),
            "https://cdn.example.com/hljs/highlight.min.js"
        );
        assert_eq!(
            highlight.stylesheet_url(),
            "https://cdn.example.com/hljs/styles/nord.min.css"
        );
    }
}
