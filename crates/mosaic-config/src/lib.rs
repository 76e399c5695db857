//! Configuration management for Mosaic.
//!
//! Parses `mosaic.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.snapshot`
//! - `output.dir`
//! - `media.output_prefix`
//! - `site.stylesheet`
//! - `site.script`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use mosaic_model::{DEFAULT_INCLUDE_DEPTH, MAX_INCLUDE_DEPTH};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override snapshot file.
    pub snapshot: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override local media flag.
    pub local_media: Option<bool>,
    /// Override link include depth.
    pub include_depth: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mosaic.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Media addressing configuration.
    pub media: MediaConfig,
    /// Header, footer and home page text overrides.
    pub site: SiteTextConfig,
    /// Reserved slug overrides.
    pub slugs: SlugsConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    snapshot: Option<String>,
    include_depth: Option<usize>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Content snapshot JSON file.
    pub snapshot: PathBuf,
    /// Link levels inlined while loading the snapshot.
    pub include_depth: usize,
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory static pages are written to.
    pub dir: PathBuf,
}

/// Media addressing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Serve media from the output root instead of the content store.
    pub local: bool,
    /// Prefix of local media sources.
    pub output_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            local: false,
            output_prefix: "/generated".to_owned(),
        }
    }
}

/// Site text overrides. Unset fields keep the built-in text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteTextConfig {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub home_heading: Option<String>,
    pub copyright: Option<String>,
    pub legal_path: Option<String>,
    pub legal_label: Option<String>,
    pub stylesheet: Option<String>,
    pub script: Option<String>,
}

/// Reserved slug overrides. Unset fields keep the built-in slugs.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlugsConfig {
    pub home: Option<String>,
    pub activities: Option<String>,
    pub projects: Option<String>,
    pub contact: Option<String>,
    pub all_news: Option<String>,
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
        /// Config field path (e.g., "`content.snapshot`").
        field: String,
        /// Error message (e.g., "${`CONTENT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require an optional string field, if set, to be non-empty.
fn require_non_empty_opt(value: Option<&str>, field: &str) -> Result<(), ConfigError> {
    value.map_or(Ok(()), |value| require_non_empty(value, field))
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mosaic.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated after the overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(snapshot) = &settings.snapshot {
            self.content_resolved.snapshot.clone_from(snapshot);
        }
        if let Some(include_depth) = settings.include_depth {
            self.content_resolved.include_depth = include_depth;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(local) = settings.local_media {
            self.media.local = local;
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            output: OutputConfigRaw::default(),
            media: MediaConfig::default(),
            site: SiteTextConfig::default(),
            slugs: SlugsConfig::default(),
            content_resolved: ContentConfig {
                snapshot: base.join("content.json"),
                include_depth: DEFAULT_INCLUDE_DEPTH,
            },
            output_resolved: OutputConfig {
                dir: base.join("generated"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_content()?;
        self.validate_media()?;
        self.validate_slugs()?;
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        let depth = self.content_resolved.include_depth;
        if depth == 0 {
            return Err(ConfigError::Validation(
                "content.include_depth must be greater than 0".to_owned(),
            ));
        }
        if depth > MAX_INCLUDE_DEPTH {
            return Err(ConfigError::Validation(format!(
                "content.include_depth cannot exceed {MAX_INCLUDE_DEPTH}"
            )));
        }
        Ok(())
    }

    fn validate_media(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.media.output_prefix, "media.output_prefix")?;
        if !self.media.output_prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "media.output_prefix must start with /".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_slugs(&self) -> Result<(), ConfigError> {
        require_non_empty_opt(self.slugs.home.as_deref(), "slugs.home")?;
        require_non_empty_opt(self.slugs.activities.as_deref(), "slugs.activities")?;
        require_non_empty_opt(self.slugs.projects.as_deref(), "slugs.projects")?;
        require_non_empty_opt(self.slugs.contact.as_deref(), "slugs.contact")?;
        require_non_empty_opt(self.slugs.all_news.as_deref(), "slugs.all_news")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref snapshot) = self.content.snapshot {
            self.content.snapshot = Some(expand::expand_env(snapshot, "content.snapshot")?);
        }
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        self.media.output_prefix =
            expand::expand_env(&self.media.output_prefix, "media.output_prefix")?;
        if let Some(ref stylesheet) = self.site.stylesheet {
            self.site.stylesheet = Some(expand::expand_env(stylesheet, "site.stylesheet")?);
        }
        if let Some(ref script) = self.site.script {
            self.site.script = Some(expand::expand_env(script, "site.script")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            snapshot: resolve(self.content.snapshot.as_deref(), "content.json"),
            include_depth: self.content.include_depth.unwrap_or(DEFAULT_INCLUDE_DEPTH),
        };
        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), "generated"),
        };
    }
}
