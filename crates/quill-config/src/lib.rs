//! Configuration system for quill.
//!
//! quill uses TOML configuration files named `.quill.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.quill.toml` files found, then loading `~/.quill.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawContentSettings, RawSearchSettings, RawServerSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::{format_path_for_display, resolve_posts_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Segmenter names accepted by `[search] segmenter`.
pub const KNOWN_SEGMENTERS: &[&str] = &["mixed", "latin"];

/// Top-level merged configuration for quill.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.quill.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the post corpus lives.
    pub content: ContentSettings,
    /// Search-related settings.
    pub search: SearchSettings,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.quill.toml` files.
    ///
    /// Returns the defaults, with the posts directory resolved against `cwd`, if no
    /// configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        let mut config = Self::load_from_files(&config_files)?;
        if config.content.posts.is_relative() {
            config.content.posts = cwd.join(&config.content.posts);
        }
        Ok(config)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            content: SerializableContent {
                posts: self.content.posts.display().to_string(),
                post_file: self.content.post_file.clone(),
            },
            search: self.search.clone(),
            server: self.server.clone(),
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::Serialize)
    }
}

/// Location and layout of the post corpus.
#[derive(Debug, Clone)]
pub struct ContentSettings {
    /// Root directory holding `<category>/<slug>/<post_file>`.
    pub posts: PathBuf,
    /// File name of the markdown source inside each slug directory.
    pub post_file: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            posts: PathBuf::from("_posts"),
            post_file: String::from("post.md"),
        }
    }
}

/// Search-related settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Results returned when the caller does not ask for a specific number.
    pub default_limit: usize,
    /// Upper bound for any requested limit.
    pub max_limit: usize,
    /// Characters of context on each side of the first match in a snippet.
    pub snippet_radius: usize,
    /// Token segmentation strategy name.
    pub segmenter: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 50,
            snippet_radius: 70,
            segmenter: String::from("mixed"),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address the search endpoint listens on.
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: String::from("127.0.0.1:3000"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Content settings with the resolved posts path.
    content: SerializableContent,
    /// Search-related settings.
    search: SearchSettings,
    /// HTTP server settings.
    server: ServerSettings,
}

/// Content settings rendered with a display path.
#[derive(Serialize)]
struct SerializableContent {
    /// Posts directory.
    posts: String,
    /// Post file name.
    post_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_settings_defaults() {
        let search = SearchSettings::default();
        assert_eq!(search.default_limit, 20);
        assert_eq!(search.max_limit, 50);
        assert_eq!(search.snippet_radius, 70);
        assert_eq!(search.segmenter, "mixed");
    }

    #[test]
    fn test_content_settings_defaults() {
        let content = ContentSettings::default();
        assert_eq!(content.posts, PathBuf::from("_posts"));
        assert_eq!(content.post_file, "post.md");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.config_root.is_none());
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_load_resolves_default_posts_against_config_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "root = true\n").unwrap();

        let config = Config::load(&nested).unwrap();
        assert_eq!(config.content.posts, nested.join("_posts"));
    }

    #[test]
    fn test_settings_to_toml() {
        let config = Config::default();
        let toml = config.settings_to_toml().unwrap();

        assert!(toml.contains("[content]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("default_limit = 20"));
        assert!(toml.contains("segmenter = \"mixed\""));

        let parsed: toml::Value =
            toml::from_str(&toml).expect("settings_to_toml should produce valid TOML");
        assert!(parsed.get("search").is_some());
    }
}
