//! Configuration file parsing.
//!
//! Parses individual `.quill.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Content section.
    pub content: Option<RawContentSettings>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Server settings section.
    pub server: Option<RawServerSettings>,
}

/// Raw content settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContentSettings {
    /// Posts directory, relative to the config file or absolute.
    pub posts: Option<String>,
    /// Post file name inside each slug directory.
    pub post_file: Option<String>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Default result limit.
    pub default_limit: Option<usize>,
    /// Maximum result limit.
    pub max_limit: Option<usize>,
    /// Snippet context radius in characters.
    pub snippet_radius: Option<usize>,
    /// Segmenter name.
    pub segmenter: Option<String>,
}

/// Raw server settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawServerSettings {
    /// Listen address.
    pub bind: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
