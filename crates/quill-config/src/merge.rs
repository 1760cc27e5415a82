//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, ContentSettings, SearchSettings, ServerSettings,
    parse::{RawConfig, RawContentSettings, RawSearchSettings, RawServerSettings},
    resolve::resolve_posts_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every scalar, the first defined value wins.
/// A relative `posts` path is resolved against the directory of the file that defines it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(closest) = configs.first() else {
        return Ok(Config::default());
    };
    let config_root = closest.dir().to_path_buf();

    let content = merge_content_settings(configs, &config_root)?;

    let mut search = SearchSettings::default();
    let mut server = ServerSettings::default();
    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
        if let Some(ref raw) = parsed.config.server {
            apply_raw_server(&mut server, raw);
        }
    }

    Ok(Config {
        content,
        search,
        server,
        config_root: Some(config_root),
    })
}

/// Merges content settings, resolving the winning `posts` path against its own file.
fn merge_content_settings(
    configs: &[ParsedConfig],
    config_root: &Path,
) -> Result<ContentSettings, ConfigError> {
    let mut result = ContentSettings {
        posts: config_root.join(ContentSettings::default().posts),
        ..ContentSettings::default()
    };

    for parsed in configs.iter().rev() {
        let Some(RawContentSettings { posts, post_file }) = &parsed.config.content else {
            continue;
        };
        if let Some(posts) = posts {
            result.posts = resolve_posts_path(posts, parsed.dir())?;
        }
        if let Some(post_file) = post_file {
            result.post_file.clone_from(post_file);
        }
    }

    Ok(result)
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.default_limit {
        result.default_limit = v;
    }
    if let Some(v) = raw.max_limit {
        result.max_limit = v;
    }
    if let Some(v) = raw.snippet_radius {
        result.snippet_radius = v;
    }
    if let Some(ref v) = raw.segmenter {
        result.segmenter.clone_from(v);
    }
}

/// Applies raw server settings to result.
fn apply_raw_server(result: &mut ServerSettings, raw: &RawServerSettings) {
    if let Some(ref v) = raw.bind {
        result.bind.clone_from(v);
    }
}
