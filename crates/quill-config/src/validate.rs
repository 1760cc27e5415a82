//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::{Config, KNOWN_SEGMENTERS};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The posts directory does not exist. Searches will run against an empty corpus.
    PostsPathMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The posts path exists but is not a directory.
    PostsPathNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// The configured segmenter is not one quill knows.
    UnknownSegmenter {
        /// Name from the configuration.
        name: String,
    },
    /// The default limit lies outside `[1, max_limit]` and will be clamped.
    DefaultLimitOutOfRange {
        /// Configured default limit.
        default_limit: usize,
        /// Configured maximum limit.
        max_limit: usize,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostsPathMissing { path } => {
                write!(f, "posts directory does not exist: {path}")
            }
            Self::PostsPathNotDirectory { path } => {
                write!(f, "posts path is not a directory: {path}")
            }
            Self::UnknownSegmenter { name } => {
                write!(
                    f,
                    "unknown segmenter '{name}' (expected one of: {})",
                    KNOWN_SEGMENTERS.join(", ")
                )
            }
            Self::DefaultLimitOutOfRange {
                default_limit,
                max_limit,
            } => {
                write!(
                    f,
                    "default_limit {default_limit} is outside the range 1..={max_limit}"
                )
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let posts = &config.content.posts;
    if !posts.exists() {
        warnings.push(ConfigWarning::PostsPathMissing {
            path: posts.display().to_string(),
        });
    } else if !posts.is_dir() {
        warnings.push(ConfigWarning::PostsPathNotDirectory {
            path: posts.display().to_string(),
        });
    }

    let segmenter = config.search.segmenter.as_str();
    if !KNOWN_SEGMENTERS.contains(&segmenter) {
        warnings.push(ConfigWarning::UnknownSegmenter {
            name: segmenter.to_string(),
        });
    }

    let search = &config.search;
    if search.default_limit == 0 || search.default_limit > search.max_limit {
        warnings.push(ConfigWarning::DefaultLimitOutOfRange {
            default_limit: search.default_limit,
            max_limit: search.max_limit,
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{ContentSettings, SearchSettings};

    fn config_with_posts(posts: &std::path::Path) -> Config {
        Config {
            content: ContentSettings {
                posts: posts.to_path_buf(),
                ..ContentSettings::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config_has_no_warnings() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with_posts(tmp.path());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_missing_posts_directory() {
        let config = config_with_posts(std::path::Path::new("/nonexistent/posts/12345"));
        let warnings = config.validate();
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::PostsPathMissing { .. }))
        );
    }

    #[test]
    fn test_posts_path_is_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("posts");
        fs::write(&file, "not a dir").unwrap();

        let warnings = config_with_posts(&file).validate();
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::PostsPathNotDirectory { .. }))
        );
    }

    #[test]
    fn test_unknown_segmenter_and_bad_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config {
            search: SearchSettings {
                default_limit: 80,
                segmenter: "klingon".into(),
                ..SearchSettings::default()
            },
            ..config_with_posts(tmp.path())
        };

        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[0].to_string(),
            "unknown segmenter 'klingon' (expected one of: mixed, latin)"
        );
        assert_eq!(
            warnings[1],
            ConfigWarning::DefaultLimitOutOfRange {
                default_limit: 80,
                max_limit: 50
            }
        );
    }
}
