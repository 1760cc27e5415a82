//! Path resolution for configured directories.
//!
//! Resolves relative and tilde-prefixed paths to absolute paths, and renders paths
//! compactly for terminal output.

use std::path::{Component, Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves the configured posts directory to an absolute path.
///
/// Handles three cases:
/// - Tilde paths (`~/blog/_posts`) - expanded to home directory
/// - Relative paths (`./_posts`, `../shared`) - resolved relative to `config_dir`
/// - Absolute paths - returned as-is
///
/// The directory does not have to exist; a missing posts directory is reported by
/// validation and treated as an empty corpus.
pub fn resolve_posts_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(&expanded)
    };

    Ok(absolute.canonicalize().unwrap_or_else(|_| normalize(&absolute)))
}

/// Renders a path for display, relative to `base` when it lives underneath it,
/// otherwise with the home directory abbreviated to `~`.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base
        && let Some(relative) = pathdiff::diff_paths(path, base)
        && !relative.starts_with("..")
    {
        if relative.as_os_str().is_empty() {
            return String::from(".");
        }
        return relative.display().to_string();
    }

    if let Ok(home) = home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }

    path.display().to_string()
}

/// Drops `.` components and folds `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
