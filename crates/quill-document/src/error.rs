//! Error types for post extraction.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when reading or extracting posts.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a post file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to list a content directory.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Front matter was present but is not valid YAML.
    #[error("invalid front matter in {origin}: {message}")]
    Frontmatter {
        /// Where the post came from (`category/slug` or a file path).
        origin: String,
        /// Parser message.
        message: String,
    },

    /// A slug directory has no post file.
    #[error("post {category}/{slug} has no {post_file}")]
    MissingPost {
        /// Category directory name.
        category: String,
        /// Slug directory name.
        slug: String,
        /// Expected post file name.
        post_file: String,
    },
}

impl DocumentError {
    /// Returns true for failures caused by a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ReadFile { source, .. } | Self::ReadDir { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            Self::MissingPost { .. } => true,
            Self::Frontmatter { .. } => false,
        }
    }
}
