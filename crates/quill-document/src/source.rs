//! Content stores that supply raw posts.
//!
//! A corpus is an ordered list of `(category, slug) -> source` entries. The order is
//! significant: document ids are assigned by position.

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;
use walkdir::WalkDir;

use crate::DocumentError;

/// One post as read from a content store, before extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    /// Category the post lives under.
    pub category: String,
    /// Slug of the post within its category.
    pub slug: String,
    /// Full post source: optional front matter followed by the Markdown body.
    pub source: String,
    /// File the source was read from, when it came from disk.
    pub path: Option<PathBuf>,
}

impl RawPost {
    /// Creates an in-memory post.
    pub fn new(
        category: impl Into<String>,
        slug: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            slug: slug.into(),
            source: source.into(),
            path: None,
        }
    }

    /// Human-readable origin used in error messages and logs.
    pub fn origin(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => format!("{}/{}", self.category, self.slug),
        }
    }
}

/// A store that can produce the full, ordered post corpus.
pub trait ContentSource: Send + Sync {
    /// Loads every post. Any unreadable post fails the whole load.
    fn load(&self) -> Result<Vec<RawPost>, DocumentError>;
}

/// Posts laid out on disk as `<root>/<category>/<slug>/<post_file>`.
#[derive(Debug, Clone)]
pub struct FsContentSource {
    /// Posts root directory.
    root: PathBuf,
    /// File name of the post inside each slug directory.
    post_file: String,
}

impl FsContentSource {
    /// Creates a source reading from `root`.
    pub fn new(root: impl Into<PathBuf>, post_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            post_file: post_file.into(),
        }
    }

    /// Posts root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists `(category, slug)` pairs in traversal order without reading the posts.
    pub fn entries(&self) -> Result<Vec<(String, String)>, DocumentError> {
        if !self.root.is_dir() {
            debug!(root = %self.root.display(), "posts root missing, corpus is empty");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(2)
            .max_depth(2)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e.file_name()))
        {
            let entry = entry.map_err(|e| DocumentError::ReadDir {
                path: e.path().unwrap_or(&self.root).to_path_buf(),
                source: io::Error::from(e),
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(category) = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .and_then(OsStr::to_str)
            else {
                continue;
            };
            let Some(slug) = entry.file_name().to_str() else {
                continue;
            };
            entries.push((category.to_string(), slug.to_string()));
        }
        Ok(entries)
    }

    /// Path of the post file for a `(category, slug)` pair.
    pub fn post_path(&self, category: &str, slug: &str) -> PathBuf {
        self.root.join(category).join(slug).join(&self.post_file)
    }
}

impl ContentSource for FsContentSource {
    fn load(&self) -> Result<Vec<RawPost>, DocumentError> {
        let entries = self.entries()?;
        let mut posts = Vec::with_capacity(entries.len());

        for (category, slug) in entries {
            let path = self.post_path(&category, &slug);
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(DocumentError::MissingPost {
                        category,
                        slug,
                        post_file: self.post_file.clone(),
                    });
                }
                Err(source) => return Err(DocumentError::ReadFile { path, source }),
            };
            posts.push(RawPost {
                category,
                slug,
                source,
                path: Some(path),
            });
        }

        debug!(root = %self.root.display(), posts = posts.len(), "loaded posts");
        Ok(posts)
    }
}

/// An in-memory corpus.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    /// Posts in corpus order.
    posts: Vec<RawPost>,
}

impl MemoryContentSource {
    /// Creates a source over the given posts.
    pub fn new(posts: Vec<RawPost>) -> Self {
        Self { posts }
    }
}

impl ContentSource for MemoryContentSource {
    fn load(&self) -> Result<Vec<RawPost>, DocumentError> {
        Ok(self.posts.clone())
    }
}

/// Checks if a filename represents a hidden entry (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}
