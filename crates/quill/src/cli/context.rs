//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use quill_config::Config;
use quill_document::{
    ContentSource, FsContentSource, RawPost, SearchDocument, extract_documents,
};
use quill_index::SearchService;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for commands like `init` or `inspect` that should work even when
    /// an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Creates a search service over the configured posts directory.
    pub fn service(&self) -> SearchService {
        SearchService::from_config(&self.config)
    }

    /// Content source for the configured posts directory.
    pub fn source(&self) -> FsContentSource {
        FsContentSource::new(&self.config.content.posts, &self.config.content.post_file)
    }

    /// Reads and extracts the whole corpus, printing a consistent error on failure.
    pub fn documents(&self) -> Result<Vec<SearchDocument>, ExitCode> {
        let posts = self.raw_posts()?;
        extract_documents(&posts).map_err(|e| {
            eprintln!("error: failed to read posts: {e}");
            ExitCode::FAILURE
        })
    }

    /// Reads the raw corpus without extracting it.
    fn raw_posts(&self) -> Result<Vec<RawPost>, ExitCode> {
        self.source().load().map_err(|e| {
            eprintln!("error: failed to read posts: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
