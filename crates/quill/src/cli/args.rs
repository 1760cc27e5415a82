//! Clap argument definitions for the `quill` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Full-text search for a Markdown blog")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace). QUILL_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `quill search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query words, joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Maximum results to return, clamped to the configured max_limit [default: 20]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output the search response as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `quill serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeCommand {
    /// Address to listen on [default: 127.0.0.1:3000]
    #[arg(short = 'b', long)]
    pub bind: Option<String>,
}

/// Arguments for `quill inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    /// Post file to extract
    pub file: String,

    /// Output the extracted document as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `quill ls`.
#[derive(Args, Debug, Clone)]
pub struct LsCommand {
    /// Only list posts in this category
    #[arg(short = 'c', long, conflicts_with = "categories")]
    pub category: Option<String>,

    /// List categories with post counts instead of posts
    #[arg(long)]
    pub categories: bool,

    /// Show date, reading time and tags
    #[arg(short = 'l', long)]
    pub long: bool,
}

/// Arguments for `quill init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.quill.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `quill` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search posts and print ranked results
    #[command(after_help = "\
MATCHING:
  Every query word must prefix-match a word in the same field (title, tags or body).
  Chinese, Japanese and Korean text is matched by overlapping character pairs.
  Title matches outrank tag matches, which outrank body matches; ties go to the
  newer post.

EXAMPLES:
  quill search react
  quill search rea hoo
  quill search -n 5 css grid
  quill search --json 'error handling'")]
    Search(SearchCommand),

    /// Serve the search endpoint over HTTP
    Serve(ServeCommand),

    /// Show how a post file is extracted for indexing
    Inspect(InspectCommand),

    /// List posts newest first, or categories
    Ls(LsCommand),

    /// Show status and validate configuration
    Status,

    /// Show effective configuration settings
    Config,

    /// Initialize quill configuration in current directory
    Init(InitCommand),
}

impl Commands {
    /// Whether the command reads `.quill.toml`.
    ///
    /// `init` and `inspect` work even when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_) | Self::Inspect(_))
    }

    /// Log level used when neither `-v` nor `QUILL_LOG` is given.
    pub fn log_level(&self) -> &'static str {
        match self {
            Self::Serve(_) => "info",
            _ => "warn",
        }
    }
}

/// Parses CLI arguments, exiting with usage on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
