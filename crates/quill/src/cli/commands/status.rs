//! Implementation of `quill status`.

use std::{collections::BTreeSet, process::ExitCode};

use quill_config::{ConfigWarning, discover_config_files, format_path_for_display};
use quill_document::{ContentSource, SearchDocument, extract_documents, parse_post_date};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the posts root, corpus statistics and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;

    let config_files = discover_config_files(cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found, using defaults."));
        println!(
            "Run {} to create a configuration file.",
            subheader("quill init")
        );
    } else {
        println!("{}", subheader("Config files:"));
        for path in &config_files {
            let display_path = format_path_for_display(path, Some(cwd));
            println!("   {display_path}");
        }
    }
    println!();

    let config = &ctx.config;
    let posts = format_path_for_display(&config.content.posts, config.config_root.as_deref());
    println!("{}", subheader("Posts:"));
    if config.content.posts.is_dir() {
        println!("   {posts} {}", dim(&format!("(*/*/{})", config.content.post_file)));
    } else {
        println!("   {posts} {}", warning("[missing]"));
    }
    println!();

    let mut corpus_failed = false;
    println!("{}", subheader("Corpus:"));
    match ctx.source().load().and_then(|raw| extract_documents(&raw)) {
        Ok(docs) => {
            let stats = CorpusStats::collect(&docs);
            println!(
                "   {} posts in {} categories",
                stats.posts, stats.categories
            );
            if stats.undated > 0 {
                println!("   {}", dim(&format!("{} without a date", stats.undated)));
            }
            if stats.unparseable_dates > 0 {
                println!(
                    "   {}",
                    warning(&format!(
                        "{} with an unparseable date (listed last)",
                        stats.unparseable_dates
                    ))
                );
            }
        }
        Err(e) => {
            println!("   {}", warning(&format!("failed to read posts: {e}")));
            corpus_failed = true;
        }
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() && !corpus_failed {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    if !warnings.is_empty() {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        println!();
        print_hints(&warnings);
    }

    ExitCode::FAILURE
}

/// Summary counts over an extracted corpus.
#[derive(Debug, Default, PartialEq, Eq)]
struct CorpusStats {
    /// Number of posts.
    posts: usize,
    /// Number of distinct categories.
    categories: usize,
    /// Posts with no date.
    undated: usize,
    /// Posts whose date does not parse.
    unparseable_dates: usize,
}

impl CorpusStats {
    /// Counts posts, categories and date problems.
    fn collect(docs: &[SearchDocument]) -> Self {
        let categories: BTreeSet<&str> = docs.iter().map(|d| d.category.as_str()).collect();
        let undated = docs.iter().filter(|d| d.date.is_empty()).count();
        let unparseable_dates = docs
            .iter()
            .filter(|d| !d.date.is_empty() && parse_post_date(&d.date).is_none())
            .count();
        Self {
            posts: docs.len(),
            categories: categories.len(),
            undated,
            unparseable_dates,
        }
    }
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::PostsPathMissing { .. } => {
                println!(
                    "{}",
                    dim("Hint: set [content] posts in .quill.toml to your posts root")
                );
            }
            ConfigWarning::UnknownSegmenter { .. } => {
                println!("{}", dim("Hint: use segmenter = \"mixed\" for CJK posts"));
            }
            _ => {}
        }
    }
}
