//! Implementation of `quill inspect`.

use std::{fs, path::Path, process::ExitCode};

use quill_document::{RawPost, SearchDocument, extract, parse_post_date};
use quill_highlight::{dim, header, subheader, warning};
use quill_index::{query_terms, segmenter_by_name};

use crate::cli::{args::InspectCommand, context::CommandContext, output::print_json};

/// Characters of body shown before truncating.
const BODY_PREVIEW_CHARS: usize = 400;

/// Shows how a single post file is extracted: metadata, reading time, body text.
pub fn run(ctx: &CommandContext, cmd: &InspectCommand) -> ExitCode {
    let path = Path::new(&cmd.file);

    if !path.is_file() {
        eprintln!("error: file not found: {}", cmd.file);
        return ExitCode::FAILURE;
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: failed to read file: {e}");
            return ExitCode::FAILURE;
        }
    };

    let post = raw_post_for(path, source);
    let doc = match extract(1, &post) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&doc);
    }

    print_document(ctx, path, &doc);
    ExitCode::SUCCESS
}

/// Wraps a post file, taking slug and category from its two parent directories.
fn raw_post_for(path: &Path, source: String) -> RawPost {
    let dir_name = |p: Option<&Path>| {
        p.and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    let slug_dir = path.parent();
    let category_dir = slug_dir.and_then(Path::parent);

    let mut post = RawPost::new(dir_name(category_dir), dir_name(slug_dir), source);
    post.path = Some(path.to_path_buf());
    post
}

/// Prints the extracted document.
fn print_document(ctx: &CommandContext, path: &Path, doc: &SearchDocument) {
    println!("--- {} ---", header(&path.display().to_string()));

    let field = |name: &str, value: &str| {
        let value = if value.is_empty() {
            dim("(none)")
        } else {
            value.to_string()
        };
        println!("   {:<12} {value}", format!("{name}:"));
    };
    field("title", &doc.title);
    field("description", &doc.description);
    field("location", &format!("{}/{}", doc.category, doc.slug));
    field("tags", &doc.tags.join(", "));
    field("min read", &doc.min_read.to_string());

    if doc.date.is_empty() {
        field("date", "");
    } else if parse_post_date(&doc.date).is_some() {
        field("date", &doc.date);
    } else {
        field(
            "date",
            &format!("{} {}", doc.date, warning("[unparseable, sorts last]")),
        );
    }
    println!();

    if let Ok(segmenter) = segmenter_by_name(&ctx.config.search.segmenter) {
        println!("{}", subheader("Title terms:"));
        let terms = query_terms(segmenter.as_ref(), &doc.title);
        if terms.is_empty() {
            println!("   {}", dim("(none)"));
        } else {
            println!("   {}", terms.join(" "));
        }
        println!();
    }

    let words = doc.body.split_whitespace().count();
    println!(
        "{} {}",
        subheader("Body:"),
        dim(&format!("{words} words, {} chars", doc.body.chars().count()))
    );
    println!("   {}", body_preview(&doc.body, BODY_PREVIEW_CHARS));
}

/// First `max_chars` characters of `body`, with an ellipsis when cut.
fn body_preview(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
