//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

pub use quill_highlight::{dim, header, subheader, warning};
use quill_highlight::{Highlighter, emphasize_matches, rule};
use quill_index::{SearchField, SearchResponse, SearchResult};
use serde::Serialize;

/// Width of the separator printed under result summaries.
const RULE_WIDTH: usize = 40;

/// Prints `value` as pretty JSON, highlighted only when stdout is a terminal.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) if io::stdout().is_terminal() => {
            println!("{}", Highlighter::new().highlight_json(&format!("{json}\n")));
            ExitCode::SUCCESS
        }
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Outputs a search response as JSON or as formatted text.
pub fn output_search_response(response: &SearchResponse, json: bool) -> ExitCode {
    if json {
        return print_json(response);
    }

    if response.results.is_empty() {
        println!("{}", dim("No results found."));
        return ExitCode::SUCCESS;
    }

    for result in &response.results {
        print!("{}", format_result(result, &response.query));
        println!();
    }
    println!("{}", rule(RULE_WIDTH));
    println!(
        "{}",
        dim(&format!(
            "{} result{} for \"{}\"",
            response.total,
            if response.total == 1 { "" } else { "s" },
            response.query
        ))
    );

    ExitCode::SUCCESS
}

/// Formats one result: title line, metadata line, highlighted snippet.
fn format_result(result: &SearchResult, query: &str) -> String {
    let mut out = format!(
        "{} {}\n",
        header(display_title(&result.title)),
        dim(&format!("{}/{}", result.category, result.slug))
    );

    let mut meta = vec![
        display_date(&result.date).to_string(),
        format!("{} min read", result.min_read),
    ];
    if !result.tags.is_empty() {
        meta.push(format!("tags: {}", result.tags.join(", ")));
    }
    meta.push(format!("matched: {}", format_fields(&result.matched_fields)));
    out.push_str(&format!("   {}\n", dim(&meta.join(" · "))));

    if !result.snippet.is_empty() {
        out.push_str(&format!("   {}\n", emphasize_matches(&result.snippet, query)));
    }
    out
}

/// Joins field names with commas.
pub fn format_fields(fields: &[SearchField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Title shown for posts without one.
pub fn display_title(title: &str) -> &str {
    if title.is_empty() { "(untitled)" } else { title }
}

/// Date shown for posts without one.
pub fn display_date(date: &str) -> &str {
    if date.is_empty() { "undated" } else { date }
}
