//! Markdown-to-plain-text reduction for search bodies.
//!
//! This is not a Markdown renderer. It removes the syntax that would otherwise pollute
//! the index and snippets, in a fixed order: fenced code, inline code, images, links
//! (reduced to their label), structural punctuation, whitespace.

use std::sync::LazyLock;

use regex::Regex;

/// Words per minute used for the reading time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Compiles one of the static sanitizer patterns.
fn pattern(source: &str) -> Regex {
    // literal pattern, checked by `test_patterns_compile`
    Regex::new(source).expect("sanitizer pattern")
}

/// Fenced code blocks, including the info string.
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)```.*?```"));
/// Inline code spans.
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"`[^`]*`"));
/// Image embeds.
static IMAGE: LazyLock<Regex> = LazyLock::new(|| pattern(r"!\[[^\]]*\]\([^)]*\)"));
/// Links; the label is kept.
static LINK: LazyLock<Regex> = LazyLock::new(|| pattern(r"\[([^\]]+)\]\([^)]*\)"));
/// Heading, quote, emphasis, list, table and rule punctuation.
static STRUCTURE: LazyLock<Regex> = LazyLock::new(|| pattern(r"[#>*_~\-|]"));
/// Whitespace runs.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+"));

/// Reduces a Markdown body to single-spaced plain text.
pub fn sanitize_body(markdown: &str) -> String {
    let text = FENCED_CODE.replace_all(markdown, " ");
    let text = INLINE_CODE.replace_all(&text, " ");
    let text = IMAGE.replace_all(&text, " ");
    let text = LINK.replace_all(&text, "$1");
    let text = STRUCTURE.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Estimated reading time in minutes for a raw (unsanitized) body.
///
/// Words are whitespace-separated runs; the result is rounded half up and never below 1.
pub fn min_read(raw_body: &str) -> u32 {
    let words = raw_body.split_whitespace().count();
    let minutes = (words + WORDS_PER_MINUTE / 2) / WORDS_PER_MINUTE;
    u32::try_from(minutes.max(1)).unwrap_or(u32::MAX)
}
