//! Snippet extraction around the first query match.

/// Marker added where a snippet was cut.
const ELLIPSIS: &str = "...";

/// Extracts an excerpt of `body` around the earliest occurrence of any query token.
///
/// Offsets are counted in characters. The window spans `radius` characters on each side
/// of the match and is marked with `...` on every side where it was cut. Without a
/// query, or when no token occurs, the first `2 * radius` characters are returned.
pub fn snippet(body: &str, query: &str, radius: usize) -> String {
    let chars: Vec<char> = body.chars().collect();
    let query = query.trim();
    if query.is_empty() || chars.is_empty() {
        return leading(&chars, radius);
    }

    let folded: Vec<char> = chars.iter().copied().map(fold_case).collect();
    let mut first: Option<(usize, usize)> = None;
    for token in query.split_whitespace() {
        let needle: Vec<char> = token.chars().map(fold_case).collect();
        if let Some(pos) = folded.windows(needle.len()).position(|w| w == needle.as_slice())
            && first.is_none_or(|(best, _)| pos < best)
        {
            first = Some((pos, needle.len()));
        }
    }

    let Some((pos, len)) = first else {
        return leading(&chars, radius);
    };

    let start = pos.saturating_sub(radius);
    let end = (pos + len + radius).min(chars.len());
    let window: String = chars[start..end].iter().collect();

    let mut out = String::with_capacity(window.len() + 2 * ELLIPSIS.len());
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.push_str(window.trim());
    if end < chars.len() {
        out.push_str(ELLIPSIS);
    }
    out
}

/// First `2 * radius` characters, trimmed.
fn leading(chars: &[char], radius: usize) -> String {
    let end = radius.saturating_mul(2).min(chars.len());
    chars[..end].iter().collect::<String>().trim().to_string()
}

/// Lowercases a character while keeping a one-to-one character mapping.
fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
