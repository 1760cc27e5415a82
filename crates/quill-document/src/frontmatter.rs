//! YAML front matter parsing for posts.
//!
//! Front matter is optional metadata at the start of a post, delimited by `---`:
//!
//! ```markdown
//! ---
//! title: Learning React Hooks
//! description: A tour of useState and useEffect
//! date: 2024-03-01
//! tags: [react, hooks]
//! ---
//!
//! Post body starts here
//! ```

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// Parsed front matter of a post.
///
/// Scalars of any YAML type are kept in their string form, so an unquoted
/// `date: 2024-03-01` or `title: 2024` survives as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// Post title.
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,
    /// Short summary shown in listings.
    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,
    /// Publication date, normally ISO-8601.
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: Option<String>,
    /// Tags in source order. Only a sequence counts; a single scalar is ignored.
    #[serde(default, deserialize_with = "tag_list")]
    pub tags: Vec<String>,
}

/// Parses YAML front matter from post content.
///
/// Returns the parsed front matter (if present) and the remaining content after it.
/// Content without an opening and closing `---` pair has no front matter and is returned
/// unchanged. Front matter that is present but not valid YAML is an error.
pub fn parse_frontmatter(content: &str) -> Result<(Option<Frontmatter>, &str), serde_yaml::Error> {
    let content = content.trim_start_matches('\u{feff}');
    let Some(rest) = content.strip_prefix("---") else {
        return Ok((None, content));
    };

    // The opening line is exactly `---`; `----` and longer are thematic breaks.
    let (opening, after_opening) = rest.split_once('\n').unwrap_or((rest, ""));
    if !opening.trim_end().is_empty() {
        return Ok((None, content));
    }

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Ok((None, content));
    };

    let yaml_content = &after_opening[..closing_pos];
    let remaining = &after_opening[closing_pos..];
    let remaining = remaining.strip_prefix("---").unwrap_or(remaining);
    let remaining = remaining
        .strip_prefix("\r\n")
        .or_else(|| remaining.strip_prefix('\n'))
        .unwrap_or(remaining);

    if yaml_content.trim().is_empty() {
        return Ok((Some(Frontmatter::default()), remaining));
    }

    let frontmatter = serde_yaml::from_str::<Frontmatter>(yaml_content)?;
    Ok((Some(frontmatter), remaining))
}

/// Finds the byte offset of the closing `---` line.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some(pos);
        }
        pos += line.len();
    }
    None
}

/// Renders a YAML scalar as a string; sequences, maps and null become `None`.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Deserializes any scalar into its string form.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

/// Deserializes tags from a sequence; anything else yields no tags.
fn tag_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Sequence(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    })
}
