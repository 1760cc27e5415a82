//! Text segmentation and forward tokenization for the post index.
//!
//! Segmentation is pluggable through the [`Segmenter`] trait:
//! - [`LatinSegmenter`] - runs of alphanumeric characters, lowercased
//! - [`CjkSegmenter`] - overlapping bigrams over Han, Kana and Hangul runs
//! - [`MixedSegmenter`] - both, splitting words at script boundaries
//!
//! [`ForwardTokenizer`] adapts a segmenter to Tantivy and indexes every prefix of every
//! segment, so a query term matches any indexed word it is a prefix of.

use std::{fmt, sync::Arc};

use tantivy::tokenizer::{Token, TokenStream, Tokenizer};

use crate::IndexError;

/// Name of the forward tokenizer registered with Tantivy.
pub const FORWARD_TOKENIZER: &str = "quill_forward";

/// Maximum token length in bytes. Longer segments are indexed by their prefixes only.
pub const MAX_TOKEN_LENGTH: usize = 40;

/// One unit of text produced by a segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Normalized (lowercased) text.
    pub text: String,
    /// Byte offset of the segment in the source text.
    pub start: usize,
    /// Byte offset just past the segment in the source text.
    pub end: usize,
}

/// Splits text into matchable segments.
pub trait Segmenter: fmt::Debug + Send + Sync + 'static {
    /// Segments `text` in reading order.
    fn tokenize(&self, text: &str) -> Vec<Segment>;
}

/// Segments Latin-style text on anything that is not alphanumeric.
///
/// CJK characters count as alphanumeric here, so unspaced CJK text becomes one long word.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatinSegmenter;

impl Segmenter for LatinSegmenter {
    fn tokenize(&self, text: &str) -> Vec<Segment> {
        runs(text, false)
            .into_iter()
            .filter(|run| run.class == CharClass::Word)
            .map(|run| word_segment(text, &run))
            .collect()
    }
}

/// Segments CJK runs into overlapping character bigrams plus a trailing unigram.
///
/// Non-CJK text is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CjkSegmenter;

impl Segmenter for CjkSegmenter {
    fn tokenize(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        for run in runs(text, true) {
            if run.class == CharClass::Cjk {
                push_bigrams(text, &run, &mut segments);
            }
        }
        segments
    }
}

/// Latin words and CJK bigrams from the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedSegmenter;

impl Segmenter for MixedSegmenter {
    fn tokenize(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        for run in runs(text, true) {
            match run.class {
                CharClass::Word => segments.push(word_segment(text, &run)),
                CharClass::Cjk => push_bigrams(text, &run, &mut segments),
                CharClass::Break => {}
            }
        }
        segments
    }
}

/// Looks up a segmenter by its configuration name.
pub fn segmenter_by_name(name: &str) -> Result<Arc<dyn Segmenter>, IndexError> {
    match name.to_lowercase().as_str() {
        "mixed" => Ok(Arc::new(MixedSegmenter)),
        "latin" => Ok(Arc::new(LatinSegmenter)),
        other => Err(IndexError::UnknownSegmenter(other.to_string())),
    }
}

/// Segments a query into the exact terms to look up.
///
/// Terms are capped at [`MAX_TOKEN_LENGTH`] bytes like indexed prefixes, and duplicates
/// are dropped.
pub fn query_terms(segmenter: &dyn Segmenter, query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for segment in segmenter.tokenize(query) {
        let term = truncate_to_boundary(&segment.text, MAX_TOKEN_LENGTH).to_string();
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Tantivy tokenizer that emits every prefix of every segment.
#[derive(Clone)]
pub struct ForwardTokenizer {
    /// Segmentation strategy.
    segmenter: Arc<dyn Segmenter>,
}

impl ForwardTokenizer {
    /// Creates a forward tokenizer over `segmenter`.
    pub fn new(segmenter: Arc<dyn Segmenter>) -> Self {
        Self { segmenter }
    }
}

impl Tokenizer for ForwardTokenizer {
    type TokenStream<'a> = ForwardTokenStream;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        let mut tokens = Vec::new();
        for (position, segment) in self.segmenter.tokenize(text).into_iter().enumerate() {
            for (end, _) in segment
                .text
                .char_indices()
                .map(|(i, c)| (i + c.len_utf8(), c))
                .take_while(|(end, _)| *end <= MAX_TOKEN_LENGTH)
            {
                tokens.push(Token {
                    offset_from: segment.start,
                    offset_to: segment.end,
                    position,
                    text: segment.text[..end].to_string(),
                    position_length: 1,
                });
            }
        }
        ForwardTokenStream { tokens, cursor: 0 }
    }
}

/// Precomputed token stream produced by [`ForwardTokenizer`].
#[derive(Debug)]
pub struct ForwardTokenStream {
    /// All tokens of the text.
    tokens: Vec<Token>,
    /// Number of tokens consumed so far.
    cursor: usize,
}

impl TokenStream for ForwardTokenStream {
    fn advance(&mut self) -> bool {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn token(&self) -> &Token {
        &self.tokens[self.cursor - 1]
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.tokens[self.cursor - 1]
    }
}

/// Character classes used to split text into runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// Alphanumeric, non-CJK (or any alphanumeric when CJK is not split out).
    Word,
    /// Han, Hiragana, Katakana or Hangul.
    Cjk,
    /// Whitespace, punctuation and symbols.
    Break,
}

/// A maximal run of characters sharing one class.
#[derive(Debug)]
struct Run {
    /// Class of every character in the run.
    class: CharClass,
    /// Byte offset of the run start.
    start: usize,
    /// Byte offset just past the run.
    end: usize,
}

/// Splits text into runs of same-class characters.
fn runs(text: &str, split_cjk: bool) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (i, c) in text.char_indices() {
        let class = if split_cjk && is_cjk(c) {
            CharClass::Cjk
        } else if c.is_alphanumeric() {
            CharClass::Word
        } else {
            CharClass::Break
        };
        let end = i + c.len_utf8();
        match runs.last_mut() {
            Some(run) if run.class == class => run.end = end,
            _ => runs.push(Run {
                class,
                start: i,
                end,
            }),
        }
    }
    runs
}

/// Builds a lowercased word segment from a run.
fn word_segment(text: &str, run: &Run) -> Segment {
    Segment {
        text: text[run.start..run.end].to_lowercase(),
        start: run.start,
        end: run.end,
    }
}

/// Appends overlapping bigrams for a CJK run, then its last character alone.
fn push_bigrams(text: &str, run: &Run, segments: &mut Vec<Segment>) {
    let chars: Vec<(usize, char)> = text[run.start..run.end]
        .char_indices()
        .map(|(i, c)| (run.start + i, c))
        .collect();

    for pair in chars.windows(2) {
        let (start, first) = pair[0];
        let (second_start, second) = pair[1];
        segments.push(Segment {
            text: [first, second].iter().flat_map(|c| c.to_lowercase()).collect(),
            start,
            end: second_start + second.len_utf8(),
        });
    }
    if let Some(&(start, last)) = chars.last() {
        segments.push(Segment {
            text: last.to_lowercase().collect(),
            start,
            end: start + last.len_utf8(),
        });
    }
}

/// Checks whether a character belongs to a script written without spaces.
fn is_cjk(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1100..=0x11FF // Hangul Jamo
            | 0x3040..=0x309F // Hiragana
            | 0x30A0..=0x30FF // Katakana
            | 0x3130..=0x318F // Hangul Compatibility Jamo
            | 0x3400..=0x4DBF // CJK Extension A
            | 0x4E00..=0x9FFF // CJK Unified Ideographs
            | 0xAC00..=0xD7AF // Hangul Syllables
            | 0xF900..=0xFAFF // CJK Compatibility Ideographs
            | 0xFF66..=0xFF9F // Halfwidth Katakana
            | 0x20000..=0x2FA1F // CJK Extensions B-F
    )
}

/// Truncates a string to at most `max` bytes on a character boundary.
fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod test {
    use std::iter;

    use super::*;

    fn texts(segments: Vec<Segment>) -> Vec<String> {
        segments.into_iter().map(|s| s.text).collect()
    }

    fn stream_texts(segmenter: Arc<dyn Segmenter>, text: &str) -> Vec<String> {
        let mut tokenizer = ForwardTokenizer::new(segmenter);
        let mut stream = tokenizer.token_stream(text);
        iter::from_fn(|| stream.next().map(|t| t.text.clone())).collect()
    }

    #[test]
    fn latin_lowercases_and_splits_punctuation() {
        let segments = LatinSegmenter.tokenize("Hello, World! foo-bar v2");
        assert_eq!(texts(segments.clone()), vec!["hello", "world", "foo", "bar", "v2"]);
        assert_eq!((segments[1].start, segments[1].end), (7, 12));
    }

    #[test]
    fn latin_keeps_cjk_words_whole() {
        assert_eq!(texts(LatinSegmenter.tokenize("검색엔진 만들기")), vec!["검색엔진", "만들기"]);
    }

    #[test]
    fn cjk_bigrams_with_trailing_unigram() {
        assert_eq!(
            texts(CjkSegmenter.tokenize("검색엔진")),
            vec!["검색", "색엔", "엔진", "진"]
        );
        assert_eq!(texts(CjkSegmenter.tokenize("字")), vec!["字"]);
        assert!(CjkSegmenter.tokenize("plain latin").is_empty());
    }

    #[test]
    fn mixed_splits_at_script_boundaries() {
        assert_eq!(
            texts(MixedSegmenter.tokenize("React훅 사용법, Tokyo東京")),
            vec!["react", "훅", "사용", "용법", "법", "tokyo", "東京", "京"]
        );
    }

    #[test]
    fn forward_tokenizer_emits_prefixes() {
        let tokens = stream_texts(Arc::new(LatinSegmenter), "Rust go");
        assert_eq!(tokens, vec!["r", "ru", "rus", "rust", "g", "go"]);
    }

    #[test]
    fn forward_tokenizer_caps_prefix_length() {
        let long = "a".repeat(50);
        let tokens = stream_texts(Arc::new(LatinSegmenter), &long);
        assert_eq!(tokens.len(), MAX_TOKEN_LENGTH);
        assert_eq!(tokens.last().map(String::len), Some(MAX_TOKEN_LENGTH));
    }

    #[test]
    fn forward_tokenizer_cjk_prefixes() {
        let tokens = stream_texts(Arc::new(MixedSegmenter), "블로그");
        assert_eq!(tokens, vec!["블", "블로", "로", "로그", "그"]);
    }

    #[test]
    fn query_terms_truncate_and_dedup() {
        let long = "b".repeat(60);
        let terms = query_terms(&LatinSegmenter, &format!("Rust rust {long}"));
        assert_eq!(terms, vec!["rust".to_string(), "b".repeat(MAX_TOKEN_LENGTH)]);
        assert!(query_terms(&MixedSegmenter, "  ?! ").is_empty());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        // 14 three-byte characters = 42 bytes.
        let text = "가".repeat(14);
        assert_eq!(truncate_to_boundary(&text, MAX_TOKEN_LENGTH).len(), 39);
    }

    #[test]
    fn segmenter_lookup() {
        assert!(segmenter_by_name("mixed").is_ok());
        assert!(segmenter_by_name("Latin").is_ok());
        let err = segmenter_by_name("klingon").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }
}
