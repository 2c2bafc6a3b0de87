//! # Text Utilities
//!
//! Word/character counting, reading time, case conversion and social
//! platform character limits.
//!
//! Platform limits and the reading speed come from
//! [`crate::settings::Settings`] so they can be changed without touching
//! the counting code.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::text::{convert_case, text_stats, CaseStyle};
//!
//! let stats = text_stats("Hello there. How are you?", 200);
//! assert_eq!(stats.words, 5);
//! assert_eq!(stats.sentences, 2);
//! assert_eq!(convert_case("hello big world", CaseStyle::Camel), "helloBigWorld");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Default reading speed in words per minute
pub const DEFAULT_READING_WPM: u32 = 200;

/// Maximum post length for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformLimit {
    pub platform: String,
    pub max_chars: usize,
}

impl PlatformLimit {
    pub fn new(platform: impl Into<String>, max_chars: usize) -> Self {
        PlatformLimit {
            platform: platform.into(),
            max_chars,
        }
    }
}

/// Built-in platform limits
pub fn default_platform_limits() -> Vec<PlatformLimit> {
    vec![
        PlatformLimit::new("X (Twitter)", 280),
        PlatformLimit::new("Instagram caption", 2_200),
        PlatformLimit::new("LinkedIn post", 3_000),
        PlatformLimit::new("Facebook post", 63_206),
    ]
}

/// Output casing styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Snake,
    Kebab,
}

impl CaseStyle {
    /// Parse a style name as typed on the command line
    pub fn from_name(name: &str) -> CalcResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "upper" => Ok(CaseStyle::Upper),
            "lower" => Ok(CaseStyle::Lower),
            "title" => Ok(CaseStyle::Title),
            "sentence" => Ok(CaseStyle::Sentence),
            "camel" => Ok(CaseStyle::Camel),
            "snake" => Ok(CaseStyle::Snake),
            "kebab" => Ok(CaseStyle::Kebab),
            other => Err(CalcError::invalid_input(
                "case",
                other,
                "Expected upper, lower, title, sentence, camel, snake or kebab",
            )),
        }
    }
}

/// Counts for a block of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    /// Whole minutes, rounded up
    pub reading_minutes: u64,
}

/// Remaining room on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitStatus {
    pub platform: String,
    pub max_chars: usize,
    /// Negative when the text is too long
    pub remaining: i64,
    pub within_limit: bool,
}

/// Input for the text tool.
///
/// ## JSON Example
///
/// ```json
/// { "text": "Hello world", "case": "title" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    pub text: String,

    /// Optional case conversion to apply
    #[serde(default)]
    pub case: Option<CaseStyle>,
}

/// Results from the text tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    pub stats: TextStats,
    pub converted: Option<String>,
    pub limits: Vec<LimitStatus>,
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Count sentences. A run of terminators only ends a sentence when it is
/// followed by whitespace or the end of the text, so "3.14" and "e.g."
/// inside a sentence stay whole.
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut has_content = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_alphanumeric() {
            has_content = true;
        }
        if is_terminator(c) && has_content {
            while chars.peek().is_some_and(|&next| is_terminator(next)) {
                chars.next();
            }
            if chars.peek().map_or(true, |next| next.is_whitespace()) {
                count += 1;
                has_content = false;
            }
        }
    }
    if has_content {
        count += 1;
    }
    count
}

/// Count characters, words, sentences and paragraphs.
pub fn text_stats(text: &str, reading_wpm: u32) -> TextStats {
    let characters = text.chars().count();
    let characters_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();
    let words = text.split_whitespace().count();
    let sentences = count_sentences(text);

    let mut paragraphs = 0;
    let mut in_paragraph = false;
    for line in text.lines() {
        let blank = line.trim().is_empty();
        if !blank && !in_paragraph {
            paragraphs += 1;
        }
        in_paragraph = !blank;
    }

    let reading_minutes = if words == 0 || reading_wpm == 0 {
        0
    } else {
        (words as u64).div_ceil(reading_wpm as u64)
    };

    TextStats {
        characters,
        characters_no_spaces,
        words,
        sentences,
        paragraphs,
        reading_minutes,
    }
}

/// Split text into words for identifier-style casing.
///
/// Non-alphanumeric characters separate words, and so does a lower-case
/// letter or digit followed by an upper-case letter (`fooBar` → foo, bar).
fn identifier_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in text.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Re-case `text` in the given style.
pub fn convert_case(text: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Upper => text.to_uppercase(),
        CaseStyle::Lower => text.to_lowercase(),
        CaseStyle::Title => {
            let mut out = String::with_capacity(text.len());
            let mut word_start = true;
            for c in text.chars() {
                if word_start && c.is_alphanumeric() {
                    out.extend(c.to_uppercase());
                    word_start = false;
                } else {
                    out.extend(c.to_lowercase());
                    if c.is_whitespace() {
                        word_start = true;
                    }
                }
            }
            out
        }
        CaseStyle::Sentence => {
            let mut out = String::with_capacity(text.len());
            let mut capitalize_next = true;
            for c in text.chars() {
                if capitalize_next && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    capitalize_next = false;
                } else {
                    out.extend(c.to_lowercase());
                    if is_terminator(c) {
                        capitalize_next = true;
                    }
                }
            }
            out
        }
        CaseStyle::Camel => identifier_words(text)
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
            .collect(),
        CaseStyle::Snake => identifier_words(text).join("_"),
        CaseStyle::Kebab => identifier_words(text).join("-"),
    }
}

/// Remaining characters for each platform.
pub fn check_limits(text: &str, limits: &[PlatformLimit]) -> Vec<LimitStatus> {
    let used = text.chars().count() as i64;
    limits
        .iter()
        .map(|limit| {
            let remaining = limit.max_chars as i64 - used;
            LimitStatus {
                platform: limit.platform.clone(),
                max_chars: limit.max_chars,
                remaining,
                within_limit: remaining >= 0,
            }
        })
        .collect()
}

/// Run the text tool.
pub fn calculate(input: &TextInput, reading_wpm: u32, limits: &[PlatformLimit]) -> CalcResult<TextResult> {
    if reading_wpm == 0 {
        return Err(CalcError::invalid_input("reading_wpm", "0", "Reading speed must be positive"));
    }
    let stats = text_stats(&input.text, reading_wpm);
    debug!(words = stats.words, characters = stats.characters, "text statistics");
    Ok(TextResult {
        stats,
        converted: input.case.map(|style| convert_case(&input.text, style)),
        limits: check_limits(&input.text, limits),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let text = "First paragraph. Still first!\n\nSecond one?\nSame paragraph\n\n\n";
        let stats = text_stats(text, 200);
        assert_eq!(stats.words, 8);
        assert_eq!(stats.sentences, 4);
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.reading_minutes, 1);
    }

    #[test]
    fn test_inner_periods_do_not_split_sentences() {
        assert_eq!(text_stats("Pi is 3.14", 200).sentences, 1);
        assert_eq!(text_stats("Pi is 3.14. Roughly.", 200).sentences, 2);
        assert_eq!(text_stats("Visit example.com today!", 200).sentences, 1);
        assert_eq!(text_stats("Wait... what?!", 200).sentences, 2);
        assert_eq!(text_stats("...", 200).sentences, 0);
    }

    #[test]
    fn test_characters() {
        let stats = text_stats("a b\tc", 200);
        assert_eq!(stats.characters, 5);
        assert_eq!(stats.characters_no_spaces, 3);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(text_stats("   ", 200), TextStats { characters: 3, ..TextStats::default() });
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = "word ".repeat(401);
        assert_eq!(text_stats(&text, 200).reading_minutes, 3);
    }

    #[test]
    fn test_title_and_sentence_case() {
        assert_eq!(convert_case("hELLO wORLD", CaseStyle::Title), "Hello World");
        assert_eq!(convert_case("hello. WORLD is big! ok", CaseStyle::Sentence), "Hello. World is big! Ok");
    }

    #[test]
    fn test_identifier_cases() {
        assert_eq!(convert_case("Hello big-World", CaseStyle::Camel), "helloBigWorld");
        assert_eq!(convert_case("parseHttpRequest now", CaseStyle::Snake), "parse_http_request_now");
        assert_eq!(convert_case("  Some Title  ", CaseStyle::Kebab), "some-title");
    }

    #[test]
    fn test_limits() {
        let limits = vec![PlatformLimit::new("tiny", 5)];
        let status = check_limits("abcdefg", &limits);
        assert_eq!(status[0].remaining, -2);
        assert!(!status[0].within_limit);
    }

    #[test]
    fn test_calculate_rejects_zero_wpm() {
        let input = TextInput { text: "hi".to_string(), case: None };
        assert!(calculate(&input, 0, &default_platform_limits()).is_err());
    }

    #[test]
    fn test_case_names() {
        assert_eq!(CaseStyle::from_name("Snake").unwrap(), CaseStyle::Snake);
        assert!(CaseStyle::from_name("shout").is_err());
    }
}
