//! Request parameters and the word-count policy.
//!
//! Query parameters are accepted leniently: a missing or unparseable
//! `wordLimit` falls back to [`DEFAULT_WORD_LIMIT`] and an unknown `type`
//! is treated as a story.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word limit used when the caller sends none, zero, or garbage.
pub const DEFAULT_WORD_LIMIT: i64 = 50;

/// Word limits at or above this value are replaced by [`CAPPED_WORD_COUNT`].
pub const WORD_LIMIT_CAP_THRESHOLD: i64 = 15_000;

pub const CAPPED_WORD_COUNT: f64 = 500.0;

/// Vocabulary entries are roughly five words each.
const VOCABULARY_WORDS_PER_ENTRY: f64 = 5.0;

/// Raw query string of `GET /api/generate-text`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateTextParams {
    pub word_limit: Option<String>,
    pub content_type: Option<String>,
    pub prompt: Option<String>,
}

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTextResponse {
    pub text: String,
}

/// Kind of content to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Story,
    Vocabulary,
    Gk,
    Custom,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Story => "story",
            ContentType::Vocabulary => "vocabulary",
            ContentType::Gk => "gk",
            ContentType::Custom => "custom",
        }
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        match value {
            "vocabulary" => ContentType::Vocabulary,
            "gk" => ContentType::Gk,
            "custom" => ContentType::Custom,
            _ => ContentType::Story,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adjusted word count interpolated into a prompt.
///
/// Kept as a float: the vocabulary count is `limit / 5` without rounding, so
/// `7` becomes `1.4`. Whole values print without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordCount(pub f64);

impl WordCount {
    /// Apply the per-type scaling and the 15000 cap.
    pub fn adjusted(content_type: ContentType, word_limit: i64) -> Self {
        if word_limit >= WORD_LIMIT_CAP_THRESHOLD {
            return WordCount(CAPPED_WORD_COUNT);
        }

        match content_type {
            ContentType::Vocabulary => WordCount(word_limit as f64 / VOCABULARY_WORDS_PER_ENTRY),
            ContentType::Story | ContentType::Gk | ContentType::Custom => {
                WordCount(word_limit as f64)
            }
        }
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's Display already omits ".0" for whole numbers.
        write!(f, "{}", self.0)
    }
}

/// Fully resolved generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    pub content_type: ContentType,
    pub word_limit: i64,
    pub word_count: WordCount,
    pub user_prompt: String,
}

impl GenerateTextParams {
    /// Collect the known keys from decoded query pairs.
    ///
    /// Repeated keys are joined with `,` in order, so `wordLimit=100&wordLimit=200`
    /// reads as `"100,200"` (a limit of 100) and a repeated `type` never matches
    /// a known content type. Unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "wordLimit" => &mut params.word_limit,
                "type" => &mut params.content_type,
                "prompt" => &mut params.prompt,
                _ => continue,
            };

            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }

        params
    }

    pub fn resolve(&self) -> ContentRequest {
        let word_limit = parse_word_limit(self.word_limit.as_deref());
        let content_type = self
            .content_type
            .as_deref()
            .map(ContentType::from)
            .unwrap_or(ContentType::Story);

        ContentRequest {
            content_type,
            word_limit,
            word_count: WordCount::adjusted(content_type, word_limit),
            user_prompt: self.prompt.clone().unwrap_or_default(),
        }
    }
}

/// Parse a word limit the way browsers' `parseInt(value) || 50` does.
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of digits (hex after a `0x` prefix); the rest is ignored. No digits
/// or a zero result yields [`DEFAULT_WORD_LIMIT`]. Overflow saturates.
pub fn parse_word_limit(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_WORD_LIMIT;
    };

    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        value = value
            .checked_mul(radix as i64)
            .and_then(|v| v.checked_add(d as i64))
            .unwrap_or(i64::MAX);
    }

    if !seen_digit || value == 0 {
        return DEFAULT_WORD_LIMIT;
    }

    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(word_limit: Option<&str>, content_type: Option<&str>) -> GenerateTextParams {
        GenerateTextParams {
            word_limit: word_limit.map(String::from),
            content_type: content_type.map(String::from),
            prompt: None,
        }
    }

    #[test]
    fn test_parse_word_limit_defaults() {
        assert_eq!(parse_word_limit(None), 50);
        assert_eq!(parse_word_limit(Some("")), 50);
        assert_eq!(parse_word_limit(Some("abc")), 50);
        assert_eq!(parse_word_limit(Some("0")), 50);
        assert_eq!(parse_word_limit(Some("-")), 50);
    }

    #[test]
    fn test_parse_word_limit_lenient_forms() {
        assert_eq!(parse_word_limit(Some("200")), 200);
        assert_eq!(parse_word_limit(Some("  42 ")), 42);
        assert_eq!(parse_word_limit(Some("12abc")), 12);
        assert_eq!(parse_word_limit(Some("3.7")), 3);
        assert_eq!(parse_word_limit(Some("+8")), 8);
        assert_eq!(parse_word_limit(Some("-10")), -10);
        assert_eq!(parse_word_limit(Some("0x10")), 16);
    }

    #[test]
    fn test_parse_word_limit_saturates() {
        assert_eq!(
            parse_word_limit(Some("99999999999999999999999")),
            i64::MAX
        );
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!(ContentType::from("vocabulary"), ContentType::Vocabulary);
        assert_eq!(ContentType::from("gk"), ContentType::Gk);
        assert_eq!(ContentType::from("custom"), ContentType::Custom);
        assert_eq!(ContentType::from("story"), ContentType::Story);
        assert_eq!(ContentType::from("poem"), ContentType::Story);
        assert_eq!(ContentType::from("Vocabulary"), ContentType::Story);
        assert_eq!(ContentType::from(""), ContentType::Story);
    }

    #[test]
    fn test_vocabulary_word_count() {
        assert_eq!(params(Some("100"), Some("vocabulary")).resolve().word_count, WordCount(20.0));
        assert_eq!(params(Some("20000"), Some("vocabulary")).resolve().word_count, WordCount(500.0));
        assert_eq!(params(Some("7"), Some("vocabulary")).resolve().word_count, WordCount(1.4));
    }

    #[test]
    fn test_story_word_count() {
        assert_eq!(params(Some("200"), Some("story")).resolve().word_count, WordCount(200.0));
        assert_eq!(params(Some("16000"), None).resolve().word_count, WordCount(500.0));
        assert_eq!(params(Some("14999"), None).resolve().word_count, WordCount(14999.0));
        assert_eq!(params(Some("15000"), Some("gk")).resolve().word_count, WordCount(500.0));
    }

    #[test]
    fn test_missing_word_limit_defaults_before_adjustment() {
        let resolved = params(None, Some("vocabulary")).resolve();
        assert_eq!(resolved.word_limit, 50);
        assert_eq!(resolved.word_count, WordCount(10.0));

        let resolved = params(Some("lots"), None).resolve();
        assert_eq!(resolved.content_type, ContentType::Story);
        assert_eq!(resolved.word_count, WordCount(50.0));
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_pairs_picks_known_keys() {
        let params = GenerateTextParams::from_pairs(pairs(&[
            ("wordLimit", "80"),
            ("type", "custom"),
            ("prompt", "a robot"),
            ("utm_source", "newsletter"),
        ]));

        assert_eq!(params.word_limit.as_deref(), Some("80"));
        assert_eq!(params.content_type.as_deref(), Some("custom"));
        assert_eq!(params.prompt.as_deref(), Some("a robot"));
    }

    #[test]
    fn test_from_pairs_joins_repeated_keys() {
        let params = GenerateTextParams::from_pairs(pairs(&[
            ("wordLimit", "100"),
            ("wordLimit", "200"),
            ("type", "gk"),
            ("type", "gk"),
            ("prompt", "a"),
            ("prompt", "b"),
        ]));

        assert_eq!(params.word_limit.as_deref(), Some("100,200"));
        assert_eq!(params.prompt.as_deref(), Some("a,b"));

        let resolved = params.resolve();
        assert_eq!(resolved.word_limit, 100);
        assert_eq!(resolved.content_type, ContentType::Story);
        assert_eq!(resolved.user_prompt, "a,b");
    }

    #[test]
    fn test_word_count_display() {
        assert_eq!(WordCount(20.0).to_string(), "20");
        assert_eq!(WordCount(1.4).to_string(), "1.4");
        assert_eq!(WordCount(500.0).to_string(), "500");
        assert_eq!(WordCount(-2.0).to_string(), "-2");
    }
}
