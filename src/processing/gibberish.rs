//! Detection of degenerate answers that should not be scored at all

use crate::config::GibberishConfig;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GibberishReason {
    NonString,
    Empty,
    RepeatedCharacters,
    LowAlphaRatio(f64),
    TooShort,
}

impl fmt::Display for GibberishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GibberishReason::NonString => write!(f, "non-string answer"),
            GibberishReason::Empty => write!(f, "empty answer"),
            GibberishReason::RepeatedCharacters => write!(f, "repeated character sequence"),
            GibberishReason::LowAlphaRatio(ratio) => write!(f, "low alpha ratio ({:.2})", ratio),
            GibberishReason::TooShort => write!(f, "too short / no tokens"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GibberishDetector {
    config: GibberishConfig,
    processor: TextProcessor,
}

impl GibberishDetector {
    pub fn new(config: GibberishConfig, processor: TextProcessor) -> Self {
        Self { config, processor }
    }

    /// Return why the answer is gibberish, or `None` when it can be scored.
    ///
    /// `None` as input stands for an answer that was not text at all.
    pub fn check(&self, answer: Option<&str>) -> Option<GibberishReason> {
        let Some(answer) = answer else {
            return Some(GibberishReason::NonString);
        };

        let answer = answer.trim();
        if answer.is_empty() {
            return Some(GibberishReason::Empty);
        }

        if longest_run(answer) >= self.config.max_repeat_run {
            return Some(GibberishReason::RepeatedCharacters);
        }

        let total_chars = answer.chars().count();
        let alpha_chars = answer.chars().filter(|c| c.is_alphabetic()).count();
        let alpha_ratio = alpha_chars as f64 / total_chars as f64;

        if total_chars >= self.config.alpha_check_min_len && alpha_ratio < self.config.min_alpha_ratio {
            return Some(GibberishReason::LowAlphaRatio(alpha_ratio));
        }

        if total_chars < self.config.short_answer_len && self.processor.tokenize(answer).is_empty() {
            return Some(GibberishReason::TooShort);
        }

        None
    }

    pub fn is_gibberish(&self, answer: &str) -> bool {
        self.check(Some(answer)).is_some()
    }
}

/// Longest run of one repeated character; newlines never count as part of a run
fn longest_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if c == '\n' {
            current = 0;
            prev = None;
            continue;
        }
        if prev == Some(c) {
            current += 1;
        } else {
            current = 1;
            prev = Some(c);
        }
        longest = longest.max(current);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> GibberishDetector {
        GibberishDetector::new(GibberishConfig::default(), TextProcessor::default())
    }

    #[test]
    fn test_non_string_and_empty() {
        let detector = detector();

        assert_eq!(detector.check(None), Some(GibberishReason::NonString));
        assert_eq!(detector.check(Some("")), Some(GibberishReason::Empty));
        assert_eq!(detector.check(Some("   \n\t ")), Some(GibberishReason::Empty));
    }

    #[test]
    fn test_repeated_characters() {
        let detector = detector();

        assert_eq!(detector.check(Some("aaaaaaa")), Some(GibberishReason::RepeatedCharacters));
        assert_eq!(
            detector.check(Some("I think the answer is !!!!!!!!")),
            Some(GibberishReason::RepeatedCharacters)
        );
        // six in a row is still fine
        assert_eq!(detector.check(Some("zzzzzz is sleep")), None);
    }

    #[test]
    fn test_newline_runs_do_not_count() {
        assert_eq!(longest_run("a\n\n\n\n\n\n\n\nb"), 1);
        assert_eq!(longest_run("xxxyy"), 3);
        assert_eq!(longest_run(""), 0);
    }

    #[test]
    fn test_low_alpha_ratio() {
        let detector = detector();

        let reason = detector.check(Some("1234 5678 9012 3456")).unwrap();
        assert_eq!(reason, GibberishReason::LowAlphaRatio(0.0));
        assert_eq!(reason.to_string(), "low alpha ratio (0.00)");

        // 3 letters out of 15 characters
        let reason = detector.check(Some("abc 123 456 789")).unwrap();
        assert_eq!(reason.to_string(), "low alpha ratio (0.20)");

        // short strings skip the ratio rule
        assert_eq!(detector.check(Some("42 is 6x7")), None);
    }

    #[test]
    fn test_too_short_without_tokens() {
        let detector = detector();

        assert_eq!(detector.check(Some("?!")), Some(GibberishReason::TooShort));
        assert_eq!(detector.check(Some("a")), Some(GibberishReason::TooShort));
        assert_eq!(detector.check(Some("Go")), None);
        assert_eq!(detector.check(Some("the a of")), None);
    }

    #[test]
    fn test_regular_answer() {
        let detector = detector();
        let answer = "A mutex guards shared state so only one thread mutates it at a time.";

        assert!(!detector.is_gibberish(answer));
    }
}
