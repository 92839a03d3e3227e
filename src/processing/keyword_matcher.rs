//! Keyword overlap between a question and a candidate answer

use crate::error::{Result, ScorerError};
use crate::processing::text_processor::TextProcessor;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

/// Checks how many of a question's keywords literally appear in an answer
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    processor: TextProcessor,
    top_k: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordOverlap {
    pub keywords: Vec<String>,
    pub matched: Vec<String>,
    /// Fraction of keywords found, in [0, 1]
    pub score: f64,
}

impl KeywordOverlap {
    pub fn missing(&self) -> Vec<&str> {
        self.keywords
            .iter()
            .filter(|k| !self.matched.contains(k))
            .map(String::as_str)
            .collect()
    }
}

impl KeywordMatcher {
    pub fn new(processor: TextProcessor, top_k: usize) -> Self {
        Self { processor, top_k }
    }

    /// Score the share of question keywords present as whole words in the answer
    pub fn keyword_overlap(&self, question: &str, answer: &str) -> Result<KeywordOverlap> {
        let keywords = self.processor.extract_keywords(question, self.top_k);
        if keywords.is_empty() {
            return Ok(KeywordOverlap::default());
        }

        let haystack = answer.to_lowercase();
        let found = find_whole_words(&keywords, &haystack)?;

        let matched: Vec<String> = keywords
            .iter()
            .zip(found.iter())
            .filter(|(_, &hit)| hit)
            .map(|(k, _)| k.clone())
            .collect();

        let score = (matched.len() as f64 / keywords.len() as f64).clamp(0.0, 1.0);

        Ok(KeywordOverlap {
            keywords,
            matched,
            score,
        })
    }
}

/// For each pattern, whether it occurs in `haystack` delimited by word boundaries
fn find_whole_words(patterns: &[String], haystack: &str) -> Result<Vec<bool>> {
    // Standard semantics so overlapping occurrences are all reported
    let matcher = AhoCorasick::builder()
        .match_kind(MatchKind::Standard)
        .build(patterns)
        .map_err(|e| ScorerError::Matcher(format!("Failed to build keyword matcher: {}", e)))?;

    let mut found = vec![false; patterns.len()];

    for mat in matcher.find_overlapping_iter(haystack) {
        let idx = mat.pattern().as_usize();
        if found[idx] {
            continue;
        }
        if is_word_boundary(haystack, mat.start()) && is_word_boundary(haystack, mat.end()) {
            found[idx] = true;
        }
    }

    Ok(found)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A boundary sits between a word character and a non-word character (or text edge)
fn is_word_boundary(text: &str, pos: usize) -> bool {
    let before = text[..pos].chars().next_back().is_some_and(is_word_char);
    let after = text[pos..].chars().next().is_some_and(is_word_char);
    before != after
}
