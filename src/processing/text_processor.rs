//! Text normalization, tokenization and keyword extraction

use crate::config::TextConfig;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct TextProcessor {
    stop_words: HashSet<String>,
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(&TextConfig::default())
    }
}

impl TextProcessor {
    pub fn new(config: &TextConfig) -> Self {
        let stop_words = config
            .stop_words
            .iter()
            .map(|w| w.to_lowercase())
            .collect();

        // Letters, digits and the symbols that show up in tech names (c++, c#, node.js)
        let token_regex = Regex::new(r"[a-z0-9#+.\-]+").expect("Invalid token regex");

        Self {
            stop_words,
            token_regex,
        }
    }

    /// Lowercase the text and split it into tokens, dropping stop words
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Distinct tokens of the text
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.tokenize(text).into_iter().collect()
    }

    /// Extract the `top_k` most characteristic tokens.
    ///
    /// Tokens are ranked by frequency, then by length. Exact ties keep the
    /// order in which the tokens first appeared, so identical input always
    /// yields the same keywords.
    pub fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<String> {
        let tokens = self.tokenize(text);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut word_freq: Vec<(&str, usize)> = Vec::new();

        for token in &tokens {
            match positions.get(token.as_str()) {
                Some(&idx) => word_freq[idx].1 += 1,
                None => {
                    positions.insert(token.as_str(), word_freq.len());
                    word_freq.push((token.as_str(), 1));
                }
            }
        }

        // sort_by is stable: first-seen order survives among exact ties
        word_freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.len().cmp(&a.0.len())));

        word_freq
            .into_iter()
            .take(top_k)
            .map(|(word, _)| word.to_string())
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }
}

/// Cut text to at most `max_graphemes` user-perceived characters
pub fn truncate_graphemes(text: &str, max_graphemes: usize) -> String {
    text.graphemes(true).take(max_graphemes).collect()
}

/// Truncate for display, appending an ellipsis when something was cut
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    if text.graphemes(true).count() <= max_graphemes {
        text.to_string()
    } else {
        format!("{}...", truncate_graphemes(text, max_graphemes).trim_end())
    }
}
