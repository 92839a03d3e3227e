//! Configuration management for the interview scorer

use crate::error::{Result, ScorerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Function words dropped by the tokenizer.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "is", "are", "in", "on", "for", "a", "an", "of", "and", "to",
    "with", "by", "at", "from", "as", "that", "this", "it", "be", "or",
    "which", "we", "you", "i", "they", "have", "has", "was", "were", "but",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub text: TextConfig,
    pub gibberish: GibberishConfig,
    pub similarity: SimilarityConfig,
    pub interview: InterviewConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub similarity_weight: f64,
    pub keyword_weight: f64,
    /// Combined scores below this are treated as unrelated and forced to zero
    pub min_relevance_threshold: f64,
    pub top_k: usize,
    pub max_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    pub stop_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GibberishConfig {
    /// Consecutive repeats of one character that mark an answer as gibberish
    pub max_repeat_run: usize,
    pub alpha_check_min_len: usize,
    pub min_alpha_ratio: f64,
    pub short_answer_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    pub strategy: SimilarityStrategyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityStrategyKind {
    TfIdf,
    Jaccard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    pub question_count: usize,
    pub max_total_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl std::fmt::Display for SimilarityStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityStrategyKind::TfIdf => write!(f, "tfidf"),
            SimilarityStrategyKind::Jaccard => write!(f, "jaccard"),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 0.6,
            keyword_weight: 0.4,
            min_relevance_threshold: 0.15,
            top_k: 6,
            max_score: 10.0,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|&s| s.to_string()).collect(),
        }
    }
}

impl Default for GibberishConfig {
    fn default() -> Self {
        Self {
            max_repeat_run: 7,
            alpha_check_min_len: 15,
            min_alpha_ratio: 0.25,
            short_answer_len: 6,
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            strategy: SimilarityStrategyKind::TfIdf,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            text: TextConfig::default(),
            gibberish: GibberishConfig::default(),
            similarity: SimilarityConfig::default(),
            interview: InterviewConfig {
                question_count: 10,
                max_total_score: 100,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("interview-scorer")
            .join("config.toml")
    }

    /// Reject tuning values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        let numeric = [
            ("similarity_weight", scoring.similarity_weight),
            ("keyword_weight", scoring.keyword_weight),
            ("min_relevance_threshold", scoring.min_relevance_threshold),
            ("max_score", scoring.max_score),
            ("min_alpha_ratio", self.gibberish.min_alpha_ratio),
        ];
        if let Some((name, value)) = numeric.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ScorerError::Configuration(format!(
                "{} must be a finite number, got {}",
                name, value
            )));
        }
        if scoring.similarity_weight < 0.0 || scoring.keyword_weight < 0.0 {
            return Err(ScorerError::Configuration(
                "Scoring weights must be non-negative".to_string(),
            ));
        }
        if scoring.similarity_weight + scoring.keyword_weight <= 0.0 {
            return Err(ScorerError::Configuration(
                "At least one scoring weight must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&scoring.min_relevance_threshold) {
            return Err(ScorerError::Configuration(format!(
                "min_relevance_threshold must be within [0, 1], got {}",
                scoring.min_relevance_threshold
            )));
        }
        if scoring.top_k == 0 {
            return Err(ScorerError::Configuration("top_k must be at least 1".to_string()));
        }
        if scoring.max_score <= 0.0 {
            return Err(ScorerError::Configuration("max_score must be positive".to_string()));
        }
        if self.gibberish.max_repeat_run < 2 {
            return Err(ScorerError::Configuration(
                "max_repeat_run must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.gibberish.min_alpha_ratio) {
            return Err(ScorerError::Configuration(format!(
                "min_alpha_ratio must be within [0, 1], got {}",
                self.gibberish.min_alpha_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_tuning() {
        let config = Config::default();

        assert_eq!(config.scoring.similarity_weight, 0.6);
        assert_eq!(config.scoring.keyword_weight, 0.4);
        assert_eq!(config.scoring.min_relevance_threshold, 0.15);
        assert_eq!(config.scoring.top_k, 6);
        assert_eq!(config.gibberish.max_repeat_run, 7);
        assert_eq!(config.text.stop_words.len(), 31);
        assert_eq!(config.similarity.strategy, SimilarityStrategyKind::TfIdf);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_custom_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.similarity.strategy = SimilarityStrategyKind::Jaccard;
        config.scoring.top_k = 4;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.similarity.strategy, SimilarityStrategyKind::Jaccard);
        assert_eq!(loaded.scoring.top_k, 4);
        assert_eq!(loaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut config = Config::default();
        config.scoring.keyword_weight = -0.1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scoring.similarity_weight = 0.0;
        config.scoring.keyword_weight = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scoring.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut config = Config::default();
        config.scoring.similarity_weight = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("similarity_weight"));

        let mut config = Config::default();
        config.scoring.keyword_weight = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scoring.max_score = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scoring.min_relevance_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = [not valid").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ScorerError::Configuration(_))));
    }
}
