//! Question/answer similarity with a pluggable primary strategy and a
//! dependency-free Jaccard fallback

use crate::config::{SimilarityConfig, SimilarityStrategyKind};
use crate::error::Result;
use crate::processing::text_processor::TextProcessor;
use log::debug;

/// A way of measuring how close an answer is to its question, in [0, 1]
pub trait SimilarityStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn similarity(&self, question: &str, answer: &str) -> Result<f64>;
}

/// Token-set Jaccard similarity, always available
#[derive(Debug, Clone)]
pub struct JaccardSimilarity {
    processor: TextProcessor,
}

impl JaccardSimilarity {
    pub fn new(processor: TextProcessor) -> Self {
        Self { processor }
    }

    pub fn score(&self, question: &str, answer: &str) -> f64 {
        let q_tokens = self.processor.token_set(question);
        let a_tokens = self.processor.token_set(answer);

        if q_tokens.is_empty() || a_tokens.is_empty() {
            return 0.0;
        }

        let intersection = q_tokens.intersection(&a_tokens).count();
        let union = q_tokens.union(&a_tokens).count();

        if union == 0 {
            0.0
        } else {
            (intersection as f64 / union as f64).clamp(0.0, 1.0)
        }
    }
}

impl SimilarityStrategy for JaccardSimilarity {
    fn name(&self) -> &str {
        "jaccard"
    }

    fn similarity(&self, question: &str, answer: &str) -> Result<f64> {
        Ok(self.score(question, answer))
    }
}

/// Similarity scorer used by the evaluator.
///
/// The primary strategy is chosen once at construction. Whenever it is
/// missing or fails, the Jaccard fallback answers instead, so scoring never
/// depends on the primary being present.
pub struct SemanticScorer {
    primary: Option<Box<dyn SimilarityStrategy>>,
    fallback: JaccardSimilarity,
}

impl std::fmt::Debug for SemanticScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScorer")
            .field("primary", &self.primary.as_ref().map(|p| p.name()))
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl SemanticScorer {
    pub fn from_config(config: &SimilarityConfig, processor: &TextProcessor) -> Self {
        let scorer = Self::fallback_only(processor.clone());

        match config.strategy {
            SimilarityStrategyKind::Jaccard => scorer,
            SimilarityStrategyKind::TfIdf => {
                #[cfg(feature = "tfidf")]
                {
                    scorer.with_primary(Box::new(crate::processing::tfidf::TfIdfCosine::new()))
                }
                #[cfg(not(feature = "tfidf"))]
                {
                    log::warn!("TF-IDF similarity requested but the `tfidf` feature is disabled; using Jaccard only");
                    scorer
                }
            }
        }
    }

    pub fn fallback_only(processor: TextProcessor) -> Self {
        Self {
            primary: None,
            fallback: JaccardSimilarity::new(processor),
        }
    }

    pub fn with_primary(mut self, strategy: Box<dyn SimilarityStrategy>) -> Self {
        self.primary = Some(strategy);
        self
    }

    /// Name of the strategy tried first
    pub fn strategy_name(&self) -> &str {
        self.primary
            .as_ref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    pub fn semantic_similarity(&self, question: &str, answer: &str) -> f64 {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return 0.0;
        }

        if let Some(primary) = &self.primary {
            match primary.similarity(question, answer) {
                Ok(score) if score.is_nan() => return 0.0,
                Ok(score) => return score.clamp(0.0, 1.0),
                Err(e) => {
                    debug!("{} similarity failed, falling back to jaccard: {}", primary.name(), e);
                }
            }
        }

        self.fallback.score(question, answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScorerError;

    struct FailingStrategy;

    impl SimilarityStrategy for FailingStrategy {
        fn name(&self) -> &str {
            "failing"
        }

        fn similarity(&self, _question: &str, _answer: &str) -> Result<f64> {
            Err(ScorerError::Similarity("capability unavailable".to_string()))
        }
    }

    struct ConstantStrategy(f64);

    impl SimilarityStrategy for ConstantStrategy {
        fn name(&self) -> &str {
            "constant"
        }

        fn similarity(&self, _question: &str, _answer: &str) -> Result<f64> {
            Ok(self.0)
        }
    }

    fn jaccard_scorer() -> SemanticScorer {
        SemanticScorer::fallback_only(TextProcessor::default())
    }

    #[test]
    fn test_jaccard_identical_texts() {
        let scorer = jaccard_scorer();
        assert_eq!(scorer.semantic_similarity("binary search tree", "binary search tree"), 1.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let scorer = jaccard_scorer();
        // {binary, search, tree} vs {binary, heap}: 1 shared of 4
        let similarity = scorer.semantic_similarity("binary search tree", "binary heap");
        assert!((similarity - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs() {
        let scorer = jaccard_scorer();

        assert_eq!(scorer.semantic_similarity("", "anything"), 0.0);
        assert_eq!(scorer.semantic_similarity("question", "   "), 0.0);
        // only stop words on one side
        assert_eq!(scorer.semantic_similarity("what is a heap", "it is the"), 0.0);
    }

    #[test]
    fn test_failing_primary_falls_back() {
        let scorer = jaccard_scorer().with_primary(Box::new(FailingStrategy));

        assert_eq!(scorer.strategy_name(), "failing");
        assert_eq!(scorer.semantic_similarity("binary search tree", "binary search tree"), 1.0);
    }

    #[test]
    fn test_primary_result_is_clamped() {
        let high = jaccard_scorer().with_primary(Box::new(ConstantStrategy(1.7)));
        assert_eq!(high.semantic_similarity("a b", "c d"), 1.0);

        let negative = jaccard_scorer().with_primary(Box::new(ConstantStrategy(-0.3)));
        assert_eq!(negative.semantic_similarity("x y", "z"), 0.0);

        let nan = jaccard_scorer().with_primary(Box::new(ConstantStrategy(f64::NAN)));
        assert_eq!(nan.semantic_similarity("x y", "x y"), 0.0);
    }

    #[test]
    fn test_jaccard_config_selects_fallback_only() {
        let config = SimilarityConfig {
            strategy: SimilarityStrategyKind::Jaccard,
        };
        let scorer = SemanticScorer::from_config(&config, &TextProcessor::default());
        assert_eq!(scorer.strategy_name(), "jaccard");
    }

    #[cfg(feature = "tfidf")]
    #[test]
    fn test_tfidf_config_selects_cosine() {
        let scorer = SemanticScorer::from_config(&SimilarityConfig::default(), &TextProcessor::default());
        assert_eq!(scorer.strategy_name(), "tfidf-cosine");

        let similarity = scorer.semantic_similarity("binary search tree", "binary search tree");
        assert!((similarity - 1.0).abs() < 1e-9);
    }
}
