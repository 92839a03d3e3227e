//! Answer evaluation engine: gibberish gate, keyword overlap, similarity and
//! score fusion over a batch of interview answers

use crate::config::{Config, ScoringConfig};
use crate::error::Result;
use crate::input::batch_parser::parse_batch;
use crate::processing::gibberish::GibberishDetector;
use crate::processing::keyword_matcher::KeywordMatcher;
use crate::processing::similarity::SemanticScorer;
use crate::processing::text_processor::{truncate_graphemes, TextProcessor};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

const MAX_ERROR_LEN: usize = 200;

/// One interview question and the candidate's answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaItem {
    #[serde(alias = "q")]
    pub question: String,
    #[serde(alias = "a")]
    pub answer: String,
}

impl QaItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A batch element as it arrived, before its fields are coerced to text
#[derive(Debug, Clone, PartialEq)]
pub struct RawQaItem {
    pub question: Value,
    pub answer: Value,
}

impl From<Value> for RawQaItem {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let question = map
                    .remove("question")
                    .or_else(|| map.remove("q"))
                    .unwrap_or(Value::Null);
                let answer = map
                    .remove("answer")
                    .or_else(|| map.remove("a"))
                    .unwrap_or(Value::Null);
                Self { question, answer }
            }
            // Anything else is taken as a bare answer
            Value::Null => Self {
                question: Value::Null,
                answer: Value::Null,
            },
            Value::String(text) => Self {
                question: Value::Null,
                answer: Value::String(text),
            },
            other => Self {
                question: Value::Null,
                answer: Value::String(other.to_string()),
            },
        }
    }
}

impl From<&QaItem> for RawQaItem {
    fn from(item: &QaItem) -> Self {
        Self {
            question: Value::String(item.question.clone()),
            answer: Value::String(item.answer.clone()),
        }
    }
}

impl RawQaItem {
    fn question_text(&self) -> String {
        match &self.question {
            Value::String(s) => s.trim().to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// `None` when the answer is structured data rather than text
    fn answer_text(&self) -> Option<String> {
        match &self.answer {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Null => Some(String::new()),
            Value::Number(_) | Value::Bool(_) => Some(self.answer.to_string()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Graded answer, as persisted and displayed by the interview flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub question: String,
    pub answer: String,
    pub justification: String,
    pub score: f64,
}

/// Stateless evaluator; one instance can grade any number of batches,
/// from any number of threads
#[derive(Debug)]
pub struct AnswerEvaluator {
    scoring: ScoringConfig,
    detector: GibberishDetector,
    matcher: KeywordMatcher,
    similarity: SemanticScorer,
}

impl AnswerEvaluator {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let processor = TextProcessor::new(&config.text);
        let similarity = SemanticScorer::from_config(&config.similarity, &processor);

        Ok(Self {
            scoring: config.scoring.clone(),
            detector: GibberishDetector::new(config.gibberish.clone(), processor.clone()),
            matcher: KeywordMatcher::new(processor, config.scoring.top_k),
            similarity,
        })
    }

    /// Replace the similarity scorer, e.g. to run fallback-only
    pub fn with_similarity(mut self, similarity: SemanticScorer) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn similarity_strategy(&self) -> &str {
        self.similarity.strategy_name()
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Grade typed question/answer pairs. Always returns one result per item.
    pub fn grade_batch(&self, items: &[QaItem]) -> Vec<ScoreResult> {
        let raw: Vec<RawQaItem> = items.iter().map(RawQaItem::from).collect();
        self.grade_raw_batch(&raw)
    }

    pub fn grade_raw_batch(&self, items: &[RawQaItem]) -> Vec<ScoreResult> {
        self.grade_batch_with(items, |_, _| {})
    }

    /// Grade a serialized batch; unreadable input is an empty batch
    pub fn grade_json(&self, input: &str) -> Vec<ScoreResult> {
        self.grade_raw_batch(&parse_batch(input))
    }

    /// Grade a batch, reporting each result as soon as it is ready
    pub fn grade_batch_with<F>(&self, items: &[RawQaItem], mut on_result: F) -> Vec<ScoreResult>
    where
        F: FnMut(usize, &ScoreResult),
    {
        let mut results = Vec::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            let result = self.grade_isolated(item);
            debug!("Graded answer {}: score {:.2}", idx + 1, result.score);
            on_result(idx, &result);
            results.push(result);
        }

        let zero_scores = results.iter().filter(|r| r.score == 0.0).count();
        info!(
            "Graded {} answers with {} similarity ({} scored zero)",
            results.len(),
            self.similarity_strategy(),
            zero_scores
        );

        results
    }

    /// Errors and panics stay inside the item that caused them
    fn grade_isolated(&self, item: &RawQaItem) -> ScoreResult {
        let question = item.question_text();
        let answer = item.answer_text();
        let answer_display = answer.clone().unwrap_or_else(|| item.answer.to_string());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.score_answer(&question, answer.as_deref())
        }));

        let (score, justification) = match outcome {
            Ok(Ok(graded)) => graded,
            Ok(Err(e)) => {
                warn!("Evaluator error, scoring answer as zero: {}", e);
                (0.0, error_justification(&e.to_string()))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Evaluator panicked, scoring answer as zero: {}", message);
                (0.0, error_justification(&message))
            }
        };

        ScoreResult {
            question,
            answer: answer_display,
            justification,
            score,
        }
    }

    /// Score one answer, returning the score and its justification
    pub fn score_answer(&self, question: &str, answer: Option<&str>) -> Result<(f64, String)> {
        if let Some(reason) = self.detector.check(answer) {
            return Ok((0.0, format!("Gibberish/invalid answer detected: {}", reason)));
        }
        let answer = answer.unwrap_or_default();

        let kw_overlap = self.matcher.keyword_overlap(question, answer)?.score;
        let sim = self.similarity.semantic_similarity(question, answer);

        let combined = self.combine(sim, kw_overlap);
        let threshold = self.scoring.min_relevance_threshold;

        if combined < threshold {
            return Ok((
                0.0,
                format!(
                    "Low relevance (combined={:.3} < {}). Keyword overlap: {:.2}, Similarity: {:.2}.",
                    combined, threshold, kw_overlap, sim
                ),
            ));
        }

        let max_score = self.scoring.max_score;
        let score = round2((combined * max_score).clamp(0.0, max_score));

        Ok((
            score,
            format!(
                "Keyword overlap: {:.2}, Similarity: {:.2}, Combined: {:.3} => score {:.2}/{}",
                kw_overlap, sim, combined, score, max_score
            ),
        ))
    }

    fn combine(&self, similarity: f64, keyword_overlap: f64) -> f64 {
        self.scoring.similarity_weight * similarity + self.scoring.keyword_weight * keyword_overlap
    }
}

/// Two decimals, rounding the exact binary value with ties to even
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

fn error_justification(message: &str) -> String {
    format!("Evaluator error: {}", truncate_graphemes(message, MAX_ERROR_LEN))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
