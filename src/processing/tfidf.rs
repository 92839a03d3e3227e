//! TF-IDF vector space over a question/answer pair

use crate::error::{Result, ScorerError};
use crate::processing::similarity::SimilarityStrategy;
use ndarray::Array1;
use regex::Regex;
use std::collections::BTreeMap;

/// Cosine similarity of smoothed TF-IDF vectors built from exactly the two
/// documents being compared
#[derive(Debug, Clone)]
pub struct TfIdfCosine {
    term_regex: Regex,
}

impl Default for TfIdfCosine {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfCosine {
    pub fn new() -> Self {
        // Words of two or more characters
        let term_regex = Regex::new(r"\b\w\w+\b").expect("Invalid term regex");
        Self { term_regex }
    }

    fn terms(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.term_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// TF-IDF weighted, L2 normalised vectors, one per document
    pub fn vectorize(&self, documents: &[&str]) -> Result<Vec<Array1<f64>>> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.terms(d)).collect();

        let mut vocabulary: BTreeMap<&str, usize> = BTreeMap::new();
        for term in tokenized.iter().flatten() {
            vocabulary.entry(term.as_str()).or_insert(0);
        }
        if vocabulary.is_empty() {
            return Err(ScorerError::Similarity(
                "empty vocabulary; documents contain no terms".to_string(),
            ));
        }
        for (idx, slot) in vocabulary.values_mut().enumerate() {
            *slot = idx;
        }

        let dim = vocabulary.len();
        let counts: Vec<Array1<f64>> = tokenized
            .iter()
            .map(|terms| {
                let mut tf = Array1::<f64>::zeros(dim);
                for term in terms {
                    tf[vocabulary[term.as_str()]] += 1.0;
                }
                tf
            })
            .collect();

        let mut df = Array1::<f64>::zeros(dim);
        for tf in &counts {
            df += &tf.mapv(|c| if c > 0.0 { 1.0 } else { 0.0 });
        }

        let n_docs = documents.len() as f64;
        let idf = df.mapv(|d| ((1.0 + n_docs) / (1.0 + d)).ln() + 1.0);

        Ok(counts
            .into_iter()
            .map(|tf| {
                let weighted = &tf * &idf;
                let norm = weighted.dot(&weighted).sqrt();
                if norm == 0.0 {
                    weighted
                } else {
                    weighted / norm
                }
            })
            .collect())
    }
}

/// Cosine similarity between two vectors of the same dimension
pub fn cosine_similarity(a: &Array1<f64>, b: &Array1<f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ScorerError::Similarity(format!(
            "Vector dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(a.dot(b) / (norm_a * norm_b))
    }
}

impl SimilarityStrategy for TfIdfCosine {
    fn name(&self) -> &str {
        "tfidf-cosine"
    }

    fn similarity(&self, question: &str, answer: &str) -> Result<f64> {
        let vectors = self.vectorize(&[question, answer])?;
        cosine_similarity(&vectors[0], &vectors[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents() {
        let tfidf = TfIdfCosine::new();
        let similarity = tfidf
            .similarity("binary search tree", "binary search tree")
            .unwrap();

        assert!((similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents() {
        let tfidf = TfIdfCosine::new();
        let similarity = tfidf.similarity("heap allocation", "network sockets").unwrap();

        assert_eq!(similarity, 0.0);
    }

    #[test]
    fn test_shared_terms_weighted_by_idf() {
        let tfidf = TfIdfCosine::new();
        let similarity = tfidf
            .similarity(
                "Explain REST API idempotency",
                "An idempotent REST API call produces the same result no matter how many times it is repeated.",
            )
            .unwrap();

        // shared terms get idf 1, unique terms ln(3/2) + 1
        let unique = (1.5f64).ln() + 1.0;
        let q_norm = (2.0 * unique * unique + 2.0).sqrt();
        let a_norm = (15.0 * unique * unique + 2.0).sqrt();
        let expected = 2.0 / (q_norm * a_norm);

        assert!((similarity - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let tfidf = TfIdfCosine::new();

        // single characters never form terms
        let result = tfidf.similarity("a b c", "x ?");
        assert!(matches!(result, Err(ScorerError::Similarity(_))));
    }

    #[test]
    fn test_one_sided_vocabulary_scores_zero() {
        let tfidf = TfIdfCosine::new();
        assert_eq!(tfidf.similarity("pointers", "x y z").unwrap(), 0.0);
    }

    #[test]
    fn test_vectors_are_normalised() {
        let tfidf = TfIdfCosine::new();
        let vectors = tfidf.vectorize(&["rust rust borrow", "rust lifetimes"]).unwrap();

        for v in &vectors {
            assert!((v.dot(v) - 1.0).abs() < 1e-9);
        }
        assert!(cosine_similarity(&vectors[0], &Array1::zeros(1)).is_err());
    }
}
