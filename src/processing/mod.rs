//! Text processing and answer evaluation module

pub mod text_processor;
pub mod keyword_matcher;
pub mod similarity;
#[cfg(feature = "tfidf")]
pub mod tfidf;
pub mod gibberish;
pub mod evaluator;
