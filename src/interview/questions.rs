//! Turning generated question text into a fixed-size interview script

use crate::error::{Result, ScorerError};
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

fn list_marker_regex() -> &'static Regex {
    static MARKER_RE: OnceLock<Regex> = OnceLock::new();
    MARKER_RE.get_or_init(|| Regex::new(r"^(?:\d+[).]|[-*])\s*").expect("Invalid list marker regex"))
}

/// Parse a numbered or bulleted list ("1. q", "1) q", "- q", "* q") into entries
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| list_marker_regex().replace(line, "").into_owned())
        .filter(|entry| entry.chars().count() > 3)
        .collect()
}

/// Build exactly `total` questions from generated text, topping up with one
/// fundamentals question per technology in turn when too few were generated
pub fn prepare_questions(generated: &str, tech_list: &[String], total: usize) -> Result<Vec<String>> {
    let mut questions: Vec<String> = parse_numbered_list(generated).into_iter().take(total).collect();

    let missing = total - questions.len();
    if missing > 0 {
        if tech_list.is_empty() {
            return Err(ScorerError::InvalidInput(format!(
                "Only {} of {} questions available and no tech stack to fill the rest",
                questions.len(),
                total
            )));
        }
        debug!("Topping up {} questions from the tech stack", missing);

        questions.extend(tech_list.iter().cycle().take(missing).map(|tech| {
            format!(
                "In {}, explain a concept or solve a small problem relevant to {} fundamentals.",
                tech, tech
            )
        }));
    }

    Ok(questions)
}
