//! Candidate detail validation

use crate::error::{Result, ScorerError};
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
    })
}

fn tech_regex() -> &'static Regex {
    static TECH_RE: OnceLock<Regex> = OnceLock::new();
    TECH_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9#+.\- ]{1,30}$").expect("Invalid tech regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Split a comma-separated tech stack, rejecting names with unexpected characters
pub fn parse_and_validate_tech_stack(csv_text: &str) -> Result<Vec<String>> {
    if csv_text.trim().chars().count() <= 1 {
        return Err(ScorerError::InvalidInput("Tech stack cannot be empty.".to_string()));
    }

    let items: Vec<String> = csv_text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(ScorerError::InvalidInput(
            "Please provide at least one technology (comma-separated).".to_string(),
        ));
    }

    if let Some(bad) = items.iter().find(|t| !tech_regex().is_match(t)) {
        return Err(ScorerError::InvalidInput(format!(
            "Invalid tech name: '{}'. Use letters, digits, +, #, ., - and spaces.",
            bad
        )));
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("jane.doe+jobs@example.co.uk"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("not an email"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_tech_stack_parsing() {
        let stack = parse_and_validate_tech_stack(" Rust, C++ , node.js,,C#, Spring Boot ").unwrap();
        assert_eq!(stack, vec!["Rust", "C++", "node.js", "C#", "Spring Boot"]);
    }

    #[test]
    fn test_tech_stack_errors() {
        let err = parse_and_validate_tech_stack(" ").unwrap_err();
        assert!(err.to_string().contains("Tech stack cannot be empty."));

        let err = parse_and_validate_tech_stack(",,,").unwrap_err();
        assert!(err.to_string().contains("at least one technology"));

        let err = parse_and_validate_tech_stack("Rust, Go; drop table").unwrap_err();
        assert!(err.to_string().contains("Invalid tech name: 'Go; drop table'"));

        let long_name = "x".repeat(31);
        assert!(parse_and_validate_tech_stack(&long_name).is_err());
    }
}
