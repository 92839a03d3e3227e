//! Interview report structures built from graded answers

use crate::error::{Result, ScorerError};
use crate::interview::validators::{is_valid_email, parse_and_validate_tech_stack};
use crate::processing::evaluator::ScoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sum of per-question scores, rounded half to even and clamped to `[0, max_total]`
pub fn total_score(results: &[ScoreResult], max_total: u32) -> u32 {
    let sum: f64 = results.iter().map(|r| r.score).sum();
    sum.round_ties_even().clamp(0.0, max_total as f64) as u32
}

/// Who was interviewed; every field is optional for anonymous grading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub desired_position: Option<String>,
    pub tech_stack: Vec<String>,
}

impl CandidateProfile {
    /// Build a profile, validating the email and the comma-separated tech stack
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        desired_position: Option<String>,
        tech_stack: Option<&str>,
    ) -> Result<Self> {
        if let Some(email) = &email {
            if !is_valid_email(email) {
                return Err(ScorerError::InvalidInput(format!(
                    "Invalid email address: '{}'",
                    email
                )));
            }
        }

        let tech_stack = match tech_stack {
            Some(csv) => parse_and_validate_tech_stack(csv)?,
            None => Vec::new(),
        };

        Ok(Self {
            name: non_empty(name),
            email,
            desired_position: non_empty(desired_position),
            tech_stack,
        })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Anonymous candidate")
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl ScoreBand {
    /// Band for a total out of `max_total`; thresholds are 80/70/60 percent
    pub fn for_total(total: u32, max_total: u32) -> Self {
        let percentage = if max_total == 0 {
            0.0
        } else {
            total as f64 * 100.0 / max_total as f64
        };

        if percentage >= 80.0 {
            ScoreBand::Excellent
        } else if percentage >= 70.0 {
            ScoreBand::Good
        } else if percentage >= 60.0 {
            ScoreBand::Average
        } else {
            ScoreBand::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Average => "Average",
            ScoreBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of a graded interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewReport {
    pub candidate: CandidateProfile,

    /// Integer total out of `max_total_score`
    pub total_score: u32,
    pub max_total_score: u32,
    pub band: ScoreBand,

    pub question_count: usize,
    /// Answers that scored above zero
    pub answered_count: usize,
    pub max_question_score: f64,

    pub similarity_strategy: String,

    /// Per-question results in interview order
    pub breakdown: Vec<ScoreResult>,

    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
}

impl InterviewReport {
    pub fn new(
        candidate: CandidateProfile,
        breakdown: Vec<ScoreResult>,
        max_total_score: u32,
        max_question_score: f64,
        similarity_strategy: &str,
    ) -> Self {
        let total_score = total_score(&breakdown, max_total_score);
        let answered_count = breakdown.iter().filter(|r| r.score > 0.0).count();

        Self {
            candidate,
            total_score,
            max_total_score,
            band: ScoreBand::for_total(total_score, max_total_score),
            question_count: breakdown.len(),
            answered_count,
            max_question_score,
            similarity_strategy: similarity_strategy.to_string(),
            breakdown,
            generated_at: Utc::now(),
            scorer_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// The per-question results as the JSON blob stored alongside the total
    pub fn breakdown_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.breakdown)?)
    }

    pub fn average_score(&self) -> f64 {
        if self.breakdown.is_empty() {
            return 0.0;
        }
        self.breakdown.iter().map(|r| r.score).sum::<f64>() / self.breakdown.len() as f64
    }

    pub fn percentage(&self) -> f64 {
        if self.max_total_score == 0 {
            return 0.0;
        }
        self.total_score as f64 * 100.0 / self.max_total_score as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f64) -> ScoreResult {
        ScoreResult {
            question: "Explain REST API idempotency".to_string(),
            answer: "An idempotent call can be repeated safely".to_string(),
            justification: format!("score {:.2}/10", score),
            score,
        }
    }

    #[test]
    fn test_total_rounds_half_to_even() {
        assert_eq!(total_score(&[result(5.0), result(3.0), result(7.0), result(8.4)], 100), 23);
        assert_eq!(total_score(&[result(2.5)], 100), 2);
        assert_eq!(total_score(&[result(3.5)], 100), 4);
        assert_eq!(total_score(&[], 100), 0);
    }

    #[test]
    fn test_total_is_clamped() {
        let many: Vec<ScoreResult> = (0..12).map(|_| result(10.0)).collect();
        assert_eq!(total_score(&many, 100), 100);
        assert_eq!(total_score(&many, 50), 50);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::for_total(80, 100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_total(79, 100), ScoreBand::Good);
        assert_eq!(ScoreBand::for_total(60, 100), ScoreBand::Average);
        assert_eq!(ScoreBand::for_total(59, 100), ScoreBand::NeedsImprovement);
        assert_eq!(ScoreBand::for_total(40, 50), ScoreBand::Excellent);
        assert_eq!(ScoreBand::NeedsImprovement.to_string(), "Needs Improvement");
    }

    #[test]
    fn test_report_counts_and_breakdown() {
        let report = InterviewReport::new(
            CandidateProfile::default(),
            vec![result(5.0), result(0.0), result(8.4)],
            100,
            10.0,
            "jaccard",
        );

        assert_eq!(report.total_score, 13);
        assert_eq!(report.question_count, 3);
        assert_eq!(report.answered_count, 2);
        assert_eq!(report.band, ScoreBand::NeedsImprovement);
        assert!((report.average_score() - 13.4 / 3.0).abs() < 1e-9);

        let blob: Vec<ScoreResult> = serde_json::from_str(&report.breakdown_json().unwrap()).unwrap();
        assert_eq!(blob, report.breakdown);
    }

    #[test]
    fn test_candidate_profile_validation() {
        let profile = CandidateProfile::new(
            Some("  Ada Lovelace ".to_string()),
            Some("ada@example.com".to_string()),
            Some("".to_string()),
            Some("Rust, SQL"),
        )
        .unwrap();

        assert_eq!(profile.display_name(), "Ada Lovelace");
        assert_eq!(profile.desired_position, None);
        assert_eq!(profile.tech_stack, vec!["Rust", "SQL"]);

        assert!(CandidateProfile::new(None, Some("ada@".to_string()), None, None).is_err());
        assert!(CandidateProfile::new(None, None, None, Some("Rust; SQL")).is_err());
        assert!(CandidateProfile::new(None, None, None, None).unwrap().is_anonymous());
    }
}
