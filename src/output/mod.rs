//! Interview reports and their output formats

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator};
pub use report::{total_score, CandidateProfile, InterviewReport, ScoreBand};
