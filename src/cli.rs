//! CLI interface for the interview scorer

use crate::config::{OutputFormat, SimilarityStrategyKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interview-scorer")]
#[command(about = "Offline scoring of technical interview answers")]
#[command(long_about = "Grade interview answers with keyword overlap and text similarity, and prepare question scripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Grade a batch of question/answer records
    Grade {
        /// Path to the answer batch (JSON, JSONL)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save the report to a file or directory
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show answers and justifications
        #[arg(short, long)]
        detailed: bool,

        /// Similarity strategy: tfidf, jaccard
        #[arg(long)]
        similarity: Option<String>,

        /// Candidate name
        #[arg(long)]
        name: Option<String>,

        /// Candidate email
        #[arg(long)]
        email: Option<String>,

        /// Desired position
        #[arg(long)]
        position: Option<String>,

        /// Comma-separated tech stack
        #[arg(long)]
        tech_stack: Option<String>,
    },

    /// Build an interview script from a generated question list
    Questions {
        /// Text file with a numbered question list
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated tech stack used to top up missing questions
        #[arg(short, long)]
        tech_stack: String,

        /// Number of questions (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

pub fn parse_similarity(strategy: &str) -> Result<SimilarityStrategyKind, String> {
    match strategy.to_lowercase().as_str() {
        "tfidf" | "tf-idf" => Ok(SimilarityStrategyKind::TfIdf),
        "jaccard" => Ok(SimilarityStrategyKind::Jaccard),
        _ => Err(format!(
            "Invalid similarity strategy: {}. Supported: tfidf, jaccard",
            strategy
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("html").unwrap(), OutputFormat::Html);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_parse_similarity() {
        assert_eq!(parse_similarity("TF-IDF").unwrap(), SimilarityStrategyKind::TfIdf);
        assert_eq!(parse_similarity("jaccard").unwrap(), SimilarityStrategyKind::Jaccard);
        assert!(parse_similarity("bm25").is_err());
    }

    #[test]
    fn test_grade_command_parsing() {
        let cli = Cli::try_parse_from([
            "interview-scorer",
            "grade",
            "--input",
            "answers.json",
            "-o",
            "json",
            "--tech-stack",
            "Rust, SQL",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Grade { input, output, tech_stack, detailed, .. } => {
                assert_eq!(input, PathBuf::from("answers.json"));
                assert_eq!(output.as_deref(), Some("json"));
                assert_eq!(tech_stack.as_deref(), Some("Rust, SQL"));
                assert!(!detailed);
            }
            _ => panic!("expected grade command"),
        }
    }

    #[test]
    fn test_questions_requires_tech_stack() {
        assert!(Cli::try_parse_from(["interview-scorer", "questions", "-i", "qs.txt"]).is_err());

        let cli = Cli::try_parse_from(["interview-scorer", "questions", "-i", "qs.txt", "-t", "Rust", "-n", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Questions { count: Some(5), .. }));
    }
}
