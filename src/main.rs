//! Interview scorer: offline grading of technical interview answers

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use interview_scorer::cli::{self, Cli, Commands, ConfigAction};
use interview_scorer::config::{Config, OutputFormat};
use interview_scorer::input::InputManager;
use interview_scorer::interview::{parse_and_validate_tech_stack, prepare_questions};
use interview_scorer::output::{
    save_report_to_file, suggest_filename, CandidateProfile, InterviewReport, ReportGenerator,
};
use interview_scorer::AnswerEvaluator;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Could not read configuration from {}", path.display())),
        None => Config::load().context("Could not load default configuration"),
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Grade {
            input,
            output,
            save,
            detailed,
            similarity,
            name,
            email,
            position,
            tech_stack,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(|e| anyhow!(e))?,
                None => config.output.format,
            };
            if let Some(strategy) = similarity {
                config.similarity.strategy = cli::parse_similarity(&strategy).map_err(|e| anyhow!(e))?;
            }

            let candidate = CandidateProfile::new(name, email, position, tech_stack.as_deref())
                .context("Invalid candidate details")?;

            // One load per run, nothing to cache
            let mut input_manager = InputManager::new().with_cache(false);
            let items = input_manager
                .load_batch(&input)
                .await
                .with_context(|| format!("Could not load answers from {}", input.display()))?;
            info!("Loaded {} answers from {}", items.len(), input.display());

            let evaluator = AnswerEvaluator::new(&config).context("Could not build the evaluator")?;

            let progress = ProgressBar::new(items.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {prefix:<8} [{bar:40.cyan/dim}] {pos}/{len}")?
                    .progress_chars("━━╸"),
            );
            progress.set_prefix("Grading");

            let results = evaluator.grade_batch_with(&items, |_, _| progress.inc(1));
            progress.finish_and_clear();

            let report = InterviewReport::new(
                candidate,
                results,
                config.interview.max_total_score,
                evaluator.scoring().max_score,
                evaluator.similarity_strategy(),
            );

            let detailed = detailed || config.output.detailed;
            let generator =
                ReportGenerator::with_options(config.output.color_output, detailed, true, true, true);
            println!("{}", generator.generate_report(&report, &output_format)?);

            if let Some(save_path) = save {
                let target = if save_path.is_dir() {
                    save_path.join(suggest_filename(&output_format, report.candidate.name.as_deref(), true))
                } else {
                    save_path
                };

                // Files never carry terminal color codes
                let file_generator = ReportGenerator::with_options(false, detailed, true, true, true);
                let content = file_generator.generate_report(&report, &output_format)?;
                save_report_to_file(&content, &target)
                    .with_context(|| format!("Could not save report to {}", target.display()))?;
                println!("💾 Report saved to {}", target.display());
            }
        }

        Commands::Questions { input, tech_stack, count } => {
            let tech_list = parse_and_validate_tech_stack(&tech_stack).context("Invalid tech stack")?;
            let total = count.unwrap_or(config.interview.question_count);

            let generated = InputManager::new()
                .read_text(&input)
                .await
                .with_context(|| format!("Could not read questions from {}", input.display()))?;

            let questions = prepare_questions(&generated, &tech_list, total)?;
            for (i, question) in questions.iter().enumerate() {
                println!("{}. {}", i + 1, question);
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("Similarity strategy: {}", config.similarity.strategy);
                    println!("\nScoring:");
                    println!("  Similarity weight: {:.1}%", config.scoring.similarity_weight * 100.0);
                    println!("  Keyword weight: {:.1}%", config.scoring.keyword_weight * 100.0);
                    println!("  Relevance threshold: {}", config.scoring.min_relevance_threshold);
                    println!("  Keywords per question: {}", config.scoring.top_k);
                    println!("  Max score per question: {}", config.scoring.max_score);
                    println!("\nGibberish detection:");
                    println!("  Max repeated run: {}", config.gibberish.max_repeat_run);
                    println!(
                        "  Min alphabetic ratio: {} (answers of {}+ chars)",
                        config.gibberish.min_alpha_ratio, config.gibberish.alpha_check_min_len
                    );
                    println!("\nInterview:");
                    println!("  Questions: {}", config.interview.question_count);
                    println!("  Max total score: {}", config.interview.max_total_score);
                    println!("\nOutput format: {}", format_name(&config.output.format));
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("Could not write {}", path.display()))?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn format_name(format: &OutputFormat) -> &'static str {
    match format {
        OutputFormat::Console => "console",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "markdown",
        OutputFormat::Html => "html",
    }
}
