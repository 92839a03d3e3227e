//! Output formatters for interview reports

use crate::config::OutputFormat;
use crate::error::{Result, ScorerError};
use crate::output::report::{InterviewReport, ScoreBand};
use crate::processing::text_processor::truncate_text;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const QUESTION_PREVIEW_LEN: usize = 70;
const ANSWER_PREVIEW_LEN: usize = 120;

/// Trait for formatting interview reports
pub trait OutputFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
    detailed: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Interview Report - {{ candidate_name }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #10b981; }
        .score-good { background: #3b82f6; }
        .score-average { background: #f59e0b; color: #000; }
        .score-poor { background: #ef4444; }
        .question {
            background: #f8f9fa;
            padding: 15px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        .question.zero { border-left-color: #ef4444; }
        .justification { color: #6c757d; font-size: 0.9em; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Interview Report</h1>
            <p>{{ candidate_name }}{% if !position.is_empty() %} | {{ position }}{% endif %}</p>
            <p>Generated: {{ generated_at }}</p>
        </div>

        <div class="section">
            <h2>Total Score: {{ total_score }} / {{ max_total_score }} ({{ percentage }}%) <span class="score-badge {{ score_class }}">{{ band }}</span></h2>
            <p>{{ answered_count }} of {{ question_count }} answers scored above zero. Average {{ average_score }} / {{ max_question_score }} per question.</p>
            {% if !tech_stack.is_empty() %}<p><strong>Tech stack:</strong> {{ tech_stack }}</p>{% endif %}
        </div>

        <div class="section">
            <h2>Breakdown</h2>
            {% for row in rows %}
            <div class="question{% if row.zero %} zero{% endif %}">
                <h4>{{ row.index }}. {{ row.question }} <span>({{ row.score }} / {{ max_question_score }})</span></h4>
                {% if detailed %}<p>{{ row.answer }}</p>{% endif %}
                <p class="justification">{{ row.justification }}</p>
            </div>
            {% endfor %}
        </div>

        <div class="metadata">
            <p><strong>Generated by Interview Scorer v{{ version }}</strong> | Similarity: {{ similarity_strategy }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    detailed: bool,
    candidate_name: String,
    position: String,
    tech_stack: String,
    generated_at: String,
    total_score: u32,
    max_total_score: u32,
    percentage: String,
    score_class: String,
    band: String,
    answered_count: usize,
    question_count: usize,
    average_score: String,
    max_question_score: String,
    rows: Vec<HtmlRow>,
    version: String,
    similarity_strategy: String,
}

struct HtmlRow {
    index: usize,
    question: String,
    answer: String,
    justification: String,
    score: String,
    zero: bool,
}

fn format_timestamp(report: &InterviewReport) -> String {
    report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_band(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::Blue,
            ScoreBand::Average => Color::Yellow,
            ScoreBand::NeedsImprovement => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().to_uppercase().color(color).bold())
        } else {
            format!("[{}]", band.label().to_uppercase())
        }
    }

    fn score_color(score: f64, max_score: f64) -> Color {
        if score == 0.0 {
            Color::Red
        } else if score >= max_score * 0.7 {
            Color::Green
        } else {
            Color::Yellow
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("INTERVIEW REPORT", 1));
        output.push_str(&format!("Candidate: {}\n", report.candidate.display_name()));
        if let Some(position) = &report.candidate.desired_position {
            output.push_str(&format!("Position: {}\n", position));
        }
        if !report.candidate.tech_stack.is_empty() {
            output.push_str(&format!("Tech stack: {}\n", report.candidate.tech_stack.join(", ")));
        }
        output.push_str(&format!("Generated: {}\n", format_timestamp(report)));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Total Score: {}/{} {}\n",
            report.total_score,
            report.max_total_score,
            self.format_band(report.band)
        ));
        output.push_str(&format!("Percentage: {:.1}%\n", report.percentage()));
        output.push_str(&format!(
            "Answers scored above zero: {}/{}\n",
            report.answered_count, report.question_count
        ));
        output.push_str(&format!(
            "Average per question: {:.2}/{}\n",
            report.average_score(),
            report.max_question_score
        ));

        output.push_str(&self.format_header("Breakdown", 2));
        if report.breakdown.is_empty() {
            output.push_str(&self.colorize("No answers were graded.\n", Color::BrightBlack));
        }
        for (i, result) in report.breakdown.iter().enumerate() {
            let score = format!("{:>5.2}/{}", result.score, report.max_question_score);
            output.push_str(&format!(
                "{:>2}. {} {}\n",
                i + 1,
                self.colorize(&score, Self::score_color(result.score, report.max_question_score)),
                truncate_text(&result.question, QUESTION_PREVIEW_LEN)
            ));

            if self.detailed {
                output.push_str(&format!(
                    "    Answer: {}\n",
                    self.colorize(&truncate_text(&result.answer, ANSWER_PREVIEW_LEN), Color::Cyan)
                ));
                output.push_str(&format!(
                    "    {}\n",
                    self.colorize(&result.justification, Color::BrightBlack)
                ));
            }
        }

        output.push_str(&format!(
            "\n{} Generated by Interview Scorer v{} | Similarity: {}\n",
            self.colorize("i", Color::Blue),
            report.scorer_version,
            report.similarity_strategy
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, detailed: bool) -> Self {
        Self { include_styles, detailed }
    }

    fn create_template_data(&self, report: &InterviewReport) -> HtmlTemplate {
        let score_class = match report.band {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Average => "score-average",
            ScoreBand::NeedsImprovement => "score-poor",
        };

        let rows = report
            .breakdown
            .iter()
            .enumerate()
            .map(|(i, result)| HtmlRow {
                index: i + 1,
                question: result.question.clone(),
                answer: result.answer.clone(),
                justification: result.justification.clone(),
                score: format!("{:.2}", result.score),
                zero: result.score == 0.0,
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            detailed: self.detailed,
            candidate_name: report.candidate.display_name().to_string(),
            position: report.candidate.desired_position.clone().unwrap_or_default(),
            tech_stack: report.candidate.tech_stack.join(", "),
            generated_at: format_timestamp(report),
            total_score: report.total_score,
            max_total_score: report.max_total_score,
            percentage: format!("{:.1}", report.percentage()),
            score_class: score_class.to_string(),
            band: report.band.label().to_string(),
            answered_count: report.answered_count,
            question_count: report.question_count,
            average_score: format!("{:.2}", report.average_score()),
            max_question_score: report.max_question_score.to_string(),
            rows,
            version: report.scorer_version.clone(),
            similarity_strategy: report.similarity_strategy.clone(),
        }
    }

    fn render(&self, report: &InterviewReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ScorerError::OutputFormatting(e.to_string()))
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        self.render(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn markdown_band(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::Good => "🔵 Good",
            ScoreBand::Average => "🟡 Average",
            ScoreBand::NeedsImprovement => "🔴 Needs Improvement",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Interview Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Candidate:** {} | **Generated:** {}\n\n",
                report.candidate.display_name(),
                format_timestamp(report)
            ));
            if let Some(position) = &report.candidate.desired_position {
                output.push_str(&format!("**Position:** {}\n\n", position));
            }
            if !report.candidate.tech_stack.is_empty() {
                output.push_str(&format!(
                    "**Tech stack:** `{}`\n\n",
                    report.candidate.tech_stack.join("`, `")
                ));
            }
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Total Score:** {}/{} ({:.1}%) {}\n\n",
            report.total_score,
            report.max_total_score,
            report.percentage(),
            Self::markdown_band(report.band)
        ));
        output.push_str(&format!(
            "{} of {} answers scored above zero, averaging {:.2}/{} per question.\n\n",
            report.answered_count,
            report.question_count,
            report.average_score(),
            report.max_question_score
        ));

        output.push_str("## Breakdown\n\n");
        output.push_str("| # | Question | Score | Justification |\n");
        output.push_str("|---|----------|-------|---------------|\n");
        for (i, result) in report.breakdown.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.2} | {} |\n",
                i + 1,
                Self::escape_cell(&result.question),
                result.score,
                Self::escape_cell(&result.justification)
            ));
        }
        output.push('\n');

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Interview Scorer v{} using {} similarity*\n",
                report.scorer_version, report.similarity_strategy
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true, false),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles, detailed),
        }
    }

    fn formatters(&self) -> [&dyn OutputFormatter; 4] {
        [
            &self.console_formatter,
            &self.json_formatter,
            &self.markdown_formatter,
            &self.html_formatter,
        ]
    }

    pub fn generate_report(&self, report: &InterviewReport, format: &OutputFormat) -> Result<String> {
        let formatter = self
            .formatters()
            .into_iter()
            .find(|f| f.supports_format() == *format)
            .ok_or_else(|| ScorerError::OutputFormatting(format!("No formatter for {:?}", format)))?;
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// File name for a saved report, e.g. `ada_lovelace_interview_20240101_120000.json`
pub fn suggest_filename(format: &OutputFormat, candidate_name: Option<&str>, timestamp: bool) -> String {
    let base_name = candidate_name
        .map(|name| {
            name.trim()
                .to_lowercase()
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '_' })
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "candidate".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_interview{}.{}", base_name, timestamp_suffix, extension)
}
