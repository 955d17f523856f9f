//! Output formatters for career analyses and ATS results

use crate::ats::AtsAnalysisResult;
use crate::career::{CareerAnalysis, Priority};
use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use colored::{Color, Colorize};
use std::path::Path;

/// Renders analysis results in one output format.
pub trait OutputFormatter {
    fn format_career(&self, analysis: &CareerAnalysis) -> Result<String>;
    fn format_ats(&self, result: &AtsAnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON for scripting and API use
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    detailed: bool,
}

/// Dispatches to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
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
            _ => "▒",
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

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            85..=100 => ("EXCELLENT", Color::Green),
            75..=84 => ("GOOD", Color::BrightGreen),
            60..=74 => ("FAIR", Color::Yellow),
            40..=59 => ("NEEDS WORK", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority(&self, priority: Priority) -> String {
        let (label, color) = match priority {
            Priority::High => ("[high]", Color::Red),
            Priority::Medium => ("[medium]", Color::Yellow),
            Priority::Low => ("[low]", Color::Green),
        };
        self.colorize(label, color)
    }

    fn format_bar(&self, value: f64) -> String {
        let filled = (value.clamp(0.0, 100.0) / 5.0).round() as usize;
        format!("{}{}", "■".repeat(filled), "·".repeat(20 - filled))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_career(&self, analysis: &CareerAnalysis) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CAREER ANALYSIS", 1));
        output.push_str(&format!(
            "Primary: {} ({})\n",
            self.colorize(&analysis.primary_category, Color::Cyan),
            analysis.primary_title
        ));
        output.push_str(&format!("Confidence: {}\n", analysis.confidence()));
        output.push_str(&format!("{}\n", analysis.summary));

        if !analysis.skill_breakdown.is_empty() {
            output.push_str(&self.format_header("Skill Breakdown", 2));
            for score in &analysis.skill_breakdown {
                output.push_str(&format!(
                    "  {:<32} {} {:>5.1}\n",
                    score.category.as_str(),
                    self.format_bar(score.normalized_score),
                    score.normalized_score
                ));
                if self.detailed {
                    output.push_str(&format!(
                        "    core {}/{} · supporting {}/{} · adjacent {}/{}\n",
                        score.core_matched,
                        score.core_total,
                        score.supporting_matched,
                        score.supporting_total,
                        score.adjacent_matched,
                        score.adjacent_total
                    ));
                    output.push_str(&format!(
                        "    matched: {}\n",
                        self.colorize(&score.matched_skills.join(", "), Color::BrightBlack)
                    ));
                }
            }
        }

        if !analysis.career_paths.is_empty() {
            output.push_str(&self.format_header("Recommended Career Paths", 2));
            for (i, path) in analysis.career_paths.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} {}\n",
                    i + 1,
                    self.colorize(&path.title, Color::White),
                    self.colorize(&format!("({}% match)", path.adjusted_match), Color::Cyan)
                ));
                output.push_str(&format!("   {}\n", path.description));
                if !path.key_skills.is_empty() {
                    output.push_str(&format!("   Key skills: {}\n", path.key_skills.join(", ")));
                }
            }
        }

        if !analysis.skills_to_enhance.is_empty() {
            output.push_str(&self.format_header("Skills to Enhance", 2));
            for suggestion in &analysis.skills_to_enhance {
                output.push_str(&format!(
                    "  {} {} {}\n",
                    self.format_priority(suggestion.priority),
                    suggestion.skill,
                    self.colorize(&format!("({})", suggestion.category), Color::BrightBlack)
                ));
                if self.detailed {
                    output.push_str(&format!("      {}\n", suggestion.reason));
                }
            }
        }

        let learning = &analysis.learning_approach;
        output.push_str(&self.format_header("Learning Approach", 2));
        output.push_str(&format!("Focus: {}\n", learning.focus));
        for (i, step) in learning.steps.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, step));
        }
        if !learning.resources.is_empty() {
            output.push_str(&format!("Resources: {}\n", learning.resources.join(", ")));
        }
        output.push_str(&format!("Timeline: {}\n", learning.timeline));

        if self.detailed {
            output.push_str(&self.format_header("Decision", 3));
            output.push_str(&format!("{}\n", analysis.reason()));
            output.push_str(&format!("Expanded skills: {}\n", analysis.expanded_skills.join(", ")));
        }

        Ok(output)
    }

    fn format_ats(&self, result: &AtsAnalysisResult) -> Result<String> {
        let mut output = String::new();
        let details = &result.details;

        output.push_str(&self.format_header("ATS COMPATIBILITY", 1));
        output.push_str(&format!(
            "Score: {}/100 {}\n",
            result.score,
            self.format_score_badge(result.score)
        ));

        output.push_str(&self.format_header("Breakdown", 2));
        let b = &result.breakdown;
        for (label, value) in [
            ("Keywords", b.keywords),
            ("Readability", b.readability),
            ("Structure", b.structure),
            ("Formatting", b.formatting),
            ("Job match", b.job_match),
        ] {
            output.push_str(&format!(
                "  {:<12} {} {:>3}\n",
                label,
                self.format_bar(value as f64),
                value
            ));
        }

        if !result.penalties.is_empty() {
            output.push_str(&self.format_header("Penalties", 2));
            for penalty in &result.penalties {
                output.push_str(&format!(
                    "  {} {}\n",
                    self.colorize(&format!("-{}", penalty.points), Color::Red),
                    penalty.reason
                ));
            }
        }

        if let Some(job) = &details.job_match {
            output.push_str(&self.format_header("Job Description Match", 2));
            output.push_str(&format!("  {:.0}% of posting terms found\n", job.percentage));
            if !job.matched.is_empty() {
                output.push_str(&format!(
                    "  Matched: {}\n",
                    self.colorize(&job.matched.join(", "), Color::Green)
                ));
            }
            if !job.missing.is_empty() {
                output.push_str(&format!(
                    "  Missing: {}\n",
                    self.colorize(&job.missing.join(", "), Color::Yellow)
                ));
            }
        }

        if !result.recommendations.is_empty() {
            output.push_str(&self.format_header("Recommendations", 2));
            for (i, rec) in result.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, self.colorize(&rec.title, Color::White)));
                output.push_str(&format!("   {}\n", rec.action));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            let flag = |present: bool| if present { "yes" } else { "no" };
            output.push_str(&format!(
                "Sections: summary {} · experience {} · education {} · skills {} · projects {} · certifications {}\n",
                flag(details.has_summary),
                flag(details.has_experience),
                flag(details.has_education),
                flag(details.has_skills),
                flag(details.has_projects),
                flag(details.has_certifications)
            ));
            output.push_str(&format!("Contact info: {}\n", flag(details.has_contact_info)));
            output.push_str(&format!(
                "Words: {} · action verbs: {} · achievements: {}\n",
                details.word_count, details.action_verb_count, details.achievement_count
            ));
            output.push_str(&format!("Keywords: {}\n", details.keyword_matches.join(", ")));
            for issue in &details.formatting_issues {
                output.push_str(&format!("Formatting: {}\n", issue));
            }
        }

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

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_career(&self, analysis: &CareerAnalysis) -> Result<String> {
        self.to_json(analysis)
    }

    fn format_ats(&self, result: &AtsAnalysisResult) -> Result<String> {
        self.to_json(result)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            85..=100 => "🟢 Excellent",
            75..=84 => "🟢 Good",
            60..=74 => "🟡 Fair",
            40..=59 => "🟠 Needs work",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_career(&self, analysis: &CareerAnalysis) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Career Analysis\n\n");
        md.push_str(&format!(
            "**Primary:** {} ({})  \n**Confidence:** {}\n\n",
            analysis.primary_category,
            analysis.primary_title,
            analysis.confidence()
        ));
        md.push_str(&format!("{}\n\n", analysis.summary));

        if !analysis.skill_breakdown.is_empty() {
            md.push_str("## Skill Breakdown\n\n");
            md.push_str("| Category | Score | Matched skills |\n|---|---:|---|\n");
            for score in &analysis.skill_breakdown {
                md.push_str(&format!(
                    "| {} | {:.1} | {} |\n",
                    score.category,
                    score.normalized_score,
                    score.matched_skills.join(", ")
                ));
            }
            md.push('\n');
        }

        if !analysis.career_paths.is_empty() {
            md.push_str("## Recommended Career Paths\n\n");
            for path in &analysis.career_paths {
                md.push_str(&format!(
                    "### {} ({}% match)\n\n{}\n\n",
                    path.title, path.adjusted_match, path.description
                ));
                if !path.key_skills.is_empty() {
                    md.push_str(&format!("Key skills: {}\n\n", path.key_skills.join(", ")));
                }
            }
        }

        if !analysis.skills_to_enhance.is_empty() {
            md.push_str("## Skills to Enhance\n\n");
            for suggestion in &analysis.skills_to_enhance {
                md.push_str(&format!(
                    "- **{}** ({}, {} priority): {}\n",
                    suggestion.skill, suggestion.category, suggestion.priority, suggestion.reason
                ));
            }
            md.push('\n');
        }

        let learning = &analysis.learning_approach;
        md.push_str("## Learning Approach\n\n");
        md.push_str(&format!("**Focus:** {}\n\n", learning.focus));
        for (i, step) in learning.steps.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, step));
        }
        md.push('\n');
        if !learning.resources.is_empty() {
            md.push_str(&format!("**Resources:** {}\n\n", learning.resources.join(", ")));
        }
        md.push_str(&format!("**Timeline:** {}\n", learning.timeline));

        if self.detailed {
            md.push_str(&format!("\n---\n\n_Decision: {}_\n", analysis.reason()));
        }

        Ok(md)
    }

    fn format_ats(&self, result: &AtsAnalysisResult) -> Result<String> {
        let mut md = String::new();
        let b = &result.breakdown;

        md.push_str("# ATS Compatibility Report\n\n");
        md.push_str(&format!(
            "**Score:** {}/100 ({})\n\n",
            result.score,
            Self::markdown_score_badge(result.score)
        ));

        md.push_str("## Breakdown\n\n| Dimension | Score |\n|---|---:|\n");
        md.push_str(&format!("| Keywords | {} |\n", b.keywords));
        md.push_str(&format!("| Readability | {} |\n", b.readability));
        md.push_str(&format!("| Structure | {} |\n", b.structure));
        md.push_str(&format!("| Formatting | {} |\n", b.formatting));
        md.push_str(&format!("| Job match | {} |\n\n", b.job_match));

        if !result.penalties.is_empty() {
            md.push_str("## Penalties\n\n");
            for penalty in &result.penalties {
                md.push_str(&format!("- {} (-{})\n", penalty.reason, penalty.points));
            }
            md.push('\n');
        }

        if let Some(job) = &result.details.job_match {
            md.push_str("## Job Description Match\n\n");
            md.push_str(&format!("{:.0}% of posting terms found.\n\n", job.percentage));
            if !job.missing.is_empty() {
                md.push_str(&format!("Missing: {}\n\n", job.missing.join(", ")));
            }
        }

        if !result.recommendations.is_empty() {
            md.push_str("## Recommendations\n\n");
            for rec in &result.recommendations {
                md.push_str(&format!("- **{}**: {}\n", rec.title, rec.action));
            }
            md.push('\n');
        }

        if self.detailed {
            let details = &result.details;
            md.push_str("## Details\n\n");
            md.push_str(&format!("- Word count: {}\n", details.word_count));
            md.push_str(&format!("- Action verbs: {}\n", details.action_verb_count));
            md.push_str(&format!(
                "- Achievements: {}\n",
                details.achievement_matches.join("; ")
            ));
            md.push_str(&format!("- Keywords: {}\n", details.keyword_matches.join(", ")));
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed)
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn career_report(&self, analysis: &CareerAnalysis, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_career(analysis)
    }

    pub fn ats_report(&self, result: &AtsAnalysisResult, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_ats(result)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::AtsScorer;
    use crate::career::CareerAnalyzer;
    use crate::config::CareerConfig;

    fn career() -> CareerAnalysis {
        CareerAnalyzer::new(CareerConfig::default())
            .unwrap()
            .analyze_skills(&["JavaScript", "React", "HTML", "CSS"])
    }

    #[test]
    fn test_console_without_colors_has_no_escape_codes() {
        let output = ConsoleFormatter::new(false, true).format_career(&career()).unwrap();
        assert!(output.contains("Frontend Development"));
        assert!(output.contains("Recommended Career Paths"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_career_is_structured() {
        let analysis = career();
        let json = JsonFormatter::new(false).format_career(&analysis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["primary_category"], "Frontend Development");
        assert_eq!(value["decision"]["confidence"], "high");
        assert_eq!(
            value["career_paths"].as_array().map(Vec::len),
            Some(analysis.career_paths.len())
        );
    }

    #[test]
    fn test_markdown_ats_report() {
        let result = AtsScorer::default().analyze_resume("Jane Doe", None);
        let md = MarkdownFormatter::new(false).format_ats(&result).unwrap();
        assert!(md.starts_with("# ATS Compatibility Report"));
        assert!(md.contains("## Penalties"));
        assert!(md.contains("Missing Skills section (-15)"));
    }

    #[test]
    fn test_generator_dispatches_by_format() {
        let generator = ReportGenerator::with_options(false, false);
        let json = generator.career_report(&career(), OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));
        let md = generator.career_report(&career(), OutputFormat::Markdown).unwrap();
        assert!(md.starts_with("# Career Analysis"));
    }
}
