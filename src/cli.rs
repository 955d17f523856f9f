//! CLI interface for the career insight engine

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "career-insight")]
#[command(about = "Skill-to-career classification and resume ATS scoring")]
#[command(
    long_about = "Map a list of skills to career categories, hybrid roles and learning plans, or score a resume for ATS compatibility against an optional job description"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json, markdown
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Show detailed analysis
    #[arg(short, long, global = true)]
    pub detailed: bool,

    /// Save output to file
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify skills into career categories and recommend paths
    Career {
        /// Comma-separated skills, e.g. "React, Node.js, SQL"
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        skills: Option<String>,

        /// File with a skill list (TXT, MD)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Score a resume for ATS compatibility
    Ats {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,
    },

    /// Show or manage configuration
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

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_career_with_skills() {
        let cli = Cli::try_parse_from(["career-insight", "career", "--skills", "React, SQL", "-o", "json"]).unwrap();
        assert_eq!(cli.output.as_deref(), Some("json"));
        match cli.command {
            Commands::Career { skills, file } => {
                assert_eq!(skills.as_deref(), Some("React, SQL"));
                assert!(file.is_none());
            }
            _ => panic!("expected career command"),
        }
    }

    #[test]
    fn test_career_requires_skills_or_file() {
        assert!(Cli::try_parse_from(["career-insight", "career"]).is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
