//! Career insight: map skills to careers and score resumes for ATS compatibility

use anyhow::Context;
use career_insight::ats::AtsScorer;
use career_insight::career::CareerAnalyzer;
use career_insight::cli::{self, Cli, Commands, ConfigAction};
use career_insight::config::{Config, OutputFormat};
use career_insight::error::CareerInsightError;
use career_insight::input::InputManager;
use career_insight::output::formatter::{save_report_to_file, ReportGenerator};
use clap::Parser;
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    if let Some(format) = &cli.output {
        config.output.format =
            cli::parse_output_format(format).map_err(CareerInsightError::InvalidInput)?;
    }
    config.output.detailed |= cli.detailed;

    let generator = ReportGenerator::from_config(&config.output);
    let format = config.output.format;

    let report = match cli.command {
        Commands::Career { skills, file } => {
            let analyzer = CareerAnalyzer::new(config.career.clone())?;
            let analysis = match (skills, file) {
                (Some(skills), _) => analyzer.analyze_skill_text(&skills),
                (None, Some(file)) => {
                    cli::validate_file_extension(&file, &["txt", "md"])
                        .map_err(|e| CareerInsightError::InvalidInput(format!("Skills file: {}", e)))?;
                    let text = InputManager::new()
                        .extract_text(&file)
                        .await
                        .with_context(|| format!("reading skills from {}", file.display()))?;
                    analyzer.analyze_skill_text(&text)
                }
                (None, None) => {
                    return Err(CareerInsightError::InvalidInput(
                        "provide --skills or --file".to_string(),
                    )
                    .into())
                }
            };
            info!("Primary category: {}", analysis.primary_category);
            generator.career_report(&analysis, format)?
        }

        Commands::Ats { resume, job } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| CareerInsightError::InvalidInput(format!("Resume file: {}", e)))?;

            let mut input_manager = InputManager::new();
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("reading resume {}", resume.display()))?;

            let job_text = match &job {
                Some(path) => {
                    cli::validate_file_extension(path, &["txt", "md"]).map_err(|e| {
                        CareerInsightError::InvalidInput(format!("Job description file: {}", e))
                    })?;
                    Some(
                        input_manager
                            .extract_text(path)
                            .await
                            .with_context(|| format!("reading job description {}", path.display()))?,
                    )
                }
                None => None,
            };

            let scorer = AtsScorer::with_config(config.ats.clone())?;
            let result = scorer.analyze_resume(&resume_text, job_text.as_deref());
            generator.ats_report(&result, format)?
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    let rendered = match format {
                        OutputFormat::Json => serde_json::to_string_pretty(&config)?,
                        _ => toml::to_string_pretty(&config)
                            .context("serializing configuration")?,
                    };
                    println!("{}", rendered);
                }
                Some(ConfigAction::Reset) => {
                    let path = cli.config.clone().unwrap_or_else(Config::config_path);
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }
                Some(ConfigAction::Path) => {
                    println!("{}", Config::config_path().display());
                }
            }
            return Ok(());
        }
    };

    match &cli.save {
        Some(path) => {
            save_report_to_file(&report, path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", report),
    }

    Ok(())
}
