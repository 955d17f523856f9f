//! Error handling for the career insight engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerInsightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, CareerInsightError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CareerInsightError {
    fn from(err: anyhow::Error) -> Self {
        CareerInsightError::Processing(err.to_string())
    }
}

/// TOML parse failures surface as configuration problems
impl From<toml::de::Error> for CareerInsightError {
    fn from(err: toml::de::Error) -> Self {
        CareerInsightError::Configuration(err.to_string())
    }
}
