//! Career insight library: skill-to-career classification and resume ATS scoring

pub mod ats;
pub mod career;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use ats::{AtsAnalysisResult, AtsScorer};
pub use career::{CareerAnalysis, CareerAnalyzer, Taxonomy};
pub use config::Config;
pub use error::{CareerInsightError, Result};
