//! Configuration management for the career insight engine

use crate::error::{CareerInsightError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub career: CareerConfig,
    #[serde(default)]
    pub ats: AtsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Thresholds used by the decision engine and the recommendation builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerConfig {
    pub minimum_primary_threshold: f64,
    pub minimum_secondary_threshold: f64,
    pub combination_ratio_threshold: f64,
    pub max_career_paths: usize,
    pub max_suggestions_per_category: usize,
    /// Top score at which a path template reports its base match unchanged.
    pub match_scale_reference: f64,
    pub max_adjusted_match: u32,
    pub weights: TierWeights,
}

/// Tier weights of the category score. The three weights sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierWeights {
    pub core: f64,
    pub supporting: f64,
    pub adjacent: f64,
    pub core_cap: usize,
    pub supporting_cap: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsConfig {
    pub weights: DimensionWeights,
    pub score_floor: u8,
    pub score_ceiling: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub skills: f64,
    pub readability: f64,
    pub structure: f64,
    pub formatting: f64,
    pub job_match: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for CareerConfig {
    fn default() -> Self {
        Self {
            minimum_primary_threshold: 20.0,
            minimum_secondary_threshold: 25.0,
            combination_ratio_threshold: 0.6,
            max_career_paths: 3,
            max_suggestions_per_category: 6,
            match_scale_reference: 60.0,
            max_adjusted_match: 98,
            weights: TierWeights::default(),
        }
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            core: 60.0,
            supporting: 30.0,
            adjacent: 10.0,
            core_cap: 4,
            supporting_cap: 3,
        }
    }
}

impl Default for AtsConfig {
    fn default() -> Self {
        Self {
            weights: DimensionWeights::default(),
            score_floor: 10,
            score_ceiling: 95,
        }
    }
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            skills: 0.35,
            readability: 0.25,
            structure: 0.20,
            formatting: 0.10,
            job_match: 0.10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl CareerConfig {
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let sum = w.core + w.supporting + w.adjacent;
        if (sum - 100.0).abs() > 1e-6 {
            return Err(CareerInsightError::Configuration(format!(
                "career tier weights must sum to 100, got {sum}"
            )));
        }
        if w.core < 0.0 || w.supporting < 0.0 || w.adjacent < 0.0 {
            return Err(CareerInsightError::Configuration(
                "career tier weights must not be negative".to_string(),
            ));
        }
        if w.core_cap == 0 || w.supporting_cap == 0 {
            return Err(CareerInsightError::Configuration(
                "core_cap and supporting_cap must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.combination_ratio_threshold) {
            return Err(CareerInsightError::Configuration(format!(
                "combination_ratio_threshold must be within [0, 1], got {}",
                self.combination_ratio_threshold
            )));
        }
        if self.match_scale_reference <= 0.0 {
            return Err(CareerInsightError::Configuration(
                "match_scale_reference must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl AtsConfig {
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let sum = w.skills + w.readability + w.structure + w.formatting + w.job_match;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(CareerInsightError::Configuration(format!(
                "ATS dimension weights must sum to 1.0, got {sum}"
            )));
        }
        if self.score_floor >= self.score_ceiling || self.score_ceiling > 100 {
            return Err(CareerInsightError::Configuration(format!(
                "ATS score bounds are invalid: floor {} / ceiling {}",
                self.score_floor, self.score_ceiling
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CareerInsightError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CareerInsightError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.career.validate()?;
        self.ats.validate()
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("career-insight")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.career.weights.core_cap, 4);
        assert_eq!(config.ats.score_floor, 10);
        assert_eq!(config.ats.score_ceiling, 95);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.career.combination_ratio_threshold = 0.75;
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[career]\nminimum_primary_threshold = 30.0\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.career.minimum_primary_threshold, 30.0);
        assert_eq!(loaded.career.minimum_secondary_threshold, 25.0);
        assert_eq!(loaded.ats, AtsConfig::default());
    }

    #[test]
    fn test_tier_weights_must_sum_to_100() {
        let mut config = CareerConfig::default();
        config.weights.adjacent = 20.0;
        assert!(matches!(
            config.validate(),
            Err(CareerInsightError::Configuration(_))
        ));
    }

    #[test]
    fn test_ats_bounds_must_be_ordered() {
        let config = AtsConfig {
            score_floor: 95,
            score_ceiling: 10,
            ..AtsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[career\nbroken").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CareerInsightError::Configuration(_))
        ));
    }
}
