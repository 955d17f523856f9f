//! Static recommendation content: titles, path templates, learning plans and skill reasons

use crate::career::taxonomy::CategoryId;
use crate::error::{CareerInsightError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const BUILTIN_CONTENT: &str = include_str!("../../data/career_content.toml");

static BUILTIN: Lazy<CareerContent> = Lazy::new(|| {
    CareerContent::from_toml(BUILTIN_CONTENT).expect("built-in career content must be valid")
});

/// Lookup table keyed by category or hybrid-role name, with a default answer
/// for names it does not list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ContentTable<T> {
    #[serde(default)]
    pub entries: HashMap<CategoryId, T>,
    pub fallback: T,
}

impl<T> ContentTable<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, key: CategoryId, value: T) {
        self.entries.insert(key, value);
    }

    /// Entry for `name`, or the fallback.
    pub fn get(&self, name: &str) -> &T {
        self.lookup(name).unwrap_or(&self.fallback)
    }

    /// Entry for `name` without falling back.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }
}

/// A recommended role before its match is rescaled for a particular user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathTemplate {
    pub title: String,
    pub description: String,
    /// Match percentage at the reference top score.
    pub base_match: u32,
    #[serde(default)]
    pub key_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningApproach {
    pub focus: String,
    pub steps: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerContent {
    pub titles: ContentTable<String>,
    pub learning: ContentTable<LearningApproach>,
    #[serde(default)]
    pub paths: HashMap<CategoryId, Vec<PathTemplate>>,
    /// Why a canonical skill is worth learning, keyed by canonical name.
    #[serde(default)]
    pub skill_reasons: HashMap<String, String>,
}

impl CareerContent {
    pub fn from_toml(source: &str) -> Result<Self> {
        let content: CareerContent = toml::from_str(source)?;
        content.validate()?;
        Ok(content)
    }

    /// Process-wide built-in content, parsed once on first use.
    pub fn builtin() -> &'static CareerContent {
        &BUILTIN
    }

    pub fn title_for(&self, name: &str) -> &str {
        self.titles.get(name)
    }

    pub fn learning_for(&self, name: &str) -> &LearningApproach {
        self.learning.get(name)
    }

    pub fn paths_for(&self, name: &str) -> &[PathTemplate] {
        self.paths.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn skill_reason(&self, canonical: &str) -> Option<&str> {
        self.skill_reasons.get(canonical).map(String::as_str)
    }

    fn validate(&self) -> Result<()> {
        for (name, templates) in &self.paths {
            if let Some(template) = templates.iter().find(|t| t.base_match > 100) {
                return Err(CareerInsightError::Configuration(format!(
                    "path '{}' for '{}' has base_match {} above 100",
                    template.title, name, template.base_match
                )));
            }
        }
        if self.learning.fallback.steps.is_empty() {
            return Err(CareerInsightError::Configuration(
                "default learning approach must list at least one step".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::taxonomy::Taxonomy;

    #[test]
    fn test_every_builtin_category_has_content() {
        let content = CareerContent::builtin();
        for category in Taxonomy::builtin().categories() {
            let name = category.name();
            assert!(content.titles.lookup(name).is_some(), "title for {name}");
            assert!(content.learning.lookup(name).is_some(), "learning for {name}");
            assert!(!content.paths_for(name).is_empty(), "paths for {name}");
        }
    }

    #[test]
    fn test_every_hybrid_role_has_title_and_path() {
        let content = CareerContent::builtin();
        for combination in Taxonomy::builtin().combinations() {
            let role = combination.result.as_str();
            assert!(content.titles.lookup(role).is_some(), "title for {role}");
            assert!(!content.paths_for(role).is_empty(), "paths for {role}");
        }
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let content = CareerContent::builtin();
        assert_eq!(content.title_for("Quantum Basket Weaving"), "Technology Professional");
        assert_eq!(
            content.learning_for("Quantum Basket Weaving"),
            &content.learning.fallback
        );
        assert!(content.paths_for("Quantum Basket Weaving").is_empty());
    }

    #[test]
    fn test_content_table_prefers_entry() {
        let mut table = ContentTable::new("default".to_string());
        table.insert(CategoryId::new("Backend").unwrap(), "api".to_string());
        assert_eq!(table.get("Backend"), "api");
        assert_eq!(table.get("Frontend"), "default");
    }

    #[test]
    fn test_base_match_above_100_rejected() {
        let source = r#"
            [titles]
            fallback = "Professional"

            [learning.fallback]
            focus = "Basics"
            steps = ["Learn"]
            timeline = "soon"

            [[paths."Backend"]]
            title = "Backend Developer"
            description = "APIs"
            base_match = 120
        "#;
        assert!(matches!(
            CareerContent::from_toml(source),
            Err(CareerInsightError::Configuration(_))
        ));
    }

    #[test]
    fn test_tables_without_entries_use_fallback() {
        let source = r#"
            [titles]
            fallback = "Professional"

            [learning.fallback]
            focus = "Basics"
            steps = ["Learn"]
            timeline = "soon"
        "#;
        let content = CareerContent::from_toml(source).unwrap();
        assert!(content.learning.entries.is_empty());
        assert_eq!(content.learning_for("Backend").focus, "Basics");
        assert_eq!(content.title_for("Backend"), "Professional");
    }
}
