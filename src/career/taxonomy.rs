//! Skill taxonomy: categories, skill definitions, hybrid roles and implied-skill rules

use crate::error::{CareerInsightError, Result};
use crate::processing::fuzzy::matches_normalized;
use crate::processing::text_processor::{normalize, token_forms};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

const BUILTIN_TAXONOMY: &str = include_str!("../../data/taxonomy.toml");

static BUILTIN: Lazy<Taxonomy> = Lazy::new(|| {
    Taxonomy::from_toml(BUILTIN_TAXONOMY).expect("built-in taxonomy must be valid")
});

/// Validated category identifier (trimmed, non-empty). Used as the key of
/// every per-category content table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CareerInsightError::Taxonomy(
                "category name must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryId {
    type Error = CareerInsightError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

impl Borrow<str> for CategoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How central a skill is to a category's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Core,
    Supporting,
    Adjacent,
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Importance::Core => write!(f, "core"),
            Importance::Supporting => write!(f, "supporting"),
            Importance::Adjacent => write!(f, "adjacent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub importance: Importance,
}

impl SkillDefinition {
    pub fn new(canonical: &str, aliases: &[&str], importance: Importance) -> Self {
        let mut skill = Self {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            importance,
        };
        skill.normalize_aliases();
        skill
    }

    /// True when the pre-normalized token matches the canonical name or any alias.
    pub fn matches(&self, token: &str, token_compact: &str) -> bool {
        self.aliases
            .iter()
            .any(|alias| matches_normalized(token, token_compact, alias))
    }

    /// Normalize aliases, add the canonical name, drop blanks and duplicates.
    fn normalize_aliases(&mut self) {
        let mut seen = HashSet::new();
        let canonical = normalize(&self.canonical);
        self.aliases = std::iter::once(canonical)
            .chain(self.aliases.iter().map(|a| normalize(a)))
            .filter(|a| !a.is_empty() && seen.insert(a.clone()))
            .collect();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerCategory {
    #[serde(rename = "name")]
    pub id: CategoryId,
    pub skills: Vec<SkillDefinition>,
    /// Ranking tie-breaker between equal scores; never scales the score itself.
    #[serde(default = "default_weight_multiplier")]
    pub weight_multiplier: f64,
}

fn default_weight_multiplier() -> f64 {
    1.0
}

impl CareerCategory {
    pub fn new(name: &str, skills: Vec<SkillDefinition>) -> Result<Self> {
        Ok(Self {
            id: CategoryId::new(name)?,
            skills,
            weight_multiplier: 1.0,
        })
    }

    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    pub fn tier_total(&self, importance: Importance) -> usize {
        self.skills.iter().filter(|s| s.importance == importance).count()
    }
}

/// Named hybrid role produced when two categories both rank at the top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRole {
    pub categories: [CategoryId; 2],
    pub result: CategoryId,
    /// Preference between roles declared for the same pair; the heaviest wins.
    #[serde(default = "default_weight_multiplier")]
    pub weight: f64,
}

impl CombinationRole {
    /// Unordered pair comparison.
    pub fn matches_pair(&self, a: &str, b: &str) -> bool {
        let [first, second] = &self.categories;
        (first.as_str() == a && second.as_str() == b) || (first.as_str() == b && second.as_str() == a)
    }
}

/// Presence of any trigger in the input adds every implied skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpliedRule {
    pub triggers: Vec<String>,
    pub implies: Vec<String>,
    /// Aliases of the taxonomy skills each implied term names, parallel to
    /// `implies`. Resolved by [`Taxonomy::new`].
    #[serde(skip)]
    pub equivalents: Vec<Vec<String>>,
}

impl ImpliedRule {
    pub fn new(triggers: &[&str], implies: &[&str]) -> Self {
        Self {
            triggers: triggers.iter().map(|t| normalize(t)).collect(),
            implies: implies.iter().map(|t| normalize(t)).collect(),
            equivalents: Vec::new(),
        }
    }

    /// Implied terms paired with every spelling that already counts as present.
    pub fn implied_with_equivalents(&self) -> impl Iterator<Item = (&String, &[String])> + '_ {
        self.implies.iter().enumerate().map(|(index, implied)| {
            let equivalents = self
                .equivalents
                .get(index)
                .filter(|aliases| !aliases.is_empty())
                .map(Vec::as_slice)
                .unwrap_or(std::slice::from_ref(implied));
            (implied, equivalents)
        })
    }
}

/// The implied term plus the aliases of every taxonomy skill it matches.
fn equivalent_aliases(categories: &[CareerCategory], term: &str) -> Vec<String> {
    let (token, token_compact) = token_forms(term);
    let mut aliases = vec![token.clone()];
    for skill in categories.iter().flat_map(|c| &c.skills) {
        if skill.matches(&token, &token_compact) {
            for alias in &skill.aliases {
                if !aliases.contains(alias) {
                    aliases.push(alias.clone());
                }
            }
        }
    }
    aliases
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    category: Vec<CareerCategory>,
    #[serde(default)]
    combination: Vec<CombinationRole>,
    #[serde(default)]
    implied: Vec<ImpliedRule>,
}

/// Immutable skill taxonomy shared by every analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    categories: Vec<CareerCategory>,
    combinations: Vec<CombinationRole>,
    implied: Vec<ImpliedRule>,
}

impl Taxonomy {
    pub fn new(
        mut categories: Vec<CareerCategory>,
        combinations: Vec<CombinationRole>,
        implied: Vec<ImpliedRule>,
    ) -> Result<Self> {
        let mut names = HashSet::new();
        for category in &mut categories {
            if !names.insert(category.id.clone()) {
                return Err(CareerInsightError::Taxonomy(format!(
                    "duplicate category '{}'",
                    category.id
                )));
            }
            if category.skills.is_empty() {
                return Err(CareerInsightError::Taxonomy(format!(
                    "category '{}' declares no skills",
                    category.id
                )));
            }
            if !(category.weight_multiplier.is_finite() && category.weight_multiplier > 0.0) {
                return Err(CareerInsightError::Taxonomy(format!(
                    "category '{}' has an invalid weight multiplier",
                    category.id
                )));
            }
            for skill in &mut category.skills {
                skill.normalize_aliases();
            }
        }

        for combination in &combinations {
            for member in &combination.categories {
                if !names.contains(member) {
                    return Err(CareerInsightError::Taxonomy(format!(
                        "combination '{}' references unknown category '{}'",
                        combination.result, member
                    )));
                }
            }
            if !(combination.weight.is_finite() && combination.weight > 0.0) {
                return Err(CareerInsightError::Taxonomy(format!(
                    "combination '{}' has an invalid weight",
                    combination.result
                )));
            }
            if combination.categories[0] == combination.categories[1] {
                return Err(CareerInsightError::Taxonomy(format!(
                    "combination '{}' pairs a category with itself",
                    combination.result
                )));
            }
        }

        let implied = implied
            .into_iter()
            .map(|rule| {
                let implies: Vec<String> = rule.implies.iter().map(|t| normalize(t)).collect();
                let equivalents = implies
                    .iter()
                    .map(|term| equivalent_aliases(&categories, term))
                    .collect();
                ImpliedRule {
                    triggers: rule.triggers.iter().map(|t| normalize(t)).collect(),
                    implies,
                    equivalents,
                }
            })
            .collect();

        Ok(Self {
            categories,
            combinations,
            implied,
        })
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(source)?;
        Self::new(file.category, file.combination, file.implied)
    }

    /// Process-wide built-in taxonomy, parsed once on first use.
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN
    }

    pub fn categories(&self) -> &[CareerCategory] {
        &self.categories
    }

    pub fn combinations(&self) -> &[CombinationRole] {
        &self.combinations
    }

    pub fn implied_rules(&self) -> &[ImpliedRule] {
        &self.implied
    }

    pub fn category(&self, name: &str) -> Option<&CareerCategory> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Hybrid role for an unordered pair of categories, if one is declared.
    /// Among several roles for the same pair, the highest weight wins and
    /// declaration order breaks ties.
    pub fn combination_for(&self, a: &str, b: &str) -> Option<&CombinationRole> {
        self.combinations
            .iter()
            .filter(|c| c.matches_pair(a, b))
            .reduce(|best, c| if c.weight > best.weight { c } else { best })
    }

    /// Position of a category in declaration order, used for stable ranking.
    pub fn position(&self, name: &str) -> usize {
        self.categories
            .iter()
            .position(|c| c.name() == name)
            .unwrap_or(usize::MAX)
    }
}
