//! Career paths, skills to enhance and learning plan for a decided analysis

use crate::career::content::{CareerContent, LearningApproach, PathTemplate};
use crate::career::decision::{Decision, DecisionKind};
use crate::career::scorer::CategoryScore;
use crate::career::taxonomy::{Importance, Taxonomy};
use crate::config::CareerConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of top-ranked categories that feed path fill and skill suggestions.
const TOP_CATEGORIES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    pub description: String,
    /// Base match rescaled by the user's top score, never above the configured cap.
    pub adjusted_match: u32,
    pub key_skills: Vec<String>,
    /// Category or hybrid role the template belongs to.
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl From<Importance> for Priority {
    fn from(importance: Importance) -> Self {
        match importance {
            Importance::Core => Priority::High,
            Importance::Supporting => Priority::Medium,
            Importance::Adjacent => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSuggestion {
    pub skill: String,
    pub category: String,
    pub importance: Importance,
    pub priority: Priority,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct RecommendationBuilder<'a> {
    taxonomy: &'a Taxonomy,
    content: &'a CareerContent,
    max_career_paths: usize,
    max_suggestions_per_category: usize,
    match_scale_reference: f64,
    max_adjusted_match: u32,
}

impl<'a> RecommendationBuilder<'a> {
    pub fn new(taxonomy: &'a Taxonomy, content: &'a CareerContent, config: &CareerConfig) -> Self {
        Self {
            taxonomy,
            content,
            max_career_paths: config.max_career_paths,
            max_suggestions_per_category: config.max_suggestions_per_category,
            match_scale_reference: config.match_scale_reference,
            max_adjusted_match: config.max_adjusted_match,
        }
    }

    /// Up to `max_career_paths` paths: the primary's templates first, then the
    /// top-ranked categories' templates. Titles are never repeated.
    pub fn career_paths(&self, decision: &Decision, ranked: &[CategoryScore]) -> Vec<CareerPath> {
        if matches!(decision.kind, DecisionKind::NoMatch) {
            return Vec::new();
        }

        let top_score = ranked.first().map(|s| s.normalized_score).unwrap_or(0.0);
        let sources = std::iter::once(decision.primary.as_str())
            .chain(ranked.iter().take(TOP_CATEGORIES).map(|s| s.category.as_str()));

        let mut paths: Vec<CareerPath> = Vec::new();
        for source in sources {
            for template in self.content.paths_for(source) {
                if paths.len() >= self.max_career_paths {
                    return paths;
                }
                if paths.iter().any(|p| p.title == template.title) {
                    continue;
                }
                paths.push(self.annotate(template, source, top_score));
            }
        }
        paths
    }

    /// `min(cap, round(base_match * top_score / reference))`
    pub fn adjusted_match(&self, base_match: u32, top_score: f64) -> u32 {
        let scaled = (base_match as f64 * top_score / self.match_scale_reference).round();
        (scaled.max(0.0) as u32).min(self.max_adjusted_match)
    }

    fn annotate(&self, template: &PathTemplate, category: &str, top_score: f64) -> CareerPath {
        CareerPath {
            title: template.title.clone(),
            description: template.description.clone(),
            adjusted_match: self.adjusted_match(template.base_match, top_score),
            key_skills: template.key_skills.clone(),
            category: category.to_string(),
        }
    }

    /// Unmatched skills of the top-ranked categories, highest priority first.
    pub fn skills_to_enhance(&self, ranked: &[CategoryScore]) -> Vec<SkillSuggestion> {
        let mut suggestions = Vec::new();

        for score in ranked.iter().take(TOP_CATEGORIES) {
            let Some(category) = self.taxonomy.category(score.category.as_str()) else {
                continue;
            };

            let mut missing: Vec<SkillSuggestion> = category
                .skills
                .iter()
                .filter(|skill| !score.is_matched(&skill.canonical))
                .map(|skill| SkillSuggestion {
                    skill: skill.canonical.clone(),
                    category: category.name().to_string(),
                    importance: skill.importance,
                    priority: Priority::from(skill.importance),
                    reason: self.reason_for(&skill.canonical, skill.importance, category.name()),
                })
                .collect();

            // stable: declaration order within a tier
            missing.sort_by_key(|s| s.priority);
            missing.truncate(self.max_suggestions_per_category);
            suggestions.extend(missing);
        }

        suggestions
    }

    fn reason_for(&self, canonical: &str, importance: Importance, category: &str) -> String {
        if let Some(reason) = self.content.skill_reason(canonical) {
            return reason.to_string();
        }
        match importance {
            Importance::Core => format!("Core skill for {category} roles"),
            Importance::Supporting => format!("Strengthens your profile for {category} roles"),
            Importance::Adjacent => format!("Useful complement for {category} work"),
        }
    }

    pub fn learning_approach(&self, decision: &Decision) -> LearningApproach {
        self.content.learning_for(&decision.primary).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::decision::{rank_scores, DecisionEngine};
    use crate::career::implied::expand_implied_skills;
    use crate::career::scorer::CategoryScorer;

    fn analyse(skills: &[&str]) -> (Decision, Vec<CategoryScore>) {
        let taxonomy = Taxonomy::builtin();
        let expanded = expand_implied_skills(skills, taxonomy.implied_rules());
        let scores = CategoryScorer::default().score_all(taxonomy, &expanded);
        let ranked = rank_scores(scores, taxonomy);
        let decision = DecisionEngine::default().decide(&ranked, taxonomy);
        (decision, ranked)
    }

    fn builder() -> RecommendationBuilder<'static> {
        RecommendationBuilder::new(
            Taxonomy::builtin(),
            CareerContent::builtin(),
            &CareerConfig::default(),
        )
    }

    #[test]
    fn test_adjusted_match_rescales_and_caps() {
        let builder = builder();
        assert_eq!(builder.adjusted_match(90, 60.0), 90);
        assert_eq!(builder.adjusted_match(90, 30.0), 45);
        assert_eq!(builder.adjusted_match(90, 100.0), 98);
        assert_eq!(builder.adjusted_match(85, 0.0), 0);
    }

    #[test]
    fn test_paths_start_with_primary_and_are_capped() {
        let (decision, ranked) = analyse(&["JavaScript", "React", "HTML", "CSS"]);
        let paths = builder().career_paths(&decision, &ranked);
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].category, "Frontend Development");
        assert_eq!(paths[0].title, "Frontend Developer");
        assert!(paths.iter().all(|p| p.adjusted_match <= 98));
    }

    #[test]
    fn test_hybrid_paths_fill_from_top_categories() {
        let (decision, ranked) = analyse(&["MongoDB", "Express", "React", "Node"]);
        assert!(decision.is_combination());
        let paths = builder().career_paths(&decision, &ranked);
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].category, "Full-Stack Development");
        let mut titles: Vec<&str> = paths.iter().map(|p| p.title.as_str()).collect();
        titles.dedup();
        assert_eq!(titles.len(), 3);
    }

    #[test]
    fn test_no_match_has_no_paths_or_suggestions() {
        let (decision, ranked) = analyse(&["Basket Weaving"]);
        let builder = builder();
        assert!(builder.career_paths(&decision, &ranked).is_empty());
        assert!(builder.skills_to_enhance(&ranked).is_empty());
        assert_eq!(
            builder.learning_approach(&decision),
            CareerContent::builtin().learning.fallback
        );
    }

    #[test]
    fn test_suggestions_are_unmatched_prioritized_and_capped() {
        let (_, ranked) = analyse(&["JavaScript", "React", "HTML", "CSS"]);
        let suggestions = builder().skills_to_enhance(&ranked);

        let frontend: Vec<&SkillSuggestion> = suggestions
            .iter()
            .filter(|s| s.category == "Frontend Development")
            .collect();
        assert!(!frontend.is_empty());
        assert!(frontend.len() <= 6);
        assert!(frontend.iter().all(|s| !ranked[0].is_matched(&s.skill)));
        assert!(frontend.windows(2).all(|w| w[0].priority <= w[1].priority));
        assert!(!frontend.iter().any(|s| s.skill == "React"));
        assert!(frontend.iter().all(|s| !s.reason.is_empty()));
    }

    #[test]
    fn test_priority_follows_importance() {
        assert_eq!(Priority::from(Importance::Core), Priority::High);
        assert_eq!(Priority::from(Importance::Supporting), Priority::Medium);
        assert_eq!(Priority::from(Importance::Adjacent), Priority::Low);
    }

    #[test]
    fn test_learning_approach_for_hybrid_role_falls_back() {
        let (decision, _) = analyse(&["MongoDB", "Express", "React", "Node"]);
        let content = CareerContent::builtin();
        let expected = content.learning_for("Full-Stack Development");
        assert_eq!(&builder().learning_approach(&decision), expected);
    }
}
