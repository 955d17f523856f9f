//! Skill-to-career analysis pipeline: expand, score, rank, decide, recommend

use crate::career::content::{CareerContent, LearningApproach};
use crate::career::decision::{rank_scores, Confidence, Decision, DecisionEngine, DecisionKind};
use crate::career::implied::expand_implied_skills;
use crate::career::recommendations::{CareerPath, RecommendationBuilder, SkillSuggestion};
use crate::career::scorer::{CategoryScore, CategoryScorer};
use crate::career::taxonomy::Taxonomy;
use crate::config::CareerConfig;
use crate::error::Result;
use crate::processing::text_processor::split_skill_list;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerAnalysis {
    pub summary: String,
    pub primary_category: String,
    pub primary_title: String,
    pub decision: Decision,
    /// Categories with a positive score, best first.
    pub skill_breakdown: Vec<CategoryScore>,
    pub career_paths: Vec<CareerPath>,
    pub skills_to_enhance: Vec<SkillSuggestion>,
    pub learning_approach: LearningApproach,
    /// Normalized input after implied-skill expansion.
    pub expanded_skills: Vec<String>,
}

impl CareerAnalysis {
    pub fn confidence(&self) -> Confidence {
        self.decision.confidence
    }

    pub fn reason(&self) -> &str {
        &self.decision.reason
    }

    pub fn breakdown_for(&self, category: &str) -> Option<&CategoryScore> {
        self.skill_breakdown
            .iter()
            .find(|s| s.category.as_str() == category)
    }
}

/// Stateless analyzer over an immutable taxonomy and content set.
///
/// Cheap to clone and safe to share between threads; every call builds its
/// result from scratch.
#[derive(Debug, Clone)]
pub struct CareerAnalyzer {
    taxonomy: Arc<Taxonomy>,
    content: Arc<CareerContent>,
    config: CareerConfig,
    scorer: CategoryScorer,
    engine: DecisionEngine,
}

impl CareerAnalyzer {
    /// Analyzer over the built-in taxonomy and content.
    pub fn new(config: CareerConfig) -> Result<Self> {
        Self::with_data(
            Arc::new(Taxonomy::builtin().clone()),
            Arc::new(CareerContent::builtin().clone()),
            config,
        )
    }

    pub fn with_data(
        taxonomy: Arc<Taxonomy>,
        content: Arc<CareerContent>,
        config: CareerConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            taxonomy,
            content,
            scorer: CategoryScorer::new(config.weights.clone()),
            engine: DecisionEngine::new(&config),
            config,
        })
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Analyze a list of free-text skill tokens.
    ///
    /// Total: input that matches nothing yields a "General" analysis.
    pub fn analyze_skills<S: AsRef<str>>(&self, skills: &[S]) -> CareerAnalysis {
        let expanded = expand_implied_skills(skills, self.taxonomy.implied_rules());
        let scores = self.scorer.score_all(&self.taxonomy, &expanded);
        let ranked = rank_scores(scores, &self.taxonomy);
        let decision = self.engine.decide(&ranked, &self.taxonomy);
        if matches!(decision.kind, DecisionKind::NoMatch | DecisionKind::Exploratory) {
            warn!("Weak career signal: {}", decision.reason);
        }

        let builder = RecommendationBuilder::new(&self.taxonomy, &self.content, &self.config);
        let career_paths = builder.career_paths(&decision, &ranked);
        let skills_to_enhance = builder.skills_to_enhance(&ranked);
        let learning_approach = builder.learning_approach(&decision);

        let primary_title = self.content.title_for(&decision.primary).to_string();
        let summary = Self::summarize(&decision, &primary_title, &ranked);

        info!(
            "Career analysis: {} skills -> {} ({} confidence)",
            expanded.len(),
            decision.primary,
            decision.confidence
        );

        CareerAnalysis {
            summary,
            primary_category: decision.primary.clone(),
            primary_title,
            decision,
            skill_breakdown: ranked,
            career_paths,
            skills_to_enhance,
            learning_approach,
            expanded_skills: expanded,
        }
    }

    /// Analyze a delimited skill list such as "React, Node.js; SQL".
    pub fn analyze_skill_text(&self, text: &str) -> CareerAnalysis {
        self.analyze_skills(&split_skill_list(text))
    }

    fn summarize(decision: &Decision, title: &str, ranked: &[CategoryScore]) -> String {
        let matched: usize = ranked.iter().map(|s| s.matched_skills.len()).sum();
        match &decision.kind {
            DecisionKind::NoMatch => {
                "None of the provided skills matched a known career category yet. Start with a broad foundation and revisit as your skills grow.".to_string()
            }
            DecisionKind::Exploratory => format!(
                "Your skills show early signs of {} ({:.1}/100). Building core skills in this area would make {} a realistic goal.",
                decision.primary, decision.top_score, title
            ),
            DecisionKind::Combination { members, .. } => format!(
                "Your skills span {} and {}, a strong fit for {} roles such as {} ({} matched skills across categories).",
                members[0], members[1], decision.primary, title, matched
            ),
            DecisionKind::StrongSecondary { secondary } => format!(
                "Your strongest area is {} ({:.1}/100) with solid {} skills alongside. A natural next role is {}.",
                decision.primary, decision.top_score, secondary, title
            ),
            DecisionKind::SingleCategory | DecisionKind::Focused { .. } => format!(
                "Your skills align most closely with {} ({:.1}/100). A natural next role is {}.",
                decision.primary, decision.top_score, title
            ),
        }
    }
}
