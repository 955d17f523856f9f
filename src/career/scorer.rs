//! Per-category scoring from tier-weighted skill coverage

use crate::career::taxonomy::{CareerCategory, CategoryId, Importance, Taxonomy};
use crate::config::TierWeights;
use crate::processing::text_processor::token_forms;
use log::debug;
use serde::{Deserialize, Serialize};

/// Coverage of one category by an input skill set. Built fresh for every analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: CategoryId,
    /// Canonical names of the category's skills that the input matched.
    pub matched_skills: Vec<String>,
    pub core_matched: usize,
    pub core_total: usize,
    pub supporting_matched: usize,
    pub supporting_total: usize,
    pub adjacent_matched: usize,
    pub adjacent_total: usize,
    /// 0-100 with one decimal of precision.
    pub normalized_score: f64,
}

impl CategoryScore {
    fn empty(category: CategoryId) -> Self {
        Self {
            category,
            matched_skills: Vec::new(),
            core_matched: 0,
            core_total: 0,
            supporting_matched: 0,
            supporting_total: 0,
            adjacent_matched: 0,
            adjacent_total: 0,
            normalized_score: 0.0,
        }
    }

    fn record(&mut self, importance: Importance, matched: bool) {
        let (total, hits) = match importance {
            Importance::Core => (&mut self.core_total, &mut self.core_matched),
            Importance::Supporting => (&mut self.supporting_total, &mut self.supporting_matched),
            Importance::Adjacent => (&mut self.adjacent_total, &mut self.adjacent_matched),
        };
        *total += 1;
        if matched {
            *hits += 1;
        }
    }

    pub fn is_matched(&self, canonical: &str) -> bool {
        self.matched_skills.iter().any(|s| s == canonical)
    }
}

/// Scores categories against normalized (already expanded) skill tokens.
#[derive(Debug, Clone)]
pub struct CategoryScorer {
    weights: TierWeights,
}

impl Default for CategoryScorer {
    fn default() -> Self {
        Self::new(TierWeights::default())
    }
}

impl CategoryScorer {
    pub fn new(weights: TierWeights) -> Self {
        Self { weights }
    }

    /// Score every category of the taxonomy, in declaration order.
    pub fn score_all<S: AsRef<str>>(&self, taxonomy: &Taxonomy, skills: &[S]) -> Vec<CategoryScore> {
        let tokens: Vec<(String, String)> = skills
            .iter()
            .map(|s| token_forms(s.as_ref()))
            .filter(|(token, _)| !token.is_empty())
            .collect();

        taxonomy
            .categories()
            .iter()
            .map(|category| self.score_forms(category, &tokens))
            .collect()
    }

    /// Score a single category. Only skills declared by this category can match.
    pub fn score_category<S: AsRef<str>>(&self, category: &CareerCategory, skills: &[S]) -> CategoryScore {
        let tokens: Vec<(String, String)> = skills.iter().map(|s| token_forms(s.as_ref())).collect();
        self.score_forms(category, &tokens)
    }

    fn score_forms(&self, category: &CareerCategory, tokens: &[(String, String)]) -> CategoryScore {
        let mut score = CategoryScore::empty(category.id.clone());

        for skill in &category.skills {
            let matched = tokens
                .iter()
                .any(|(token, token_compact)| skill.matches(token, token_compact));
            score.record(skill.importance, matched);
            if matched && !score.is_matched(&skill.canonical) {
                score.matched_skills.push(skill.canonical.clone());
            }
        }

        score.normalized_score = compute_normalized_score(&score, &self.weights);
        debug!(
            "{}: {:.1} (core {}/{}, supporting {}/{}, adjacent {}/{})",
            score.category,
            score.normalized_score,
            score.core_matched,
            score.core_total,
            score.supporting_matched,
            score.supporting_total,
            score.adjacent_matched,
            score.adjacent_total
        );
        score
    }
}

/// Tier-weighted coverage score in [0, 100], rounded to one decimal.
///
/// Core and supporting coverage are capped (4 and 3 skills by default) so that
/// matching beyond the cap adds nothing.
pub fn compute_normalized_score(score: &CategoryScore, weights: &TierWeights) -> f64 {
    let core = capped_ratio(score.core_matched, score.core_total, weights.core_cap) * weights.core;
    let supporting = capped_ratio(
        score.supporting_matched,
        score.supporting_total,
        weights.supporting_cap,
    ) * weights.supporting;
    let adjacent = if score.adjacent_total > 0 {
        score.adjacent_matched as f64 / score.adjacent_total as f64 * weights.adjacent
    } else {
        0.0
    };

    let raw = core.min(weights.core) + supporting.min(weights.supporting) + adjacent;
    ((raw * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

fn capped_ratio(matched: usize, total: usize, cap: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    matched.min(cap) as f64 / total.min(cap) as f64
}
