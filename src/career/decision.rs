//! Primary category selection and hybrid-role detection

use crate::career::scorer::CategoryScore;
use crate::career::taxonomy::{CategoryId, Taxonomy};
use crate::config::CareerConfig;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary name reported when no category matched.
pub const GENERAL_CATEGORY: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// Which branch of the decision produced the primary category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionKind {
    NoMatch,
    /// Top category is below the primary threshold.
    Exploratory,
    SingleCategory,
    /// Runner-up exists but fails the secondary or ratio check.
    Focused { runner_up: CategoryId },
    /// Runner-up passes both checks but no hybrid role pairs the two.
    StrongSecondary { secondary: CategoryId },
    Combination {
        role: CategoryId,
        members: [CategoryId; 2],
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Category name, hybrid role name, or "General".
    pub primary: String,
    pub kind: DecisionKind,
    pub reason: String,
    pub confidence: Confidence,
    pub top_score: f64,
    /// Runner-up score divided by the top score, when there is a runner-up.
    pub ratio: Option<f64>,
}

impl Decision {
    pub fn is_combination(&self) -> bool {
        matches!(self.kind, DecisionKind::Combination { .. })
    }
}

/// Keep categories with a positive score and order them best first.
///
/// Equal scores are ordered by the category's weight multiplier, then by
/// taxonomy declaration order, so the ranking is deterministic.
pub fn rank_scores(scores: Vec<CategoryScore>, taxonomy: &Taxonomy) -> Vec<CategoryScore> {
    let mut ranked: Vec<CategoryScore> = scores
        .into_iter()
        .filter(|s| s.normalized_score > 0.0)
        .collect();

    let multiplier = |score: &CategoryScore| {
        taxonomy
            .category(score.category.as_str())
            .map(|c| c.weight_multiplier)
            .unwrap_or(1.0)
    };

    ranked.sort_by(|a, b| {
        b.normalized_score
            .total_cmp(&a.normalized_score)
            .then_with(|| multiplier(b).total_cmp(&multiplier(a)))
            .then_with(|| {
                taxonomy
                    .position(a.category.as_str())
                    .cmp(&taxonomy.position(b.category.as_str()))
            })
    });
    ranked
}

/// Pure decision over a ranked score list.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    minimum_primary_threshold: f64,
    minimum_secondary_threshold: f64,
    combination_ratio_threshold: f64,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(&CareerConfig::default())
    }
}

impl DecisionEngine {
    pub fn new(config: &CareerConfig) -> Self {
        Self {
            minimum_primary_threshold: config.minimum_primary_threshold,
            minimum_secondary_threshold: config.minimum_secondary_threshold,
            combination_ratio_threshold: config.combination_ratio_threshold,
        }
    }

    /// `ranked` must come from [`rank_scores`].
    pub fn decide(&self, ranked: &[CategoryScore], taxonomy: &Taxonomy) -> Decision {
        let decision = match ranked {
            [] => Decision {
                primary: GENERAL_CATEGORY.to_string(),
                kind: DecisionKind::NoMatch,
                reason: "No category matched any of the provided skills".to_string(),
                confidence: Confidence::Low,
                top_score: 0.0,
                ratio: None,
            },
            [top, ..] if top.normalized_score < self.minimum_primary_threshold => Decision {
                primary: top.category.to_string(),
                kind: DecisionKind::Exploratory,
                reason: format!(
                    "{} leads with {:.1}, below the primary threshold of {:.1}; treat it as exploratory",
                    top.category, top.normalized_score, self.minimum_primary_threshold
                ),
                confidence: Confidence::Low,
                top_score: top.normalized_score,
                ratio: None,
            },
            [top] => Decision {
                primary: top.category.to_string(),
                kind: DecisionKind::SingleCategory,
                reason: format!(
                    "{} is the only matching category with {:.1}",
                    top.category, top.normalized_score
                ),
                confidence: Self::confidence_for(top.normalized_score),
                top_score: top.normalized_score,
                ratio: None,
            },
            [top, second, rest @ ..] => self.decide_pair(top, second, rest, taxonomy),
        };

        debug!("Decision: {} ({})", decision.primary, decision.reason);
        decision
    }

    fn decide_pair(
        &self,
        top: &CategoryScore,
        second: &CategoryScore,
        rest: &[CategoryScore],
        taxonomy: &Taxonomy,
    ) -> Decision {
        let ratio = second.normalized_score / top.normalized_score;
        let close = second.normalized_score >= self.minimum_secondary_threshold
            && ratio >= self.combination_ratio_threshold;

        if !close {
            return Decision {
                primary: top.category.to_string(),
                kind: DecisionKind::Focused {
                    runner_up: second.category.clone(),
                },
                reason: format!(
                    "{} leads with {:.1}; runner-up {} at {:.1} (ratio {:.2}) does not meet the secondary threshold of {:.1} and ratio of {:.2}",
                    top.category,
                    top.normalized_score,
                    second.category,
                    second.normalized_score,
                    ratio,
                    self.minimum_secondary_threshold,
                    self.combination_ratio_threshold
                ),
                confidence: Self::confidence_for(top.normalized_score),
                top_score: top.normalized_score,
                ratio: Some(ratio),
            };
        }

        let third_note = self.third_category_note(top, rest);

        match taxonomy.combination_for(top.category.as_str(), second.category.as_str()) {
            Some(combination) => Decision {
                primary: combination.result.to_string(),
                kind: DecisionKind::Combination {
                    role: combination.result.clone(),
                    members: [top.category.clone(), second.category.clone()],
                },
                reason: format!(
                    "{} ({:.1}) and {} ({:.1}, ratio {:.2}) combine into {}{}",
                    top.category,
                    top.normalized_score,
                    second.category,
                    second.normalized_score,
                    ratio,
                    combination.result,
                    third_note
                ),
                confidence: Confidence::High,
                top_score: top.normalized_score,
                ratio: Some(ratio),
            },
            None => Decision {
                primary: top.category.to_string(),
                kind: DecisionKind::StrongSecondary {
                    secondary: second.category.clone(),
                },
                reason: format!(
                    "{} leads with {:.1}; {} is a strong secondary at {:.1} (ratio {:.2}) but no hybrid role pairs them{}",
                    top.category,
                    top.normalized_score,
                    second.category,
                    second.normalized_score,
                    ratio,
                    third_note
                ),
                confidence: Confidence::Medium,
                top_score: top.normalized_score,
                ratio: Some(ratio),
            },
        }
    }

    /// Only two-category hybrids exist; a close third category is reported, not combined.
    fn third_category_note(&self, top: &CategoryScore, rest: &[CategoryScore]) -> String {
        match rest.first() {
            Some(third) => {
                let ratio = third.normalized_score / top.normalized_score;
                if third.normalized_score >= self.minimum_secondary_threshold
                    && ratio >= self.combination_ratio_threshold
                {
                    format!(
                        "; {} is also close at {:.1} (ratio {:.2}) but only two-category hybrids are recognised",
                        third.category, third.normalized_score, ratio
                    )
                } else {
                    String::new()
                }
            }
            None => String::new(),
        }
    }

    fn confidence_for(score: f64) -> Confidence {
        if score >= 40.0 {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }
}
