//! ATS resume scoring: weighted text dimensions minus hard penalties

use crate::ats::patterns::{
    find_achievements, find_formatting_issues, has_contact_info, FormattingIssue, KeywordSet,
    ACTION_VERBS, REQUIREMENT_TERMS, TECH_KEYWORDS,
};
use crate::ats::penalties::{AppliedPenalty, Penalty, Remediation, MIN_ACTION_VERBS, MIN_WORD_COUNT};
use crate::ats::sections::{detect_sections, Section};
use crate::config::AtsConfig;
use crate::error::Result;
use crate::processing::text_processor::{normalize_unicode, word_count};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dimension scores below this trigger advice.
const ADVICE_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsAnalysisResult {
    /// Overall score, always within the configured floor and ceiling.
    pub score: u8,
    pub breakdown: AtsBreakdown,
    pub penalties: Vec<AppliedPenalty>,
    pub details: AtsDetails,
    pub recommendations: Vec<Remediation>,
}

impl AtsAnalysisResult {
    pub fn total_penalty_points(&self) -> u32 {
        self.penalties.iter().map(|p| p.points as u32).sum()
    }
}

/// Per-dimension scores, each 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsBreakdown {
    pub formatting: u8,
    pub keywords: u8,
    pub structure: u8,
    pub readability: u8,
    pub job_match: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsDetails {
    pub has_contact_info: bool,
    pub has_summary: bool,
    pub has_experience: bool,
    pub has_education: bool,
    pub has_skills: bool,
    pub has_projects: bool,
    pub has_certifications: bool,
    pub word_count: usize,
    pub action_verb_count: usize,
    pub achievement_count: usize,
    pub keyword_matches: Vec<String>,
    pub achievement_matches: Vec<String>,
    pub formatting_issues: Vec<FormattingIssue>,
    pub job_match: Option<JobMatchDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchDetail {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub percentage: f64,
}

/// Scores plain resume text, optionally against a job description.
#[derive(Debug, Clone)]
pub struct AtsScorer {
    keywords: KeywordSet,
    requirements: KeywordSet,
    verbs: KeywordSet,
    config: AtsConfig,
}

impl AtsScorer {
    pub fn new() -> Result<Self> {
        Self::with_config(AtsConfig::default())
    }

    pub fn with_config(config: AtsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            keywords: KeywordSet::new(TECH_KEYWORDS)?,
            requirements: KeywordSet::new(REQUIREMENT_TERMS)?,
            verbs: KeywordSet::new(ACTION_VERBS)?,
            config,
        })
    }

    /// Score resume text. Total over any input, including an empty string.
    pub fn analyze_resume(&self, text: &str, job_description: Option<&str>) -> AtsAnalysisResult {
        let clean = normalize_unicode(text);

        let sections = detect_sections(&clean);
        let has_contact = has_contact_info(&clean);
        let keyword_matches: Vec<String> = self
            .keywords
            .find_unique(&clean)
            .into_iter()
            .map(str::to_string)
            .collect();
        let achievement_matches = find_achievements(&clean);
        let action_verb_count = self.verbs.count_occurrences(&clean);
        let words = word_count(&clean);
        // decorative glyphs are checked on the raw text
        let formatting_issues = find_formatting_issues(text);

        let keywords = Self::keyword_score(keyword_matches.len());
        let readability = Self::readability_score(action_verb_count, achievement_matches.len(), words);
        let structure = Self::structure_score(&sections, has_contact);
        let formatting = Self::formatting_score(formatting_issues.len());
        let job_detail = job_description.map(|jd| self.job_match(&clean, jd));
        let job_match = match &job_detail {
            Some(detail) if !(detail.matched.is_empty() && detail.missing.is_empty()) => detail.percentage,
            _ => keywords,
        };

        let w = &self.config.weights;
        let weighted = keywords * w.skills
            + readability * w.readability
            + structure * w.structure
            + formatting * w.formatting
            + job_match * w.job_match;

        let penalties = Self::detect_penalties(
            &sections,
            has_contact,
            achievement_matches.len(),
            words,
            action_verb_count,
        );
        let deducted: f64 = penalties.iter().map(|p| p.points() as f64).sum();
        let score = (weighted - deducted)
            .round()
            .clamp(self.config.score_floor as f64, self.config.score_ceiling as f64) as u8;

        debug!(
            "ATS dimensions: keywords {:.1}, readability {:.1}, structure {:.1}, formatting {:.1}, job match {:.1}; weighted {:.1}, penalties {}",
            keywords, readability, structure, formatting, job_match, weighted, deducted
        );

        let breakdown = AtsBreakdown {
            formatting: to_percent(formatting),
            keywords: to_percent(keywords),
            structure: to_percent(structure),
            readability: to_percent(readability),
            job_match: to_percent(job_match),
        };
        let recommendations = Self::recommendations(&penalties, &breakdown, job_detail.as_ref());

        info!("ATS score: {} ({} penalties)", score, penalties.len());

        AtsAnalysisResult {
            score,
            breakdown,
            penalties: penalties.into_iter().map(AppliedPenalty::from).collect(),
            details: AtsDetails {
                has_contact_info: has_contact,
                has_summary: sections.contains(&Section::Summary),
                has_experience: sections.contains(&Section::Experience),
                has_education: sections.contains(&Section::Education),
                has_skills: sections.contains(&Section::Skills),
                has_projects: sections.contains(&Section::Projects),
                has_certifications: sections.contains(&Section::Certifications),
                word_count: words,
                action_verb_count,
                achievement_count: achievement_matches.len(),
                keyword_matches,
                achievement_matches,
                formatting_issues,
                job_match: job_detail,
            },
            recommendations,
        }
    }

    fn keyword_score(unique_keywords: usize) -> f64 {
        (unique_keywords as f64 * 10.0).min(100.0)
    }

    fn readability_score(verbs: usize, achievements: usize, words: usize) -> f64 {
        let verb_part = verbs.min(8) as f64 / 8.0 * 40.0;
        let achievement_part = achievements.min(3) as f64 / 3.0 * 35.0;
        let length_part = if words >= 150 {
            25.0
        } else if words >= MIN_WORD_COUNT {
            12.0
        } else {
            0.0
        };
        verb_part + achievement_part + length_part
    }

    fn structure_score(sections: &BTreeSet<Section>, has_contact: bool) -> f64 {
        let mut score = 0.0;
        if sections.contains(&Section::Experience) {
            score += 30.0;
        }
        if sections.contains(&Section::Skills) {
            score += 25.0;
        }
        if sections.contains(&Section::Education) {
            score += 20.0;
        }
        if has_contact {
            score += 15.0;
        }
        if sections.contains(&Section::Summary) {
            score += 10.0;
        }
        score
    }

    fn formatting_score(issues: usize) -> f64 {
        (100.0 - 20.0 * issues as f64).max(0.0)
    }

    /// Share of distinct job-description terms that also appear in the resume.
    fn job_match(&self, resume: &str, job_description: &str) -> JobMatchDetail {
        let job_description = normalize_unicode(job_description);
        let wanted = self.terms(&job_description);
        let present = self.terms(resume);

        let matched: Vec<String> = wanted.intersection(&present).map(|t| t.to_string()).collect();
        let missing: Vec<String> = wanted.difference(&present).map(|t| t.to_string()).collect();
        let percentage = if wanted.is_empty() {
            0.0
        } else {
            matched.len() as f64 / wanted.len() as f64 * 100.0
        };

        JobMatchDetail {
            matched,
            missing,
            percentage,
        }
    }

    fn terms(&self, text: &str) -> BTreeSet<&'static str> {
        self.keywords
            .find_unique(text)
            .into_iter()
            .chain(self.requirements.find_unique(text))
            .collect()
    }

    fn detect_penalties(
        sections: &BTreeSet<Section>,
        has_contact: bool,
        achievements: usize,
        words: usize,
        verbs: usize,
    ) -> Vec<Penalty> {
        let mut penalties = Vec::new();
        if !sections.contains(&Section::Skills) {
            penalties.push(Penalty::MissingSkillsSection);
        }
        if !sections.contains(&Section::Experience) {
            penalties.push(Penalty::MissingExperienceSection);
        }
        if !has_contact {
            penalties.push(Penalty::MissingContactInfo);
        }
        if achievements == 0 {
            penalties.push(Penalty::NoMeasurableAchievements);
        }
        if words < MIN_WORD_COUNT {
            penalties.push(Penalty::TooShort);
        }
        if verbs < MIN_ACTION_VERBS {
            penalties.push(Penalty::FewActionVerbs);
        }
        penalties
    }

    fn recommendations(
        penalties: &[Penalty],
        breakdown: &AtsBreakdown,
        job: Option<&JobMatchDetail>,
    ) -> Vec<Remediation> {
        let mut recommendations: Vec<Remediation> = penalties.iter().map(Penalty::remediation).collect();

        if breakdown.keywords < ADVICE_THRESHOLD {
            recommendations.push(Remediation::new(
                "Add relevant technical keywords",
                "Name the specific languages, frameworks and tools you use; ATS filters match exact terms",
            ));
        }
        if breakdown.formatting < ADVICE_THRESHOLD {
            recommendations.push(Remediation::new(
                "Simplify formatting",
                "Avoid tabs, tables and decorative bullets; use plain text with simple hyphen bullets",
            ));
        }
        if breakdown.readability < ADVICE_THRESHOLD && !penalties.contains(&Penalty::FewActionVerbs) {
            recommendations.push(Remediation::new(
                "Strengthen your bullet points",
                "Lead each bullet with an action verb and close it with a measurable result",
            ));
        }
        if let Some(job) = job {
            if breakdown.job_match < ADVICE_THRESHOLD && !job.missing.is_empty() {
                recommendations.push(Remediation::new(
                    "Tailor the resume to the job description",
                    format!(
                        "Where accurate, mention these terms from the posting: {}",
                        job.missing.join(", ")
                    ),
                ));
            }
        }

        recommendations
    }
}

impl Default for AtsScorer {
    fn default() -> Self {
        Self::new().expect("Failed to create default ATS scorer")
    }
}

fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readability_parts() {
        assert_eq!(AtsScorer::readability_score(8, 3, 150), 100.0);
        assert_eq!(AtsScorer::readability_score(0, 0, 49), 0.0);
        assert_eq!(AtsScorer::readability_score(4, 0, 50), 32.0);
    }

    #[test]
    fn test_keyword_score_saturates() {
        assert_eq!(AtsScorer::keyword_score(3), 30.0);
        assert_eq!(AtsScorer::keyword_score(25), 100.0);
    }

    #[test]
    fn test_formatting_score_floor() {
        assert_eq!(AtsScorer::formatting_score(0), 100.0);
        assert_eq!(AtsScorer::formatting_score(2), 60.0);
        assert_eq!(AtsScorer::formatting_score(6), 0.0);
    }

    #[test]
    fn test_structure_weights() {
        let all: BTreeSet<Section> = Section::ALL.into_iter().collect();
        assert_eq!(AtsScorer::structure_score(&all, true), 100.0);
        assert_eq!(AtsScorer::structure_score(&BTreeSet::new(), true), 15.0);
    }

    #[test]
    fn test_job_match_counts_each_term_once() {
        let scorer = AtsScorer::new().unwrap();
        let detail = scorer.job_match(
            "Python and Docker",
            "Python, Python, PYTHON. Docker. Kubernetes. Kubernetes.",
        );
        assert_eq!(detail.matched, vec!["docker", "python"]);
        assert_eq!(detail.missing, vec!["kubernetes"]);
        assert!((detail.percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_job_match_includes_requirement_terms() {
        let scorer = AtsScorer::new().unwrap();
        let detail = scorer.job_match("Practised agile delivery", "Agile team, strong communication");
        assert_eq!(detail.matched, vec!["agile"]);
        assert_eq!(detail.missing, vec!["communication"]);
    }

    #[test]
    fn test_empty_text_is_clamped_to_floor() {
        let result = AtsScorer::default().analyze_resume("", None);
        assert_eq!(result.score, 10);
        assert_eq!(result.penalties.len(), 6);
    }

    #[test]
    fn test_no_job_description_uses_keyword_score() {
        let result = AtsScorer::default().analyze_resume("Rust, Python and Docker", None);
        assert_eq!(result.breakdown.job_match, result.breakdown.keywords);
        assert!(result.details.job_match.is_none());
    }

    #[test]
    fn test_recommendations_follow_penalties() {
        let result = AtsScorer::default().analyze_resume("Jane Doe", None);
        for penalty in &result.penalties {
            let remediation = penalty.kind.remediation();
            assert!(result.recommendations.contains(&remediation));
        }
    }
}
