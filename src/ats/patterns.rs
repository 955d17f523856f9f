//! Keyword vocabularies and pattern detectors used by the ATS scorer

use crate::error::{CareerInsightError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Technical keywords an ATS is likely to screen for.
pub const TECH_KEYWORDS: &[&str] = &[
    // Languages
    "rust", "python", "javascript", "typescript", "java", "c++", "c#", "golang", "ruby",
    "php", "swift", "kotlin", "scala", "sql", "bash",
    // Web
    "react", "vue", "angular", "svelte", "html", "css", "sass", "tailwind", "node.js",
    "nodejs", "express", "next.js", "django", "flask", "spring boot", "graphql", "rest",
    "rest api", "webpack",
    // Infrastructure
    "docker", "kubernetes", "aws", "azure", "gcp", "terraform", "ansible", "jenkins",
    "ci/cd", "linux", "git", "microservices", "nginx", "redis", "kafka",
    // Data
    "postgresql", "mysql", "mongodb", "elasticsearch", "dynamodb", "machine learning",
    "deep learning", "tensorflow", "pytorch", "pandas", "numpy", "spark", "airflow",
    "tableau", "power bi",
    // Testing
    "jest", "pytest", "junit", "selenium", "cypress", "unit testing",
];

/// Soft-skill and process terms that job descriptions list as requirements.
pub const REQUIREMENT_TERMS: &[&str] = &[
    "agile", "scrum", "kanban", "leadership", "communication", "collaboration", "teamwork",
    "mentoring", "problem solving", "stakeholder", "code review", "testing", "tdd",
    "documentation", "ownership", "cross-functional",
];

/// Past-tense action verbs that open strong resume bullet points.
pub const ACTION_VERBS: &[&str] = &[
    "achieved", "architected", "automated", "built", "collaborated", "created", "delivered",
    "designed", "developed", "drove", "established", "implemented", "improved", "increased",
    "launched", "led", "managed", "mentored", "migrated", "optimized", "organized",
    "reduced", "refactored", "resolved", "scaled", "shipped", "spearheaded", "streamlined",
    "trained", "transformed",
];

/// Bullet glyphs that many ATS parsers drop or garble.
pub const SPECIAL_BULLETS: &[char] = &['★', '✓', '✔', '➢', '►', '❖', '◆', '■', '→'];

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email pattern")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").expect("valid phone pattern")
});

static LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)linkedin\.com/in/[A-Za-z0-9_-]+").expect("valid linkedin pattern")
});

static ACHIEVEMENTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d+(\.\d+)?\s?%",
        r"\$\s?\d[\d,]*(\.\d+)?\s?[kKmMbB]?\b",
        r"(?i)\b\d[\d,]*\+?\s+(users|customers|clients|engineers|developers|people|members|employees|students|teams)\b",
        r"(?i)\b(increased|reduced|decreased|improved|grew|saved|cut|boosted|generated)\b[^.\n]{0,40}?\d+",
        r"(?i)\b\d+(\.\d+)?x\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid achievement pattern"))
    .collect()
});

/// Whole-word, case-insensitive matcher over a fixed vocabulary.
///
/// A hit only counts when the characters on both sides are not alphanumeric,
/// so "java" never matches inside "javascript".
#[derive(Debug, Clone)]
pub struct KeywordSet {
    matcher: AhoCorasick,
    keywords: Vec<&'static str>,
}

impl KeywordSet {
    pub fn new(keywords: &[&'static str]) -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(keywords)
            .map_err(|e| {
                CareerInsightError::Processing(format!("Failed to build keyword matcher: {}", e))
            })?;

        Ok(Self {
            matcher,
            keywords: keywords.to_vec(),
        })
    }

    /// Distinct keywords present in the text, in vocabulary order.
    pub fn find_unique(&self, text: &str) -> Vec<&'static str> {
        let mut seen = vec![false; self.keywords.len()];
        for mat in self.matcher.find_overlapping_iter(text) {
            if is_word_bounded(text, mat.start(), mat.end()) {
                seen[mat.pattern().as_usize()] = true;
            }
        }
        self.keywords
            .iter()
            .zip(seen)
            .filter_map(|(keyword, hit)| hit.then_some(*keyword))
            .collect()
    }

    /// Total whole-word occurrences, counting repeats.
    pub fn count_occurrences(&self, text: &str) -> usize {
        self.matcher
            .find_overlapping_iter(text)
            .filter(|mat| is_word_bounded(text, mat.start(), mat.end()))
            .count()
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// True when the text carries an email address, phone number or LinkedIn URL.
pub fn has_contact_info(text: &str) -> bool {
    EMAIL.is_match(text) || PHONE.is_match(text) || LINKEDIN.is_match(text)
}

/// Distinct measurable-achievement snippets, in order of appearance.
pub fn find_achievements(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();
    for pattern in ACHIEVEMENTS.iter() {
        for mat in pattern.find_iter(text) {
            let snippet = mat.as_str().trim().to_string();
            if !found.iter().any(|(_, s)| *s == snippet) {
                found.push((mat.start(), snippet));
            }
        }
    }
    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, snippet)| snippet).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormattingIssue {
    TabCharacters,
    ExcessiveBlankLines,
    TableLayout,
    SpecialBullets,
}

impl fmt::Display for FormattingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattingIssue::TabCharacters => write!(f, "Tab characters used for alignment"),
            FormattingIssue::ExcessiveBlankLines => write!(f, "More than three consecutive blank lines"),
            FormattingIssue::TableLayout => write!(f, "Table-like layout with pipe-delimited columns"),
            FormattingIssue::SpecialBullets => write!(f, "Decorative bullet symbols"),
        }
    }
}

/// Layout problems that commonly break ATS parsing. Each kind is reported once.
pub fn find_formatting_issues(text: &str) -> Vec<FormattingIssue> {
    let mut issues = Vec::new();

    if text.contains('\t') {
        issues.push(FormattingIssue::TabCharacters);
    }

    let mut blank_run = 0;
    let mut excessive_blanks = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 3 {
                excessive_blanks = true;
            }
        } else {
            blank_run = 0;
        }
    }
    if excessive_blanks {
        issues.push(FormattingIssue::ExcessiveBlankLines);
    }

    if text.lines().any(|line| line.matches('|').count() >= 2) {
        issues.push(FormattingIssue::TableLayout);
    }

    if text.chars().any(|c| SPECIAL_BULLETS.contains(&c)) {
        issues.push(FormattingIssue::SpecialBullets);
    }

    issues
}
