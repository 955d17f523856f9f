//! Resume section detection from standalone header lines

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Lines at least this long are prose, never headers.
const MAX_HEADER_LEN: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
    ];

    /// Header keywords recognised for this section, lowercase.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Section::Summary => &["summary", "professional summary", "profile", "objective", "about me"],
            Section::Experience => &[
                "experience",
                "work experience",
                "professional experience",
                "employment history",
                "employment",
                "work history",
            ],
            Section::Education => &["education", "academic background", "qualifications"],
            Section::Skills => &["skills", "technical skills", "core competencies", "technologies", "expertise"],
            Section::Projects => &["projects", "personal projects", "portfolio"],
            Section::Certifications => &["certifications", "certificates", "licenses"],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Summary => write!(f, "Summary"),
            Section::Experience => write!(f, "Experience"),
            Section::Education => write!(f, "Education"),
            Section::Skills => write!(f, "Skills"),
            Section::Projects => write!(f, "Projects"),
            Section::Certifications => write!(f, "Certifications"),
        }
    }
}

/// Sections whose header appears on a line of its own.
pub fn detect_sections(text: &str) -> BTreeSet<Section> {
    let mut found = BTreeSet::new();
    for line in text.lines() {
        let Some(candidate) = header_candidate(line) else {
            continue;
        };
        for section in Section::ALL {
            if section
                .headers()
                .iter()
                .any(|keyword| is_header_match(&candidate, keyword))
            {
                found.insert(section);
            }
        }
    }
    found
}

/// Lowercased, trimmed line without a trailing colon, if short enough to be a header.
fn header_candidate(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.chars().count() >= MAX_HEADER_LEN {
        return None;
    }
    let stripped = trimmed.trim_end_matches(':').trim_end();
    Some(stripped.to_lowercase())
}

/// The keyword equals the line, opens it, or closes it, on a word boundary.
fn is_header_match(line: &str, keyword: &str) -> bool {
    if line == keyword {
        return true;
    }
    let opens = line
        .strip_prefix(keyword)
        .is_some_and(|rest| rest.starts_with(|c: char| !c.is_alphanumeric()));
    let closes = line
        .strip_suffix(keyword)
        .is_some_and(|rest| rest.ends_with(|c: char| !c.is_alphanumeric()));
    opens || closes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_headers() {
        let text = "Jane Doe\n\nSUMMARY\nEngineer.\n\nWork Experience:\nAcme\n\nEducation\nBSc\n\nTechnical Skills\nRust";
        let sections = detect_sections(text);
        assert!(sections.contains(&Section::Summary));
        assert!(sections.contains(&Section::Experience));
        assert!(sections.contains(&Section::Education));
        assert!(sections.contains(&Section::Skills));
        assert!(!sections.contains(&Section::Projects));
    }

    #[test]
    fn test_word_in_prose_is_not_a_header() {
        let sections = detect_sections("I have experience with React");
        assert!(!sections.contains(&Section::Experience));
    }

    #[test]
    fn test_partial_word_is_not_a_header() {
        let sections = detect_sections("Experienced engineer\nSkillset overview");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_long_lines_are_ignored() {
        let line = format!("Experience {}", "x".repeat(60));
        assert!(detect_sections(&line).is_empty());
    }

    #[test]
    fn test_decorated_headers() {
        let sections = detect_sections("== Projects ==\nProfessional Experience\n---\nSkills & Tools");
        assert!(sections.contains(&Section::Experience));
        assert!(sections.contains(&Section::Skills));
        // "== projects ==" neither starts nor ends with the keyword
        assert!(!sections.contains(&Section::Projects));
    }
}
