//! Hard ATS penalties and the remediation advice attached to each

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resumes shorter than this many words are penalized.
pub const MIN_WORD_COUNT: usize = 50;

/// Resumes with fewer action verbs than this are penalized.
pub const MIN_ACTION_VERBS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    MissingSkillsSection,
    MissingExperienceSection,
    MissingContactInfo,
    NoMeasurableAchievements,
    TooShort,
    FewActionVerbs,
}

/// Concrete advice for fixing a detected problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remediation {
    pub title: String,
    pub action: String,
}

impl Remediation {
    pub fn new(title: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            action: action.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPenalty {
    pub kind: Penalty,
    pub reason: String,
    pub points: u8,
}

impl From<Penalty> for AppliedPenalty {
    fn from(kind: Penalty) -> Self {
        Self {
            kind,
            reason: kind.to_string(),
            points: kind.points(),
        }
    }
}

impl Penalty {
    /// Points deducted from the weighted score.
    pub fn points(&self) -> u8 {
        match self {
            Penalty::MissingSkillsSection => 15,
            Penalty::MissingExperienceSection => 15,
            Penalty::MissingContactInfo => 10,
            Penalty::NoMeasurableAchievements => 10,
            Penalty::TooShort => 10,
            Penalty::FewActionVerbs => 2,
        }
    }

    pub fn remediation(&self) -> Remediation {
        match self {
            Penalty::MissingSkillsSection => Remediation::new(
                "Add a Skills section",
                "List your technical skills under a clear \"Skills\" header so ATS parsers can find them",
            ),
            Penalty::MissingExperienceSection => Remediation::new(
                "Add an Experience section",
                "Put your work history under a standalone \"Experience\" or \"Work Experience\" header",
            ),
            Penalty::MissingContactInfo => Remediation::new(
                "Add contact information",
                "Include an email address, phone number or LinkedIn URL near the top of the resume",
            ),
            Penalty::NoMeasurableAchievements => Remediation::new(
                "Quantify your achievements",
                "Add numbers to your impact: percentages, dollar amounts, team sizes or speedups",
            ),
            Penalty::TooShort => Remediation::new(
                "Expand your resume",
                format!(
                    "Write at least {} words describing your experience, projects and skills",
                    MIN_WORD_COUNT
                ),
            ),
            Penalty::FewActionVerbs => Remediation::new(
                "Use stronger action verbs",
                "Start bullet points with verbs such as Led, Built, Designed, Improved or Delivered",
            ),
        }
    }
}

impl fmt::Display for Penalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Penalty::MissingSkillsSection => write!(f, "Missing Skills section"),
            Penalty::MissingExperienceSection => write!(f, "Missing Experience section"),
            Penalty::MissingContactInfo => write!(f, "No contact information found"),
            Penalty::NoMeasurableAchievements => write!(f, "No measurable achievements"),
            Penalty::TooShort => write!(f, "Resume is shorter than {} words", MIN_WORD_COUNT),
            Penalty::FewActionVerbs => write!(f, "Fewer than {} action verbs", MIN_ACTION_VERBS),
        }
    }
}
