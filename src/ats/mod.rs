pub mod patterns;
pub mod penalties;
pub mod scorer;
pub mod sections;

pub use patterns::{FormattingIssue, KeywordSet};
pub use penalties::{AppliedPenalty, Penalty, Remediation};
pub use scorer::{AtsAnalysisResult, AtsBreakdown, AtsDetails, AtsScorer, JobMatchDetail};
pub use sections::Section;
