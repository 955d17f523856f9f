pub mod analyzer;
pub mod content;
pub mod decision;
pub mod implied;
pub mod recommendations;
pub mod scorer;
pub mod taxonomy;

pub use analyzer::{CareerAnalysis, CareerAnalyzer};
pub use content::{CareerContent, ContentTable, LearningApproach, PathTemplate};
pub use decision::{Confidence, Decision, DecisionEngine, DecisionKind};
pub use recommendations::{CareerPath, Priority, SkillSuggestion};
pub use scorer::{CategoryScore, CategoryScorer};
pub use taxonomy::{CareerCategory, CategoryId, CombinationRole, Importance, SkillDefinition, Taxonomy};
