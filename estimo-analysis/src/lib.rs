//! estimo Analysis - Requirement Analyzer and Complexity Scorer
//!
//! Keyword-table driven: request text is tokenized, matched against a static
//! keyword→tag table and turned into weighted feature tags. The scorer then
//! maps tags plus technologies to a base complexity score using the
//! knowledge base.

pub mod analyzer;
pub mod keywords;
pub mod scorer;

pub use analyzer::{tokenize, RequirementAnalysis, RequirementAnalyzer};
pub use keywords::{tag_base_cost, tag_for_keyword};
pub use scorer::{ComplexityScorer, ScoreBreakdown};
