//! estimo Core - Data Types
//!
//! Pure data structures shared by every estimo crate: the request and result
//! records, the enums they are built from, the error taxonomy and the engine
//! configuration. No scoring logic lives here.

pub mod config;
pub mod enums;
pub mod error;
pub mod model;

pub use config::{EngineConfig, TierThresholds};
pub use enums::{
    CalibrationSource, DifficultyTier, FeatureTag, Phase, ProjectType, RateSource, RiskKind,
    Severity, TeamRole, TechCategory, TechDifficulty,
};
pub use error::{ConfigError, EstimoError, EstimoResult, KnowledgeBaseError, RequestError};
pub use model::{
    EstimateResult, HoursRange, PhaseAllocation, ProjectRequest, RequiredSkills,
    RequirementTag, RiskFactor, SimilarProject, SkillAllocation, SkillWeights, TeamMatchRequest,
    TeamMember, TeamRecommendation, TechnologyAssessment,
};

/// Canonical form of a technology or skill key: trimmed and lowercased.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Node.JS "), "node.js");
        assert_eq!(normalize_key(""), "");
    }
}
