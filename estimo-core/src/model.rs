//! Request, result and roster records exchanged with the engine

use crate::{
    normalize_key, DifficultyTier, FeatureTag, Phase, ProjectType, RequestError, RiskKind,
    Severity, TeamRole, TechCategory, TechDifficulty,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Skill key to weight (requirements) or proficiency (members).
pub type SkillWeights = BTreeMap<String, f64>;

// ============================================================================
// PROJECT REQUEST
// ============================================================================

/// A project to estimate. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectRequest {
    /// Free-text description
    pub description: String,
    /// Ordered requirement lines
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Technology keys
    #[serde(default)]
    pub technologies: BTreeSet<String>,
    /// Optional delivery date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl ProjectRequest {
    /// Create a request from a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the requirement lines.
    pub fn with_requirements<I, S>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requirements = requirements.into_iter().map(Into::into).collect();
        self
    }

    /// Set the technologies.
    pub fn with_technologies<I, S>(mut self, technologies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.technologies = technologies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the deadline.
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Technology keys trimmed and lowercased, blanks dropped.
    pub fn normalized_technologies(&self) -> BTreeSet<String> {
        self.technologies
            .iter()
            .map(|t| normalize_key(t))
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Requirement lines that carry any text.
    pub fn meaningful_requirements(&self) -> impl Iterator<Item = &str> {
        self.requirements
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
    }

    /// A request needs at least one technology or one requirement.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.normalized_technologies().is_empty() && self.meaningful_requirements().next().is_none()
        {
            return Err(RequestError::Empty);
        }
        Ok(())
    }
}

// ============================================================================
// ANALYSIS AND ESTIMATE RECORDS
// ============================================================================

/// A normalized feature with its keyword-derived weight in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequirementTag {
    pub tag: FeatureTag,
    pub weight: f64,
}

/// A structured, severity-tagged reason the estimate is uncertain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub kind: RiskKind,
    pub severity: Severity,
    pub message: String,
}

impl RiskFactor {
    pub fn new(kind: RiskKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
        }
    }
}

/// Optimistic / realistic / pessimistic hours.
///
/// Only constructible through [`HoursRange::from_realistic`], which yields
/// `0 <= optimistic <= realistic <= pessimistic` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoursRange {
    pub optimistic: f64,
    pub realistic: f64,
    pub pessimistic: f64,
}

impl HoursRange {
    /// Spread a realistic figure. Expects `optimistic_spread <= 1 <= pessimistic_spread`,
    /// which `EngineConfig::validate` guarantees.
    pub fn from_realistic(realistic: f64, optimistic_spread: f64, pessimistic_spread: f64) -> Self {
        let realistic = if realistic.is_finite() { realistic.max(0.0) } else { 0.0 };
        Self {
            optimistic: realistic * optimistic_spread,
            realistic,
            pessimistic: realistic * pessimistic_spread,
        }
    }

    pub fn is_ordered(&self) -> bool {
        0.0 <= self.optimistic && self.optimistic <= self.realistic && self.realistic <= self.pessimistic
    }
}

/// Hours assigned to one delivery phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseAllocation {
    pub phase: Phase,
    pub share: f64,
    pub hours: f64,
}

/// A historical project resembling the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarProject {
    pub name: String,
    pub similarity: f64,
    pub estimated_hours: f64,
    pub actual_hours: f64,
}

/// Hours attributed to one technology category, in proportion to the
/// complexity of the requested technologies in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAllocation {
    pub category: TechCategory,
    pub share: f64,
    pub hours: f64,
    /// Normalized keys, ascending
    pub technologies: Vec<String>,
}

/// How hard one requested technology is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyAssessment {
    pub technology: String,
    /// Knowledge base complexity, or the configured default when unknown
    pub complexity: f64,
    pub difficulty: TechDifficulty,
    pub category: TechCategory,
    pub known: bool,
}

/// Output of one estimation call. Stateless and immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub hours: HoursRange,
    pub difficulty_tier: DifficultyTier,
    /// Always within [0.1, 0.95] under the default configuration
    pub confidence: f64,
    #[serde(rename = "risks")]
    pub risk_factors: Vec<RiskFactor>,
    pub required_skills: BTreeSet<String>,
    /// Weighted form of `required_skills`, fed to team matching
    #[serde(default)]
    pub skill_weights: SkillWeights,
    /// Uncalibrated complexity score
    pub base_score: f64,
    pub project_type: ProjectType,
    pub tags: Vec<RequirementTag>,
    pub phase_breakdown: Vec<PhaseAllocation>,
    pub similar_projects: Vec<SimilarProject>,
    #[serde(default)]
    pub tech_complexity: Vec<TechnologyAssessment>,
    /// Realistic hours split by technology category
    #[serde(default)]
    pub skill_breakdown: Vec<SkillAllocation>,
    #[serde(default)]
    pub recommended_roles: Vec<TeamRole>,
    #[serde(default)]
    pub recommended_team_size: usize,
    /// Version of the knowledge base snapshot used
    pub knowledge_version: u64,
}

// ============================================================================
// TEAM RECORDS
// ============================================================================

/// A roster entry supplied by an external source. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    /// Skill key to proficiency in [0, 1]
    #[serde(default)]
    pub skills: SkillWeights,
    /// Fraction of time available, in [0, 1]
    pub capacity_fraction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
}

impl TeamMember {
    pub fn new(id: impl Into<String>, capacity_fraction: f64) -> Self {
        Self {
            id: id.into(),
            skills: SkillWeights::new(),
            capacity_fraction,
            hourly_rate: None,
        }
    }

    /// Add a skill.
    pub fn with_skill(mut self, skill: impl Into<String>, proficiency: f64) -> Self {
        self.skills.insert(skill.into(), proficiency);
        self
    }

    /// Set the hourly rate.
    pub fn with_hourly_rate(mut self, rate: f64) -> Self {
        self.hourly_rate = Some(rate);
        self
    }
}

/// A ranked roster member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecommendation {
    pub member_id: String,
    pub skill_match_score: f64,
    pub capacity_ok: bool,
    /// 1-based position in the ranking
    pub rank: usize,
}

/// Required skills as sent by callers: either a plain list (weight 1.0 each)
/// or an explicit weight map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredSkills {
    List(Vec<String>),
    Weighted(SkillWeights),
}

impl Default for RequiredSkills {
    fn default() -> Self {
        RequiredSkills::List(Vec::new())
    }
}

impl RequiredSkills {
    /// Normalized skill-weight vector.
    pub fn into_weights(self) -> SkillWeights {
        match self {
            RequiredSkills::List(skills) => skills
                .into_iter()
                .map(|s| normalize_key(&s))
                .filter(|s| !s.is_empty())
                .map(|s| (s, 1.0))
                .collect(),
            RequiredSkills::Weighted(weights) => weights
                .into_iter()
                .map(|(s, w)| (normalize_key(&s), w))
                .filter(|(s, _)| !s.is_empty())
                .collect(),
        }
    }
}

/// Team-match request shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TeamMatchRequest {
    #[serde(default)]
    pub required_skills: RequiredSkills,
    #[serde(default)]
    pub roster: Vec<TeamMember>,
}

// =============================================================================
// TESTS
// =============================================================================
