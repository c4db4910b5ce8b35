//! Enum types shared across the estimation engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TECHNOLOGY CATEGORY
// ============================================================================

/// Broad area a technology belongs to. Doubles as a skill key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TechCategory {
    Frontend,
    Backend,
    Infra,
    Data,
    Mobile,
    #[default]
    Other,
}

impl TechCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechCategory::Frontend => "frontend",
            TechCategory::Backend => "backend",
            TechCategory::Infra => "infra",
            TechCategory::Data => "data",
            TechCategory::Mobile => "mobile",
            TechCategory::Other => "other",
        }
    }
}

impl fmt::Display for TechCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TechCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frontend" => Ok(TechCategory::Frontend),
            "backend" => Ok(TechCategory::Backend),
            "infra" => Ok(TechCategory::Infra),
            "data" => Ok(TechCategory::Data),
            "mobile" => Ok(TechCategory::Mobile),
            "other" => Ok(TechCategory::Other),
            other => Err(format!("Invalid technology category: {}", other)),
        }
    }
}

// ============================================================================
// DIFFICULTY TIER
// ============================================================================

/// Step-function classification of a base complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Trivial,
    Low,
    Medium,
    High,
    Extreme,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Trivial => "trivial",
            DifficultyTier::Low => "low",
            DifficultyTier::Medium => "medium",
            DifficultyTier::High => "high",
            DifficultyTier::Extreme => "extreme",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISKS
// ============================================================================

/// What kind of uncertainty a risk factor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    /// A requested technology is missing from the knowledge base
    TechnologyUnknown,
    /// The realistic plan does not fit before the deadline
    TightDeadline,
    /// Too much of the roster has no capacity
    HighTeamTurnover,
    /// Requirement text did not map onto known features
    ScopeAmbiguity,
}

impl fmt::Display for RiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RiskKind::TechnologyUnknown => "technology_unknown",
            RiskKind::TightDeadline => "tight_deadline",
            RiskKind::HighTeamTurnover => "high_team_turnover",
            RiskKind::ScopeAmbiguity => "scope_ambiguity",
        };
        write!(f, "{}", value)
    }
}

/// Severity of a risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        write!(f, "{}", value)
    }
}

// ============================================================================
// FEATURE TAGS
// ============================================================================

/// Normalized feature a requirement maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureTag {
    Auth,
    Payments,
    Realtime,
    Search,
    FileUpload,
    AdminPanel,
    Notifications,
    Reporting,
    ApiIntegration,
    I18n,
    Responsive,
    Catalog,
    Cart,
    Security,
    Performance,
    MachineLearning,
}

impl FeatureTag {
    /// Every tag, in declaration order.
    pub const ALL: [FeatureTag; 16] = [
        FeatureTag::Auth,
        FeatureTag::Payments,
        FeatureTag::Realtime,
        FeatureTag::Search,
        FeatureTag::FileUpload,
        FeatureTag::AdminPanel,
        FeatureTag::Notifications,
        FeatureTag::Reporting,
        FeatureTag::ApiIntegration,
        FeatureTag::I18n,
        FeatureTag::Responsive,
        FeatureTag::Catalog,
        FeatureTag::Cart,
        FeatureTag::Security,
        FeatureTag::Performance,
        FeatureTag::MachineLearning,
    ];

    /// Skill key used when the tag shows up in `required_skills`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureTag::Auth => "auth",
            FeatureTag::Payments => "payments",
            FeatureTag::Realtime => "realtime",
            FeatureTag::Search => "search",
            FeatureTag::FileUpload => "file_upload",
            FeatureTag::AdminPanel => "admin_panel",
            FeatureTag::Notifications => "notifications",
            FeatureTag::Reporting => "reporting",
            FeatureTag::ApiIntegration => "api_integration",
            FeatureTag::I18n => "i18n",
            FeatureTag::Responsive => "responsive",
            FeatureTag::Catalog => "catalog",
            FeatureTag::Cart => "cart",
            FeatureTag::Security => "security",
            FeatureTag::Performance => "performance",
            FeatureTag::MachineLearning => "machine_learning",
        }
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PROJECT TYPE AND PHASES
// ============================================================================

/// Coarse shape of a project, used to pick a phase template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Website,
    WebApp,
    MobileApp,
    ECommerce,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ProjectType::Website => "website",
            ProjectType::WebApp => "web_app",
            ProjectType::MobileApp => "mobile_app",
            ProjectType::ECommerce => "e_commerce",
        };
        write!(f, "{}", value)
    }
}

/// Delivery phase of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Planning,
    Design,
    Development,
    Testing,
    Deployment,
}

impl Phase {
    /// Human description used in reports.
    pub fn description(&self) -> &'static str {
        match self {
            Phase::Planning => "Requirements analysis, architecture planning and project setup",
            Phase::Design => "UI/UX design, wireframes, mockups and design system",
            Phase::Development => "Feature implementation and integration",
            Phase::Testing => "Quality assurance, bug fixing and performance work",
            Phase::Deployment => "Production rollout and go-live",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Phase::Planning => "planning",
            Phase::Design => "design",
            Phase::Development => "development",
            Phase::Testing => "testing",
            Phase::Deployment => "deployment",
        };
        write!(f, "{}", value)
    }
}

// ============================================================================
// TECHNOLOGY DIFFICULTY AND TEAM ROLES
// ============================================================================

/// Difficulty of a single technology, from its 0-10 base complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl TechDifficulty {
    /// Easy below 3, medium below 6, hard below 8, else expert.
    pub fn from_complexity(complexity: f64) -> Self {
        if complexity < 3.0 {
            TechDifficulty::Easy
        } else if complexity < 6.0 {
            TechDifficulty::Medium
        } else if complexity < 8.0 {
            TechDifficulty::Hard
        } else {
            TechDifficulty::Expert
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TechDifficulty::Easy => "easy",
            TechDifficulty::Medium => "medium",
            TechDifficulty::Hard => "hard",
            TechDifficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for TechDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A role a project needs staffed. Ordered by how early the role is usually
/// engaged, which is also the order reports list them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    ProjectManager,
    TechLead,
    UiUxDesigner,
    ContentCreator,
    FrontendDeveloper,
    BackendDeveloper,
    MobileDeveloper,
    IosDeveloper,
    AndroidDeveloper,
    PaymentSpecialist,
    DataScientist,
    DevopsEngineer,
    QaTester,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::ProjectManager => "project_manager",
            TeamRole::TechLead => "tech_lead",
            TeamRole::UiUxDesigner => "ui_ux_designer",
            TeamRole::ContentCreator => "content_creator",
            TeamRole::FrontendDeveloper => "frontend_developer",
            TeamRole::BackendDeveloper => "backend_developer",
            TeamRole::MobileDeveloper => "mobile_developer",
            TeamRole::IosDeveloper => "ios_developer",
            TeamRole::AndroidDeveloper => "android_developer",
            TeamRole::PaymentSpecialist => "payment_specialist",
            TeamRole::DataScientist => "data_scientist",
            TeamRole::DevopsEngineer => "devops_engineer",
            TeamRole::QaTester => "qa_tester",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a blended hourly rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Roster,
    Default,
}

/// Where a calibrated hours multiplier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationSource {
    /// Trimmed mean over historical projects
    History,
    /// Not enough usable history; configured default applied
    Default,
}
