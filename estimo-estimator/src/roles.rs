//! Team role recommendation.
//!
//! Roles come from three places: the project type's typical staffing, the
//! requested technologies, and the difficulty tier.

use estimo_core::{DifficultyTier, ProjectType, TeamRole, TechCategory};
use estimo_knowledge::KnowledgeBase;
use std::collections::BTreeSet;

/// Roles every project of a type needs.
pub fn project_type_roles(project_type: ProjectType) -> &'static [TeamRole] {
    match project_type {
        ProjectType::Website => &[
            TeamRole::FrontendDeveloper,
            TeamRole::UiUxDesigner,
            TeamRole::ContentCreator,
        ],
        ProjectType::WebApp => &[
            TeamRole::FrontendDeveloper,
            TeamRole::BackendDeveloper,
            TeamRole::UiUxDesigner,
            TeamRole::ProjectManager,
        ],
        ProjectType::MobileApp => &[
            TeamRole::MobileDeveloper,
            TeamRole::BackendDeveloper,
            TeamRole::UiUxDesigner,
            TeamRole::QaTester,
        ],
        ProjectType::ECommerce => &[
            TeamRole::FrontendDeveloper,
            TeamRole::BackendDeveloper,
            TeamRole::UiUxDesigner,
            TeamRole::PaymentSpecialist,
        ],
    }
}

/// Technologies that call for a more specific role than their category.
const TECHNOLOGY_ROLES: &[(&str, TeamRole)] = &[
    ("ios", TeamRole::IosDeveloper),
    ("swift", TeamRole::IosDeveloper),
    ("android", TeamRole::AndroidDeveloper),
    ("kotlin", TeamRole::AndroidDeveloper),
    ("figma", TeamRole::UiUxDesigner),
    ("sketch", TeamRole::UiUxDesigner),
    ("tensorflow", TeamRole::DataScientist),
    ("pytorch", TeamRole::DataScientist),
];

fn category_role(category: TechCategory) -> Option<TeamRole> {
    match category {
        TechCategory::Frontend => Some(TeamRole::FrontendDeveloper),
        TechCategory::Backend => Some(TeamRole::BackendDeveloper),
        TechCategory::Mobile => Some(TeamRole::MobileDeveloper),
        TechCategory::Infra => Some(TeamRole::DevopsEngineer),
        TechCategory::Data | TechCategory::Other => None,
    }
}

/// Role a known technology asks for, if any. Unknown technologies ask for none.
pub fn technology_role(kb: &KnowledgeBase, technology: &str) -> Option<TeamRole> {
    TECHNOLOGY_ROLES
        .iter()
        .find(|(key, _)| *key == technology)
        .map(|(_, role)| *role)
        .or_else(|| kb.technology(technology).and_then(|p| category_role(p.category)))
}

/// Recommended roles in `TeamRole` order, without duplicates.
///
/// High-tier projects add a project manager and a QA tester; extreme ones
/// also a tech lead.
pub fn recommend_roles(
    kb: &KnowledgeBase,
    project_type: ProjectType,
    technologies: &BTreeSet<String>,
    tier: DifficultyTier,
) -> Vec<TeamRole> {
    let mut roles: BTreeSet<TeamRole> = project_type_roles(project_type).iter().copied().collect();
    roles.extend(technologies.iter().filter_map(|t| technology_role(kb, t)));

    if tier >= DifficultyTier::High {
        roles.insert(TeamRole::ProjectManager);
        roles.insert(TeamRole::QaTester);
    }
    if tier == DifficultyTier::Extreme {
        roles.insert(TeamRole::TechLead);
    }
    roles.into_iter().collect()
}
