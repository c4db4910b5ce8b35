//! Built-in default knowledge base
//!
//! Used when no knowledge base file is configured. Complexities are on the
//! 0-10 scale; synergies cover a handful of common pairings.

use crate::{HistoricalProject, KnowledgeDocument, TechnologyEntry};
use estimo_core::{DifficultyTier, TechCategory};
use std::collections::BTreeMap;

/// (key, base_complexity, category)
const TECHNOLOGIES: &[(&str, f64, TechCategory)] = &[
    // Frontend
    ("html", 1.0, TechCategory::Frontend),
    ("css", 2.0, TechCategory::Frontend),
    ("javascript", 4.0, TechCategory::Frontend),
    ("typescript", 4.5, TechCategory::Frontend),
    ("react", 6.0, TechCategory::Frontend),
    ("vue", 5.0, TechCategory::Frontend),
    ("angular", 7.0, TechCategory::Frontend),
    // Backend
    ("node.js", 5.0, TechCategory::Backend),
    ("express", 4.0, TechCategory::Backend),
    ("django", 6.0, TechCategory::Backend),
    ("flask", 4.0, TechCategory::Backend),
    ("fastapi", 5.0, TechCategory::Backend),
    ("python", 5.0, TechCategory::Backend),
    ("java", 6.0, TechCategory::Backend),
    ("c#", 6.0, TechCategory::Backend),
    ("php", 4.0, TechCategory::Backend),
    ("ruby", 5.0, TechCategory::Backend),
    ("go", 7.0, TechCategory::Backend),
    // Data
    ("mysql", 4.0, TechCategory::Data),
    ("postgresql", 5.0, TechCategory::Data),
    ("mongodb", 5.0, TechCategory::Data),
    ("redis", 4.0, TechCategory::Data),
    ("tensorflow", 8.0, TechCategory::Data),
    ("pytorch", 8.0, TechCategory::Data),
    // Infra
    ("docker", 6.0, TechCategory::Infra),
    ("kubernetes", 8.0, TechCategory::Infra),
    ("aws", 7.0, TechCategory::Infra),
    ("azure", 7.0, TechCategory::Infra),
    ("gcp", 7.0, TechCategory::Infra),
    // Mobile
    ("ios", 7.0, TechCategory::Mobile),
    ("android", 7.0, TechCategory::Mobile),
    ("react native", 6.0, TechCategory::Mobile),
    ("flutter", 6.0, TechCategory::Mobile),
    ("swift", 7.0, TechCategory::Mobile),
    ("kotlin", 7.0, TechCategory::Mobile),
    // Other
    ("wordpress", 3.0, TechCategory::Other),
    ("shopify", 3.0, TechCategory::Other),
    ("stripe", 4.5, TechCategory::Other),
    ("paypal", 4.0, TechCategory::Other),
    ("figma", 3.0, TechCategory::Other),
    ("blockchain", 9.0, TechCategory::Other),
];

/// (technology, partner, multiplier). Below 1 is a well-trodden pairing,
/// above 1 a stack that fights itself.
const SYNERGIES: &[(&str, &str, f64)] = &[
    ("react", "node.js", 0.9),
    ("express", "node.js", 0.8),
    ("django", "postgresql", 0.9),
    ("react native", "react", 0.85),
    ("docker", "kubernetes", 0.9),
    ("react", "angular", 1.3),
    ("react", "vue", 1.2),
];

fn history() -> Vec<HistoricalProject> {
    let project = |name: &str,
                   description: &str,
                   technologies: &[&str],
                   actual_hours: f64,
                   estimated_hours: f64,
                   difficulty_tier: DifficultyTier| HistoricalProject {
        name: Some(name.to_string()),
        description: description.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        requirements: vec![],
        actual_hours,
        estimated_hours,
        difficulty_tier,
    };

    vec![
        project(
            "E-commerce Website",
            "Online store with product catalog, cart and stripe checkout",
            &["react", "node.js", "postgresql"],
            180.0,
            160.0,
            DifficultyTier::Medium,
        ),
        project(
            "Marketing Site",
            "Responsive marketing website with contact form",
            &["html", "css", "wordpress"],
            45.0,
            40.0,
            DifficultyTier::Low,
        ),
        project(
            "Field Service App",
            "Mobile app with offline mode and push notifications",
            &["flutter", "fastapi", "postgresql"],
            260.0,
            200.0,
            DifficultyTier::High,
        ),
        project(
            "Analytics Dashboard",
            "Web dashboard with reporting and user login",
            &["vue", "django", "postgresql", "redis"],
            210.0,
            190.0,
            DifficultyTier::Medium,
        ),
    ]
}

/// The built-in document, version 1.
pub fn builtin_document() -> KnowledgeDocument {
    let mut technologies: BTreeMap<String, TechnologyEntry> = TECHNOLOGIES
        .iter()
        .map(|(name, complexity, category)| {
            (
                name.to_string(),
                TechnologyEntry {
                    base_complexity: *complexity,
                    category: *category,
                    synergy_bonus: BTreeMap::new(),
                },
            )
        })
        .collect();

    for (tech, partner, multiplier) in SYNERGIES {
        if let Some(entry) = technologies.get_mut(*tech) {
            entry.synergy_bonus.insert(partner.to_string(), *multiplier);
        }
    }

    KnowledgeDocument {
        version: 1,
        technologies,
        history: history(),
    }
}
