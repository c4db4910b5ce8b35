//! Technology complexity and per-category hour split.

use estimo_core::{EngineConfig, SkillAllocation, TechCategory, TechDifficulty, TechnologyAssessment};
use estimo_knowledge::KnowledgeBase;
use std::collections::{BTreeMap, BTreeSet};

/// Assess each requested technology, in key order.
///
/// Unknown technologies land in `other` at the configured default complexity.
pub fn assess_technologies(
    kb: &KnowledgeBase,
    config: &EngineConfig,
    technologies: &BTreeSet<String>,
) -> Vec<TechnologyAssessment> {
    technologies
        .iter()
        .map(|technology| {
            let (complexity, category, known) = match kb.technology(technology) {
                Some(profile) => (profile.base_complexity, profile.category, true),
                None => (config.default_unknown_complexity, TechCategory::Other, false),
            };
            TechnologyAssessment {
                technology: technology.clone(),
                complexity,
                difficulty: TechDifficulty::from_complexity(complexity),
                category,
                known,
            }
        })
        .collect()
}

/// Split `realistic_hours` across categories in proportion to their summed
/// complexity. The last category takes the remainder so the hours sum exactly
/// to the total. When every technology has zero complexity, categories are
/// weighted by technology count instead. No technologies, no breakdown.
pub fn skill_breakdown(
    assessments: &[TechnologyAssessment],
    realistic_hours: f64,
) -> Vec<SkillAllocation> {
    let mut groups: BTreeMap<TechCategory, (f64, Vec<String>)> = BTreeMap::new();
    for assessment in assessments {
        let group = groups.entry(assessment.category).or_default();
        group.0 += assessment.complexity.max(0.0);
        group.1.push(assessment.technology.clone());
    }
    if groups.is_empty() {
        return Vec::new();
    }

    let total_complexity: f64 = groups.values().map(|(c, _)| c).sum();
    let by_count = total_complexity <= 0.0;
    let total_weight = if by_count {
        assessments.len() as f64
    } else {
        total_complexity
    };

    let last = groups.len() - 1;
    let mut allocated = 0.0;
    groups
        .into_iter()
        .enumerate()
        .map(|(i, (category, (complexity, mut technologies)))| {
            let weight = if by_count {
                technologies.len() as f64
            } else {
                complexity
            };
            let share = weight / total_weight;
            let hours = if i == last {
                (realistic_hours - allocated).max(0.0)
            } else {
                share * realistic_hours
            };
            allocated += hours;
            technologies.sort();
            SkillAllocation {
                category,
                share,
                hours,
                technologies,
            }
        })
        .collect()
}
