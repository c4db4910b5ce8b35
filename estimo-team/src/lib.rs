//! estimo Team - Team Matcher
//!
//! Ranks roster members against a weighted required-skill vector. Members
//! with capacity always rank above members without it; within each group the
//! order is skill match descending, then member id ascending.

use estimo_core::{normalize_key, RequestError, SkillWeights, TeamMember, TeamRecommendation};
use std::cmp::Ordering;
use std::collections::BTreeSet;

// ============================================================================
// ROSTER VALIDATION
// ============================================================================

/// Member ids must be non-blank and unique for the ranking to be a total order.
/// A member's skill keys must stay distinct after normalization, otherwise
/// "React" and "react" would compete for the same dimension.
pub fn validate_roster(roster: &[TeamMember]) -> Result<(), RequestError> {
    let mut seen = BTreeSet::new();
    for member in roster {
        let mut skills = BTreeSet::new();
        for skill in member.skills.keys() {
            let key = normalize_key(skill);
            if !key.is_empty() && !skills.insert(key) {
                return Err(RequestError::InvalidField {
                    field: "roster.skills".to_string(),
                    reason: format!("member {} lists skill {} more than once", member.id, skill.trim()),
                });
            }
        }
        if member.id.trim().is_empty() {
            return Err(RequestError::InvalidField {
                field: "roster.id".to_string(),
                reason: "member id must not be blank".to_string(),
            });
        }
        if !seen.insert(member.id.as_str()) {
            return Err(RequestError::InvalidField {
                field: "roster.id".to_string(),
                reason: format!("duplicate member id {}", member.id),
            });
        }
    }
    Ok(())
}

// ============================================================================
// SKILL MATCHING
// ============================================================================

/// Clamp a roster or weight value into [0, 1]; non-finite values become 0.
fn unit_interval(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A member's proficiencies keyed by normalized skill, clamped into [0, 1].
/// Blank keys are dropped; colliding keys keep the highest proficiency.
pub fn member_skills(member: &TeamMember) -> SkillWeights {
    let mut skills = SkillWeights::new();
    for (name, proficiency) in &member.skills {
        let key = normalize_key(name);
        if key.is_empty() {
            continue;
        }
        let proficiency = unit_interval(*proficiency);
        let entry = skills.entry(key).or_insert(proficiency);
        *entry = entry.max(proficiency);
    }
    skills
}

/// Cosine similarity between the required vector and a member's proficiency
/// vector, restricted to the required dimensions.
///
/// Skills the member lacks count as 0. An empty (or all-zero) requirement
/// matches everybody with 1.0.
pub fn skill_match_score(required: &SkillWeights, member: &TeamMember) -> f64 {
    cosine_similarity(required, &member_skills(member))
}

/// `required` and `proficiencies` must both be keyed by normalized skill.
fn cosine_similarity(required: &SkillWeights, proficiencies: &SkillWeights) -> f64 {
    let mut dot_product = 0.0f64;
    let mut norm_required = 0.0f64;
    let mut norm_member = 0.0f64;

    for (skill, weight) in required {
        let weight = unit_interval(*weight);
        let proficiency = proficiencies.get(skill).copied().unwrap_or(0.0);
        dot_product += weight * proficiency;
        norm_required += weight * weight;
        norm_member += proficiency * proficiency;
    }

    if norm_required == 0.0 {
        return 1.0;
    }
    if norm_member == 0.0 {
        return 0.0;
    }

    (dot_product / (norm_required.sqrt() * norm_member.sqrt())).clamp(0.0, 1.0)
}

/// Rank the whole roster: capacity first, then score, then id.
pub fn rank_roster(required: &SkillWeights, roster: &[TeamMember]) -> Vec<TeamRecommendation> {
    let required: SkillWeights = required
        .iter()
        .map(|(skill, weight)| (normalize_key(skill), *weight))
        .filter(|(skill, _)| !skill.is_empty())
        .collect();

    let mut ranked: Vec<TeamRecommendation> = roster
        .iter()
        .map(|member| {
            let capacity = unit_interval(member.capacity_fraction);
            if capacity != member.capacity_fraction {
                tracing::warn!(
                    member_id = %member.id,
                    capacity_fraction = member.capacity_fraction,
                    "Clamped capacity fraction into [0, 1]"
                );
            }
            if member.skills.values().any(|p| unit_interval(*p) != *p) {
                tracing::warn!(member_id = %member.id, "Clamped proficiencies into [0, 1]");
            }
            TeamRecommendation {
                member_id: member.id.clone(),
                skill_match_score: cosine_similarity(&required, &member_skills(member)),
                capacity_ok: capacity > 0.0,
                rank: 0,
            }
        })
        .collect();

    ranked.sort_by(compare_recommendations);
    for (i, rec) in ranked.iter_mut().enumerate() {
        rec.rank = i + 1;
    }
    ranked
}

fn compare_recommendations(a: &TeamRecommendation, b: &TeamRecommendation) -> Ordering {
    b.capacity_ok
        .cmp(&a.capacity_ok)
        .then_with(|| b.skill_match_score.total_cmp(&a.skill_match_score))
        .then_with(|| a.member_id.cmp(&b.member_id))
}

/// Recommend team members.
///
/// Only members with capacity are returned; when nobody has capacity the full
/// roster is returned with `capacity_ok = false`. An empty roster yields an
/// empty list.
pub fn match_team(required: &SkillWeights, roster: &[TeamMember]) -> Vec<TeamRecommendation> {
    let ranked = rank_roster(required, roster);
    let available = ranked.iter().filter(|r| r.capacity_ok).count();

    tracing::debug!(
        roster = roster.len(),
        available,
        required = required.len(),
        "Matched team"
    );

    if available == 0 {
        return ranked;
    }
    ranked.into_iter().filter(|r| r.capacity_ok).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use estimo_test_utils::fixtures::split_capacity_roster;

    fn weights(items: &[(&str, f64)]) -> SkillWeights {
        items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_validate_roster() {
        assert!(validate_roster(&split_capacity_roster()).is_ok());
        assert!(validate_roster(&[]).is_ok());

        let duplicate = vec![TeamMember::new("a", 1.0), TeamMember::new("a", 0.5)];
        assert!(matches!(
            validate_roster(&duplicate),
            Err(RequestError::InvalidField { reason, .. }) if reason.contains("duplicate")
        ));
        assert!(validate_roster(&[TeamMember::new("  ", 1.0)]).is_err());
    }

    #[test]
    fn test_validate_roster_rejects_colliding_skill_keys() {
        let member = TeamMember::new("a", 1.0)
            .with_skill("React", 0.2)
            .with_skill("react", 0.9);
        assert!(matches!(
            validate_roster(&[member]),
            Err(RequestError::InvalidField { field, .. }) if field == "roster.skills"
        ));

        let distinct = TeamMember::new("a", 1.0)
            .with_skill("React", 0.2)
            .with_skill("react native", 0.9);
        assert!(validate_roster(&[distinct]).is_ok());
    }

    #[test]
    fn test_colliding_skill_keys_keep_highest_proficiency() {
        let member = TeamMember::new("a", 1.0)
            .with_skill("React", 0.2)
            .with_skill(" react", 0.9)
            .with_skill("  ", 1.0);
        let skills = member_skills(&member);
        assert_eq!(skills.len(), 1);
        assert_eq!(skills.get("react"), Some(&0.9));

        let reordered = TeamMember::new("a", 1.0)
            .with_skill("react", 0.9)
            .with_skill("REACT", 0.2);
        assert_eq!(member_skills(&reordered), skills);
    }

    #[test]
    fn test_identical_profile_scores_one() {
        let member = TeamMember::new("a", 1.0)
            .with_skill("react", 0.5)
            .with_skill("node.js", 0.5);
        let score = skill_match_score(&weights(&[("react", 1.0), ("node.js", 1.0)]), &member);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_irrelevant_skills_do_not_penalize() {
        let focused = TeamMember::new("a", 1.0).with_skill("react", 0.8);
        let broad = TeamMember::new("b", 1.0)
            .with_skill("react", 0.8)
            .with_skill("cobol", 1.0)
            .with_skill("fortran", 1.0);
        let required = weights(&[("react", 1.0)]);
        assert_eq!(
            skill_match_score(&required, &focused),
            skill_match_score(&required, &broad)
        );
    }

    #[test]
    fn test_missing_skills_score_zero() {
        let member = TeamMember::new("a", 1.0).with_skill("php", 1.0);
        assert_eq!(skill_match_score(&weights(&[("react", 1.0)]), &member), 0.0);
    }

    #[test]
    fn test_partial_coverage() {
        let member = TeamMember::new("a", 1.0).with_skill("react", 1.0);
        let score = skill_match_score(&weights(&[("react", 1.0), ("node.js", 1.0)]), &member);
        assert!((score - 1.0 / 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_skill_keys_normalized() {
        let member = TeamMember::new("a", 1.0).with_skill(" React ", 0.7);
        let score = skill_match_score(&weights(&[("react", 1.0)]), &member);
        assert!((score - 1.0).abs() < 1e-12);
        let ranked = rank_roster(&weights(&[("REACT", 1.0)]), &[member]);
        assert!((ranked[0].skill_match_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_required_skills_everyone_scores_one() {
        let roster = vec![
            TeamMember::new("zed", 1.0),
            TeamMember::new("amy", 0.0).with_skill("react", 1.0),
            TeamMember::new("bea", 0.2),
        ];
        let ranked = rank_roster(&SkillWeights::new(), &roster);
        assert!(ranked.iter().all(|r| r.skill_match_score == 1.0));
        let ids: Vec<&str> = ranked.iter().map(|r| r.member_id.as_str()).collect();
        assert_eq!(ids, vec!["bea", "zed", "amy"]);
    }

    #[test]
    fn test_unavailable_expert_ranks_after_available_member() {
        let roster = split_capacity_roster();
        let required = weights(&[("react", 1.0)]);

        let ranked = rank_roster(&required, &roster);
        assert_eq!(ranked[0].member_id, "bob");
        assert!(ranked[0].capacity_ok);
        assert_eq!(ranked[1].member_id, "alice");
        assert!(!ranked[1].capacity_ok);
        assert_eq!(ranked[1].rank, 2);

        let matched = match_team(&required, &roster);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].member_id, "bob");
        assert_eq!(matched[0].rank, 1);
    }

    #[test]
    fn test_nobody_available_returns_full_roster() {
        let roster = vec![
            TeamMember::new("b", 0.0).with_skill("react", 0.2),
            TeamMember::new("a", 0.0).with_skill("react", 0.9),
        ];
        let matched = match_team(&weights(&[("react", 1.0)]), &roster);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|r| !r.capacity_ok));
    }

    #[test]
    fn test_ties_broken_by_member_id() {
        let roster = vec![
            TeamMember::new("carol", 1.0).with_skill("react", 0.5),
            TeamMember::new("alex", 0.4).with_skill("react", 0.9),
        ];
        let matched = match_team(&weights(&[("react", 1.0)]), &roster);
        let ids: Vec<&str> = matched.iter().map(|r| r.member_id.as_str()).collect();
        assert_eq!(ids, vec!["alex", "carol"]);
    }

    #[test]
    fn test_empty_roster_yields_empty_list() {
        assert!(match_team(&weights(&[("react", 1.0)]), &[]).is_empty());
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let member = TeamMember {
            id: "x".to_string(),
            skills: weights(&[("react", 4.0)]),
            capacity_fraction: 3.0,
            hourly_rate: None,
        };
        let negative = TeamMember::new("y", -1.0).with_skill("react", 1.0);
        let ranked = rank_roster(&weights(&[("react", 1.0)]), &[member, negative]);
        assert!((ranked[0].skill_match_score - 1.0).abs() < 1e-12);
        assert!(ranked[0].capacity_ok);
        assert!(!ranked[1].capacity_ok);
    }
}
