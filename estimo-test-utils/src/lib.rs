//! estimo Test Utilities
//!
//! Shared test infrastructure for the estimo workspace:
//! - Proptest generators for requests, rosters and skill vectors
//! - Fixtures for the common estimation scenarios
//! - Assertions for the result invariants

pub use estimo_core::{
    DifficultyTier, EngineConfig, EstimateResult, EstimoError, FeatureTag, ProjectRequest,
    RequestError, SkillWeights, TeamMember, TeamRecommendation, TechCategory,
};
pub use estimo_knowledge::{HistoricalProject, KnowledgeBase, KnowledgeDocument, TechnologyEntry};

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Technology keys present in the built-in knowledge base.
pub const KNOWN_TECHNOLOGIES: &[&str] = &[
    "react", "vue", "angular", "node.js", "express", "django", "postgresql", "mongodb",
    "redis", "docker", "kubernetes", "stripe", "flutter", "react native", "html", "css",
];

/// Technology keys absent from every fixture knowledge base.
pub const UNKNOWN_TECHNOLOGIES: &[&str] = &["elm", "cobol", "zig", "haxe", "nim", "fortran"];

/// Requirement phrases mixing tagged, vague and unmatched wording.
pub const REQUIREMENT_PHRASES: &[&str] = &[
    "User login with OAuth",
    "Stripe checkout",
    "Product catalog with search",
    "Shopping cart",
    "Admin dashboard for orders",
    "Email notifications",
    "Realtime chat support",
    "Export monthly reports",
    "Make the brand feel premium",
    "Maybe a loyalty scheme, details TBD",
];

const DESCRIPTIONS: &[&str] = &["An online store", "A field service app", "Company website", ""];

const SKILL_KEYS: &[&str] = &["react", "node.js", "payments", "frontend", "auth", "docker"];

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating estimo inputs.

    use super::*;
    use proptest::prelude::*;

    /// A technology key, known or unknown.
    pub fn arb_technology_key() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => prop::sample::select(KNOWN_TECHNOLOGIES).prop_map(String::from),
            1 => prop::sample::select(UNKNOWN_TECHNOLOGIES).prop_map(String::from),
        ]
    }

    /// A requirement line.
    pub fn arb_requirement() -> impl Strategy<Value = String> {
        prop::sample::select(REQUIREMENT_PHRASES).prop_map(String::from)
    }

    /// A deadline within roughly two years of 2025-01-01.
    pub fn arb_deadline() -> impl Strategy<Value = NaiveDate> {
        (0i64..730).prop_map(|days| reference_date() + chrono::Duration::days(days))
    }

    /// A request with at least one technology or requirement.
    pub fn arb_project_request() -> impl Strategy<Value = ProjectRequest> {
        (
            prop::sample::select(DESCRIPTIONS),
            prop::collection::vec(arb_requirement(), 0..6),
            prop::collection::btree_set(arb_technology_key(), 0..6),
            prop::option::of(arb_deadline()),
        )
            .prop_filter("request must not be empty", |(_, reqs, techs, _)| {
                !reqs.is_empty() || !techs.is_empty()
            })
            .prop_map(|(description, requirements, technologies, deadline)| {
                let mut request = ProjectRequest::new(description)
                    .with_requirements(requirements)
                    .with_technologies(technologies);
                request.deadline = deadline;
                request
            })
    }

    /// A skill-weight vector over a small skill vocabulary.
    pub fn arb_skill_weights() -> impl Strategy<Value = SkillWeights> {
        prop::collection::btree_map(
            prop::sample::select(SKILL_KEYS).prop_map(String::from),
            0.0f64..=1.0,
            0..5,
        )
    }

    /// A roster member; roughly a quarter have no capacity.
    pub fn arb_team_member() -> impl Strategy<Value = TeamMember> {
        (
            "[a-z]{2,8}",
            arb_skill_weights(),
            prop_oneof![1 => Just(0.0f64), 3 => 0.05f64..=1.0],
            prop::option::of(40.0f64..200.0),
        )
            .prop_map(|(id, skills, capacity_fraction, hourly_rate)| TeamMember {
                id,
                skills,
                capacity_fraction,
                hourly_rate,
            })
    }

    /// A roster with unique member ids.
    pub fn arb_roster() -> impl Strategy<Value = Vec<TeamMember>> {
        prop::collection::vec(arb_team_member(), 0..8).prop_map(|members| {
            let mut seen = std::collections::BTreeSet::new();
            members
                .into_iter()
                .filter(|m| seen.insert(m.id.clone()))
                .collect()
        })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common scenarios.

    use super::*;

    /// Fixed "today" used by deterministic tests (a Wednesday).
    pub fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
    }

    fn history_entry(
        name: &str,
        description: &str,
        technologies: &[&str],
        requirements: &[&str],
        actual_hours: f64,
        estimated_hours: f64,
        difficulty_tier: DifficultyTier,
    ) -> HistoricalProject {
        HistoricalProject {
            name: Some(name.to_string()),
            description: description.to_string(),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            actual_hours,
            estimated_hours,
            difficulty_tier,
        }
    }

    fn entry(base_complexity: f64, category: TechCategory) -> TechnologyEntry {
        TechnologyEntry {
            base_complexity,
            category,
            synergy_bonus: BTreeMap::new(),
        }
    }

    /// Small, hand-checked knowledge document (version 7) with enough history
    /// to calibrate.
    pub fn sample_document() -> KnowledgeDocument {
        let mut technologies = BTreeMap::new();
        let mut react = entry(6.0, TechCategory::Frontend);
        react.synergy_bonus.insert("node.js".to_string(), 0.9);
        technologies.insert("react".to_string(), react);
        technologies.insert("node.js".to_string(), entry(5.0, TechCategory::Backend));
        technologies.insert("postgresql".to_string(), entry(5.0, TechCategory::Data));
        technologies.insert("stripe".to_string(), entry(4.5, TechCategory::Other));
        technologies.insert("html".to_string(), entry(1.0, TechCategory::Frontend));
        technologies.insert("css".to_string(), entry(2.0, TechCategory::Frontend));
        technologies.insert("flutter".to_string(), entry(6.0, TechCategory::Mobile));

        KnowledgeDocument {
            version: 7,
            technologies,
            history: vec![
                history_entry(
                    "Shop",
                    "Online store with catalog and checkout",
                    &["react", "node.js", "postgresql"],
                    &["Product catalog", "Stripe checkout"],
                    240.0,
                    200.0,
                    DifficultyTier::Medium,
                ),
                history_entry(
                    "Landing",
                    "Marketing website",
                    &["html", "css"],
                    &[],
                    30.0,
                    24.0,
                    DifficultyTier::Trivial,
                ),
                history_entry(
                    "Booking app",
                    "Mobile booking app with login",
                    &["flutter", "node.js"],
                    &["User login"],
                    150.0,
                    120.0,
                    DifficultyTier::Medium,
                ),
                history_entry(
                    "Storefront",
                    "Storefront with payments",
                    &["react", "stripe"],
                    &["Stripe checkout"],
                    190.0,
                    160.0,
                    DifficultyTier::Medium,
                ),
            ],
        }
    }

    /// Validated [`sample_document`].
    pub fn sample_knowledge_base() -> KnowledgeBase {
        match KnowledgeBase::from_document(sample_document()) {
            Ok(kb) => kb,
            Err(e) => panic!("sample knowledge base must validate: {}", e),
        }
    }

    /// [`sample_document`] with `react` at complexity 15, bumped to version 8.
    pub fn out_of_range_document() -> KnowledgeDocument {
        let mut document = sample_document();
        document.version = 8;
        if let Some(react) = document.technologies.get_mut("react") {
            react.base_complexity = 15.0;
        }
        document
    }

    /// Four-technology e-commerce request with five typical requirements.
    pub fn ecommerce_request() -> ProjectRequest {
        ProjectRequest::new("E-commerce store for a clothing brand")
            .with_technologies(["react", "node.js", "postgresql", "stripe"])
            .with_requirements([
                "User registration and login",
                "Product catalog with search and filters",
                "Shopping cart",
                "Stripe checkout and payment processing",
                "Admin dashboard for orders and inventory",
            ])
    }

    /// One available generalist and one unavailable react expert.
    pub fn split_capacity_roster() -> Vec<TeamMember> {
        vec![
            TeamMember::new("bob", 0.5).with_skill("react", 0.3).with_hourly_rate(80.0),
            TeamMember::new("alice", 0.0).with_skill("react", 0.9).with_hourly_rate(120.0),
        ]
    }

    /// A mixed roster for plan tests.
    pub fn sample_roster() -> Vec<TeamMember> {
        vec![
            TeamMember::new("ana", 1.0)
                .with_skill("react", 0.9)
                .with_skill("frontend", 0.8)
                .with_skill("payments", 0.4)
                .with_hourly_rate(90.0),
            TeamMember::new("ben", 0.5)
                .with_skill("node.js", 0.8)
                .with_skill("postgresql", 0.7)
                .with_skill("backend", 0.9)
                .with_hourly_rate(100.0),
            TeamMember::new("cleo", 0.0)
                .with_skill("react", 1.0)
                .with_skill("stripe", 1.0)
                .with_hourly_rate(150.0),
            TeamMember::new("dev", 0.25).with_skill("css", 0.6),
        ]
    }
}

pub use fixtures::reference_date;

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for estimate and ranking invariants.

    use super::*;

    /// Hours are non-negative and ordered.
    pub fn assert_hours_ordered(result: &EstimateResult) {
        let h = &result.hours;
        assert!(h.optimistic >= 0.0, "optimistic hours negative: {:?}", h);
        assert!(
            h.optimistic <= h.realistic && h.realistic <= h.pessimistic,
            "hours not ordered: {:?}",
            h
        );
    }

    /// Confidence within [0.1, 0.95].
    pub fn assert_confidence_bounded(result: &EstimateResult) {
        assert!(
            (0.1..=0.95).contains(&result.confidence),
            "confidence out of range: {}",
            result.confidence
        );
    }

    /// No member without capacity precedes one with capacity; ranks are 1..=n.
    pub fn assert_capacity_first(ranking: &[TeamRecommendation]) {
        let mut seen_unavailable = false;
        for (i, rec) in ranking.iter().enumerate() {
            assert_eq!(rec.rank, i + 1, "rank mismatch at {}", i);
            if !rec.capacity_ok {
                seen_unavailable = true;
            } else {
                assert!(!seen_unavailable, "{} ranked below an unavailable member", rec.member_id);
            }
            assert!(
                (0.0..=1.0).contains(&rec.skill_match_score),
                "score out of range: {}",
                rec.skill_match_score
            );
        }
    }

    /// The error is an empty-request rejection.
    pub fn assert_empty_request<T: std::fmt::Debug>(result: &Result<T, EstimoError>) {
        match result {
            Err(EstimoError::Request(RequestError::Empty)) => {}
            other => panic!("Expected empty request error, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_knowledge_base_validates() {
        let kb = fixtures::sample_knowledge_base();
        assert_eq!(kb.version(), 7);
        assert_eq!(kb.history().len(), 4);
    }

    #[test]
    fn test_out_of_range_document_is_rejected() {
        assert!(KnowledgeBase::from_document(fixtures::out_of_range_document()).is_err());
    }

    #[test]
    fn test_known_technologies_are_in_builtin() {
        let kb = KnowledgeBase::builtin().unwrap();
        for tech in KNOWN_TECHNOLOGIES {
            assert!(kb.is_known(tech), "{}", tech);
        }
        for tech in UNKNOWN_TECHNOLOGIES {
            assert!(!kb.is_known(tech), "{}", tech);
        }
    }
}
