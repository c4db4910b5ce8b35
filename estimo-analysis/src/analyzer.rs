//! Requirement Analyzer
//!
//! Turns free text, requirement lines and technology keys into weighted
//! feature tags, a scope-ambiguity signal and the technology risks the
//! estimator reports. Deterministic: same input and knowledge base give the
//! same analysis.

use crate::keywords::{
    is_stop_word, is_vague_term, tag_for_keyword, COMMERCE_TECHNOLOGIES, PROJECT_TYPE_KEYWORDS,
};
use estimo_core::{
    normalize_key, EngineConfig, FeatureTag, ProjectRequest, ProjectType, RequirementTag,
    RiskFactor, RiskKind, Severity, SkillWeights, TechCategory,
};
use estimo_knowledge::KnowledgeBase;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weight given to a technology category in the skill vector.
const CATEGORY_SKILL_WEIGHT: f64 = 0.5;

/// Split text into lowercase word tokens with stop-words removed.
///
/// Hyphenated words are joined ("real-time" becomes "realtime"); every other
/// non-alphanumeric character separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            current.push(ch);
        } else if ch == '-' && !current.is_empty() {
            continue;
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens.retain(|token| !is_stop_word(token));
    tokens
}

/// Everything the scorer and estimator need to know about a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementAnalysis {
    /// One entry per matched tag, in tag order
    pub tags: Vec<RequirementTag>,
    /// Normalized technology keys
    pub technologies: BTreeSet<String>,
    pub unknown_technologies: BTreeSet<String>,
    /// Categories of the known technologies
    pub categories: BTreeSet<TechCategory>,
    /// In [0, ambiguity_cap]
    pub scope_ambiguity: f64,
    pub unmatched_requirements: usize,
    pub vague_terms: usize,
    pub project_type: ProjectType,
    /// technology_unknown and scope_ambiguity risks, in that order
    pub risks: Vec<RiskFactor>,
}

impl RequirementAnalysis {
    /// Share of requested technologies missing from the knowledge base.
    pub fn unknown_fraction(&self) -> f64 {
        if self.technologies.is_empty() {
            0.0
        } else {
            self.unknown_technologies.len() as f64 / self.technologies.len() as f64
        }
    }

    /// Skill keys: technologies, their categories and matched tags.
    pub fn required_skills(&self) -> BTreeSet<String> {
        self.skill_weights().into_keys().collect()
    }

    /// Skill-weight vector for team matching: technologies weigh 1.0,
    /// categories 0.5, tags their own weight. Collisions keep the larger weight.
    pub fn skill_weights(&self) -> SkillWeights {
        let mut weights = SkillWeights::new();
        let mut put = |key: String, weight: f64| {
            let entry = weights.entry(key).or_insert(0.0);
            if weight > *entry {
                *entry = weight;
            }
        };

        for technology in &self.technologies {
            put(technology.clone(), 1.0);
        }
        for category in &self.categories {
            put(category.as_str().to_string(), CATEGORY_SKILL_WEIGHT);
        }
        for tag in &self.tags {
            put(tag.tag.as_str().to_string(), tag.weight);
        }
        weights
    }
}

/// Keyword-driven requirement analyzer bound to one knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct RequirementAnalyzer<'a> {
    kb: &'a KnowledgeBase,
    config: &'a EngineConfig,
}

impl<'a> RequirementAnalyzer<'a> {
    pub fn new(kb: &'a KnowledgeBase, config: &'a EngineConfig) -> Self {
        Self { kb, config }
    }

    /// Known technology keys as token sequences, so "node.js" matches the
    /// tokens `node`, `js` in requirement text.
    fn technology_phrases(&self) -> Vec<Vec<String>> {
        self.kb
            .technologies()
            .map(|profile| tokenize(&profile.name))
            .filter(|phrase| !phrase.is_empty())
            .collect()
    }

    /// Analyze a request.
    pub fn analyze_request(&self, request: &ProjectRequest) -> RequirementAnalysis {
        self.analyze(
            &request.description,
            &request.requirements,
            &request.normalized_technologies(),
        )
    }

    /// Analyze a description, its requirement lines and technology keys.
    pub fn analyze(
        &self,
        description: &str,
        requirements: &[String],
        technologies: &BTreeSet<String>,
    ) -> RequirementAnalysis {
        let technologies: BTreeSet<String> = technologies
            .iter()
            .map(|t| normalize_key(t))
            .filter(|t| !t.is_empty())
            .collect();

        let mut occurrences: BTreeMap<FeatureTag, usize> = BTreeMap::new();
        let mut count = |tokens: &[String]| -> bool {
            let mut matched = false;
            for token in tokens {
                if let Some(tag) = tag_for_keyword(token) {
                    *occurrences.entry(tag).or_insert(0) += 1;
                    matched = true;
                }
            }
            matched
        };

        let technology_phrases = self.technology_phrases();
        let description_tokens = tokenize(description);
        count(&description_tokens);
        let mut vague_terms = description_tokens.iter().filter(|t| is_vague_term(t)).count();

        let mut unmatched_requirements = 0usize;
        let mut requirement_tokens = Vec::new();
        for requirement in requirements {
            let tokens = tokenize(requirement);
            if tokens.is_empty() {
                continue;
            }
            vague_terms += tokens.iter().filter(|t| is_vague_term(t)).count();
            let tagged = count(&tokens);
            let names_technology = technology_phrases
                .iter()
                .any(|phrase| tokens.windows(phrase.len()).any(|window| window == phrase.as_slice()));
            if !tagged && !names_technology {
                unmatched_requirements += 1;
            }
            requirement_tokens.extend(tokens);
        }

        for technology in &technologies {
            count(&tokenize(technology));
        }

        let tags: Vec<RequirementTag> = occurrences
            .into_iter()
            .map(|(tag, n)| RequirementTag {
                tag,
                weight: (n as f64 / self.config.tag_occurrence_normalizer).min(1.0),
            })
            .collect();

        let raw_ambiguity = unmatched_requirements as f64 * self.config.ambiguity_per_unmatched
            + vague_terms as f64 * self.config.ambiguity_per_vague_term;
        let scope_ambiguity = raw_ambiguity.min(self.config.ambiguity_cap);

        let unknown_technologies: BTreeSet<String> = technologies
            .iter()
            .filter(|t| !self.kb.is_known(t))
            .cloned()
            .collect();
        let categories: BTreeSet<TechCategory> = technologies
            .iter()
            .filter_map(|t| self.kb.technology(t))
            .map(|profile| profile.category)
            .collect();

        let project_type = detect_project_type(
            description_tokens.iter().chain(requirement_tokens.iter()),
            &technologies,
            &categories,
        );

        let mut risks = Vec::new();
        let unknown_fraction = if technologies.is_empty() {
            0.0
        } else {
            unknown_technologies.len() as f64 / technologies.len() as f64
        };
        let unknown_severity = if unknown_fraction > 0.5 {
            Severity::High
        } else {
            Severity::Medium
        };
        for technology in &unknown_technologies {
            risks.push(RiskFactor::new(
                RiskKind::TechnologyUnknown,
                unknown_severity,
                format!(
                    "Technology '{}' is not in the knowledge base; assuming complexity {:.1}",
                    technology, self.config.default_unknown_complexity
                ),
            ));
        }
        if scope_ambiguity > 0.0 {
            let severity = if scope_ambiguity < 0.3 {
                Severity::Low
            } else if scope_ambiguity < 0.6 {
                Severity::Medium
            } else {
                Severity::High
            };
            risks.push(RiskFactor::new(
                RiskKind::ScopeAmbiguity,
                severity,
                format!(
                    "{} requirement(s) matched no known feature and {} vague term(s) found",
                    unmatched_requirements, vague_terms
                ),
            ));
        }

        tracing::debug!(
            tags = tags.len(),
            unknown = unknown_technologies.len(),
            scope_ambiguity,
            %project_type,
            "Requirements analyzed"
        );

        RequirementAnalysis {
            tags,
            technologies,
            unknown_technologies,
            categories,
            scope_ambiguity,
            unmatched_requirements,
            vague_terms,
            project_type,
            risks,
        }
    }
}

fn detect_project_type<'t>(
    tokens: impl Iterator<Item = &'t String>,
    technologies: &BTreeSet<String>,
    categories: &BTreeSet<TechCategory>,
) -> ProjectType {
    let tokens: BTreeSet<&str> = tokens.map(String::as_str).collect();
    for (project_type, keywords) in PROJECT_TYPE_KEYWORDS {
        if keywords.iter().any(|k| tokens.contains(k)) {
            return *project_type;
        }
    }

    if categories.contains(&TechCategory::Mobile) {
        ProjectType::MobileApp
    } else if COMMERCE_TECHNOLOGIES
        .iter()
        .any(|t| technologies.contains(*t))
    {
        ProjectType::ECommerce
    } else if categories.contains(&TechCategory::Frontend)
        || categories.contains(&TechCategory::Backend)
    {
        ProjectType::WebApp
    } else {
        ProjectType::Website
    }
}

// ============================================================================
// TESTS
// ============================================================================
