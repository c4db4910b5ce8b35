//! Complexity Scorer
//!
//! Maps weighted feature tags and technology keys to a unitless, non-negative
//! base score using the knowledge base.

use crate::analyzer::RequirementAnalysis;
use crate::keywords::tag_base_cost;
use estimo_core::{normalize_key, EngineConfig, RequirementTag};
use estimo_knowledge::KnowledgeBase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Components of a base score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Σ tag weight × tag base cost
    pub tag_score: f64,
    /// Technology complexities after synergy adjustment
    pub technology_score: f64,
    /// Scope ambiguity × ambiguity cost
    pub ambiguity_score: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ComplexityScorer<'a> {
    kb: &'a KnowledgeBase,
    config: &'a EngineConfig,
}

impl<'a> ComplexityScorer<'a> {
    pub fn new(kb: &'a KnowledgeBase, config: &'a EngineConfig) -> Self {
        Self { kb, config }
    }

    /// Base score of tags plus technologies (no ambiguity term).
    pub fn score(&self, tags: &[RequirementTag], technologies: &BTreeSet<String>) -> f64 {
        self.tag_score(tags) + self.technology_score(technologies)
    }

    /// Full breakdown for an analyzed request, including the ambiguity term.
    pub fn score_analysis(&self, analysis: &RequirementAnalysis) -> ScoreBreakdown {
        let tag_score = self.tag_score(&analysis.tags);
        let technology_score = self.technology_score(&analysis.technologies);
        let ambiguity_score = analysis.scope_ambiguity.max(0.0) * self.config.ambiguity_cost;
        let total = tag_score + technology_score + ambiguity_score;

        tracing::debug!(tag_score, technology_score, ambiguity_score, total, "Scored request");

        ScoreBreakdown {
            tag_score,
            technology_score,
            ambiguity_score,
            total,
        }
    }

    pub fn tag_score(&self, tags: &[RequirementTag]) -> f64 {
        tags.iter()
            .map(|t| t.weight.clamp(0.0, 1.0) * tag_base_cost(t.tag))
            .sum()
    }

    /// Σ complexity of every technology, then one synergy adjustment per
    /// unordered pair of known technologies in key order.
    ///
    /// A pair with multiplier `m` adjusts the sum by `(m - 1) × min(c_a, c_b)`.
    /// The running sum never goes below zero.
    pub fn technology_score(&self, technologies: &BTreeSet<String>) -> f64 {
        let keys: BTreeSet<String> = technologies.iter().map(|t| normalize_key(t)).collect();

        let mut sum: f64 = keys
            .iter()
            .filter(|k| !k.is_empty())
            .map(|k| self.complexity(k))
            .sum();

        let known: Vec<(&str, f64)> = keys
            .iter()
            .filter_map(|k| self.kb.technology(k).map(|p| (k.as_str(), p.base_complexity)))
            .collect();

        for (i, (a, complexity_a)) in known.iter().enumerate() {
            for (b, complexity_b) in &known[i + 1..] {
                if let Some(multiplier) = self.kb.pair_multiplier(a, b) {
                    sum += (multiplier - 1.0) * complexity_a.min(*complexity_b);
                    sum = sum.max(0.0);
                }
            }
        }
        sum
    }

    fn complexity(&self, key: &str) -> f64 {
        self.kb
            .technology(key)
            .map(|p| p.base_complexity)
            .unwrap_or(self.config.default_unknown_complexity)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::RequirementAnalyzer;
    use estimo_core::FeatureTag;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    fn techs(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tag_score_uses_base_costs() {
        let kb = kb();
        let config = EngineConfig::default();
        let scorer = ComplexityScorer::new(&kb, &config);
        let tags = vec![
            RequirementTag { tag: FeatureTag::Auth, weight: 1.0 },
            RequirementTag { tag: FeatureTag::Payments, weight: 0.5 },
        ];
        assert!((scorer.tag_score(&tags) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_technology_score_sums_complexities() {
        let kb = kb();
        let config = EngineConfig::default();
        let scorer = ComplexityScorer::new(&kb, &config);
        assert_eq!(scorer.technology_score(&techs(&["html", "css"])), 3.0);
    }

    #[test]
    fn test_unknown_technology_uses_default_complexity() {
        let kb = kb();
        let config = EngineConfig::default();
        let scorer = ComplexityScorer::new(&kb, &config);
        assert_eq!(
            scorer.technology_score(&techs(&["cobol"])),
            config.default_unknown_complexity
        );
    }

    #[test]
    fn test_synergy_discount_applies_to_pair() {
        let kb = kb();
        let config = EngineConfig::default();
        let scorer = ComplexityScorer::new(&kb, &config);
        // react 6 + node.js 5, multiplier 0.9 on min(6, 5)
        let score = scorer.technology_score(&techs(&["react", "node.js"]));
        assert!((score - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_conflicting_stack_costs_more() {
        let kb = kb();
        let config = EngineConfig::default();
        let scorer = ComplexityScorer::new(&kb, &config);
        // react 6 + angular 7, multiplier 1.3 on min(6, 7)
        let score = scorer.technology_score(&techs(&["react", "angular"]));
        assert!((score - 14.8).abs() < 1e-9);
    }

    #[test]
    fn test_order_and_case_independent() {
        let kb = kb();
        let config = EngineConfig::default();
        let scorer = ComplexityScorer::new(&kb, &config);
        let a = scorer.technology_score(&techs(&["Node.js", "REACT", "express"]));
        let b = scorer.technology_score(&techs(&["express", "react", "node.js"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_analysis_includes_ambiguity() {
        let kb = kb();
        let config = EngineConfig::default();
        let analyzer = RequirementAnalyzer::new(&kb, &config);
        let scorer = ComplexityScorer::new(&kb, &config);
        let analysis = analyzer.analyze(
            "",
            &["make it sparkle".to_string()],
            &techs(&["html"]),
        );
        let breakdown = scorer.score_analysis(&analysis);
        assert!((breakdown.ambiguity_score - 0.2 * config.ambiguity_cost).abs() < 1e-9);
        assert!(
            (breakdown.total
                - breakdown.tag_score
                - breakdown.technology_score
                - breakdown.ambiguity_score)
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let kb = kb();
        let config = EngineConfig::default();
        let scorer = ComplexityScorer::new(&kb, &config);
        assert_eq!(scorer.score(&[], &BTreeSet::new()), 0.0);
    }
}
