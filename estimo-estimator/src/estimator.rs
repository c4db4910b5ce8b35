//! Estimator
//!
//! Combines the base complexity score with the calibrated multiplier into an
//! hours range, a difficulty tier, a confidence value and the risk list.

use crate::breakdown::{assess_technologies, skill_breakdown};
use crate::calibrator::Calibration;
use crate::phases::phase_breakdown;
use crate::roles::recommend_roles;
use crate::similar::find_similar;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use estimo_analysis::{ComplexityScorer, RequirementAnalyzer};
use estimo_core::{
    EngineConfig, EstimateResult, HoursRange, ProjectRequest, RequestError, RiskFactor, RiskKind,
    Severity,
};
use estimo_knowledge::KnowledgeBase;

// ============================================================================
// BUILDING BLOCKS
// ============================================================================

/// Confidence for a given share of unknown technologies and scope ambiguity.
///
/// The raw value `1 - unknown × penalty - ambiguity × penalty` is scaled by the
/// ceiling and then clamped to [floor, ceiling]. This departs from clamping the
/// raw value directly: that form sits at the ceiling for every raw value above
/// 0.95, so a first unknown technology would not lower confidence. Scaling keeps
/// the decrease strict down to the floor, at the cost of mid-range values
/// (half the technologies unknown gives 0.76 rather than 0.80).
pub fn confidence(config: &EngineConfig, unknown_fraction: f64, scope_ambiguity: f64) -> f64 {
    let raw = 1.0
        - unknown_fraction.clamp(0.0, 1.0) * config.unknown_technology_penalty
        - scope_ambiguity.clamp(0.0, 1.0) * config.ambiguity_penalty;
    (config.confidence_ceiling * raw).clamp(config.confidence_floor, config.confidence_ceiling)
}

/// Monday-to-Friday days in `[from, to)`.
pub fn working_days(from: NaiveDate, to: NaiveDate) -> u64 {
    if to <= from {
        return 0;
    }
    let days = (to - from).num_days().max(0) as u64;
    let full_weeks = days / 7;
    let remainder = days % 7;

    let tail_start = from.checked_add_days(Days::new(full_weeks * 7)).unwrap_or(to);
    let tail = tail_start
        .iter_days()
        .take(remainder as usize)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u64;

    full_weeks * 5 + tail
}

/// A `tight_deadline` risk when the realistic hours exceed the working hours
/// left before the deadline.
pub fn deadline_risk(
    config: &EngineConfig,
    realistic_hours: f64,
    deadline: NaiveDate,
    as_of: NaiveDate,
) -> Option<RiskFactor> {
    if realistic_hours <= 0.0 {
        return None;
    }
    let available = working_days(as_of, deadline) as f64 * config.working_hours_per_day;
    if available <= 0.0 {
        return Some(RiskFactor::new(
            RiskKind::TightDeadline,
            Severity::High,
            format!(
                "Deadline {} leaves no working time for an estimated {:.0} hours",
                deadline, realistic_hours
            ),
        ));
    }

    let ratio = realistic_hours / available;
    if ratio <= 1.0 {
        return None;
    }
    let severity = if ratio <= config.deadline_high_ratio {
        Severity::Medium
    } else {
        Severity::High
    };
    Some(RiskFactor::new(
        RiskKind::TightDeadline,
        severity,
        format!(
            "Estimated {:.0} hours exceed the {:.0} working hours before {} ({:.0}% of capacity)",
            realistic_hours,
            available,
            deadline,
            ratio * 100.0
        ),
    ))
}

// ============================================================================
// ESTIMATOR
// ============================================================================

/// Estimator bound to one knowledge base and its calibration.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    kb: &'a KnowledgeBase,
    config: &'a EngineConfig,
    calibration: Calibration,
}

impl<'a> Estimator<'a> {
    pub fn new(kb: &'a KnowledgeBase, config: &'a EngineConfig, calibration: Calibration) -> Self {
        Self {
            kb,
            config,
            calibration,
        }
    }

    /// Hours range for a base score.
    pub fn hours_for(&self, base_score: f64) -> HoursRange {
        HoursRange::from_realistic(
            base_score * self.calibration.hours_per_unit,
            self.config.optimistic_spread,
            self.config.pessimistic_spread,
        )
    }

    /// Estimate a request, judging the deadline against `as_of`.
    pub fn estimate(
        &self,
        request: &ProjectRequest,
        as_of: NaiveDate,
    ) -> Result<EstimateResult, RequestError> {
        request.validate()?;

        let analysis = RequirementAnalyzer::new(self.kb, self.config).analyze_request(request);
        let breakdown = ComplexityScorer::new(self.kb, self.config).score_analysis(&analysis);
        let base_score = breakdown.total;

        let hours = self.hours_for(base_score);
        let difficulty_tier = self.config.tier_thresholds.classify(base_score);
        let confidence = confidence(
            self.config,
            analysis.unknown_fraction(),
            analysis.scope_ambiguity,
        );

        let mut risk_factors = analysis.risks.clone();
        if let Some(deadline) = request.deadline {
            risk_factors.extend(deadline_risk(self.config, hours.realistic, deadline, as_of));
        }

        let phase_breakdown = phase_breakdown(analysis.project_type, hours.realistic);
        let tech_complexity = assess_technologies(self.kb, self.config, &analysis.technologies);
        let skill_breakdown = skill_breakdown(&tech_complexity, hours.realistic);
        let recommended_roles = recommend_roles(
            self.kb,
            analysis.project_type,
            &analysis.technologies,
            difficulty_tier,
        );
        let similar_projects = find_similar(
            &request.description,
            &analysis.technologies,
            self.kb.history(),
            self.config,
        );

        tracing::debug!(
            base_score,
            realistic = hours.realistic,
            tier = %difficulty_tier,
            confidence,
            risks = risk_factors.len(),
            "Estimated request"
        );

        Ok(EstimateResult {
            hours,
            difficulty_tier,
            confidence,
            risk_factors,
            required_skills: analysis.required_skills(),
            skill_weights: analysis.skill_weights(),
            base_score,
            project_type: analysis.project_type,
            tags: analysis.tags,
            phase_breakdown,
            similar_projects,
            tech_complexity,
            skill_breakdown,
            recommended_team_size: recommended_roles.len(),
            recommended_roles,
            knowledge_version: self.kb.version(),
        })
    }
}
