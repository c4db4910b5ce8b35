//! Configuration types

use crate::{ConfigError, DifficultyTier};
use serde::{Deserialize, Serialize};

/// Upper bounds (exclusive) of each difficulty tier, in complexity units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierThresholds {
    pub trivial: f64,
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            trivial: 5.0,
            low: 15.0,
            medium: 35.0,
            high: 70.0,
        }
    }
}

impl TierThresholds {
    /// Classify a base score.
    pub fn classify(&self, base_score: f64) -> DifficultyTier {
        if base_score < self.trivial {
            DifficultyTier::Trivial
        } else if base_score < self.low {
            DifficultyTier::Low
        } else if base_score < self.medium {
            DifficultyTier::Medium
        } else if base_score < self.high {
            DifficultyTier::High
        } else {
            DifficultyTier::Extreme
        }
    }
}

/// Tunable constants of the estimation engine.
///
/// Every value is a product-tuning default, not an algorithmic necessity.
/// Missing fields in a config file fall back to [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    // Requirement analysis
    /// Complexity assigned to technologies absent from the knowledge base
    pub default_unknown_complexity: f64,
    /// Occurrences at which a tag reaches full weight
    pub tag_occurrence_normalizer: f64,
    /// Ambiguity added per requirement that matched no feature
    pub ambiguity_per_unmatched: f64,
    /// Ambiguity added per vague term ("maybe", "tbd", ...)
    pub ambiguity_per_vague_term: f64,
    /// Maximum scope ambiguity signal
    pub ambiguity_cap: f64,

    // Scoring
    /// Complexity units contributed by a fully ambiguous scope
    pub ambiguity_cost: f64,

    // Estimation
    /// Hours per complexity unit when history is too sparse to calibrate
    pub default_hours_per_unit: f64,
    pub optimistic_spread: f64,
    pub pessimistic_spread: f64,
    pub tier_thresholds: TierThresholds,
    pub unknown_technology_penalty: f64,
    pub ambiguity_penalty: f64,
    pub confidence_floor: f64,
    pub confidence_ceiling: f64,
    pub working_hours_per_day: f64,
    /// Overrun ratio above which a tight deadline becomes high severity
    pub deadline_high_ratio: f64,

    // Calibration
    pub calibration_min_samples: usize,
    /// Fraction trimmed from each end of the sorted ratios
    pub calibration_trim_fraction: f64,

    // Similar projects
    pub similar_project_threshold: f64,
    pub similar_project_limit: usize,

    // Planning
    /// Share of unavailable roster members that raises a turnover risk
    pub turnover_risk_threshold: f64,
    /// Number of top available members whose rates form the blended rate
    pub cost_pool_size: usize,
    pub default_hourly_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_unknown_complexity: 5.0,
            tag_occurrence_normalizer: 2.0,
            ambiguity_per_unmatched: 0.2,
            ambiguity_per_vague_term: 0.1,
            ambiguity_cap: 1.0,
            ambiguity_cost: 8.0,
            default_hours_per_unit: 8.0,
            optimistic_spread: 0.7,
            pessimistic_spread: 1.5,
            tier_thresholds: TierThresholds::default(),
            unknown_technology_penalty: 0.4,
            ambiguity_penalty: 0.3,
            confidence_floor: 0.1,
            confidence_ceiling: 0.95,
            working_hours_per_day: 8.0,
            deadline_high_ratio: 1.3,
            calibration_min_samples: 3,
            calibration_trim_fraction: 0.1,
            similar_project_threshold: 0.3,
            similar_project_limit: 5,
            turnover_risk_threshold: 0.5,
            cost_pool_size: 3,
            default_hourly_rate: 75.0,
        }
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be a finite value >= 0"));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be a finite value > 0"));
    }
    Ok(())
}

fn require_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(field, value, "must be between 0.0 and 1.0"));
    }
    Ok(())
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// Beyond range checks this enforces the relations the estimator relies on:
    /// - `optimistic_spread <= 1 <= pessimistic_spread` (hours ordering)
    /// - tier thresholds strictly increasing
    /// - the fully-penalized confidence still sits above the floor, so
    ///   confidence keeps decreasing strictly with every penalty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=10.0).contains(&self.default_unknown_complexity) {
            return Err(invalid(
                "default_unknown_complexity",
                self.default_unknown_complexity,
                "must be between 0 and 10",
            ));
        }
        require_positive("tag_occurrence_normalizer", self.tag_occurrence_normalizer)?;
        require_non_negative("ambiguity_per_unmatched", self.ambiguity_per_unmatched)?;
        require_non_negative("ambiguity_per_vague_term", self.ambiguity_per_vague_term)?;
        require_unit("ambiguity_cap", self.ambiguity_cap)?;
        require_non_negative("ambiguity_cost", self.ambiguity_cost)?;
        require_positive("default_hours_per_unit", self.default_hours_per_unit)?;

        if !(self.optimistic_spread > 0.0 && self.optimistic_spread <= 1.0) {
            return Err(invalid(
                "optimistic_spread",
                self.optimistic_spread,
                "must be in (0, 1]",
            ));
        }
        if !self.pessimistic_spread.is_finite() || self.pessimistic_spread < 1.0 {
            return Err(invalid(
                "pessimistic_spread",
                self.pessimistic_spread,
                "must be a finite value >= 1",
            ));
        }

        let t = &self.tier_thresholds;
        if !(0.0 < t.trivial && t.trivial < t.low && t.low < t.medium && t.medium < t.high) {
            return Err(invalid(
                "tier_thresholds",
                format!("{}/{}/{}/{}", t.trivial, t.low, t.medium, t.high),
                "must be positive and strictly increasing",
            ));
        }

        require_unit("unknown_technology_penalty", self.unknown_technology_penalty)?;
        require_unit("ambiguity_penalty", self.ambiguity_penalty)?;
        require_unit("confidence_floor", self.confidence_floor)?;
        require_unit("confidence_ceiling", self.confidence_ceiling)?;
        if self.confidence_floor >= self.confidence_ceiling {
            return Err(invalid(
                "confidence_floor",
                self.confidence_floor,
                "must be below confidence_ceiling",
            ));
        }
        let worst_raw = 1.0
            - self.unknown_technology_penalty
            - self.ambiguity_penalty * self.ambiguity_cap;
        if self.confidence_ceiling * worst_raw <= self.confidence_floor {
            return Err(invalid(
                "unknown_technology_penalty",
                self.unknown_technology_penalty,
                "combined penalties must keep confidence above confidence_floor",
            ));
        }

        require_positive("working_hours_per_day", self.working_hours_per_day)?;
        if !self.deadline_high_ratio.is_finite() || self.deadline_high_ratio < 1.0 {
            return Err(invalid(
                "deadline_high_ratio",
                self.deadline_high_ratio,
                "must be a finite value >= 1",
            ));
        }

        if self.calibration_min_samples == 0 {
            return Err(invalid(
                "calibration_min_samples",
                self.calibration_min_samples,
                "must be at least 1",
            ));
        }
        if !(0.0..0.5).contains(&self.calibration_trim_fraction) {
            return Err(invalid(
                "calibration_trim_fraction",
                self.calibration_trim_fraction,
                "must be in [0, 0.5)",
            ));
        }

        require_unit("similar_project_threshold", self.similar_project_threshold)?;
        require_unit("turnover_risk_threshold", self.turnover_risk_threshold)?;
        if self.cost_pool_size == 0 {
            return Err(invalid("cost_pool_size", self.cost_pool_size, "must be at least 1"));
        }
        require_non_negative("default_hourly_rate", self.default_hourly_rate)?;

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
