//! Project plans: estimate + team + cost.

use estimo_core::{
    EngineConfig, EstimateResult, HoursRange, RateSource, RiskFactor, RiskKind, Severity,
    TeamMember, TeamRecommendation,
};
use serde::{Deserialize, Serialize};

/// Estimated cost at a blended hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub hourly_rate: f64,
    pub rate_source: RateSource,
    pub optimistic: f64,
    pub realistic: f64,
    pub pessimistic: f64,
}

impl CostEstimate {
    pub fn from_hours(hours: &HoursRange, hourly_rate: f64, rate_source: RateSource) -> Self {
        Self {
            hourly_rate,
            rate_source,
            optimistic: hours.optimistic * hourly_rate,
            realistic: hours.realistic * hourly_rate,
            pessimistic: hours.pessimistic * hourly_rate,
        }
    }
}

/// Everything needed to staff and price a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPlan {
    pub estimate: EstimateResult,
    pub team: Vec<TeamRecommendation>,
    pub cost: CostEstimate,
}

/// A `high_team_turnover` risk when the unavailable share of the roster
/// reaches the configured threshold. Empty rosters carry no such risk.
pub fn turnover_risk(config: &EngineConfig, roster: &[TeamMember]) -> Option<RiskFactor> {
    if roster.is_empty() {
        return None;
    }
    let unavailable = roster
        .iter()
        .filter(|m| !(m.capacity_fraction.is_finite() && m.capacity_fraction > 0.0))
        .count();
    let share = unavailable as f64 / roster.len() as f64;
    if share < config.turnover_risk_threshold {
        return None;
    }

    let severity = if unavailable == roster.len() {
        Severity::High
    } else {
        Severity::Medium
    };
    Some(RiskFactor::new(
        RiskKind::HighTeamTurnover,
        severity,
        format!(
            "{} of {} team members have no capacity ({:.0}%)",
            unavailable,
            roster.len(),
            share * 100.0
        ),
    ))
}

/// Mean rate of the first `cost_pool_size` available recommended members
/// that carry a positive rate, else the configured default.
pub fn blended_rate(
    config: &EngineConfig,
    team: &[TeamRecommendation],
    roster: &[TeamMember],
) -> (f64, RateSource) {
    let rates: Vec<f64> = team
        .iter()
        .filter(|rec| rec.capacity_ok)
        .filter_map(|rec| {
            roster
                .iter()
                .find(|m| m.id == rec.member_id)
                .and_then(|m| m.hourly_rate)
        })
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .take(config.cost_pool_size)
        .collect();

    if rates.is_empty() {
        return (config.default_hourly_rate, RateSource::Default);
    }
    (rates.iter().sum::<f64>() / rates.len() as f64, RateSource::Roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimo_test_utils::fixtures::sample_roster;

    fn rec(id: &str, capacity_ok: bool, rank: usize) -> TeamRecommendation {
        TeamRecommendation {
            member_id: id.to_string(),
            skill_match_score: 0.5,
            capacity_ok,
            rank,
        }
    }

    #[test]
    fn test_turnover_risk_thresholds() {
        let config = EngineConfig::default();
        assert!(turnover_risk(&config, &[]).is_none());

        let mostly_available = vec![
            TeamMember::new("a", 1.0),
            TeamMember::new("b", 1.0),
            TeamMember::new("c", 0.0),
        ];
        assert!(turnover_risk(&config, &mostly_available).is_none());

        let half = vec![TeamMember::new("a", 1.0), TeamMember::new("b", 0.0)];
        let risk = turnover_risk(&config, &half).unwrap();
        assert_eq!(risk.kind, RiskKind::HighTeamTurnover);
        assert_eq!(risk.severity, Severity::Medium);

        let nobody = vec![TeamMember::new("a", 0.0), TeamMember::new("b", -0.5)];
        assert_eq!(turnover_risk(&config, &nobody).unwrap().severity, Severity::High);
    }

    #[test]
    fn test_blended_rate_from_roster() {
        let config = EngineConfig::default();
        let roster = sample_roster();
        let team = vec![rec("ana", true, 1), rec("ben", true, 2), rec("dev", true, 3)];
        let (rate, source) = blended_rate(&config, &team, &roster);
        assert_eq!(source, RateSource::Roster);
        assert!((rate - 95.0).abs() < 1e-12);
    }

    #[test]
    fn test_blended_rate_pool_size_and_capacity() {
        let config = EngineConfig {
            cost_pool_size: 1,
            ..EngineConfig::default()
        };
        let roster = sample_roster();
        let team = vec![rec("cleo", false, 1), rec("ben", true, 2), rec("ana", true, 3)];
        let (rate, _) = blended_rate(&config, &team, &roster);
        assert_eq!(rate, 100.0);
    }

    #[test]
    fn test_blended_rate_default() {
        let config = EngineConfig::default();
        let roster = vec![TeamMember::new("a", 1.0)];
        let (rate, source) = blended_rate(&config, &[rec("a", true, 1)], &roster);
        assert_eq!(rate, config.default_hourly_rate);
        assert_eq!(source, RateSource::Default);
    }

    #[test]
    fn test_cost_mirrors_hours_ordering() {
        let hours = HoursRange::from_realistic(100.0, 0.7, 1.5);
        let cost = CostEstimate::from_hours(&hours, 80.0, RateSource::Roster);
        assert!(cost.optimistic <= cost.realistic && cost.realistic <= cost.pessimistic);
        assert!((cost.realistic - 8000.0).abs() < 1e-9);
    }
}
