//! Plain-text reports
//!
//! Deterministic rendering of estimates and plans for terminals and logs.

use crate::plan::ProjectPlan;
use estimo_core::{EstimateResult, RateSource};
use std::fmt;

/// Display adapter for an [`EstimateResult`].
pub struct EstimateReport<'a>(pub &'a EstimateResult);

/// Display adapter for a [`ProjectPlan`].
pub struct PlanReport<'a>(pub &'a ProjectPlan);

impl fmt::Display for EstimateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "PROJECT ESTIMATE ({})", r.project_type)?;
        writeln!(
            f,
            "Hours: {:.1} optimistic / {:.1} realistic / {:.1} pessimistic",
            r.hours.optimistic, r.hours.realistic, r.hours.pessimistic
        )?;
        writeln!(f, "Difficulty: {} (base score {:.2})", r.difficulty_tier, r.base_score)?;
        writeln!(f, "Confidence: {:.0}%", r.confidence * 100.0)?;
        writeln!(f, "Knowledge base version: {}", r.knowledge_version)?;

        if !r.required_skills.is_empty() {
            let skills: Vec<&str> = r.required_skills.iter().map(String::as_str).collect();
            writeln!(f, "Required skills: {}", skills.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Risks:")?;
        if r.risk_factors.is_empty() {
            writeln!(f, "  none")?;
        }
        for risk in &r.risk_factors {
            writeln!(f, "  [{}] {}: {}", risk.severity, risk.kind, risk.message)?;
        }

        writeln!(f)?;
        writeln!(f, "Phases:")?;
        for phase in &r.phase_breakdown {
            writeln!(
                f,
                "  {:<12} {:>5.1}%  {:>8.1} h  {}",
                phase.phase.to_string(),
                phase.share * 100.0,
                phase.hours,
                phase.phase.description()
            )?;
        }

        if !r.tech_complexity.is_empty() {
            writeln!(f)?;
            writeln!(f, "Technologies:")?;
            for tech in &r.tech_complexity {
                let unknown = if tech.known { "" } else { ", not in knowledge base" };
                writeln!(
                    f,
                    "  {:<14} {:>4.1}  {} ({}{})",
                    tech.technology, tech.complexity, tech.difficulty, tech.category, unknown
                )?;
            }
        }

        if !r.skill_breakdown.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skill breakdown:")?;
            for skill in &r.skill_breakdown {
                writeln!(
                    f,
                    "  {:<12} {:>5.1}%  {:>8.1} h  {}",
                    skill.category.to_string(),
                    skill.share * 100.0,
                    skill.hours,
                    skill.technologies.join(", ")
                )?;
            }
        }

        if !r.recommended_roles.is_empty() {
            let roles: Vec<&str> = r.recommended_roles.iter().map(|role| role.as_str()).collect();
            writeln!(f)?;
            writeln!(
                f,
                "Recommended team ({}): {}",
                r.recommended_team_size,
                roles.join(", ")
            )?;
        }

        if !r.similar_projects.is_empty() {
            writeln!(f)?;
            writeln!(f, "Similar projects:")?;
            for similar in &r.similar_projects {
                writeln!(
                    f,
                    "  {} ({:.0}% similar): estimated {:.0} h, actual {:.0} h",
                    similar.name,
                    similar.similarity * 100.0,
                    similar.estimated_hours,
                    similar.actual_hours
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        write!(f, "{}", EstimateReport(&plan.estimate))?;

        writeln!(f)?;
        writeln!(f, "Team:")?;
        if plan.team.is_empty() {
            writeln!(f, "  no team members available")?;
        }
        for rec in &plan.team {
            let availability = if rec.capacity_ok { "" } else { " (no capacity)" };
            writeln!(
                f,
                "  {}. {} match {:.0}%{}",
                rec.rank,
                rec.member_id,
                rec.skill_match_score * 100.0,
                availability
            )?;
        }

        let source = match plan.cost.rate_source {
            RateSource::Roster => "team rates",
            RateSource::Default => "default rate",
        };
        writeln!(f)?;
        writeln!(f, "Cost at {:.2}/h ({}):", plan.cost.hourly_rate, source)?;
        writeln!(
            f,
            "  {:.2} optimistic / {:.2} realistic / {:.2} pessimistic",
            plan.cost.optimistic, plan.cost.realistic, plan.cost.pessimistic
        )
    }
}

pub fn render_estimate(result: &EstimateResult) -> String {
    EstimateReport(result).to_string()
}

pub fn render_plan(plan: &ProjectPlan) -> String {
    PlanReport(plan).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::snapshot::EngineSnapshot;
    use estimo_core::EngineConfig;
    use estimo_test_utils::fixtures::{
        ecommerce_request, reference_date, sample_knowledge_base, sample_roster,
    };

    fn engine() -> Engine {
        Engine::new(EngineSnapshot::new(sample_knowledge_base(), EngineConfig::default()).unwrap())
    }

    #[test]
    fn test_estimate_report_sections() {
        let result = engine()
            .estimate_as_of(&ecommerce_request(), reference_date())
            .unwrap();
        let text = render_estimate(&result);
        assert!(text.starts_with("PROJECT ESTIMATE (e_commerce)"));
        assert!(text.contains("Confidence:"));
        assert!(text.contains("Phases:"));
        assert!(text.contains("development"));
        assert!(text.contains("Similar projects:"));
        assert!(text.contains("Technologies:"));
        assert!(text.contains("  react           6.0  hard (frontend)"));
        assert!(text.contains("Skill breakdown:"));
        assert!(text.contains("payment_specialist"));
        assert!(text.contains(&format!("Recommended team ({}):", result.recommended_team_size)));
    }

    #[test]
    fn test_unknown_technology_is_flagged() {
        let request = estimo_core::ProjectRequest::new("").with_technologies(["react", "elm"]);
        let result = engine().estimate_as_of(&request, reference_date()).unwrap();
        let text = render_estimate(&result);
        assert!(text.contains("elm"));
        assert!(text.contains("(other, not in knowledge base)"));
    }

    #[test]
    fn test_plan_report_is_deterministic() {
        let engine = engine();
        let plan = engine
            .plan_as_of(&ecommerce_request(), &sample_roster(), reference_date())
            .unwrap();
        let first = render_plan(&plan);
        assert_eq!(first, render_plan(&plan));
        assert!(first.contains("Team:"));
        assert!(first.contains("(team rates)"));
        assert!(!first.contains("cleo"));
    }
}
