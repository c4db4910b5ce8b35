//! Engine facade
//!
//! Entry point for callers. Every call loads the active snapshot once and
//! works against it, so a concurrent reload never changes the data a call
//! sees halfway through.

use crate::plan::{blended_rate, turnover_risk, CostEstimate, ProjectPlan};
use crate::snapshot::{EngineSnapshot, SnapshotStore};
use chrono::{NaiveDate, Utc};
use estimo_core::{
    EstimateResult, EstimoResult, KnowledgeBaseError, ProjectRequest, SkillWeights,
    TeamMatchRequest, TeamMember, TeamRecommendation,
};
use estimo_knowledge::KnowledgeDocument;
use std::path::Path;
use std::sync::Arc;

/// Estimation engine over a swappable snapshot.
#[derive(Debug)]
pub struct Engine {
    store: SnapshotStore,
}

impl Engine {
    pub fn new(snapshot: EngineSnapshot) -> Self {
        Self {
            store: SnapshotStore::new(snapshot),
        }
    }

    /// Engine over the built-in knowledge base and default configuration.
    pub fn builtin() -> EstimoResult<Self> {
        Ok(Self::new(EngineSnapshot::builtin()?))
    }

    /// The active snapshot.
    pub fn snapshot(&self) -> Arc<EngineSnapshot> {
        self.store.current()
    }

    /// Validate and swap in a new knowledge base document.
    pub fn reload(&self, document: KnowledgeDocument) -> Result<u64, KnowledgeBaseError> {
        self.store.reload(document)
    }

    pub fn reload_from_path(&self, path: &Path) -> Result<u64, KnowledgeBaseError> {
        self.store.reload_from_path(path)
    }

    /// Estimate with today's UTC date as the deadline reference.
    pub fn estimate(&self, request: &ProjectRequest) -> EstimoResult<EstimateResult> {
        self.estimate_as_of(request, Utc::now().date_naive())
    }

    /// Estimate with an explicit deadline reference date.
    pub fn estimate_as_of(
        &self,
        request: &ProjectRequest,
        as_of: NaiveDate,
    ) -> EstimoResult<EstimateResult> {
        let snapshot = self.store.current();
        Ok(snapshot.estimator().estimate(request, as_of)?)
    }

    /// Rank a roster against weighted skills.
    pub fn match_team(
        &self,
        required: &SkillWeights,
        roster: &[TeamMember],
    ) -> Vec<TeamRecommendation> {
        estimo_team::match_team(required, roster)
    }

    /// Validate and run a team-match request.
    pub fn match_request(&self, request: TeamMatchRequest) -> EstimoResult<Vec<TeamRecommendation>> {
        estimo_team::validate_roster(&request.roster)?;
        let required = request.required_skills.into_weights();
        Ok(self.match_team(&required, &request.roster))
    }

    /// Estimate, staff and price a request against today's date.
    pub fn plan(&self, request: &ProjectRequest, roster: &[TeamMember]) -> EstimoResult<ProjectPlan> {
        self.plan_as_of(request, roster, Utc::now().date_naive())
    }

    /// Estimate, staff and price a request.
    ///
    /// Team turnover adds a risk to the estimate; it does not change the hours
    /// or the confidence.
    pub fn plan_as_of(
        &self,
        request: &ProjectRequest,
        roster: &[TeamMember],
        as_of: NaiveDate,
    ) -> EstimoResult<ProjectPlan> {
        estimo_team::validate_roster(roster)?;
        let snapshot = self.store.current();
        let config = snapshot.config();

        let mut estimate = snapshot.estimator().estimate(request, as_of)?;
        let team = estimo_team::match_team(&estimate.skill_weights, roster);
        estimate.risk_factors.extend(turnover_risk(config, roster));

        let (hourly_rate, rate_source) = blended_rate(config, &team, roster);
        let cost = CostEstimate::from_hours(&estimate.hours, hourly_rate, rate_source);

        tracing::debug!(
            team = team.len(),
            hourly_rate,
            realistic_cost = cost.realistic,
            "Planned project"
        );

        Ok(ProjectPlan {
            estimate,
            team,
            cost,
        })
    }
}
