//! estimo Estimator - Calibrated Estimation Engine
//!
//! Turns analyzed, scored requests into hours ranges with confidence and
//! risks, calibrates the hours multiplier from project history, and exposes
//! the [`Engine`] facade over an atomically swappable snapshot.

pub mod breakdown;
pub mod calibrator;
pub mod engine;
pub mod estimator;
pub mod phases;
pub mod plan;
pub mod report;
pub mod roles;
pub mod similar;
pub mod snapshot;

pub use breakdown::{assess_technologies, skill_breakdown};
pub use calibrator::{calibrate, trimmed_mean, Calibration};
pub use engine::Engine;
pub use estimator::{confidence, deadline_risk, working_days, Estimator};
pub use phases::{phase_breakdown, phase_template};
pub use plan::{blended_rate, turnover_risk, CostEstimate, ProjectPlan};
pub use report::{render_estimate, render_plan, EstimateReport, PlanReport};
pub use roles::{project_type_roles, recommend_roles, technology_role};
pub use similar::{find_similar, similarity};
pub use snapshot::{EngineSnapshot, SnapshotStore};
