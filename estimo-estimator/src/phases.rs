//! Phase breakdown templates per project type.

use estimo_core::{Phase, PhaseAllocation, ProjectType};

/// Share of total effort per phase, in delivery order.
pub fn phase_template(project_type: ProjectType) -> [(Phase, f64); 5] {
    let [planning, design, development, testing, deployment] = match project_type {
        ProjectType::Website => [0.15, 0.25, 0.45, 0.10, 0.05],
        ProjectType::WebApp => [0.20, 0.20, 0.40, 0.15, 0.05],
        ProjectType::MobileApp => [0.15, 0.20, 0.45, 0.15, 0.05],
        ProjectType::ECommerce => [0.20, 0.20, 0.35, 0.20, 0.05],
    };
    [
        (Phase::Planning, planning),
        (Phase::Design, design),
        (Phase::Development, development),
        (Phase::Testing, testing),
        (Phase::Deployment, deployment),
    ]
}

/// Split `realistic_hours` across phases. The last phase takes the remainder
/// so phase hours sum exactly to the total.
pub fn phase_breakdown(project_type: ProjectType, realistic_hours: f64) -> Vec<PhaseAllocation> {
    let template = phase_template(project_type);
    let last = template.len() - 1;
    let mut allocated = 0.0;

    template
        .iter()
        .enumerate()
        .map(|(i, (phase, share))| {
            let hours = if i == last {
                (realistic_hours - allocated).max(0.0)
            } else {
                share * realistic_hours
            };
            allocated += hours;
            PhaseAllocation {
                phase: *phase,
                share: *share,
                hours,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: [ProjectType; 4] = [
        ProjectType::Website,
        ProjectType::WebApp,
        ProjectType::MobileApp,
        ProjectType::ECommerce,
    ];

    #[test]
    fn test_templates_sum_to_one() {
        for project_type in TYPES {
            let total: f64 = phase_template(project_type).iter().map(|(_, s)| s).sum();
            assert!((total - 1.0).abs() < 1e-9, "{}", project_type);
        }
    }

    #[test]
    fn test_breakdown_sums_to_realistic() {
        for project_type in TYPES {
            let phases = phase_breakdown(project_type, 123.45);
            let total: f64 = phases.iter().map(|p| p.hours).sum();
            assert!((total - 123.45).abs() < 1e-9);
            assert_eq!(phases.len(), 5);
            assert_eq!(phases[0].phase, Phase::Planning);
            assert_eq!(phases[4].phase, Phase::Deployment);
        }
    }

    #[test]
    fn test_ecommerce_testing_share() {
        let phases = phase_breakdown(ProjectType::ECommerce, 100.0);
        assert!((phases[3].hours - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_hours() {
        assert!(phase_breakdown(ProjectType::Website, 0.0)
            .iter()
            .all(|p| p.hours == 0.0));
    }
}
