//! Similar historical project lookup.

use estimo_analysis::tokenize;
use estimo_core::{EngineConfig, SimilarProject};
use estimo_knowledge::HistoricalProject;
use std::collections::BTreeSet;

const DESCRIPTION_WEIGHT: f64 = 0.6;
const TECHNOLOGY_WEIGHT: f64 = 0.4;

fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Blend of description word overlap and technology overlap, in [0, 1].
pub fn similarity(
    description: &str,
    technologies: &BTreeSet<String>,
    project: &HistoricalProject,
) -> f64 {
    let words: BTreeSet<String> = tokenize(description).into_iter().collect();
    let project_words: BTreeSet<String> = tokenize(&project.description).into_iter().collect();
    DESCRIPTION_WEIGHT * jaccard(&words, &project_words)
        + TECHNOLOGY_WEIGHT * jaccard(technologies, &project.technologies)
}

/// History entries above the similarity threshold, most similar first
/// (history order breaks ties), at most `similar_project_limit` of them.
pub fn find_similar(
    description: &str,
    technologies: &BTreeSet<String>,
    history: &[HistoricalProject],
    config: &EngineConfig,
) -> Vec<SimilarProject> {
    let mut scored: Vec<(usize, f64)> = history
        .iter()
        .enumerate()
        .map(|(i, project)| (i, similarity(description, technologies, project)))
        .filter(|(_, s)| *s > config.similar_project_threshold)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    scored
        .into_iter()
        .take(config.similar_project_limit)
        .map(|(i, similarity)| {
            let project = &history[i];
            SimilarProject {
                name: project.display_name(i),
                similarity,
                estimated_hours: project.estimated_hours,
                actual_hours: project.actual_hours,
            }
        })
        .collect()
}
