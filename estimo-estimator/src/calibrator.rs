//! Historical Calibrator
//!
//! Derives hours per complexity unit from closed projects. Each project's
//! base score is recomputed with the current knowledge base so weight changes
//! propagate to the multiplier.

use estimo_analysis::{ComplexityScorer, RequirementAnalyzer};
use estimo_core::{CalibrationSource, EngineConfig};
use estimo_knowledge::KnowledgeBase;
use serde::{Deserialize, Serialize};

/// Calibrated multiplier of one knowledge base snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub hours_per_unit: f64,
    /// Usable history entries (before trimming)
    pub samples_used: usize,
    pub source: CalibrationSource,
}

impl Calibration {
    /// The configured default multiplier.
    pub fn fallback(config: &EngineConfig, samples_used: usize) -> Self {
        Self {
            hours_per_unit: config.default_hours_per_unit,
            samples_used,
            source: CalibrationSource::Default,
        }
    }
}

/// Calibrate against the knowledge base's history.
///
/// Projects whose recomputed base score or actual hours are zero carry no
/// signal and are skipped. With fewer than `calibration_min_samples` usable
/// projects the default multiplier applies.
pub fn calibrate(kb: &KnowledgeBase, config: &EngineConfig) -> Calibration {
    let analyzer = RequirementAnalyzer::new(kb, config);
    let scorer = ComplexityScorer::new(kb, config);

    let ratios: Vec<f64> = kb
        .history()
        .iter()
        .filter(|project| project.actual_hours > 0.0)
        .filter_map(|project| {
            let analysis = analyzer.analyze(
                &project.description,
                &project.requirements,
                &project.technologies,
            );
            let base_score = scorer.score_analysis(&analysis).total;
            (base_score > 0.0).then(|| project.actual_hours / base_score)
        })
        .collect();

    if ratios.len() < config.calibration_min_samples {
        tracing::info!(
            version = kb.version(),
            samples = ratios.len(),
            required = config.calibration_min_samples,
            hours_per_unit = config.default_hours_per_unit,
            "Insufficient history, using default hours per unit"
        );
        return Calibration::fallback(config, ratios.len());
    }

    let samples_used = ratios.len();
    let hours_per_unit = trimmed_mean(ratios, config.calibration_trim_fraction);
    tracing::info!(
        version = kb.version(),
        samples = samples_used,
        hours_per_unit,
        "Calibrated hours per complexity unit"
    );

    Calibration {
        hours_per_unit,
        samples_used,
        source: CalibrationSource::History,
    }
}

/// Mean after dropping `floor(n × fraction)` values from each end.
pub fn trimmed_mean(mut values: Vec<f64>, fraction: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);

    let trim = (values.len() as f64 * fraction.clamp(0.0, 0.5)).floor() as usize;
    let kept = if trim * 2 >= values.len() {
        &values[..]
    } else {
        &values[trim..values.len() - trim]
    };
    kept.iter().sum::<f64>() / kept.len() as f64
}
