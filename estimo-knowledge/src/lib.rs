//! estimo Knowledge - Knowledge Base Snapshots
//!
//! An immutable, versioned bundle of technology complexity weights and
//! historical project outcomes. A [`KnowledgeBase`] can only be obtained
//! through validation: every complexity is within 0-10, every synergy
//! multiplier is positive, and no technology accumulates more than a full
//! unit of synergy discount. Invalid documents are rejected whole.

mod builtin;

use estimo_core::{normalize_key, DifficultyTier, KnowledgeBaseError, TechCategory};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub use builtin::builtin_document;

/// Largest allowed `base_complexity`.
pub const MAX_COMPLEXITY: f64 = 10.0;

/// Largest summed synergy discount `Σ max(0, 1 - m)` one technology may take part in.
pub const MAX_SYNERGY_DISCOUNT: f64 = 1.0;

const SYNERGY_EPSILON: f64 = 1e-9;

// ============================================================================
// DOCUMENT FORMAT
// ============================================================================

/// Technology entry as written in a knowledge base document (keyed by name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TechnologyEntry {
    pub base_complexity: f64,
    #[serde(default)]
    pub category: TechCategory,
    /// Partner technology to effort multiplier
    #[serde(default)]
    pub synergy_bonus: BTreeMap<String, f64>,
}

/// A closed project used for calibration and similarity lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: BTreeSet<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub actual_hours: f64,
    pub estimated_hours: f64,
    pub difficulty_tier: DifficultyTier,
}

impl HistoricalProject {
    /// Display name, falling back to the history position.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("project #{}", index + 1),
        }
    }
}

/// Raw, unvalidated knowledge base document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeDocument {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub technologies: BTreeMap<String, TechnologyEntry>,
    #[serde(default)]
    pub history: Vec<HistoricalProject>,
}

// ============================================================================
// VALIDATED KNOWLEDGE BASE
// ============================================================================

/// Complexity profile of one technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyProfile {
    pub name: String,
    pub base_complexity: f64,
    pub category: TechCategory,
    pub synergy_bonus: BTreeMap<String, f64>,
}

/// Validated, immutable knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    version: u64,
    technologies: BTreeMap<String, TechnologyProfile>,
    history: Vec<HistoricalProject>,
}

impl KnowledgeBase {
    /// Validate a document. Keys are normalized before any check.
    pub fn from_document(document: KnowledgeDocument) -> Result<Self, KnowledgeBaseError> {
        let mut technologies = BTreeMap::new();

        for (raw_name, entry) in document.technologies {
            let name = normalize_key(&raw_name);
            if name.is_empty() {
                return Err(KnowledgeBaseError::EmptyTechnologyKey);
            }
            if !entry.base_complexity.is_finite()
                || !(0.0..=MAX_COMPLEXITY).contains(&entry.base_complexity)
            {
                return Err(KnowledgeBaseError::ComplexityOutOfRange {
                    technology: name,
                    value: entry.base_complexity,
                });
            }

            let mut synergy_bonus = BTreeMap::new();
            for (raw_partner, multiplier) in entry.synergy_bonus {
                let partner = normalize_key(&raw_partner);
                if partner.is_empty() {
                    return Err(KnowledgeBaseError::EmptyTechnologyKey);
                }
                if !multiplier.is_finite() || multiplier <= 0.0 {
                    return Err(KnowledgeBaseError::NonPositiveMultiplier {
                        technology: name,
                        partner,
                        value: multiplier,
                    });
                }
                synergy_bonus.insert(partner, multiplier);
            }

            let profile = TechnologyProfile {
                name: name.clone(),
                base_complexity: entry.base_complexity,
                category: entry.category,
                synergy_bonus,
            };
            if technologies.insert(name.clone(), profile).is_some() {
                return Err(KnowledgeBaseError::DuplicateTechnology { technology: name });
            }
        }

        let mut history = Vec::with_capacity(document.history.len());
        for (index, mut project) in document.history.into_iter().enumerate() {
            for (field, value) in [
                ("actual_hours", project.actual_hours),
                ("estimated_hours", project.estimated_hours),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(KnowledgeBaseError::InvalidHistory {
                        index,
                        reason: format!("{} must be a finite value >= 0, got {}", field, value),
                    });
                }
            }
            project.technologies = project
                .technologies
                .iter()
                .map(|t| normalize_key(t))
                .filter(|t| !t.is_empty())
                .collect();
            history.push(project);
        }

        let kb = Self {
            version: document.version,
            technologies,
            history,
        };
        kb.check_synergy_budget()?;

        tracing::debug!(
            version = kb.version,
            technologies = kb.technologies.len(),
            history = kb.history.len(),
            "Knowledge base validated"
        );
        Ok(kb)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, KnowledgeBaseError> {
        let document: KnowledgeDocument =
            serde_json::from_str(input).map_err(|e| KnowledgeBaseError::Parse {
                reason: e.to_string(),
            })?;
        Self::from_document(document)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, KnowledgeBaseError> {
        let document: KnowledgeDocument =
            toml::from_str(input).map_err(|e| KnowledgeBaseError::Parse {
                reason: e.to_string(),
            })?;
        Self::from_document(document)
    }

    /// Load a document from disk; `.toml` files are read as TOML, anything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let contents = std::fs::read_to_string(path).map_err(|e| KnowledgeBaseError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    /// The built-in default knowledge base.
    pub fn builtin() -> Result<Self, KnowledgeBaseError> {
        Self::from_document(builtin_document())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn technology(&self, key: &str) -> Option<&TechnologyProfile> {
        self.technologies.get(key)
    }

    pub fn is_known(&self, key: &str) -> bool {
        self.technologies.contains_key(key)
    }

    /// Profiles in key order.
    pub fn technologies(&self) -> impl Iterator<Item = &TechnologyProfile> {
        self.technologies.values()
    }

    pub fn history(&self) -> &[HistoricalProject] {
        &self.history
    }

    /// Effective synergy multiplier for a pair of known technologies.
    ///
    /// Bonuses declared in either direction combine multiplicatively; `None`
    /// when neither side declares one or either technology is unknown.
    pub fn pair_multiplier(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return None;
        }
        let profile_a = self.technologies.get(a)?;
        let profile_b = self.technologies.get(b)?;
        match (
            profile_a.synergy_bonus.get(b),
            profile_b.synergy_bonus.get(a),
        ) {
            (None, None) => None,
            (Some(x), None) | (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(x * y),
        }
    }

    /// Rebuild the document form (used when persisting or re-validating).
    pub fn to_document(&self) -> KnowledgeDocument {
        KnowledgeDocument {
            version: self.version,
            technologies: self
                .technologies
                .iter()
                .map(|(name, profile)| {
                    (
                        name.clone(),
                        TechnologyEntry {
                            base_complexity: profile.base_complexity,
                            category: profile.category,
                            synergy_bonus: profile.synergy_bonus.clone(),
                        },
                    )
                })
                .collect(),
            history: self.history.clone(),
        }
    }

    fn check_synergy_budget(&self) -> Result<(), KnowledgeBaseError> {
        for name in self.technologies.keys() {
            let total_discount: f64 = self
                .technologies
                .keys()
                .filter_map(|partner| self.pair_multiplier(name, partner))
                .map(|m| (1.0 - m).max(0.0))
                .sum();
            if total_discount > MAX_SYNERGY_DISCOUNT + SYNERGY_EPSILON {
                return Err(KnowledgeBaseError::SynergyBudgetExceeded {
                    technology: name.clone(),
                    total_discount,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(complexity: f64, category: TechCategory) -> TechnologyEntry {
        TechnologyEntry {
            base_complexity: complexity,
            category,
            synergy_bonus: BTreeMap::new(),
        }
    }

    fn doc_with(entries: Vec<(&str, TechnologyEntry)>) -> KnowledgeDocument {
        KnowledgeDocument {
            version: 1,
            technologies: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            history: vec![],
        }
    }

    #[test]
    fn test_builtin_is_valid() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert!(kb.is_known("react"));
        assert!(kb.is_known("node.js"));
        assert!(kb.is_known("postgresql"));
        assert!(kb.is_known("stripe"));
        assert_eq!(kb.technology("react").unwrap().category, TechCategory::Frontend);
    }

    #[test]
    fn test_keys_are_normalized() {
        let kb = KnowledgeBase::from_document(doc_with(vec![(
            " React ",
            entry(6.0, TechCategory::Frontend),
        )]))
        .unwrap();
        assert!(kb.is_known("react"));
    }

    #[test]
    fn test_complexity_out_of_range_rejected() {
        let err = KnowledgeBase::from_document(doc_with(vec![(
            "cobol",
            entry(15.0, TechCategory::Backend),
        )]))
        .unwrap_err();
        assert_eq!(
            err,
            KnowledgeBaseError::ComplexityOutOfRange {
                technology: "cobol".to_string(),
                value: 15.0
            }
        );
    }

    #[test]
    fn test_negative_and_nan_complexity_rejected() {
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            let result = KnowledgeBase::from_document(doc_with(vec![(
                "x",
                entry(bad, TechCategory::Other),
            )]));
            assert!(matches!(
                result,
                Err(KnowledgeBaseError::ComplexityOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_non_positive_multiplier_rejected() {
        let mut react = entry(6.0, TechCategory::Frontend);
        react.synergy_bonus.insert("vue".to_string(), 0.0);
        let err = KnowledgeBase::from_document(doc_with(vec![("react", react)])).unwrap_err();
        assert!(matches!(
            err,
            KnowledgeBaseError::NonPositiveMultiplier { ref partner, .. } if partner == "vue"
        ));
    }

    #[test]
    fn test_duplicate_after_normalization_rejected() {
        let err = KnowledgeBase::from_document(doc_with(vec![
            ("React", entry(6.0, TechCategory::Frontend)),
            ("react", entry(5.0, TechCategory::Frontend)),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            KnowledgeBaseError::DuplicateTechnology {
                technology: "react".to_string()
            }
        );
    }

    #[test]
    fn test_synergy_budget_exceeded_rejected() {
        let mut hub = entry(5.0, TechCategory::Backend);
        hub.synergy_bonus.insert("a".to_string(), 0.4);
        hub.synergy_bonus.insert("b".to_string(), 0.4);
        let err = KnowledgeBase::from_document(doc_with(vec![
            ("hub", hub),
            ("a", entry(3.0, TechCategory::Other)),
            ("b", entry(3.0, TechCategory::Other)),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            KnowledgeBaseError::SynergyBudgetExceeded { ref technology, .. } if technology == "hub"
        ));
    }

    #[test]
    fn test_synergy_to_unknown_partner_ignored_by_budget() {
        let mut hub = entry(5.0, TechCategory::Backend);
        hub.synergy_bonus.insert("ghost".to_string(), 0.1);
        hub.synergy_bonus.insert("phantom".to_string(), 0.1);
        assert!(KnowledgeBase::from_document(doc_with(vec![("hub", hub)])).is_ok());
    }

    #[test]
    fn test_pair_multiplier_combines_directions() {
        let mut a = entry(4.0, TechCategory::Frontend);
        a.synergy_bonus.insert("b".to_string(), 0.9);
        let mut b = entry(4.0, TechCategory::Backend);
        b.synergy_bonus.insert("a".to_string(), 0.8);
        let kb = KnowledgeBase::from_document(doc_with(vec![("a", a), ("b", b)])).unwrap();
        let m = kb.pair_multiplier("a", "b").unwrap();
        assert!((m - 0.72).abs() < 1e-12);
        assert_eq!(kb.pair_multiplier("a", "b"), kb.pair_multiplier("b", "a"));
        assert_eq!(kb.pair_multiplier("a", "a"), None);
        assert_eq!(kb.pair_multiplier("a", "zzz"), None);
    }

    #[test]
    fn test_invalid_history_rejected() {
        let mut doc = doc_with(vec![]);
        doc.history.push(HistoricalProject {
            name: None,
            description: String::new(),
            technologies: BTreeSet::new(),
            requirements: vec![],
            actual_hours: -3.0,
            estimated_hours: 10.0,
            difficulty_tier: DifficultyTier::Low,
        });
        let err = KnowledgeBase::from_document(doc).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::InvalidHistory { index: 0, .. }));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "version": 7,
            "technologies": {
                "react": {"base_complexity": 6.0, "category": "frontend", "synergy_bonus": {"node.js": 0.9}},
                "node.js": {"base_complexity": 5.0, "category": "backend"}
            },
            "history": [
                {"technologies": ["React"], "actual_hours": 120.0, "estimated_hours": 100.0, "difficulty_tier": "medium"}
            ]
        }"#;
        let kb = KnowledgeBase::from_json_str(json).unwrap();
        assert_eq!(kb.version(), 7);
        assert_eq!(kb.history().len(), 1);
        assert!(kb.history()[0].technologies.contains("react"));
        assert_eq!(kb.pair_multiplier("node.js", "react"), Some(0.9));
    }

    #[test]
    fn test_from_json_str_parse_error() {
        let err = KnowledgeBase::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::Parse { .. }));
    }

    #[test]
    fn test_from_toml_str() {
        let toml = r#"
version = 2

[technologies.react]
base_complexity = 6.0
category = "frontend"

[technologies."node.js"]
base_complexity = 5.0
category = "backend"

[technologies."node.js".synergy_bonus]
react = 0.9

[[history]]
name = "Shop"
technologies = ["react", "node.js"]
actual_hours = 200.0
estimated_hours = 180.0
difficulty_tier = "high"
"#;
        let kb = KnowledgeBase::from_toml_str(toml).unwrap();
        assert_eq!(kb.version(), 2);
        assert_eq!(kb.pair_multiplier("react", "node.js"), Some(0.9));
        assert_eq!(kb.history()[0].display_name(0), "Shop");
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("kb.json");
        std::fs::write(
            &json_path,
            r#"{"version": 1, "technologies": {"go": {"base_complexity": 7.0, "category": "backend"}}}"#,
        )
        .unwrap();
        assert!(KnowledgeBase::from_path(&json_path).unwrap().is_known("go"));

        let toml_path = dir.path().join("kb.toml");
        std::fs::write(
            &toml_path,
            "version = 1\n[technologies.go]\nbase_complexity = 7.0\ncategory = \"backend\"\n",
        )
        .unwrap();
        assert!(KnowledgeBase::from_path(&toml_path).unwrap().is_known("go"));

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            KnowledgeBase::from_path(&missing),
            Err(KnowledgeBaseError::Io { .. })
        ));
    }

    #[test]
    fn test_document_roundtrip_revalidates() {
        let kb = KnowledgeBase::builtin().unwrap();
        let again = KnowledgeBase::from_document(kb.to_document()).unwrap();
        assert_eq!(kb, again);
    }
}
