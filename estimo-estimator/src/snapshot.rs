//! Engine snapshots and atomic reload
//!
//! An [`EngineSnapshot`] bundles a validated knowledge base, the engine
//! configuration and the calibration computed for that pair. Snapshots are
//! immutable; [`SnapshotStore`] replaces the whole snapshot with one atomic
//! pointer swap so in-flight calls keep the snapshot they started with.

use crate::calibrator::{calibrate, Calibration};
use crate::estimator::Estimator;
use arc_swap::ArcSwap;
use estimo_core::{ConfigError, EngineConfig, KnowledgeBaseError};
use estimo_knowledge::{KnowledgeBase, KnowledgeDocument};
use std::path::Path;
use std::sync::Arc;

/// Immutable knowledge base + configuration + calibration.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    kb: KnowledgeBase,
    config: EngineConfig,
    calibration: Calibration,
}

impl EngineSnapshot {
    /// Validate the configuration and calibrate against the knowledge base.
    pub fn new(kb: KnowledgeBase, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::calibrated(kb, config))
    }

    /// Built-in knowledge base with the default configuration.
    pub fn builtin() -> Result<Self, KnowledgeBaseError> {
        Ok(Self::calibrated(KnowledgeBase::builtin()?, EngineConfig::default()))
    }

    fn calibrated(kb: KnowledgeBase, config: EngineConfig) -> Self {
        let calibration = calibrate(&kb, &config);
        Self {
            kb,
            config,
            calibration,
        }
    }

    /// Knowledge base version.
    pub fn version(&self) -> u64 {
        self.kb.version()
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    pub fn estimator(&self) -> Estimator<'_> {
        Estimator::new(&self.kb, &self.config, self.calibration)
    }
}

/// Holder of the active snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    current: ArcSwap<EngineSnapshot>,
}

impl SnapshotStore {
    pub fn new(snapshot: EngineSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// The active snapshot. Holders keep it alive across a reload.
    pub fn current(&self) -> Arc<EngineSnapshot> {
        self.current.load_full()
    }

    /// Validate `document`, calibrate it with the active configuration and
    /// swap it in. On failure the active snapshot is left untouched.
    pub fn reload(&self, document: KnowledgeDocument) -> Result<u64, KnowledgeBaseError> {
        match KnowledgeBase::from_document(document) {
            Ok(kb) => Ok(self.install(kb)),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Load a document from disk and [`reload`](Self::reload) it.
    pub fn reload_from_path(&self, path: &Path) -> Result<u64, KnowledgeBaseError> {
        match KnowledgeBase::from_path(path) {
            Ok(kb) => Ok(self.install(kb)),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Swap in an already validated knowledge base. Returns its version.
    pub fn install(&self, kb: KnowledgeBase) -> u64 {
        let previous = self.current.load().version();
        let config = self.current.load().config().clone();
        let snapshot = EngineSnapshot::calibrated(kb, config);
        let version = snapshot.version();
        self.current.store(Arc::new(snapshot));

        tracing::info!(previous, version, "Knowledge base snapshot swapped");
        version
    }

    fn reject(&self, error: KnowledgeBaseError) -> KnowledgeBaseError {
        tracing::warn!(
            active_version = self.current.load().version(),
            error = %error,
            "Rejected knowledge base snapshot, keeping the active one"
        );
        error
    }
}
