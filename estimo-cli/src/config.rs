//! Configuration loading for the estimo CLI.
//!
//! The file is optional. When neither `--config` nor `ESTIMO_CONFIG` names one,
//! the engine runs on defaults and the built-in knowledge base.

use estimo_core::{ConfigError, EngineConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ESTIMO_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Overrides for the engine constants
    #[serde(default)]
    pub engine: EngineConfig,
    /// Knowledge base document (JSON or TOML); built-in when absent
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,
}

impl CliConfig {
    /// Load from the explicit path, else from `ESTIMO_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.map(Path::to_path_buf).or_else(config_path_from_env);
        let config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let mut config = Self::from_toml_str(&contents)?;

        // Relative knowledge base paths resolve against the config file.
        if let (Some(kb), Some(dir)) = (config.knowledge_base.as_mut(), path.parent()) {
            if kb.is_relative() {
                *kb = dir.join(&*kb);
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.knowledge_base {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "knowledge_base".to_string(),
                    value: String::new(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        self.engine.validate()
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_is_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_engine_overrides_merge_with_defaults() {
        let config = CliConfig::from_toml_str(
            r#"
            knowledge_base = "kb.json"

            [engine]
            default_hourly_rate = 120.0
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.default_hourly_rate, 120.0);
        assert_eq!(
            config.engine.default_hours_per_unit,
            EngineConfig::default().default_hours_per_unit
        );
        assert_eq!(config.knowledge_base, Some(PathBuf::from("kb.json")));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(
            CliConfig::from_toml_str("colour = \"blue\""),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            CliConfig::from_toml_str("[engine]\nnot_a_knob = 1.0"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_from_file_resolves_relative_kb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estimo.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "knowledge_base = \"kb.toml\"").unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.knowledge_base, Some(dir.path().join("kb.toml")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_engine_values_rejected() {
        let config = CliConfig::from_toml_str("[engine]\ndefault_hours_per_unit = 0.0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
