//! Subcommand execution.
//!
//! Every command returns its rendered output so the binary only decides where
//! it goes.

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::CliConfig;
use crate::error::CliError;
use chrono::{NaiveDate, Utc};
use estimo_core::{ProjectRequest, TeamMatchRequest, TeamMember, TeamRecommendation};
use estimo_estimator::{render_estimate, render_plan, Calibration, Engine, EngineSnapshot};
use estimo_knowledge::KnowledgeBase;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

pub fn run(cli: &Cli) -> Result<String, CliError> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Estimate { request, as_of } => {
            let engine = build_engine(&config)?;
            let request: ProjectRequest = read_json(request)?;
            let result = engine.estimate_as_of(&request, reference_date(*as_of))?;
            render(cli.format, &result, render_estimate)
        }
        Commands::Match { request } => {
            let engine = build_engine(&config)?;
            let request: TeamMatchRequest = read_json(request)?;
            let ranking = engine.match_request(request)?;
            render(cli.format, &ranking, |r| render_ranking(r))
        }
        Commands::Plan {
            request,
            roster,
            as_of,
        } => {
            let engine = build_engine(&config)?;
            let request: ProjectRequest = read_json(request)?;
            let roster: Vec<TeamMember> = read_json(roster)?;
            let plan = engine.plan_as_of(&request, &roster, reference_date(*as_of))?;
            render(cli.format, &plan, render_plan)
        }
        Commands::CheckKb { path } => {
            let kb = match path.as_deref().or(config.knowledge_base.as_deref()) {
                Some(path) => KnowledgeBase::from_path(path)?,
                None => KnowledgeBase::builtin()?,
            };
            let snapshot = EngineSnapshot::new(kb, config.engine.clone())?;
            let summary = KnowledgeBaseSummary::of(&snapshot);
            render(cli.format, &summary, KnowledgeBaseSummary::render)
        }
    }
}

/// Engine over the configured knowledge base, or the built-in one.
pub fn build_engine(config: &CliConfig) -> Result<Engine, CliError> {
    let kb = match &config.knowledge_base {
        Some(path) => KnowledgeBase::from_path(path)?,
        None => KnowledgeBase::builtin()?,
    };
    let snapshot = EngineSnapshot::new(kb, config.engine.clone())?;
    tracing::debug!(
        version = snapshot.version(),
        hours_per_unit = snapshot.calibration().hours_per_unit,
        "Engine ready"
    );
    Ok(Engine::new(snapshot))
}

fn reference_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(text(value)),
    }
}

fn render_ranking(ranking: &[TeamRecommendation]) -> String {
    let mut out = String::from("TEAM RANKING\n");
    if ranking.is_empty() {
        out.push_str("  no team members\n");
    }
    for rec in ranking {
        let availability = if rec.capacity_ok { "" } else { " (no capacity)" };
        let _ = writeln!(
            out,
            "  {}. {} match {:.0}%{}",
            rec.rank,
            rec.member_id,
            rec.skill_match_score * 100.0,
            availability
        );
    }
    out
}

/// What `check-kb` reports about a valid document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeBaseSummary {
    pub version: u64,
    pub technologies: usize,
    pub history: usize,
    pub calibration: Calibration,
}

impl KnowledgeBaseSummary {
    pub fn of(snapshot: &EngineSnapshot) -> Self {
        let kb = snapshot.knowledge_base();
        Self {
            version: kb.version(),
            technologies: kb.technologies().count(),
            history: kb.history().len(),
            calibration: snapshot.calibration(),
        }
    }

    fn render(&self) -> String {
        format!(
            "Knowledge base version {}: {} technologies, {} historical projects\n\
             Calibration: {:.2} hours per unit from {} samples ({:?})\n",
            self.version,
            self.technologies,
            self.history,
            self.calibration.hours_per_unit,
            self.calibration.samples_used,
            self.calibration.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use estimo_core::{CalibrationSource, EstimateResult, EstimoError, RequestError};
    use estimo_test_utils::fixtures::{ecommerce_request, out_of_range_document, sample_roster};
    use std::path::PathBuf;

    fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["estimo"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_estimate_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let request = write_json(dir.path(), "request.json", &ecommerce_request());
        let config = dir.path().join("estimo.toml");
        std::fs::write(&config, "").unwrap();

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "estimate",
            request.to_str().unwrap(),
            "--as-of",
            "2025-01-01",
        ]);
        let output = run(&cli).unwrap();
        let result: EstimateResult = serde_json::from_str(&output).unwrap();
        assert!(result.required_skills.contains("payments"));
    }

    #[test]
    fn test_plan_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let request = write_json(dir.path(), "request.json", &ecommerce_request());
        let roster = write_json(dir.path(), "roster.json", &sample_roster());
        let config = dir.path().join("estimo.toml");
        std::fs::write(&config, "").unwrap();

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "--format",
            "text",
            "plan",
            request.to_str().unwrap(),
            "--roster",
            roster.to_str().unwrap(),
            "--as-of",
            "2025-01-01",
        ]);
        let output = run(&cli).unwrap();
        assert!(output.starts_with("PROJECT ESTIMATE"));
        assert!(output.contains("Team:"));
    }

    #[test]
    fn test_match_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let request = dir.path().join("match.json");
        std::fs::write(
            &request,
            r#"{"required_skills": ["react", "css"], "roster": [
                {"id": "a", "skills": {"react": 0.9}, "capacity_fraction": 0.0},
                {"id": "b", "skills": {"react": 0.5, "css": 0.5}, "capacity_fraction": 0.0}
            ]}"#,
        )
        .unwrap();
        let config = dir.path().join("estimo.toml");
        std::fs::write(&config, "").unwrap();

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "--format",
            "text",
            "match",
            request.to_str().unwrap(),
        ]);
        let output = run(&cli).unwrap();
        assert!(output.contains("1. b match 100% (no capacity)"));
        assert!(output.contains("2. a match 71% (no capacity)"));
    }

    #[test]
    fn test_empty_request_exits_with_input_code() {
        let dir = tempfile::tempdir().unwrap();
        let request = write_json(dir.path(), "request.json", &ProjectRequest::new("A website"));
        let config = dir.path().join("estimo.toml");
        std::fs::write(&config, "").unwrap();

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "estimate",
            request.to_str().unwrap(),
        ]);
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, CliError::Engine(EstimoError::Request(RequestError::Empty))));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_malformed_input_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let request = dir.path().join("broken.json");
        std::fs::write(&request, "{not json").unwrap();
        let config = dir.path().join("estimo.toml");
        std::fs::write(&config, "").unwrap();

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "estimate",
            request.to_str().unwrap(),
        ]);
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_check_kb_reports_builtin_calibration() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("estimo.toml");
        std::fs::write(&config, "").unwrap();

        let cli = parse(&["--config", config.to_str().unwrap(), "check-kb"]);
        let output = run(&cli).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(summary["history"], 4);
        assert_eq!(
            summary["calibration"]["source"],
            serde_json::to_value(CalibrationSource::History).unwrap()
        );
    }

    #[test]
    fn test_check_kb_rejects_out_of_range_document() {
        let dir = tempfile::tempdir().unwrap();
        let kb = write_json(dir.path(), "kb.json", &out_of_range_document());
        let config = dir.path().join("estimo.toml");
        std::fs::write(&config, "").unwrap();

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "check-kb",
            kb.to_str().unwrap(),
        ]);
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, CliError::KnowledgeBase(_)));
    }

    #[test]
    fn test_configured_knowledge_base_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let kb = write_json(
            dir.path(),
            "kb.json",
            &estimo_test_utils::fixtures::sample_knowledge_base().to_document(),
        );
        let config = dir.path().join("estimo.toml");
        std::fs::write(&config, "knowledge_base = \"kb.json\"\n").unwrap();

        let cli = parse(&["--config", config.to_str().unwrap(), "check-kb"]);
        let output = run(&cli).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(summary["version"], 7);
        assert!(kb.exists());
    }
}
