//! A provider for plain configuration files
//!
//! `generic` treats every path given on the command line as one assessment unit. It is
//! registered by the `datacollector` binary so the tool works without any third-party
//! provider, and it doubles as a worked example of the provider contract.
//!
//! ```text
//! datacollector generic collect [-n NAME] [-y TYPE] PATH...
//! datacollector generic assess  [-n NAME] [-y TYPE] [-t TARGETS] PATH...
//! datacollector generic report
//! ```

mod credentials;

use crate::Result;
use crate::cli::{CliCommand, CliOption, Invocation};
use crate::model::{
    AssessmentUnit, DataCollection, Environment, RECOMMENDATIONS_FILE_NAME, Recommendation, RecommendationDoc, Report, ReportType, Target,
    TargetRecommendation, UnitRecommendation, document,
};
use crate::plugin::Provider;
use ohno::{IntoAppError, bail};
use serde_json::json;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "   generic";

const MIDDLEWARE: &str = "generic";
const DOMAIN: &str = "Generic";
const EXECUTION_CONTEXT: &str = "filesystem";
const PATH_ARGUMENT: &str = "PATH...";

const NAME_OPTION: &str = "name";
const TYPE_OPTION: &str = "type";

const SIMPLE_MAX_FILES: usize = 10;
const MODERATE_MAX_FILES: usize = 100;

/// Provider for arbitrary configuration files and directories.
#[derive(Debug, Clone, Default)]
pub struct GenericProvider {
    host_name: Option<String>,
}

impl GenericProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a fixed host name instead of reading it from the environment.
    #[must_use]
    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = Some(host_name.into());
        self
    }

    fn host_name(&self) -> String {
        self.host_name
            .clone()
            .or_else(|| std::env::var("HOSTNAME").ok())
            .or_else(|| std::env::var("COMPUTERNAME").ok())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "localhost".to_string())
    }

    fn assessment_name(&self, invocation: &Invocation) -> String {
        invocation
            .option_value(NAME_OPTION)
            .map_or_else(|| format!("{MIDDLEWARE}-{}", self.host_name()), str::to_string)
    }

    fn collect_options() -> Vec<CliOption> {
        vec![
            CliOption::new(Some('n'), Some(NAME_OPTION), "Assessment name (default: generic-<hostname>)"),
            CliOption::new(Some('y'), Some(TYPE_OPTION), "Free-form assessment type recorded in environment.json"),
        ]
    }
}

/// A path named on the command line together with the unit it becomes.
#[derive(Debug)]
struct UnitSource {
    name: String,
    path: PathBuf,
    files: usize,
}

fn unit_sources(invocation: &Invocation) -> Result<Vec<UnitSource>> {
    if invocation.arguments().is_empty() {
        bail!("at least one PATH must be given to the '{}' command", invocation.command_name());
    }

    let mut sources: Vec<UnitSource> = Vec::new();
    for argument in invocation.arguments() {
        let path = std::path::absolute(argument).into_app_err_with(|| format!("unable to resolve path '{argument}'"))?;
        if !path.exists() {
            bail!("path '{}' does not exist", path.display());
        }

        let base = path
            .file_name()
            .map_or_else(|| MIDDLEWARE.to_string(), |n| n.to_string_lossy().into_owned());

        let mut name = base.clone();
        let mut suffix = 2;
        while sources.iter().any(|s| s.name == name) {
            name = format!("{base}-{suffix}");
            suffix += 1;
        }

        let files = count_files(&path);
        sources.push(UnitSource { name, path, files });
    }

    Ok(sources)
}

fn count_files(path: &Path) -> usize {
    walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!(target: LOG_TARGET, "Could not walk directory: {err:#}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .count()
}

const fn complexity(files: usize) -> &'static str {
    if files <= SIMPLE_MAX_FILES {
        "simple"
    } else if files <= MODERATE_MAX_FILES {
        "moderate"
    } else {
        "complex"
    }
}

fn targets() -> [Target; 2] {
    [
        Target::new("CONTAINER", "Private", "Docker"),
        Target::new("KUBERNETES", "Cloud", "Kubernetes"),
    ]
}

impl Provider for GenericProvider {
    fn middleware(&self) -> &str {
        MIDDLEWARE
    }

    fn collect_command(&self) -> CliCommand {
        CliCommand::collect(Self::collect_options(), vec![], vec![PATH_ARGUMENT.to_string()])
    }

    fn assess_command(&self) -> CliCommand {
        CliCommand::assess(Self::collect_options(), vec![], vec![PATH_ARGUMENT.to_string()])
    }

    fn report_command(&self) -> CliCommand {
        CliCommand::report(vec![], vec![], vec![])
    }

    fn collections(&self, invocation: &Invocation) -> Result<Vec<DataCollection>> {
        let sources = unit_sources(invocation)?;

        let environment = Environment {
            domain: DOMAIN.to_string(),
            operating_system: std::env::consts::OS.to_string(),
            host_name: self.host_name(),
            middleware_name: MIDDLEWARE.to_string(),
            assessment_name: self.assessment_name(invocation),
            assessment_type: invocation.option_value(TYPE_OPTION).map(str::to_string),
            assessment_metadata: Some(json!({
                "paths": sources.iter().map(|s| s.path.to_string_lossy()).collect::<Vec<_>>(),
            })),
            execution_context_type: Some(EXECUTION_CONTEXT.to_string()),
            execution_context_name: Some(self.host_name()),
            ..Environment::default()
        };

        let units = sources
            .into_iter()
            .map(|source| -> Result<AssessmentUnit> {
                let data = json!({
                    "path": source.path.to_string_lossy(),
                    "files": source.files,
                });
                Ok(AssessmentUnit::new(source.name, data)
                    .with_config_files([source.path])
                    .with_content_mask(credentials::mask()?))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(target: LOG_TARGET, "Collected {} unit(s) for '{}'", units.len(), environment.assessment_name);
        Ok(vec![DataCollection::new(environment, units)])
    }

    fn recommendations(&self, invocation: &Invocation) -> Result<Vec<Recommendation>> {
        let units = unit_sources(invocation)?
            .into_iter()
            .map(|source| UnitRecommendation {
                summary: Some(json!({ "files": source.files })),
                targets: targets()
                    .into_iter()
                    .map(|target| TargetRecommendation {
                        complexity: Some(json!(complexity(source.files))),
                        ..TargetRecommendation::new(target)
                    })
                    .collect(),
                name: source.name,
            })
            .collect();

        Ok(vec![Recommendation {
            assessment_name: self.assessment_name(invocation),
            issue_categories: None,
            complexity_rules: Some(json!({
                "simple": { "maxFiles": SIMPLE_MAX_FILES },
                "moderate": { "maxFiles": MODERATE_MAX_FILES },
                "complex": {},
            })),
            units,
        }])
    }

    fn reports(&self, assessment_name: &str, assessment_dir: &Path, _invocation: &Invocation) -> Result<Vec<Report>> {
        let path = assessment_dir.join(RECOMMENDATIONS_FILE_NAME);
        if !path.is_file() {
            log::debug!(target: LOG_TARGET, "No recommendations for '{assessment_name}', skipping reports");
            return Ok(Vec::new());
        }

        let doc: RecommendationDoc = document::load(&path)?;
        let mut reports = Vec::new();
        for unit in &doc.assessment_units {
            for target in unit.targets.iter().flatten() {
                let body = json!({
                    "assessmentName": doc.assessment_name,
                    "assessmentUnitName": unit.name,
                    "target": target.target,
                    "complexity": target.complexity,
                    "summary": unit.summary,
                });
                let content = serde_json::to_vec_pretty(&body).into_app_err("unable to render report")?;
                reports.push(Report::new(unit.name.clone(), target.target.clone(), ReportType::Json, content));
            }
        }

        Ok(reports)
    }
}
