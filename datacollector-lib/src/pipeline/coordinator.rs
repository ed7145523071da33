use super::archive::archive;
use super::collect::copy_config_files;
use super::path_utils::sanitize_path_component;
use crate::Result;
use crate::cli::Invocation;
use crate::model::{
    DataCollection, ENVIRONMENT_FILE_NAME, EnvironmentDoc, RECOMMENDATIONS_FILE_NAME, REPORT_FILE_PREFIX, RecommendationDoc, document,
};
use crate::plugin::Provider;
use ohno::{IntoAppError, bail};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "  pipeline";

/// Runs the collect, assess, and report stages against an output root.
#[derive(Debug, Clone)]
pub struct Pipeline {
    output_root: PathBuf,
}

impl Pipeline {
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Directory holding everything written for an assessment.
    #[must_use]
    pub fn assessment_dir(&self, assessment_name: &str) -> PathBuf {
        self.output_root.join(sanitize_path_component(assessment_name))
    }

    /// Writes every collection the provider returns and hands the collections back, with
    /// each unit's configuration files pointing at their copies.
    pub fn collect(&self, provider: &dyn Provider, invocation: &Invocation) -> Result<Vec<DataCollection>> {
        log::debug!(target: LOG_TARGET, "Collecting");

        let mut collections = provider.collections(invocation)?;
        if collections.is_empty() {
            bail!("Collect failed. No data collections returned by plug-in provider.");
        }

        for collection in &mut collections {
            self.write_collection(collection)?;
        }

        Ok(collections)
    }

    fn write_collection(&self, collection: &mut DataCollection) -> Result<()> {
        let dir = self.assessment_dir(collection.assessment_name());
        fs::create_dir_all(&dir).into_app_err_with(|| format!("unable to create directory '{}'", dir.display()))?;

        document::write(&EnvironmentDoc::from(&collection.environment), dir.join(ENVIRONMENT_FILE_NAME))?;

        for unit in &mut collection.assessment_units {
            let unit_name = sanitize_path_component(&unit.name);
            let unit_dir = dir.join(&unit_name);
            fs::create_dir_all(&unit_dir).into_app_err_with(|| format!("unable to create directory '{}'", unit_dir.display()))?;

            document::write(&unit.assessment_data, unit_dir.join(format!("{unit_name}.json")))?;
            copy_config_files(unit, &unit_dir, &self.output_root)?;
        }

        log::debug!(
            target: LOG_TARGET,
            "Collected assessment '{}' with {} unit(s)",
            collection.assessment_name(),
            collection.assessment_units.len()
        );
        Ok(())
    }

    /// Collects, then writes and archives `recommendations.json` for every recommendation.
    pub fn assess(&self, provider: &dyn Provider, invocation: &Invocation) -> Result<()> {
        let collections = self.collect(provider, invocation)?;

        log::debug!(target: LOG_TARGET, "Assessing");

        let recommendations = provider.recommendations(invocation)?;
        if recommendations.is_empty() {
            bail!("Assessment failed. No recommendations generated by plug-in provider.");
        }

        let targets = invocation.targets();
        for rec in &recommendations {
            let Some(collection) = collections.iter().find(|c| c.assessment_name() == rec.assessment_name) else {
                bail!("Collection not found for assessment:{}", rec.assessment_name);
            };

            let doc = RecommendationDoc::build(rec, &collection.environment, &collection.assessment_units, &targets);
            let dir = self.assessment_dir(&rec.assessment_name);
            document::write(&doc, dir.join(RECOMMENDATIONS_FILE_NAME))?;
            let _ = archive(&dir)?;
        }

        Ok(())
    }

    /// Writes reports for every assessment directory under the output root.
    pub fn report(&self, provider: &dyn Provider, invocation: &Invocation) -> Result<()> {
        log::debug!(target: LOG_TARGET, "Reporting");

        for name in self.assessment_names()? {
            let dir = self.output_root.join(&name);
            let reports = provider.reports(&name, &dir, invocation)?;
            if reports.is_empty() {
                log::debug!(target: LOG_TARGET, "No reports for assessment '{name}'");
                continue;
            }

            purge_reports(&dir)?;
            for report in &reports {
                let path = dir.join(sanitize_path_component(&report.assessment_unit_name)).join(report.file_name());
                document::write_bytes(&report.content, &path)?;
            }

            let _ = archive(&dir)?;
        }

        Ok(())
    }

    /// Assess followed by report.
    pub fn run(&self, provider: &dyn Provider, invocation: &Invocation) -> Result<()> {
        self.assess(provider, invocation)?;
        self.report(provider, invocation)
    }

    /// Names of the immediate subdirectories of the output root, sorted.
    fn assessment_names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.output_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(target: LOG_TARGET, "Output directory '{}' does not exist", self.output_root.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to read directory '{}'", self.output_root.display())),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.into_app_err_with(|| format!("unable to read directory '{}'", self.output_root.display()))?;
            let is_dir = entry
                .file_type()
                .into_app_err_with(|| format!("unable to inspect '{}'", entry.path().display()))?
                .is_dir();
            if is_dir {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        log::debug!(target: LOG_TARGET, "Found assessments {names:?}");
        Ok(names)
    }
}

/// Removes report files left by an earlier report stage from every unit directory.
fn purge_reports(assessment_dir: &Path) -> Result<()> {
    let units = fs::read_dir(assessment_dir).into_app_err_with(|| format!("unable to read directory '{}'", assessment_dir.display()))?;
    for unit in units {
        let unit = unit.into_app_err_with(|| format!("unable to read directory '{}'", assessment_dir.display()))?;
        let unit_dir = unit.path();
        if !unit_dir.is_dir() {
            continue;
        }

        let files = fs::read_dir(&unit_dir).into_app_err_with(|| format!("unable to read directory '{}'", unit_dir.display()))?;
        for file in files {
            let file = file.into_app_err_with(|| format!("unable to read directory '{}'", unit_dir.display()))?;
            let path = file.path();
            if path.is_file() && file.file_name().to_string_lossy().starts_with(REPORT_FILE_PREFIX) {
                fs::remove_file(&path).into_app_err_with(|| format!("unable to delete file '{}'", path.display()))?;
                log::debug!(target: LOG_TARGET, "Removed stale report '{}'", path.display());
            }
        }
    }

    Ok(())
}
