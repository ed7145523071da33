use crate::Result;
use crate::cli::{CliCommand, Invocation};
use crate::model::{DataCollection, Recommendation, Report};
use std::path::Path;

/// Collection and analysis logic for one middleware.
pub trait Provider: core::fmt::Debug {
    /// Name used on the command line to select this provider.
    fn middleware(&self) -> &str;

    /// Grammar of the `collect` command, usually built with [`CliCommand::collect`].
    fn collect_command(&self) -> CliCommand;

    /// Grammar of the `assess` command, usually built with [`CliCommand::assess`].
    ///
    /// The `run` command reuses this grammar.
    fn assess_command(&self) -> CliCommand;

    /// Grammar of the `report` command, usually built with [`CliCommand::report`].
    fn report_command(&self) -> CliCommand;

    fn collections(&self, invocation: &Invocation) -> Result<Vec<DataCollection>>;

    fn recommendations(&self, invocation: &Invocation) -> Result<Vec<Recommendation>>;

    /// Reports for an assessment found under the output root.
    ///
    /// `assessment_dir` holds the documents written by earlier stages. `assessment_name` is
    /// the directory name, so an assessment named `cell:01` during collection arrives here
    /// as `cell_01`.
    fn reports(&self, assessment_name: &str, assessment_dir: &Path, invocation: &Invocation) -> Result<Vec<Report>>;

    /// Validates the provider's bundled JSON documents before any command runs.
    fn validate_json_files(&self) -> Result<()> {
        Ok(())
    }
}
