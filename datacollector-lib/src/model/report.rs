use super::recommendation::Target;
use crate::pipeline::sanitize_path_component;
use strum::{Display, EnumString};

/// Prefix shared by every generated report file.
pub const REPORT_FILE_PREFIX: &str = "recommendations_";

/// Rendering format of a report, used as its file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ReportType {
    Json,
    Html,
    Csv,
    Txt,
    Pdf,
}

/// A rendered report for one assessment unit and target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub assessment_unit_name: String,
    pub target: Target,
    pub report_type: ReportType,
    pub content: Vec<u8>,
}

impl Report {
    #[must_use]
    pub fn new(assessment_unit_name: impl Into<String>, target: Target, report_type: ReportType, content: impl Into<Vec<u8>>) -> Self {
        Self {
            assessment_unit_name: assessment_unit_name.into(),
            target,
            report_type,
            content: content.into(),
        }
    }

    /// `recommendations_<location>_<platform>.<type>`, safe to use as a file name.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{REPORT_FILE_PREFIX}{}_{}.{}",
            sanitize_path_component(&self.target.location),
            sanitize_path_component(&self.target.platform),
            self.report_type
        )
    }
}
