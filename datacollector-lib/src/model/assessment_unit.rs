use super::content_mask::ContentMask;
use super::environment::Environment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Schema marker written into every assessment unit metadata document.
pub const METADATA_SCHEMA_VERSION: &str = "2.1.3";

const UNIT_NAME_IDENTIFIER: &str = "assessmentUnitName";

/// One named sub-artifact of a collection, such as a single server or application.
#[derive(Debug)]
pub struct AssessmentUnit {
    pub name: String,

    /// Opaque document written as `<name>/<name>.json`.
    pub assessment_data: Value,

    /// Files and directories to copy into the unit directory.
    ///
    /// After collection this holds the copied files instead.
    pub config_files: Vec<PathBuf>,

    pub content_masks: Vec<Box<dyn ContentMask>>,
}

impl AssessmentUnit {
    #[must_use]
    pub fn new(name: impl Into<String>, assessment_data: Value) -> Self {
        Self {
            name: name.into(),
            assessment_data,
            config_files: Vec::new(),
            content_masks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_config_files(mut self, files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.config_files.extend(files.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_content_mask(mut self, mask: impl ContentMask + 'static) -> Self {
        self.content_masks.push(Box::new(mask));
        self
    }
}

/// Identification block attached to each unit in `recommendations.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentUnitMetadata {
    pub domain: String,
    pub middleware: String,
    pub dc_version: String,
    pub host: String,
    pub assessment_unit_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_name: Option<String>,
    pub identifier: BTreeMap<String, Value>,
}

impl AssessmentUnitMetadata {
    #[must_use]
    pub fn new(env: &Environment, unit_name: &str) -> Self {
        let mut metadata = Self {
            domain: env.domain.clone(),
            middleware: env.middleware_name.clone(),
            dc_version: METADATA_SCHEMA_VERSION.to_string(),
            host: env.host_name.clone(),
            assessment_unit_name: unit_name.to_string(),
            archive_type: env.execution_context_type.clone(),
            archive_name: env.execution_context_name.clone(),
            identifier: BTreeMap::new(),
        };

        metadata.add_identifier(UNIT_NAME_IDENTIFIER, unit_name);
        metadata
    }

    /// Adds or replaces an identifier entry.
    pub fn add_identifier(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let _ = self.identifier.insert(key.into(), value.into());
    }
}
