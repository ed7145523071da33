use crate::Result;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// File name of the serialized environment inside an assessment directory.
pub const ENVIRONMENT_FILE_NAME: &str = "environment.json";

/// The host, middleware, and assessment a collection describes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    pub domain: String,
    pub operating_system: String,
    pub host_name: String,
    pub middleware_name: String,
    pub middleware_version: Option<String>,
    pub middleware_install_path: Option<String>,
    pub middleware_data_path: Option<String>,
    pub middleware_metadata: Option<Value>,
    pub assessment_name: String,
    pub assessment_type: Option<String>,
    pub assessment_metadata: Option<Value>,

    /// Kind of archive or runtime the data was taken from, surfaced as `archiveType`
    /// in assessment unit metadata.
    pub execution_context_type: Option<String>,

    /// Name of the archive or runtime the data was taken from, surfaced as `archiveName`
    /// in assessment unit metadata.
    pub execution_context_name: Option<String>,
}

/// On-disk form of an [`Environment`].
///
/// Metadata documents are embedded as JSON text rather than nested objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentDoc {
    pub domain: String,
    pub operating_system: String,
    pub host_name: String,
    pub middleware_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware_install_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware_data_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware_metadata: Option<String>,
    pub assessment_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_metadata: Option<String>,
}

impl From<&Environment> for EnvironmentDoc {
    fn from(env: &Environment) -> Self {
        Self {
            domain: env.domain.clone(),
            operating_system: env.operating_system.clone(),
            host_name: env.host_name.clone(),
            middleware_name: env.middleware_name.clone(),
            middleware_version: env.middleware_version.clone(),
            middleware_install_path: env.middleware_install_path.clone(),
            middleware_data_path: env.middleware_data_path.clone(),
            middleware_metadata: env.middleware_metadata.as_ref().map(Value::to_string),
            assessment_name: env.assessment_name.clone(),
            assessment_type: env.assessment_type.clone(),
            assessment_metadata: env.assessment_metadata.as_ref().map(Value::to_string),
        }
    }
}

impl EnvironmentDoc {
    /// Reads the document back into an [`Environment`].
    ///
    /// Embedded metadata is parsed again; an empty string reads back as absent.
    /// Execution context fields are not part of the document and come back as `None`.
    pub fn to_environment(&self) -> Result<Environment> {
        Ok(Environment {
            domain: self.domain.clone(),
            operating_system: self.operating_system.clone(),
            host_name: self.host_name.clone(),
            middleware_name: self.middleware_name.clone(),
            middleware_version: self.middleware_version.clone(),
            middleware_install_path: self.middleware_install_path.clone(),
            middleware_data_path: self.middleware_data_path.clone(),
            middleware_metadata: parse_embedded(self.middleware_metadata.as_deref(), "middlewareMetadata")?,
            assessment_name: self.assessment_name.clone(),
            assessment_type: self.assessment_type.clone(),
            assessment_metadata: parse_embedded(self.assessment_metadata.as_deref(), "assessmentMetadata")?,
            execution_context_type: None,
            execution_context_name: None,
        })
    }
}

fn parse_embedded(text: Option<&str>, field: &str) -> Result<Option<Value>> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .into_app_err_with(|| format!("invalid JSON embedded in '{field}'")),
    }
}
