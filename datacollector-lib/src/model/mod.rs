//! Documents exchanged between providers and the pipeline
//!
//! Providers build [`DataCollection`], [`Recommendation`], and [`Report`] values; the pipeline
//! persists them. The `*Doc` types are the exact on-disk JSON shapes.

mod assessment_unit;
mod collection;
mod content_mask;
pub mod document;
mod environment;
mod recommendation;
mod report;

pub use assessment_unit::{AssessmentUnit, AssessmentUnitMetadata, METADATA_SCHEMA_VERSION};
pub use collection::DataCollection;
pub use content_mask::{ContentMask, RegexLineMask};
pub use environment::{ENVIRONMENT_FILE_NAME, Environment, EnvironmentDoc};
pub use recommendation::{
    RECOMMENDATIONS_FILE_NAME, Recommendation, RecommendationDoc, Target, TargetRecommendation, UnitRecommendation,
    UnitRecommendationDoc,
};
pub use report::{REPORT_FILE_PREFIX, Report, ReportType};
