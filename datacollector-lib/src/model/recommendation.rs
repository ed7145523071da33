use super::assessment_unit::{AssessmentUnit, AssessmentUnitMetadata};
use super::environment::Environment;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const LOG_TARGET: &str = "     model";

/// File name of the serialized recommendations inside an assessment directory.
pub const RECOMMENDATIONS_FILE_NAME: &str = "recommendations.json";

/// A platform an assessment unit could move to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub location: String,
    pub platform: String,
}

impl Target {
    #[must_use]
    pub fn new(id: impl Into<String>, location: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            platform: platform.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecommendation {
    pub target: Target,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Value>,
}

impl TargetRecommendation {
    #[must_use]
    pub const fn new(target: Target) -> Self {
        Self {
            target,
            complexity: None,
            issues: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecommendation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default)]
    pub targets: Vec<TargetRecommendation>,
}

/// A provider's recommendations for one assessment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendation {
    pub assessment_name: String,
    pub issue_categories: Option<Value>,
    pub complexity_rules: Option<Value>,
    pub units: Vec<UnitRecommendation>,
}

/// One assessment unit entry of `recommendations.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecommendationDoc {
    pub name: String,
    pub metadata: AssessmentUnitMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<TargetRecommendation>>,
}

/// The `recommendations.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDoc {
    pub domain: String,
    pub middleware: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware_version: Option<String>,
    pub host_name: String,
    pub assessment_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_categories: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_rules: Option<Value>,
    pub assessment_units: Vec<UnitRecommendationDoc>,
}

impl RecommendationDoc {
    /// Combines a recommendation with the collection it belongs to.
    ///
    /// Units appear in collection order. When `target_filter` is non-empty only targets whose
    /// id is listed are kept, and a unit left with no targets loses its `targets` field.
    #[must_use]
    pub fn build(rec: &Recommendation, env: &Environment, units: &[AssessmentUnit], target_filter: &[String]) -> Self {
        for unit_rec in &rec.units {
            if !units.iter().any(|u| u.name == unit_rec.name) {
                log::warn!(target: LOG_TARGET, "Skipping recommendation for unknown assessment unit '{}'", unit_rec.name);
            }
        }

        let assessment_units = units
            .iter()
            .map(|unit| {
                let unit_rec = rec.units.iter().find(|r| r.name == unit.name);
                UnitRecommendationDoc {
                    name: unit.name.clone(),
                    metadata: AssessmentUnitMetadata::new(env, &unit.name),
                    summary: unit_rec.and_then(|r| r.summary.clone()),
                    targets: unit_rec.and_then(|r| filter_targets(&r.targets, target_filter)),
                }
            })
            .collect();

        Self {
            domain: env.domain.clone(),
            middleware: env.middleware_name.clone(),
            middleware_version: env.middleware_version.clone(),
            host_name: env.host_name.clone(),
            assessment_name: rec.assessment_name.clone(),
            assessment_type: env.assessment_type.clone(),
            issue_categories: rec.issue_categories.clone(),
            complexity_rules: rec.complexity_rules.clone(),
            assessment_units,
        }
    }
}

fn filter_targets(targets: &[TargetRecommendation], filter: &[String]) -> Option<Vec<TargetRecommendation>> {
    if filter.is_empty() {
        return Some(targets.to_vec());
    }

    let kept: Vec<_> = targets.iter().filter(|t| filter.contains(&t.target.id)).cloned().collect();
    if kept.is_empty() { None } else { Some(kept) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env() -> Environment {
        Environment {
            domain: "Java".to_string(),
            middleware_name: "was".to_string(),
            host_name: "box1".to_string(),
            assessment_name: "cell01".to_string(),
            ..Environment::default()
        }
    }

    fn rec() -> Recommendation {
        let targets = vec![
            TargetRecommendation::new(Target::new("OPEN_LIBERTY", "Private", "Liberty")),
            TargetRecommendation::new(Target::new("WAS_LIBERTY", "Private", "WASLiberty")),
            TargetRecommendation::new(Target::new("EAP", "Cloud", "OpenShift")),
        ];
        Recommendation {
            assessment_name: "cell01".to_string(),
            issue_categories: Some(json!({"security": {}})),
            complexity_rules: None,
            units: vec![
                UnitRecommendation {
                    name: "server1".to_string(),
                    summary: Some(json!({"issues": 3})),
                    targets: targets.clone(),
                },
                UnitRecommendation {
                    name: "ghost".to_string(),
                    summary: None,
                    targets,
                },
            ],
        }
    }

    fn units() -> Vec<AssessmentUnit> {
        vec![AssessmentUnit::new("server1", json!({})), AssessmentUnit::new("server2", json!({}))]
    }

    fn target_ids(doc: &RecommendationDoc, unit: usize) -> Option<Vec<String>> {
        doc.assessment_units[unit]
            .targets
            .as_ref()
            .map(|t| t.iter().map(|t| t.target.id.clone()).collect())
    }

    #[test]
    fn test_build_without_filter_keeps_all() {
        let doc = RecommendationDoc::build(&rec(), &env(), &units(), &[]);
        assert_eq!(doc.assessment_units.len(), 2);
        assert_eq!(target_ids(&doc, 0).unwrap().len(), 3);
        assert_eq!(doc.assessment_units[0].summary, Some(json!({"issues": 3})));
        assert_eq!(doc.assessment_units[1].name, "server2");
        assert_eq!(doc.assessment_units[1].targets, None);
    }

    #[test]
    fn test_build_with_filter() {
        let filter = vec!["OPEN_LIBERTY".to_string(), "WAS_LIBERTY".to_string()];
        let doc = RecommendationDoc::build(&rec(), &env(), &units(), &filter);
        assert_eq!(target_ids(&doc, 0).unwrap(), filter);
    }

    #[test]
    fn test_build_with_unknown_filter_drops_targets() {
        let doc = RecommendationDoc::build(&rec(), &env(), &units(), &["NOPE".to_string()]);
        assert!(doc.assessment_units.iter().all(|u| u.targets.is_none()));

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["assessmentUnits"][0].get("targets").is_none());
    }

    #[test]
    fn test_build_document_shape() {
        let doc = RecommendationDoc::build(&rec(), &env(), &units(), &[]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["hostName"], "box1");
        assert_eq!(value["assessmentName"], "cell01");
        assert_eq!(value["issueCategories"], json!({"security": {}}));
        assert!(value.get("complexityRules").is_none());
        assert_eq!(value["assessmentUnits"][0]["metadata"]["assessmentUnitName"], "server1");
        assert_eq!(value["assessmentUnits"][0]["targets"][0]["target"]["location"], "Private");
    }
}
