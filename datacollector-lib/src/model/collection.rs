use super::assessment_unit::AssessmentUnit;
use super::environment::Environment;

/// Everything a provider collected for one assessment.
#[derive(Debug)]
pub struct DataCollection {
    pub environment: Environment,
    pub assessment_units: Vec<AssessmentUnit>,
}

impl DataCollection {
    #[must_use]
    pub const fn new(environment: Environment, assessment_units: Vec<AssessmentUnit>) -> Self {
        Self {
            environment,
            assessment_units,
        }
    }

    #[must_use]
    pub fn assessment_name(&self) -> &str {
        &self.environment.assessment_name
    }
}
