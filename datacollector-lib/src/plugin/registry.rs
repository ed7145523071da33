use super::provider::Provider;

/// The set of providers available to the CLI.
pub trait ProviderRegistry: core::fmt::Debug {
    fn providers(&self) -> Vec<&dyn Provider>;

    fn find(&self, middleware: &str) -> Option<&dyn Provider> {
        self.providers().into_iter().find(|p| p.middleware() == middleware)
    }
}

/// A registry over a fixed list of providers, searched in registration order.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl StaticRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl ProviderRegistry for StaticRegistry {
    fn providers(&self) -> Vec<&dyn Provider> {
        self.providers.iter().map(AsRef::as_ref).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::cli::{CliCommand, Invocation};
    use crate::model::{DataCollection, Recommendation, Report};
    use std::path::Path;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Provider for Named {
        fn middleware(&self) -> &str {
            self.0
        }

        fn collect_command(&self) -> CliCommand {
            CliCommand::collect(vec![], vec![], vec![])
        }

        fn assess_command(&self) -> CliCommand {
            CliCommand::assess(vec![], vec![], vec![])
        }

        fn report_command(&self) -> CliCommand {
            CliCommand::report(vec![], vec![], vec![])
        }

        fn collections(&self, _: &Invocation) -> Result<Vec<DataCollection>> {
            Ok(Vec::new())
        }

        fn recommendations(&self, _: &Invocation) -> Result<Vec<Recommendation>> {
            Ok(Vec::new())
        }

        fn reports(&self, _: &str, _: &Path, _: &Invocation) -> Result<Vec<Report>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_find_by_middleware() {
        let registry = StaticRegistry::new().with_provider(Named("was")).with_provider(Named("jboss"));
        assert_eq!(registry.providers().len(), 2);
        assert_eq!(registry.find("jboss").unwrap().middleware(), "jboss");
        assert!(registry.find("tomcat").is_none());
    }

    #[test]
    fn test_first_registered_wins() {
        let registry = StaticRegistry::new().with_provider(Named("was")).with_provider(Named("was"));
        assert!(registry.find("was").is_some());
        assert!(registry.find("was").unwrap().validate_json_files().is_ok());
    }
}
