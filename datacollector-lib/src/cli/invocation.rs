use super::command::{CliCommand, CliOption, TARGET_OPTION};

/// A single CLI run bound to the grammar.
///
/// Holds the names of every matched command from the top-level verb down to the leaf,
/// the leaf itself, the leaf's options that were present on the command line, and the
/// leftover positional tokens in the order they appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    path: Vec<String>,
    leaf: CliCommand,
    options: Vec<CliOption>,
    arguments: Vec<String>,
}

impl Invocation {
    pub(crate) const fn new(path: Vec<String>, leaf: CliCommand, options: Vec<CliOption>, arguments: Vec<String>) -> Self {
        Self {
            path,
            leaf,
            options,
            arguments,
        }
    }

    /// Name of the top-level command (`collect`, `assess`, `report`, or `run`).
    #[must_use]
    pub fn command_name(&self) -> &str {
        self.path.first().map_or_else(|| self.leaf.name(), String::as_str)
    }

    /// Names of all matched commands, top-level first.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub const fn leaf(&self) -> &CliCommand {
        &self.leaf
    }

    #[must_use]
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }

    /// Finds a bound option by its short or long name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&CliOption> {
        self.options.iter().find(|o| o.is_named(name))
    }

    #[must_use]
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(CliOption::value)
    }

    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Target ids selected with `--target`, split on `;`.
    ///
    /// Empty when the option is absent or carries no value.
    #[must_use]
    pub fn targets(&self) -> Vec<String> {
        self.option_value(TARGET_OPTION)
            .map(|v| v.split(';').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(target: Option<&str>) -> Invocation {
        let assess = CliCommand::assess(vec![], vec![], vec![]);
        let options = target
            .map(|t| vec![assess.find_option(TARGET_OPTION).unwrap().bind(Some(t.to_string()))])
            .unwrap_or_default();
        Invocation::new(vec!["assess".to_string()], assess, options, vec!["a".to_string()])
    }

    #[test]
    fn test_targets_split() {
        let inv = invocation(Some("OPEN_LIBERTY;WAS_LIBERTY"));
        assert_eq!(inv.targets(), vec!["OPEN_LIBERTY", "WAS_LIBERTY"]);
        assert!(inv.has_option("t"));
        assert_eq!(inv.option_value("target"), Some("OPEN_LIBERTY;WAS_LIBERTY"));
    }

    #[test]
    fn test_targets_drops_empty_entries() {
        let inv = invocation(Some(";A;;"));
        assert_eq!(inv.targets(), vec!["A"]);
    }

    #[test]
    fn test_targets_absent() {
        let inv = invocation(None);
        assert!(inv.targets().is_empty());
        assert!(!inv.has_option(TARGET_OPTION));
    }

    #[test]
    fn test_command_name_is_top_level() {
        let leaf = CliCommand::new("server", "", vec![], vec![], vec![]);
        let inv = Invocation::new(vec!["collect".to_string(), "server".to_string()], leaf, vec![], vec![]);
        assert_eq!(inv.command_name(), "collect");
        assert_eq!(inv.leaf().name(), "server");
        assert_eq!(inv.path().len(), 2);
    }
}
