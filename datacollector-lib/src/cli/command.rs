use core::fmt::Write;

pub const CMD_COLLECT: &str = "collect";
pub const CMD_ASSESS: &str = "assess";
pub const CMD_REPORT: &str = "report";
pub const CMD_RUN: &str = "run";

const CMD_COLLECT_DESC: &str = "Collects data about the middleware installation";
const CMD_ASSESS_DESC: &str = "Collects data and generates recommendations";
const CMD_REPORT_DESC: &str = "Generates reports from existing assessments";
const CMD_RUN_DESC: &str = "Performs collect, assess, and report";

/// Long name of the built-in option used to select recommendation targets.
pub const TARGET_OPTION: &str = "target";

const COMMAND_COLUMN_WIDTH: usize = 15;
const OPTION_COLUMN_WIDTH: usize = 24;

/// A flag accepted by a command.
///
/// An option is identified by a single-character short flag (`-a`), a long flag (`--all`),
/// or both. After resolution it may carry the value taken from the token that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOption {
    short: Option<char>,
    long: Option<String>,
    description: String,
    value: Option<String>,
}

impl CliOption {
    #[must_use]
    pub fn new(short: Option<char>, long: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            short,
            long: long.map(str::to_string),
            description: description.into(),
            value: None,
        }
    }

    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.short
    }

    #[must_use]
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The value bound during resolution, `None` for a toggle.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether this option answers to `name`, which is either a single character
    /// (matched against the short flag) or a word (matched against the long flag).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.short == Some(c),
            _ => self.long.as_deref() == Some(name),
        }
    }

    pub(crate) fn bind(&self, value: Option<String>) -> Self {
        Self { value, ..self.clone() }
    }

    fn flags_display(&self) -> String {
        match (self.short, self.long.as_deref()) {
            (Some(s), Some(l)) => format!("-{s}, --{l}"),
            (Some(s), None) => format!("-{s}"),
            (None, Some(l)) => format!("    --{l}"),
            (None, None) => String::new(),
        }
    }
}

/// A node in a provider's command tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliCommand {
    name: String,
    description: String,
    options: Vec<CliOption>,
    commands: Vec<CliCommand>,
    argument_names: Vec<String>,
}

impl CliCommand {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<CliOption>,
        commands: Vec<Self>,
        argument_names: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options,
            commands,
            argument_names,
        }
    }

    /// The `collect` command with its standard description.
    #[must_use]
    pub fn collect(options: Vec<CliOption>, commands: Vec<Self>, argument_names: Vec<String>) -> Self {
        Self::new(CMD_COLLECT, CMD_COLLECT_DESC, options, commands, argument_names)
    }

    /// The `assess` command with its standard description.
    ///
    /// The built-in `-t/--target` option is added unless the provider already declares a
    /// `target` long option.
    #[must_use]
    pub fn assess(mut options: Vec<CliOption>, commands: Vec<Self>, argument_names: Vec<String>) -> Self {
        if !options.iter().any(|o| o.long() == Some(TARGET_OPTION)) {
            let short = if options.iter().any(|o| o.short() == Some('t')) { None } else { Some('t') };
            options.push(CliOption::new(
                short,
                Some(TARGET_OPTION),
                "Semicolon separated list of target ids to keep in the recommendations",
            ));
        }

        Self::new(CMD_ASSESS, CMD_ASSESS_DESC, options, commands, argument_names)
    }

    /// The `report` command with its standard description.
    #[must_use]
    pub fn report(options: Vec<CliOption>, commands: Vec<Self>, argument_names: Vec<String>) -> Self {
        Self::new(CMD_REPORT, CMD_REPORT_DESC, options, commands, argument_names)
    }

    /// The `run` command, sharing options, subcommands, and arguments with `assess`.
    #[must_use]
    pub fn run_from(assess: &Self) -> Self {
        Self {
            name: CMD_RUN.to_string(),
            description: CMD_RUN_DESC.to_string(),
            ..assess.clone()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }

    #[must_use]
    pub fn commands(&self) -> &[Self] {
        &self.commands
    }

    #[must_use]
    pub fn argument_names(&self) -> &[String] {
        &self.argument_names
    }

    /// Find a declared option by short or long name.
    #[must_use]
    pub fn find_option(&self, name: &str) -> Option<&CliOption> {
        self.options.iter().find(|o| o.is_named(name))
    }

    /// Usage text for this command: synopsis, description, subcommands, and options.
    #[must_use]
    pub fn usage_help(&self) -> String {
        let mut usage = self.name.clone();
        if !self.commands.is_empty() {
            usage.push_str(" [COMMAND]");
        }
        if !self.options.is_empty() {
            usage.push_str(" [OPTIONS]");
        }
        for arg in &self.argument_names {
            let _ = write!(usage, " {arg}");
        }

        if !self.description.is_empty() {
            let _ = write!(usage, "\n\n{}", self.description);
        }

        if !self.commands.is_empty() {
            usage.push_str("\n\nCommands:");
            for command in &self.commands {
                let _ = write!(usage, "\n  {:<COMMAND_COLUMN_WIDTH$}{}", command.name, command.description);
            }
        }

        if !self.options.is_empty() {
            usage.push_str("\n\nOptions:");
            for option in &self.options {
                let _ = write!(usage, "\n  {:<OPTION_COLUMN_WIDTH$}{}", option.flags_display(), option.description);
            }
        }

        usage
    }
}
