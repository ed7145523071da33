use super::command::CliCommand;
use core::fmt::Write;

const TOOL_NAME: &str = "datacollector";
const COMMAND_COLUMN_WIDTH: usize = 15;

fn command_hint() -> String {
    format!("Run '{TOOL_NAME} MIDDLEWARE COMMAND --help' for more information on a command.")
}

/// Top-level help listing every registered middleware.
#[must_use]
pub fn base_help<S: AsRef<str>>(middlewares: &[S]) -> String {
    let names: Vec<&str> = middlewares.iter().map(AsRef::as_ref).collect();
    format!(
        "Usage: {TOOL_NAME} MIDDLEWARE COMMAND [OPTIONS]\n\n\
         Middleware:\n  Plug-ins available for these middleware [ {} ]\n\n\
         Commands:\n  help      Get information on the commands and options available for a middleware",
        names.join(" | ")
    )
}

/// Help for one middleware, listing its top-level commands.
#[must_use]
pub fn middleware_help(middleware: &str, commands: &[CliCommand]) -> String {
    let mut usage = format!("Usage: {TOOL_NAME} {middleware} COMMAND [OPTIONS]\n\nCommands:");
    for command in commands {
        let _ = write!(usage, "\n  {:<COMMAND_COLUMN_WIDTH$}{}", command.name(), command.description());
    }

    let _ = write!(usage, "\n\n{}", command_hint());
    usage
}

/// Usage for a single command of a middleware.
#[must_use]
pub fn command_help(middleware: &str, command: &CliCommand) -> String {
    format!("Usage: {TOOL_NAME} {middleware} {}\n\n{}", command.usage_help(), command_hint())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_help_lists_middleware() {
        let help = base_help(&["was", "generic"]);
        assert!(help.starts_with("Usage: datacollector MIDDLEWARE COMMAND [OPTIONS]\n"));
        assert!(help.contains("[ was | generic ]"));
        assert!(help.ends_with("available for a middleware"));
    }

    #[test]
    fn test_middleware_help_table() {
        let commands = vec![
            CliCommand::collect(vec![], vec![], vec![]),
            CliCommand::report(vec![], vec![], vec![]),
        ];
        let help = middleware_help("was", &commands);
        assert!(help.starts_with("Usage: datacollector was COMMAND [OPTIONS]\n\nCommands:\n"));
        assert!(help.contains("\n  collect        Collects data about the middleware installation\n"));
        assert!(help.contains("\n  report         Generates reports from existing assessments\n"));
        assert!(help.lines().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn test_command_help() {
        let report = CliCommand::report(vec![], vec![], vec![]);
        let help = command_help("was", &report);
        insta::assert_snapshot!(
            help.lines().next().unwrap(),
            @"Usage: datacollector was report"
        );
        assert!(help.ends_with("for more information on a command."));
    }
}
