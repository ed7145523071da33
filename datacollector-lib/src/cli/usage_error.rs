use thiserror::Error;

/// Mistakes in what the operator typed.
///
/// These never abort the process: the caller prints the message together with usage text
/// and exits normally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UsageError {
    #[error("Invalid argument '{0}'. Use the help command to get usage information.")]
    InvalidArgument(String),

    #[error("No command was specified.")]
    NoCommand,

    #[error("No plug-in provider found for middleware:{0}.")]
    UnknownMiddleware(String),

    #[error("Command is not supported for middleware: {0}.")]
    UnsupportedCommand(String),

    #[error("Command '{0}' is not supported.")]
    UnsupportedCommandName(String),

    #[error("Cannot display help for command. Option is not supported for the command.")]
    HelpUnavailable,
}
