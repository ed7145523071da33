//! Command dispatch logic for datacollector

use super::config::Config;
use super::logging::init_logging;
use crate::cli::{CliCommand, UsageError, base_help, command_help, middleware_help, resolve, resolve_for_help};
use crate::pipeline::Pipeline;
use crate::plugin::{Provider, ProviderRegistry};
use crate::{Host, Result};
use core::fmt;
use core::str::FromStr;
use ohno::{AppError, bail};
use std::io::Write;
use strum::{Display, EnumString};

const LOG_TARGET: &str = "       cli";

const HELP_COMMAND: &str = "help";
const HELP_FLAGS: [&str; 2] = ["--help", "-h"];

/// Top-level stages a resolved command can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Stage {
    Collect,
    Assess,
    Report,
    Run,
}

/// Why a command did not complete.
#[derive(Debug)]
enum CommandFailure {
    Usage(UsageError),
    Domain(AppError),
}

impl From<UsageError> for CommandFailure {
    fn from(e: UsageError) -> Self {
        Self::Usage(e)
    }
}

impl From<AppError> for CommandFailure {
    fn from(e: AppError) -> Self {
        Self::Domain(e)
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(e) => write!(f, "{e}"),
            Self::Domain(e) => write!(f, "{e}"),
        }
    }
}

/// Dispatch command-line arguments to the matching provider and stage
///
/// `args` starts with the program name, as produced by `std::env::args()`. Mistakes in the
/// command line are reported through `host` together with usage text and are not errors.
///
/// # Errors
///
/// Returns an error when the registry is empty or when the selected stage fails. The error
/// message is also written to the host's error stream.
pub fn run<H, I, T>(host: &mut H, registry: &dyn ProviderRegistry, config: &Config, args: I) -> Result<()>
where
    H: Host,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    init_logging(config.log_level);

    let tokens: Vec<String> = args.into_iter().skip(1).map(Into::into).collect();
    log::debug!(target: LOG_TARGET, "Resolving {tokens:?}");

    let result = dispatch(host, registry, config, &tokens);
    if let Err(e) = &result {
        let _ = writeln!(host.error(), "{e}");
    }

    result
}

fn dispatch<H: Host>(host: &mut H, registry: &dyn ProviderRegistry, config: &Config, tokens: &[String]) -> Result<()> {
    let Some((middleware, rest)) = tokens.split_first().filter(|(first, _)| !first.starts_with('-')) else {
        let help = registry_help(registry)?;
        let _ = writeln!(host.output(), "{help}");
        return Ok(());
    };

    match run_middleware(host, registry, config, middleware, rest) {
        Ok(()) => Ok(()),
        Err(CommandFailure::Usage(e)) => {
            log::debug!(target: LOG_TARGET, "Usage failure: {e}");
            let help = registry_help(registry)?;
            let _ = writeln!(host.output(), "{e}\n\n{help}\n");
            Ok(())
        }
        Err(CommandFailure::Domain(e)) => {
            log::debug!(target: LOG_TARGET, "Failed: {e}");
            Err(e)
        }
    }
}

fn registry_help(registry: &dyn ProviderRegistry) -> Result<String> {
    let names: Vec<&str> = registry.providers().iter().map(|p| p.middleware()).collect();
    if names.is_empty() {
        bail!("No plug-in available. Add a plug-in to the registry and run datacollector again.");
    }

    Ok(base_help(&names))
}

fn run_middleware<H: Host>(
    host: &mut H,
    registry: &dyn ProviderRegistry,
    config: &Config,
    middleware: &str,
    tokens: &[String],
) -> core::result::Result<(), CommandFailure> {
    let provider = registry
        .find(middleware)
        .ok_or_else(|| UsageError::UnknownMiddleware(middleware.to_string()))?;

    provider.validate_json_files()?;

    if tokens.is_empty() {
        return Err(UsageError::NoCommand.into());
    }

    let commands = grammar(provider);

    if tokens[0] == HELP_COMMAND {
        let _ = writeln!(host.output(), "\n{}\n", middleware_help(middleware, &commands));
        return Ok(());
    }

    if tokens.iter().any(|t| HELP_FLAGS.contains(&t.as_str())) {
        let command = resolve_for_help(tokens, &commands).ok_or(UsageError::HelpUnavailable)?;
        let _ = writeln!(host.output(), "\n{}\n", command_help(middleware, command));
        return Ok(());
    }

    let invocation = resolve(tokens, &commands)?.ok_or_else(|| UsageError::UnsupportedCommand(middleware.to_string()))?;
    let name = invocation.command_name();
    let Ok(stage) = Stage::from_str(name) else {
        return Err(UsageError::UnsupportedCommandName(name.to_string()).into());
    };

    log::debug!(target: LOG_TARGET, "Dispatching '{stage}' to provider '{middleware}'");

    let pipeline = Pipeline::new(config.output_dir.as_std_path());
    match stage {
        Stage::Collect => {
            let _ = pipeline.collect(provider, &invocation)?;
        }
        Stage::Assess => pipeline.assess(provider, &invocation)?,
        Stage::Report => pipeline.report(provider, &invocation)?,
        Stage::Run => pipeline.run(provider, &invocation)?,
    }

    log::debug!(target: LOG_TARGET, "Done");
    let _ = writeln!(host.output(), "Command '{name}' completed successfully.\n");
    Ok(())
}

/// The provider's commands plus the synthesized `run` command.
fn grammar(provider: &dyn Provider) -> Vec<CliCommand> {
    let assess = provider.assess_command();
    let run = CliCommand::run_from(&assess);
    vec![provider.collect_command(), assess, provider.report_command(), run]
}
