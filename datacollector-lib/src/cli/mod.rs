//! Command grammar and resolution
//!
//! Providers describe the shape of their command line as a tree of [`CliCommand`] nodes.
//! The resolver walks that tree against the raw tokens of a single CLI run and produces
//! either a bound [`Invocation`] or the deepest matched node for contextual help.
//!
//! # Implementation Model
//!
//! Resolution is a pure function over an immutable token slice. Each recursive step
//! receives the current offset into the slice and returns the advanced offset alongside
//! the matched path, so no token list is ever shared or mutated between calls.
//!
//! Once no further child matches, the last matched node becomes the leaf and every
//! remaining token is either a flag (bound to one of the leaf's declared options, possibly
//! with the following token as its value) or a positional argument.

mod command;
mod help;
mod invocation;
mod resolver;
mod usage_error;

pub use command::{CMD_ASSESS, CMD_COLLECT, CMD_REPORT, CMD_RUN, CliCommand, CliOption, TARGET_OPTION};
pub use help::{base_help, command_help, middleware_help};
pub use invocation::Invocation;
pub use resolver::{resolve, resolve_for_help};
pub use usage_error::UsageError;
