//! Command-line entry point, host abstraction, and configuration
//!
//! [`run`] is the whole CLI: it takes the raw argument vector, picks a provider from the
//! registry by middleware name, resolves the remaining tokens against that provider's
//! grammar, and dispatches to the matching [`Pipeline`](crate::pipeline::Pipeline) stage.
//!
//! # Execution Flow
//!
//! 1. No arguments, or a leading flag: print the list of registered middleware
//! 2. `help` as the command: print the middleware's command table
//! 3. `--help`/`-h` anywhere: print usage of the deepest matched command
//! 4. Otherwise resolve and run `collect`, `assess`, `report`, or `run`
//!
//! Mistakes in the command line print the problem followed by the base help and still
//! return `Ok`. Failures inside a stage are returned to the caller.
//!
//! Configuration is a small TOML file holding the output root and the log level.

mod config;
mod host;
mod logging;
mod run;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML, ENV_CONFIG, ENV_LOG, ENV_OUTPUT_DIR};
pub use host::Host;
pub use logging::{LogLevel, init_logging};
pub use run::run;
