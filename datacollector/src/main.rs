//! Collect, assess, and report on middleware installations through pluggable providers.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use camino::{Utf8Path, Utf8PathBuf};
use datacollector_lib::commands::ENV_CONFIG;
use datacollector_lib::generic::GenericProvider;
use datacollector_lib::plugin::StaticRegistry;
use datacollector_lib::{Config, Host, run};
use std::io::Write;
use std::io::{stderr, stdout};
use std::process::ExitCode;

/// Host writing to the process's standard streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn load_config() -> Result<Config, ohno::AppError> {
    let explicit = std::env::var(ENV_CONFIG).ok().map(Utf8PathBuf::from);
    Config::load(Utf8Path::new("."), explicit.as_deref())?.with_env_overrides(|key| std::env::var(key).ok())
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<ExitCode, ohno::AppError> {
    let config = load_config()?;
    let registry = StaticRegistry::new().with_provider(GenericProvider::new());

    // run has already written the failure to stderr
    match run(&mut RealHost, &registry, &config, std::env::args()) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
