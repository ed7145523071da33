use super::logging::LogLevel;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::str::FromStr;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the base directory.
pub const CONFIG_FILE_NAME: &str = "datacollector.toml";

/// Environment variable naming an explicit configuration file.
pub const ENV_CONFIG: &str = "DATACOLLECTOR_CONFIG";

/// Environment variable overriding `output_dir`.
pub const ENV_OUTPUT_DIR: &str = "DATACOLLECTOR_OUTPUT_DIR";

/// Environment variable overriding `log_level`.
pub const ENV_LOG: &str = "DATACOLLECTOR_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root under which assessment directories and archives are written
    pub output_dir: Utf8PathBuf,

    /// Diagnostic log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Otherwise `datacollector.toml` in `base_dir` is
    /// used when present.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading datacollector configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading datacollector configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Applies `DATACOLLECTOR_OUTPUT_DIR` and `DATACOLLECTOR_LOG` from `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = Utf8PathBuf::from(dir);
        }

        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = LogLevel::from_str(&level).into_app_err_with(|| format!("invalid {ENV_LOG} value '{level}'"))?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_str().trim().is_empty() {
            return Err(app_err!("output_dir must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.output_dir, "datacollector-output");
        assert_eq!(config.log_level, LogLevel::None);
    }

    #[test]
    fn test_validate_empty_output_dir() {
        let config = Config {
            output_dir: Utf8PathBuf::from("  "),
            ..Config::default()
        };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: core::result::Result<Config, _> = toml::from_str("output_dir = \"x\"\ncolor = true\n");
        let _ = result.unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_from_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(base.join(CONFIG_FILE_NAME), "output_dir = \"out\"\nlog_level = \"debug\"\n").unwrap();

        let config = Config::load(&base, None).unwrap();
        assert_eq!(config.output_dir, "out");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert_eq!(Config::load(&base, None).unwrap(), Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_explicit_config_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let missing = base.join("nope.toml");
        let err = Config::load(&base, Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .with_env_overrides(|key| match key {
                ENV_OUTPUT_DIR => Some("/tmp/dc".to_string()),
                ENV_LOG => Some("info".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.output_dir, "/tmp/dc");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_env_override_bad_level() {
        let err = Config::default()
            .with_env_overrides(|key| (key == ENV_LOG).then(|| "chatty".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_LOG));
    }
}
