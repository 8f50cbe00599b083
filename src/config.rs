use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_TOLERANCE, ENV_PREFIX};
use crate::solver::SolveOptions;

/// Settings for the command-line solver.
///
/// Layered lowest to highest: built-in defaults, `<dir>/conf.toml`, then
/// `POLYSECRET_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Tolerance used when cross-validating shares.
    pub tolerance: f64,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: DEFAULT_TOLERANCE,
            pretty: false,
        }
    }
}

impl SolverConfig {
    /// Loads the configuration from `dir`. A missing `conf.toml` is not an
    /// error; the defaults are used instead.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let conf_file = dir.join(CONFIG_FILE_NAME);
        debug!("📝 Loading config at path: {:#?}", conf_file);

        let defaults = SolverConfig::default();
        let settings = Config::builder()
            .set_default("tolerance", defaults.tolerance)?
            .set_default("pretty", defaults.pretty)?
            .add_source(config::File::from(conf_file).required(false))
            // Eg.. `POLYSECRET_TOLERANCE=0.5 polysecret solve case.json`
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        settings.try_into()
    }

    /// Writes the default configuration to `<dir>/conf.toml`, creating `dir`
    /// if needed. An existing file is left untouched. Returns the file path.
    pub fn write_default(dir: &Path) -> Result<PathBuf, ConfigError> {
        fs::create_dir_all(dir).map_err(|err| ConfigError::Foreign(Box::new(err)))?;

        let conf_file = dir.join(CONFIG_FILE_NAME);
        if !conf_file.exists() {
            let toml = toml::to_string_pretty(&SolverConfig::default())
                .map_err(|err| ConfigError::Foreign(Box::new(err)))?;
            fs::write(&conf_file, toml).map_err(|err| ConfigError::Foreign(Box::new(err)))?;
            debug!("📝 Wrote default config to {:#?}", conf_file);
        }

        Ok(conf_file)
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            tolerance: self.tolerance,
        }
    }
}

impl TryFrom<Config> for SolverConfig {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        Ok(SolverConfig {
            tolerance: config.get_float("tolerance")?,
            pretty: config.get_bool("pretty")?,
        })
    }
}
