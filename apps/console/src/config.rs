use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;
use storage::IdStrategy;

pub const DEFAULT_CONFIG_FILE: &str = "registrar.toml";
pub const ENV_PREFIX: &str = "REGISTRAR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start from the demo fixture rather than an empty store.
    pub seed: bool,
    pub id_strategy: IdStrategy,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: true,
            id_strategy: IdStrategy::Random,
            log_filter: "info".into(),
        }
    }
}

/// Loads settings from `path` (or `registrar.toml` in the working directory)
/// and then `REGISTRAR__*` environment variables.
///
/// An explicitly named file must exist; the default one is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let environment = Environment::with_prefix(ENV_PREFIX).separator("__");
    build_settings(path, environment)
}

fn build_settings(path: Option<&Path>, environment: Environment) -> anyhow::Result<Settings> {
    let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);

    Config::builder()
        .add_source(File::from(file.as_path()).required(path.is_some()))
        .add_source(environment)
        .build()
        .with_context(|| format!("failed to load settings from '{}'", file.display()))?
        .try_deserialize::<Settings>()
        .context("failed to deserialize settings")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
