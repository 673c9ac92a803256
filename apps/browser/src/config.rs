use std::path::Path;

use anyhow::Context;
use ::config::{Config, Environment, File};
use serde::Deserialize;
use shared::domain::{DEFAULT_ENDPOINT, DEFAULT_TOTAL_RECORDS};

pub const DEFAULT_CONFIG_FILE: &str = "browser";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub total_records: usize,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            total_records: DEFAULT_TOTAL_RECORDS,
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `browser.toml` (or the explicit `path`, which must exist),
/// then `APP__*` environment variables.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let builder = Config::builder()
        .set_default("endpoint", defaults.endpoint)?
        .set_default("total_records", defaults.total_records as i64)?
        .set_default("log_filter", defaults.log_filter)?;

    let builder = match path {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
    };

    let settings = builder
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read browser configuration")?
        .try_deserialize::<Settings>()
        .context("invalid browser configuration")?;

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
