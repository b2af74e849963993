//! layered configuration: an optional `trailmap.toml` file plus environment
//! overrides, read with the `config` crate the same way `bambam-omf`'s
//! `OmfApp` layers its own operation config (`omf_app.rs`).

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::CliError;

/// process-wide settings resolved once at startup and threaded explicitly
/// into the oracle/CLI rather than read from a global (`spec.md` §9:
/// "pass credentials via dependency injection").
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// directions-API credential. absence degrades
    /// `trailmap_directions::default_oracle` to estimator-only
    /// (`spec.md` §6 Configuration).
    pub directions_api_key: Option<String>,

    /// directions-API request timeout, e.g. `"5s"` (`spec.md` §5: "default
    /// 5 s"), parsed with `humantime`.
    #[serde(default)]
    pub directions_timeout: Option<String>,

    /// LRU cache capacity for the travel oracle (`spec.md` §4.C10:
    /// "128-256").
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

/// loads settings from an optional TOML file, then lets environment
/// variables prefixed `TRAILMAP_` override individual keys (e.g.
/// `TRAILMAP_DIRECTIONS_API_KEY`).
pub fn load_settings(config_file: Option<&Path>) -> Result<Settings, CliError> {
    let mut builder = Config::builder();
    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path));
    }
    builder = builder.add_source(Environment::with_prefix("TRAILMAP").separator("_"));

    let config = builder
        .build()
        .map_err(|e| CliError::Config(format!("failed loading configuration: {e}")))?;

    config
        .try_deserialize::<Settings>()
        .map_err(|e| CliError::Config(format!("failed parsing configuration: {e}")))
}

/// resolves the directions-oracle timeout, falling back to
/// [`trailmap_directions::DEFAULT_TIMEOUT`] when unset or unparsable.
pub fn resolve_timeout(settings: &Settings) -> std::time::Duration {
    settings
        .directions_timeout
        .as_deref()
        .and_then(|s| humantime::parse_duration(s).ok())
        .unwrap_or(trailmap_directions::DEFAULT_TIMEOUT)
}
