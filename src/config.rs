//! Runtime configuration loaded from the environment.

use crate::error::{Result, StudioError};
use crate::video::{GenerationSettings, DEFAULT_MODEL};
use std::str::FromStr;
use std::time::Duration;

/// Default listen host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Server and generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Google API key. When absent the Veo client reads `GOOGLE_API_KEY` itself.
    pub api_key: Option<String>,
    /// Host to bind the HTTP server to.
    pub host: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Model used when a request names none.
    pub default_model: String,
    /// Polling budget for each generation.
    pub settings: GenerationSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_model: DEFAULT_MODEL.to_string(),
            settings: GenerationSettings::default(),
        }
    }
}

impl Config {
    /// Loads `.env` (if present) and reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(StudioError::Config(format!("failed to load .env: {e}"))),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs: u64 = parse_var(&get, "VEO_TIMEOUT_SECS")?
            .unwrap_or(defaults.settings.timeout.as_secs());
        let poll_secs: u64 = parse_var(&get, "VEO_POLL_INTERVAL_SECS")?
            .unwrap_or(defaults.settings.poll_interval.as_secs());
        if timeout_secs == 0 || poll_secs == 0 {
            return Err(StudioError::Config(
                "VEO_TIMEOUT_SECS and VEO_POLL_INTERVAL_SECS must be positive".into(),
            ));
        }

        let default_model = get("VEO_MODEL").unwrap_or(defaults.default_model);
        if !crate::video::is_valid_model_id(&default_model) {
            return Err(StudioError::Config(format!(
                "VEO_MODEL is not a valid model identifier: {default_model}"
            )));
        }

        Ok(Self {
            api_key: get("GOOGLE_API_KEY"),
            host: get("VEO_STUDIO_HOST").unwrap_or(defaults.host),
            port: parse_var(&get, "VEO_STUDIO_PORT")?.unwrap_or(defaults.port),
            default_model,
            settings: GenerationSettings {
                timeout: Duration::from_secs(timeout_secs),
                poll_interval: Duration::from_secs(poll_secs),
            },
        })
    }

    /// Returns the `host:port` pair to bind to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    get(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| StudioError::Config(format!("{key} must be a number, got {raw:?}")))
        })
        .transpose()
}
