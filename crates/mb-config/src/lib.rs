//! # mb-config
//!
//! Layered configuration loading for milestone-bridge using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MILESTONE_BRIDGE_*` prefix, `__` as separator)
//! 2. An explicit config file passed on the command line
//! 3. Project-level `.milestone-bridge/config.toml`
//! 4. User-level `~/.config/milestone-bridge/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `MILESTONE_BRIDGE_TEAMWORK__API_KEY` -> `teamwork.api_key`,
//! `MILESTONE_BRIDGE_PROCESS_STREET__API_KEY` -> `process_street.api_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use mb_config::BridgeConfig;
//!
//! let config = BridgeConfig::load_with_dotenv(None).expect("config");
//! config.validate().expect("teamwork and process street credentials");
//! println!("listening on {}", config.server.listen);
//! ```

mod error;
mod http;
mod process_street;
mod server;
mod teamwork;

pub use error::ConfigError;
pub use http::HttpConfig;
pub use process_street::ProcessStreetConfig;
pub use server::ServerConfig;
pub use teamwork::TeamworkConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Prefix of every environment variable read into the config.
pub const ENV_PREFIX: &str = "MILESTONE_BRIDGE_";

/// Keys whose environment values are taken verbatim. figment would otherwise
/// read an API key like `00123` as the integer `123`.
const STRING_KEYS: [&str; 7] = [
    "teamwork.api_key",
    "teamwork.base_url",
    "process_street.api_key",
    "process_street.base_url",
    "server.listen",
    "server.path",
    "http.user_agent",
];

/// Process-wide configuration, loaded once at startup and never mutated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub teamwork: TeamworkConfig,
    #[serde(default)]
    pub process_street: ProcessStreetConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl BridgeConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if `explicit` names a missing file,
    /// or [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit)?.extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is normal in production.
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if `explicit` does not exist.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".milestone-bridge/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Toml::file(path));
        }

        let env = Env::prefixed(ENV_PREFIX).split("__");
        let raw: Vec<(String, String)> = env
            .iter()
            .filter(|(key, _)| STRING_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect();

        figment = figment.merge(env);
        for (key, value) in raw {
            figment = figment.merge(Serialized::default(&key, value));
        }
        Ok(figment)
    }

    /// Check that every required value is present and every bounded value is
    /// in range. Reports the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::InvalidValue`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("teamwork.api_key", &self.teamwork.api_key)?;
        require("teamwork.base_url", &self.teamwork.base_url)?;
        require_http_url("teamwork.base_url", &self.teamwork.base_url)?;
        require("process_street.api_key", &self.process_street.api_key)?;
        require("process_street.base_url", &self.process_street.base_url)?;
        require_http_url("process_street.base_url", &self.process_street.base_url)?;

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        require("server.listen", &self.server.listen)?;
        if !self.server.path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "server.path",
                reason: format!("'{}' must start with '/'", self.server.path),
            });
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_body_bytes",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("milestone-bridge").join("config.toml"))
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Missing { field });
    }
    Ok(())
}

fn require_http_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        field,
        reason: format!("'{value}' is not an http(s) URL"),
    })
}
