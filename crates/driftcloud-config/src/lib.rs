//! Shared configuration for Driftcloud tooling.
//!
//! TOML config file + `DRIFTCLOUD_`-prefixed environment overrides,
//! credential resolution, and translation to
//! `driftcloud_core::EngineConfig`. The core crate never reads disk or
//! environment itself; everything it needs arrives through here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use driftcloud_core::{EngineConfig, PollOptions};

/// Well-known environment variable holding the API key.
pub const API_KEY_ENV: &str = "DRIFTCLOUD_API_KEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured (set {API_KEY_ENV} or api_key in the config file)")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level configuration.
///
/// Every field is overridable via the environment with a `DRIFTCLOUD_`
/// prefix, so `DRIFTCLOUD_API_KEY` and `DRIFTCLOUD_API_HOST` work
/// without any file on disk.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// API key (plaintext — prefer the env var).
    pub api_key: Option<String>,

    /// Environment variable name to read the API key from instead.
    pub api_key_env: Option<String>,

    /// Control-plane URL override.
    pub api_host: Option<String>,

    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Interval between convergence status fetches.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Overall deadline for create/update/delete waits.
    #[serde(default = "default_deadline")]
    pub convergence_deadline_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: None,
            api_host: None,
            timeout_secs: default_timeout(),
            poll_interval_secs: default_poll_interval(),
            convergence_deadline_secs: default_deadline(),
        }
    }
}

fn default_timeout() -> u64 {
    15
}
fn default_poll_interval() -> u64 {
    5
}
fn default_deadline() -> u64 {
    300
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "driftcloud", "driftcloud").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("driftcloud");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from an explicit file path + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DRIFTCLOUD_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key from the credential chain:
/// named env var from `api_key_env`, plaintext `api_key`, then the
/// well-known `DRIFTCLOUD_API_KEY` variable.
pub fn resolve_api_key(config: &Config) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = config.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(ref key) = config.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    if let Ok(val) = std::env::var(API_KEY_ENV) {
        return Ok(SecretString::from(val));
    }

    Err(ConfigError::NoCredentials)
}

// ── Translation to EngineConfig ─────────────────────────────────────

/// Build an `EngineConfig` from a loaded `Config`.
pub fn to_engine_config(config: &Config) -> Result<EngineConfig, ConfigError> {
    let api_key = resolve_api_key(config)?;

    let mut engine = EngineConfig::new(api_key);

    if let Some(ref host) = config.api_host {
        engine.api_host = host.parse().map_err(|_| ConfigError::Validation {
            field: "api_host".into(),
            reason: format!("invalid URL: {host}"),
        })?;
    }

    engine.timeout = Duration::from_secs(config.timeout_secs);
    engine.poll = PollOptions {
        interval: Duration::from_secs(config.poll_interval_secs),
        deadline: Duration::from_secs(config.convergence_deadline_secs),
    };

    Ok(engine)
}
