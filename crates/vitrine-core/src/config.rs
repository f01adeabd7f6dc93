//! Configuration management for vitrine.
//!
//! Loads configuration from ${VITRINE_HOME}/config.toml with sensible
//! defaults. Environment variables take precedence over file values so the
//! embedding host can configure the widget without touching the file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time; written verbatim by
/// `config init`.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for vitrine configuration and data directories.
    //!
    //! VITRINE_HOME resolution order:
    //! 1. VITRINE_HOME environment variable (if set)
    //! 2. ~/.config/vitrine (default)

    use std::path::PathBuf;

    /// Returns the vitrine home directory.
    pub fn vitrine_home() -> PathBuf {
        if let Ok(home) = std::env::var("VITRINE_HOME") {
            return PathBuf::from(home);
        }

        home_dir()
            .map(|h| h.join(".config").join("vitrine"))
            .expect("Could not determine home directory")
    }

    /// Returns the user's home directory from $HOME (or %USERPROFILE%).
    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vitrine_home().join("config.toml")
    }

    /// Returns the directory TUI-mode log files are written to.
    pub fn logs_dir() -> PathBuf {
        vitrine_home().join("logs")
    }
}

/// Remote data store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the PostgREST-style store.
    pub base_url: Option<String>,
    /// Public (anon) API key sent alongside the bearer credential.
    pub anon_key: Option<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The single origin credential messages are accepted from.
    pub parent_origin: String,

    /// Grace period before giving up on credentials, in milliseconds.
    pub auth_grace_ms: u64,

    /// Remote store configuration.
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    const DEFAULT_PARENT_ORIGIN: &str = "http://localhost:3000";
    const DEFAULT_AUTH_GRACE_MS: u64 = 500;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the default config template if no config file exists yet.
    ///
    /// Returns true if the file was created.
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(true)
    }

    /// The trusted origin, with env precedence: VITRINE_PARENT_ORIGIN > config.
    pub fn resolved_parent_origin(&self) -> String {
        resolve_env_or("VITRINE_PARENT_ORIGIN", &self.parent_origin)
    }

    /// The credential grace period as a [`Duration`].
    pub fn auth_grace(&self) -> Duration {
        Duration::from_millis(self.auth_grace_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parent_origin: Self::DEFAULT_PARENT_ORIGIN.to_string(),
            auth_grace_ms: Self::DEFAULT_AUTH_GRACE_MS,
            store: StoreConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Resolves the store base URL with precedence: env > config.
    ///
    /// # Errors
    /// Returns an error when neither source provides a value, or the value is
    /// not a valid URL.
    pub fn resolve_base_url(&self) -> Result<String> {
        let url = resolve_required(
            self.base_url.as_deref(),
            "VITRINE_STORE_URL",
            "base_url in [store]",
        )?;
        validate_url(&url)?;
        Ok(url)
    }

    /// Resolves the anon key with precedence: env > config.
    pub fn resolve_anon_key(&self) -> Result<String> {
        resolve_required(
            self.anon_key.as_deref(),
            "VITRINE_ANON_KEY",
            "anon_key in [store]",
        )
    }
}

/// Env var first, falling back to the given config value.
fn resolve_env_or(env_var: &str, config_value: &str) -> String {
    if let Ok(value) = std::env::var(env_var) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    config_value.to_string()
}

/// Env var first, then config; errors when both are absent.
fn resolve_required(config_value: Option<&str>, env_var: &str, config_field: &str) -> Result<String> {
    if let Ok(value) = std::env::var(env_var) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    if let Some(value) = config_value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    anyhow::bail!("No store credentials available. Set {env_var} or {config_field}.")
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid store base URL: {url}"))?;
    Ok(())
}
