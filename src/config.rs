//! Stream configuration with environment and config file support.
//!
//! # Configuration Precedence
//!
//! Settings are resolved in this order (highest priority first):
//!
//! 1. **Programmatic** — a config passed to [`StreamConfig::install`]
//! 2. **Environment variables** — values from `REMOTE_DATA_STREAM_*` env vars
//! 3. **Config file** — the TOML file named by `REMOTE_DATA_STREAM_CONFIG`
//!    (requires the `config-file` feature)
//! 4. **Defaults** — [`StreamConfig::default()`]
//!
//! # Supported Environment Variables
//!
//! | Variable | Type | Maps to |
//! |----------|------|---------|
//! | `REMOTE_DATA_STREAM_FLATTEN` | `switch` \| `concat` | `flatten` |
//! | `REMOTE_DATA_STREAM_LOG_SUBSCRIPTIONS` | `bool` | `log_subscriptions` |
//! | `REMOTE_DATA_STREAM_CONFIG` | path | TOML file (`config-file` feature) |

use crate::error::ConfigError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable name for the `chain` flatten strategy.
pub const ENV_FLATTEN: &str = "REMOTE_DATA_STREAM_FLATTEN";
/// Environment variable name for subscription lifecycle logging.
pub const ENV_LOG_SUBSCRIPTIONS: &str = "REMOTE_DATA_STREAM_LOG_SUBSCRIPTIONS";
/// Environment variable naming a TOML config file.
pub const ENV_CONFIG_FILE: &str = "REMOTE_DATA_STREAM_CONFIG";

static ACTIVE: OnceLock<RwLock<StreamConfig>> = OnceLock::new();

/// How `chain` flattens the inner streams it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlattenStrategy {
    /// Cancel the active inner stream whenever the outer stream emits.
    #[default]
    Switch,
    /// Run inner streams one after another, in outer emission order.
    Concat,
}

impl FromStr for FlattenStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "switch" | "latest" => Ok(Self::Switch),
            "concat" | "sequential" => Ok(Self::Concat),
            other => Err(format!("expected switch or concat, got {other:?}")),
        }
    }
}

impl fmt::Display for FlattenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch => f.write_str("switch"),
            Self::Concat => f.write_str("concat"),
        }
    }
}

/// Process-wide stream settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Flatten strategy used by `chain`.
    pub flatten: FlattenStrategy,
    /// Log subscription lifecycle events at `debug` instead of `trace`.
    pub log_subscriptions: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            flatten: FlattenStrategy::Switch,
            log_subscriptions: false,
        }
    }
}

impl StreamConfig {
    /// Sets the flatten strategy.
    #[must_use]
    pub fn flatten(mut self, flatten: FlattenStrategy) -> Self {
        self.flatten = flatten;
        self
    }

    /// Enables or disables subscription lifecycle logging.
    #[must_use]
    pub fn log_subscriptions(mut self, enabled: bool) -> Self {
        self.log_subscriptions = enabled;
        self
    }

    /// Returns the active configuration.
    ///
    /// The first call resolves the configuration from the environment.
    #[must_use]
    pub fn current() -> Self {
        active().read().clone()
    }

    /// Replaces the active configuration.
    pub fn install(config: Self) {
        tracing::debug!(
            flatten = %config.flatten,
            log_subscriptions = config.log_subscriptions,
            "installing stream config"
        );
        *active().write() = config;
    }

    /// Resolves defaults, then the config file (if enabled), then environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(feature = "config-file")]
        let mut config = match read_env(ENV_CONFIG_FILE) {
            Some(path) => Self::from_toml_file(path.trim())?,
            None => Self::default(),
        };
        #[cfg(not(feature = "config-file"))]
        let mut config = Self::default();

        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Parses a TOML document with a `[stream]` table.
    ///
    /// ```toml
    /// [stream]
    /// flatten = "concat"
    /// log_subscriptions = true
    /// ```
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: StreamTomlConfig = toml::from_str(source)?;
        Ok(file.stream)
    }

    /// Reads and parses a TOML config file.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// TOML layout of a config file.
#[cfg(feature = "config-file")]
#[derive(Deserialize, Default, Debug)]
struct StreamTomlConfig {
    #[serde(default)]
    stream: StreamConfig,
}

fn active() -> &'static RwLock<StreamConfig> {
    ACTIVE.get_or_init(|| {
        let config = StreamConfig::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid stream config, using defaults");
            StreamConfig::default()
        });
        tracing::debug!(
            flatten = %config.flatten,
            log_subscriptions = config.log_subscriptions,
            "resolved stream config"
        );
        RwLock::new(config)
    })
}

/// Apply environment variable overrides to a [`StreamConfig`].
///
/// Only variables that are set in the environment are applied.
/// Returns an error if a variable is set but contains an unparseable value.
pub fn apply_env_overrides(config: &mut StreamConfig) -> Result<(), ConfigError> {
    if let Some(val) = read_env(ENV_FLATTEN) {
        config.flatten = val
            .parse()
            .map_err(|message: String| ConfigError::invalid(ENV_FLATTEN, message))?;
    }
    if let Some(val) = read_env(ENV_LOG_SUBSCRIPTIONS) {
        config.log_subscriptions = parse_bool(ENV_LOG_SUBSCRIPTIONS, &val)?;
    }
    Ok(())
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_bool(var_name: &'static str, val: &str) -> Result<bool, ConfigError> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(
            var_name,
            format!("expected bool (true/false/1/0/yes/no), got {val:?}"),
        )),
    }
}
