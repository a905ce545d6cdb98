//! Service configuration and logging setup.

use crate::errors::TokenError;
use serde::{Deserialize, Serialize};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default upper bound on nodes visited by one approval pass.
pub const DEFAULT_MAX_FOREST_NODES: usize = 64;

/// Default upper bound on token decimals.
pub const DEFAULT_MAX_DECIMALS: u8 = 9;

/// Token service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Upper bound on nodes visited by one approval pass
    pub max_forest_nodes: usize,

    /// Upper bound on decimals accepted by `initialize`
    pub max_decimals: u8,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            max_forest_nodes: DEFAULT_MAX_FOREST_NODES,
            max_decimals: DEFAULT_MAX_DECIMALS,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FTG_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `FTG_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `FTG_MAX_FOREST_NODES`: Approval pass node limit (default: 64)
    /// - `FTG_MAX_DECIMALS`: Decimals limit (default: 9)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_level: lookup("FTG_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("FTG_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            max_forest_nodes: lookup("FTG_MAX_FOREST_NODES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_forest_nodes),

            max_decimals: lookup("FTG_MAX_DECIMALS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_decimals),
        }
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TokenError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TokenError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject unusable settings.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.max_forest_nodes == 0 {
            return Err(TokenError::ConfigInvalid(
                "max_forest_nodes must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` directives win over `config.log_level`. Calling this when a
/// subscriber is already installed is a no-op.
pub fn init_logging(config: &ServiceConfig) -> Result<(), TokenError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TokenError::ConfigInvalid(e.to_string()))?;

    let installed = if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    if installed.is_ok() {
        tracing::debug!(level = %config.log_level, json = config.json_logs, "logging initialized");
    }
    Ok(())
}
