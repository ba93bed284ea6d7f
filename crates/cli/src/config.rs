//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PROFITLENS_LOG_FORMAT` - `text` (default) or `json`
//! - `PROFITLENS_WARN_MARGIN` - Margin percent below which a row is `warn` (default: 10)
//! - `PROFITLENS_SUPPLIER_COST_RATIO` - Cost-to-sales percent that triggers a
//!   supplier note (default: 50, must be 0-100)
//! - `PROFITLENS_CURRENCY` - Display currency for records without one (default: USD)
//! - `RUST_LOG` - Log filter (default: `profitlens_cli=info,profitlens_core=warn`)

use std::str::FromStr;

use profitlens_core::{CurrencyCode, HealthThresholds};
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_format: LogFormat,
    pub thresholds: HealthThresholds,
    /// Currency used when the sales data does not name one.
    pub currency: CurrencyCode,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        dotenvy::dotenv().ok();
        Self::from_lookup(get_optional_env)
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup("PROFITLENS_LOG_FORMAT") {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("PROFITLENS_LOG_FORMAT".to_string(), e))?,
            None => LogFormat::default(),
        };

        let defaults = HealthThresholds::default();
        let warn_margin = get_percent(&lookup, "PROFITLENS_WARN_MARGIN", defaults.warn_margin)?;
        let supplier_cost_ratio = get_percent(
            &lookup,
            "PROFITLENS_SUPPLIER_COST_RATIO",
            defaults.supplier_cost_ratio,
        )?;
        if supplier_cost_ratio > Decimal::ONE_HUNDRED {
            return Err(ConfigError::InvalidEnvVar(
                "PROFITLENS_SUPPLIER_COST_RATIO".to_string(),
                "must be between 0 and 100".to_string(),
            ));
        }

        let currency = match lookup("PROFITLENS_CURRENCY") {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("PROFITLENS_CURRENCY".to_string(), e))?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            log_format,
            thresholds: HealthThresholds {
                warn_margin,
                supplier_cost_ratio,
            },
            currency,
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse a non-negative percentage, falling back to `default` when unset.
fn get_percent<F>(lookup: &F, key: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(value)
}
