//! Profitability health classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Health of a product row, derived from its profit margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Margin at or above the warning threshold.
    #[default]
    Good,
    /// Non-negative margin below the warning threshold.
    Warn,
    /// Negative margin.
    Bad,
}

impl HealthStatus {
    /// Classify a margin percentage.
    ///
    /// `bad` below zero, `warn` from zero up to (not including)
    /// `warn_margin`, `good` otherwise.
    #[must_use]
    pub fn from_margin(margin: Decimal, warn_margin: Decimal) -> Self {
        if margin < Decimal::ZERO {
            Self::Bad
        } else if margin < warn_margin {
            Self::Warn
        } else {
            Self::Good
        }
    }

    /// Whether the row should get improvement suggestions.
    #[must_use]
    pub const fn needs_attention(&self) -> bool {
        matches!(self, Self::Warn | Self::Bad)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warn => write!(f, "warn"),
            Self::Bad => write!(f, "bad"),
        }
    }
}

impl std::str::FromStr for HealthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Self::Good),
            "warn" => Ok(Self::Warn),
            "bad" => Ok(Self::Bad),
            _ => Err(format!("invalid health status: {s}")),
        }
    }
}
