//! Cost-of-goods entry, persisted as a YAML map of ASIN to unit cost.

use std::io::Write;
use std::path::Path;

use profitlens_core::{CostOfGoods, CurrencyCode, Money, parse_decimal};
use tracing::{info, warn};

use super::load::{self, CommandError};

/// Set the unit cost for an ASIN.
///
/// # Errors
///
/// Returns an error if the cost is not a non-negative number, the ASIN is
/// invalid, or the file cannot be read or written.
pub async fn set(path: &Path, asin: &str, unit_cost: &str) -> Result<(), CommandError> {
    let value = parse_decimal(unit_cost).ok_or_else(|| CommandError::InvalidUnitCost(unit_cost.to_string()))?;

    let mut costs = load::costs(path).await?;
    let previous = costs.set(asin, value)?;
    load::save_costs(path, &costs).await?;

    info!(asin = %asin.trim(), unit_cost = %value, ?previous, "Saved cost of goods");
    Ok(())
}

/// Remove an ASIN's unit cost.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub async fn remove(path: &Path, asin: &str) -> Result<(), CommandError> {
    let mut costs = load::costs(path).await?;
    if costs.remove(asin).is_none() {
        warn!(asin = %asin.trim(), "No cost of goods entered for ASIN");
        return Ok(());
    }
    load::save_costs(path, &costs).await?;
    info!(asin = %asin.trim(), "Removed cost of goods");
    Ok(())
}

/// Print every entered unit cost.
///
/// # Errors
///
/// Returns an error if the file cannot be read or output cannot be written.
pub async fn list(path: &Path, currency: CurrencyCode) -> Result<(), CommandError> {
    let costs = load::costs(path).await?;
    let mut out = std::io::stdout().lock();
    write_costs(&mut out, &costs, currency)?;
    Ok(())
}

fn write_costs<W: Write>(out: &mut W, costs: &CostOfGoods, currency: CurrencyCode) -> std::io::Result<()> {
    if costs.is_empty() {
        writeln!(out, "No cost of goods entered.")?;
        return Ok(());
    }
    for (asin, unit_cost) in costs.iter() {
        writeln!(out, "{:<14} {:>12}", asin.as_str(), Money::new(*unit_cost, currency).to_string())?;
    }
    Ok(())
}
