//! Loading report inputs from disk.

use std::path::{Path, PathBuf};

use profitlens_core::sources::collect_records;
use profitlens_core::{Catalog, CostError, CostOfGoods, DateRange, DateRangeError, SalesPayload, SalesRecord};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid date range: {0}")]
    DateRange(#[from] DateRangeError),
    #[error("--start and --end must be given together")]
    IncompleteRange,
    #[error("Invalid unit cost: {0}")]
    InvalidUnitCost(String),
    #[error(transparent)]
    Cost(#[from] CostError),
    #[error("Failed to encode output: {0}")]
    Encode(String),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

async fn read(path: &Path) -> Result<String, CommandError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Load and normalize every sales file.
///
/// # Errors
///
/// Returns an error if a file cannot be read or matches no known shape.
pub async fn sales(paths: &[PathBuf]) -> Result<Vec<SalesRecord>, CommandError> {
    let mut payloads = Vec::with_capacity(paths.len());
    for path in paths {
        let text = read(path).await?;
        let payload = SalesPayload::from_json(&text).map_err(|source| CommandError::Json {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), shape = payload.shape(), "Decoded sales payload");
        payloads.push(payload);
    }

    let records = collect_records(payloads);
    info!(files = paths.len(), records = records.len(), "Loaded sales records");
    Ok(records)
}

/// Load the cost-of-goods file. A missing file is an empty table.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub async fn costs(path: &Path) -> Result<CostOfGoods, CommandError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "No cost-of-goods file, starting empty");
        return Ok(CostOfGoods::new());
    }
    let text = read(path).await?;
    if text.trim().is_empty() {
        return Ok(CostOfGoods::new());
    }
    let costs: CostOfGoods = serde_yaml::from_str(&text).map_err(|source| CommandError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    info!(entries = costs.len(), "Loaded cost of goods");
    Ok(costs)
}

/// Load costs when a path was given.
///
/// # Errors
///
/// See [`costs`].
pub async fn optional_costs(path: Option<&Path>) -> Result<CostOfGoods, CommandError> {
    match path {
        Some(path) => costs(path).await,
        None => Ok(CostOfGoods::new()),
    }
}

/// Load the product catalog (a JSON list of entries) when a path was given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn catalog(path: Option<&Path>) -> Result<Catalog, CommandError> {
    let Some(path) = path else {
        return Ok(Catalog::new());
    };
    let text = read(path).await?;
    let catalog: Catalog = serde_json::from_str(&text).map_err(|source| CommandError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!(entries = catalog.len(), "Loaded product catalog");
    Ok(catalog)
}

/// Persist the cost-of-goods table as YAML.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub async fn save_costs(path: &Path, costs: &CostOfGoods) -> Result<(), CommandError> {
    let text = serde_yaml::to_string(costs).map_err(|e| CommandError::Encode(e.to_string()))?;
    tokio::fs::write(path, text)
        .await
        .map_err(|source| CommandError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Build the optional date range from `--start`/`--end`.
///
/// # Errors
///
/// Returns an error if only one bound is given or a bound is invalid.
pub fn date_range(start: Option<&str>, end: Option<&str>) -> Result<Option<DateRange>, CommandError> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => Ok(Some(DateRange::parse(start, end)?)),
        _ => Err(CommandError::IncompleteRange),
    }
}
