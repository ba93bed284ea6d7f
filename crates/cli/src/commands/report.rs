//! `report` and `suggest` commands.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use profitlens_core::{
    CurrencyCode, DateRange, Money, ProductRow, ProfitReport, ProfitSummary, ReportInputs, Suggestion,
};
use tracing::info;

use super::load::{self, CommandError};
use crate::config::CliConfig;

const NAME_WIDTH: usize = 32;

/// Output format for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Inputs shared by `report` and `suggest`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Sales payload file (JSON). Repeat for multiple pages or sources.
    #[arg(short, long = "sales", required = true)]
    pub sales: Vec<PathBuf>,

    /// Cost-of-goods file (YAML map of ASIN to unit cost)
    #[arg(short, long)]
    pub costs: Option<PathBuf>,

    /// Product catalog file (JSON list)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

async fn build(args: &ReportArgs, config: &CliConfig) -> Result<ProfitReport, CommandError> {
    let range = load::date_range(args.start.as_deref(), args.end.as_deref())?;
    let records = load::sales(&args.sales).await?;
    let costs = load::optional_costs(args.costs.as_deref()).await?;
    let catalog = load::catalog(args.catalog.as_deref()).await?;

    let inputs = ReportInputs {
        records: &records,
        costs: &costs,
        catalog: &catalog,
        range: range.as_ref(),
    };
    let report = ProfitReport::build(&inputs, &config.thresholds);
    info!(
        rows = report.rows.len(),
        flagged = report.summary.needing_attention(),
        "Built profitability report"
    );
    Ok(report)
}

/// Print the profitability table and summary.
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded or output cannot be written.
pub async fn report(args: &ReportArgs, config: &CliConfig) -> Result<(), CommandError> {
    let report = build(args, config).await?;
    let mut out = std::io::stdout().lock();
    match args.format {
        OutputFormat::Json => write_json(&mut out, &report)?,
        OutputFormat::Table => {
            if let Some(range) = &report.range {
                write_range(&mut out, range)?;
            }
            write_table(&mut out, &report.rows, config.currency)?;
            writeln!(out)?;
            write_summary(&mut out, &report.summary, config.currency)?;
        }
    }
    Ok(())
}

/// Print improvement suggestions only.
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded or output cannot be written.
pub async fn suggest(args: &ReportArgs, config: &CliConfig) -> Result<(), CommandError> {
    let report = build(args, config).await?;
    let mut out = std::io::stdout().lock();
    match args.format {
        OutputFormat::Json => write_json(&mut out, &report.suggestions)?,
        OutputFormat::Table => write_suggestions(&mut out, &report.suggestions)?,
    }
    Ok(())
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CommandError> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(|e| CommandError::Encode(e.to_string()))?;
    writeln!(out)?;
    Ok(())
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Write the reporting window above the table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_range<W: Write>(out: &mut W, range: &DateRange) -> std::io::Result<()> {
    let days = range.days();
    let unit = if days == 1 { "day" } else { "days" };
    writeln!(out, "Range: {range} ({days} {unit})")?;
    writeln!(out)
}

/// Write rows as an aligned table, children indented under their parent.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_table<W: Write>(out: &mut W, rows: &[ProductRow], fallback: CurrencyCode) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<14} {:<NAME_WIDTH$} {:>7} {:>12} {:>12} {:>10} {:>10} {:>12} {:>12} {:>8}  {}",
        "ASIN", "Name", "Units", "Sales", "COGS", "Ad spend", "Fees", "Gross", "Net", "Margin", "Health"
    )?;

    for row in rows.iter().flat_map(ProductRow::flatten) {
        let currency = row.currency_code.unwrap_or(fallback);
        let money = |amount| Money::new(amount, currency).to_string();
        let asin = if row.is_child() {
            format!("  {}", row.asin)
        } else if row.is_expandable {
            format!("+ {}", row.asin)
        } else {
            row.asin.to_string()
        };
        writeln!(
            out,
            "{:<14} {:<NAME_WIDTH$} {:>7} {:>12} {:>12} {:>10} {:>10} {:>12} {:>12} {:>7}%  {}",
            asin,
            truncate(&row.name, NAME_WIDTH),
            row.units,
            money(row.sales),
            money(row.total_cost),
            money(row.ad_spend),
            money(row.fees),
            money(row.gross_profit),
            money(row.net_profit),
            format!("{:.2}", row.profit_margin),
            row.health_status,
        )?;
    }
    Ok(())
}

/// Write the report totals.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary<W: Write>(out: &mut W, summary: &ProfitSummary, fallback: CurrencyCode) -> std::io::Result<()> {
    let currency = summary.currency_code.unwrap_or(fallback);
    let money = |amount| Money::new(amount, currency).to_string();
    writeln!(out, "Products:     {}", summary.products)?;
    writeln!(out, "Units:        {}", summary.units)?;
    writeln!(out, "Sales:        {}", money(summary.sales))?;
    writeln!(out, "Ad spend:     {}", money(summary.ad_spend))?;
    writeln!(out, "Fees:         {}", money(summary.fees))?;
    writeln!(out, "Gross profit: {}", money(summary.gross_profit))?;
    writeln!(out, "COGS:         {}", money(summary.total_cost))?;
    writeln!(out, "Net profit:   {}", money(summary.net_profit))?;
    writeln!(out, "Margin:       {:.2}%", summary.profit_margin)?;
    writeln!(
        out,
        "Health:       {} good, {} warn, {} bad",
        summary.good, summary.warn, summary.bad
    )?;
    if summary.missing_costs > 0 {
        writeln!(
            out,
            "Note: {} selling ASIN(s) have no cost of goods entered",
            summary.missing_costs
        )?;
    }
    Ok(())
}

/// Write suggestions grouped per product.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_suggestions<W: Write>(out: &mut W, suggestions: &[Suggestion]) -> std::io::Result<()> {
    if suggestions.is_empty() {
        writeln!(out, "No products need attention.")?;
        return Ok(());
    }
    for suggestion in suggestions {
        writeln!(
            out,
            "{} {} [{}, {:.2}%]",
            suggestion.asin, suggestion.name, suggestion.health_status, suggestion.profit_margin
        )?;
        for message in &suggestion.messages {
            writeln!(out, "  - {message}")?;
        }
    }
    Ok(())
}
