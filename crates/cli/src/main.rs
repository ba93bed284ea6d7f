//! ProfitLens CLI - Profitability reports and cost-of-goods management.
//!
//! # Usage
//!
//! ```bash
//! # Profitability table for November
//! pl-cli report --sales sales.json --costs costs.yaml --start 2024-11-01 --end 2024-11-30
//!
//! # Same data as JSON
//! pl-cli report --sales sales.json --format json
//!
//! # Improvement suggestions for flagged products
//! pl-cli suggest --sales page-1.json --sales page-2.json --costs costs.yaml
//!
//! # Enter, remove and list unit costs
//! pl-cli costs set costs.yaml B0EXAMPLE1 4.25
//! pl-cli costs remove costs.yaml B0EXAMPLE1
//! pl-cli costs list costs.yaml
//! ```
//!
//! # Commands
//!
//! - `report` - Print product rows and a summary
//! - `suggest` - Print suggestions for `warn` and `bad` products
//! - `costs` - Manage the cost-of-goods file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::report::ReportArgs;
use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "pl-cli")]
#[command(author, version, about = "ProfitLens profitability tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the profitability table
    Report(ReportArgs),
    /// Print improvement suggestions
    Suggest(ReportArgs),
    /// Manage cost of goods
    Costs {
        #[command(subcommand)]
        action: CostsAction,
    },
}

#[derive(Subcommand)]
enum CostsAction {
    /// Enter or replace the unit cost for an ASIN
    Set {
        /// Cost-of-goods file (created if missing)
        file: PathBuf,
        /// Product ASIN
        asin: String,
        /// Cost per unit
        unit_cost: String,
    },
    /// Remove the unit cost for an ASIN
    Remove {
        /// Cost-of-goods file
        file: PathBuf,
        /// Product ASIN
        asin: String,
    },
    /// List entered unit costs
    List {
        /// Cost-of-goods file
        file: PathBuf,
    },
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for the CLI if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "profitlens_cli=info,profitlens_core=warn".into());

    // Logs go to stderr so stdout carries only the report
    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = CliConfig::from_env();

    init_tracing(config.as_ref().map_or(LogFormat::default(), |c| c.log_format));

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Report(args) => commands::report::report(&args, config).await?,
        Commands::Suggest(args) => commands::report::suggest(&args, config).await?,
        Commands::Costs { action } => match action {
            CostsAction::Set {
                file,
                asin,
                unit_cost,
            } => commands::costs::set(&file, &asin, &unit_cost).await?,
            CostsAction::Remove { file, asin } => commands::costs::remove(&file, &asin).await?,
            CostsAction::List { file } => commands::costs::list(&file, config.currency).await?,
        },
    }
    Ok(())
}
