mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dining")]
#[command(about = "Dining Cryptographers - anonymous broadcast simulation")]
#[command(version)]
struct Cli {
    /// JSON config file with table defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output, including private diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the protocol once and narrate it
    Run {
        #[command(flatten)]
        table: commands::TableArgs,
        /// Print the run transcript as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the protocol many times and summarise the outcomes
    Simulate {
        #[command(flatten)]
        table: commands::TableArgs,
        /// Number of independent runs
        #[arg(short, long, default_value_t = 1000)]
        rounds: usize,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "dining={},dining_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Run { table, json } => {
                commands::run_once(table.apply(config.table), json).await
            }
            Commands::Simulate {
                table,
                rounds,
                json,
            } => commands::run_simulation(table.apply(config.table), rounds, json).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
