mod analyze;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dpa-cli")]
#[command(about = "Digital presence analysis: score a website and print a CRM-ready report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a site, gather search and profile signals, and print the report
    Analyze {
        /// Website URL; bare hosts get `https://`
        url: String,
        /// Instagram handle (`@name`) or profile URL
        #[arg(long)]
        instagram: Option<String>,
        /// Skip the search presence queries
        #[arg(long)]
        no_search: bool,
        /// Print the full analysis as JSON instead of CRM text
        #[arg(long)]
        json: bool,
    },
    /// Score a saved attribute record without fetching anything
    Score {
        /// Path to an attribute record JSON file
        record: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            url,
            instagram,
            no_search,
            json,
        } => {
            let config = dpa_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            analyze::run_analyze(
                &config,
                &analyze::AnalyzeArgs {
                    url,
                    instagram,
                    include_search: !no_search,
                    json,
                },
            )
            .await
        }
        Commands::Score { record } => {
            init_tracing("warn")?;
            analyze::run_score(&record)
        }
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests;
