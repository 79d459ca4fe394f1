//! Command line companion for the encryption client.
//!
//! Inspects configuration, checks key endpoints and converts amounts. No
//! native engine is linked into this binary, so encryption commands are not
//! offered.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use fhe_analytics_client::config::loader::load_config;
use fhe_analytics_client::config::{ClientConfig, NetworkEnvironment};
use fhe_analytics_client::encryption::{from_base_units, to_base_units};
use fhe_analytics_client::keys::{fetch_keys_with_retry, HttpKeyFetcher};
use fhe_analytics_client::native::UnavailableEngine;
use fhe_analytics_client::observability::logging::init_logging;
use fhe_analytics_client::EncryptionClient;

#[derive(Parser)]
#[command(name = "fhe-client")]
#[command(about = "Inspect and exercise the FHE analytics encryption client", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Add a preset network (testnet, arbitrum-sepolia, mainnet).
    #[arg(short, long)]
    network: Option<NetworkEnvironment>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show engine availability and configured chains
    Status,
    /// Fetch network keys for a configured chain
    FetchKeys {
        #[arg(long)]
        chain_id: u64,
    },
    /// Convert a display amount to base units
    ToBaseUnits { value: String },
    /// Convert base units to a display amount
    FromBaseUnits { amount: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };

    init_logging(&config.observability);

    if let Some(network) = cli.network {
        let preset = network.config();
        if !config.networks.iter().any(|n| n.chain_id == preset.chain_id) {
            config.networks.push(preset);
        }
    }

    match cli.command {
        Commands::Status => {
            let client = EncryptionClient::from_config(&config, Arc::new(UnavailableEngine::default()))?;
            println!("{}", serde_json::to_string_pretty(&client.status())?);
        }
        Commands::FetchKeys { chain_id } => {
            let network = config
                .networks
                .iter()
                .find(|n| n.chain_id == chain_id)
                .ok_or_else(|| format!("chain {} is not configured", chain_id))?;

            let fetcher = HttpKeyFetcher::new(&config.timeouts)?;
            let keys = fetch_keys_with_retry(&fetcher, network, &config.retries).await?;

            let summary = serde_json::json!({
                "chain_id": chain_id,
                "keys_url": network.keys_url(),
                "public_key_len": keys.public_key.len(),
                "crs_len": keys.crs.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::ToBaseUnits { value } => {
            println!("{}", to_base_units(&value)?);
        }
        Commands::FromBaseUnits { amount } => {
            println!("{}", from_base_units(amount));
        }
    }

    Ok(())
}
