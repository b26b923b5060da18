//! proxycheck CLI.

use anyhow::Result;
use clap::Parser;
use proxycheck_client::{Client, Options};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "proxycheck")]
#[command(about = "Check IP addresses against proxycheck.io for proxies, VPNs and risk")]
#[command(version)]
struct Args {
    /// Addresses to check
    #[arg(required_unless_present_any = ["print_config", "validate"])]
    addresses: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API key (overrides the configuration file)
    #[arg(long, env = "PROXYCHECK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API base address (overrides the configuration file)
    #[arg(long, value_name = "URL")]
    api_address: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, default_value = "warn")]
    log_level: String,

    /// Print example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        println!("{}", Options::example());
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut options = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            Options::load(path)?
        }
        None => Options::default(),
    };
    if args.api_key.is_some() {
        options.api_key = args.api_key;
    }
    if args.api_address.is_some() {
        options.api_address = args.api_address;
    }
    options.validate()?;

    if args.validate {
        info!("Configuration is valid");
        return Ok(());
    }

    let client = Client::new(options)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling lookup");
            on_interrupt.cancel();
        }
    });

    let response = client.lookup(args.addresses.as_slice(), &cancel).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
