mod commands;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use request_api::{Client, ClientConfig, Method};

use crate::commands::send::SendArgs;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "request")]
#[command(about = "Send HTTP requests through a pre-configured client")]
struct Cli {
    /// Output format: json or text
    #[arg(long, default_value = "json", global = true)]
    output: String,

    /// Base URL prepended to relative request URLs (overrides REQUEST_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in milliseconds (overrides REQUEST_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Do not store or send cookies
    #[arg(long, global = true)]
    no_credentials: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a GET request
    Get(SendArgs),
    /// Send a POST request
    Post(SendArgs),
    /// Send a PUT request
    Put(SendArgs),
    /// Send a PATCH request
    Patch(SendArgs),
    /// Send a DELETE request
    Delete(SendArgs),
    /// Print the effective client configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("request_api=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "text" => OutputFormat::Text,
        _ => OutputFormat::Json,
    };

    let config = apply_overrides(ClientConfig::from_env()?, &cli)?;

    let (method, args) = match &cli.command {
        Commands::Get(args) => (Method::GET, args),
        Commands::Post(args) => (Method::POST, args),
        Commands::Put(args) => (Method::PUT, args),
        Commands::Patch(args) => (Method::PATCH, args),
        Commands::Delete(args) => (Method::DELETE, args),
        Commands::Config => {
            commands::config::run(&config, &format);
            return Ok(());
        }
    };

    let client = Client::new(config)?;
    commands::send::run(method, args, &client, &format).await?;

    Ok(())
}

/// Layers command-line flags over the environment config.
fn apply_overrides(config: ClientConfig, cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.base_url {
        Some(base_url) => ClientConfig::new(base_url, config.timeout())?
            .with_credentials(config.sends_credentials()),
        None => config,
    };
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms))?;
    }
    if cli.no_credentials {
        config = config.with_credentials(false);
    }
    Ok(config)
}
