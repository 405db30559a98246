//! Racelab server binary
//!
//! Serves the three request-state demo endpoints over HTTP.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use racelab_server::{logging, Server, ServerConfig};

#[derive(Parser)]
#[command(author, version, about = "Racelab request-state demo server", long_about = None)]
struct Cli {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path).await?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address '{bind}': {e}"))?;
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init_logging(&config.logging)?;

    Server::new(config).start().await
}
