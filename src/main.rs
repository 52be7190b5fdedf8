use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use legalchat::connector::api::{Container, ContainerConfig, Router};
use legalchat::connector::web::{WebServer, WebServerConfig};
use legalchat::Commands;

#[derive(Parser)]
#[command(name = "legalchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer with a canned offline model instead of calling Gemini
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Loaded before the subscriber so RUST_LOG may live in .env too.
    let env_file = ContainerConfig::load_env_file(".env");

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match env_file {
        Ok(true) => debug!("Loaded environment from .env"),
        Ok(false) => debug!("No .env file found"),
        Err(e) => return Err(e.into()),
    }

    let container = Arc::new(Container::new(ContainerConfig::from_env(cli.mock)));

    if let Commands::Serve {
        port,
        public,
        session_ttl_minutes,
    } = cli.command
    {
        let config = WebServerConfig::new(port, public)
            .with_session_ttl(Duration::from_secs(session_ttl_minutes * 60));
        let server = WebServer::new(config, container);
        return server.start().await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
