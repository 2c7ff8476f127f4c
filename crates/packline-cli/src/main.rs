mod cli;
mod commands;
mod display;
mod seed;

use anyhow::Result;
use clap::Parser;
use packline_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    match cli.command {
        cli::Commands::Demo(args) => commands::demo::handle(args, &config),
        cli::Commands::Session(args) => commands::session::handle(args, &config).await,
    }
}
