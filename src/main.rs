use anyhow::Result;
use clap::Parser;
use hookpin::Cli;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "hookpin=debug" } else { "hookpin=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("HOOKPIN_LOG").unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli.run().await
}
