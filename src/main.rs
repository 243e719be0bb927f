use backsync::config::Cli;
use backsync::{commands, Config, SyncError};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli).map_err(explain)?;

    let result = if config.watch {
        commands::watch::run(&config).map(drop)
    } else {
        commands::sync::run(&config).map(drop)
    };

    result.map_err(explain)
}

/// Fatal startup errors carry their own operator hint; anything else keeps
/// its error chain.
fn explain(err: SyncError) -> anyhow::Error {
    if err.is_fatal() {
        anyhow::anyhow!(commands::format_fatal(&err))
    } else {
        anyhow::Error::new(err).context("backsync stopped unexpectedly")
    }
}
