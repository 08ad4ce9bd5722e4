// src/main.rs

use clap::Parser;
use std::io::IsTerminal;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use leaderboard_bot::cli::{self, Cli};
use leaderboard_bot::BotResult;

#[tokio::main]
async fn main() -> BotResult<()> {
    // Load .env before the filter is built so RUST_LOG can live there too.
    let dotenv = dotenvy::dotenv();

    let ansi = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    tracing_subscriber::fmt()
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("leaderboard_bot=info,tower_http=info,warn")),
        )
        .init();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to load .env"),
    }

    cli::run(Cli::parse()).await
}
